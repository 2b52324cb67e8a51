//! Outcome classification
//!
//! Maps the store's answer to a save submission into a workflow
//! continuation signal.

use capstan_core::ExecutionStatus;

/// Classifies a save response status for the host engine
///
/// A failed save normally halts the workflow, but when several independent
/// pipelines are being saved in one logical operation a single failure must
/// not abort the rest of the batch.
pub fn classify(status_code: u16, saving_multiple: bool) -> ExecutionStatus {
    if status_code == 200 {
        ExecutionStatus::Succeeded
    } else if saving_multiple {
        ExecutionStatus::FailedContinue
    } else {
        ExecutionStatus::Terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_is_succeeded_regardless_of_batch_mode() {
        assert_eq!(classify(200, false), ExecutionStatus::Succeeded);
        assert_eq!(classify(200, true), ExecutionStatus::Succeeded);
    }

    #[test]
    fn test_failure_in_batch_mode_continues() {
        assert_eq!(classify(500, true), ExecutionStatus::FailedContinue);
        assert_eq!(classify(400, true), ExecutionStatus::FailedContinue);
    }

    #[test]
    fn test_failure_outside_batch_mode_is_terminal() {
        assert_eq!(classify(500, false), ExecutionStatus::Terminal);
        assert_eq!(classify(404, false), ExecutionStatus::Terminal);
    }

    #[test]
    fn test_other_success_statuses_are_not_succeeded() {
        // The store signals success with 200 specifically; a 201 or 204
        // means the contract changed and should not pass silently.
        assert_eq!(classify(201, false), ExecutionStatus::Terminal);
        assert_eq!(classify(204, true), ExecutionStatus::FailedContinue);
    }
}
