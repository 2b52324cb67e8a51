//! Trigger ownership reconciliation
//!
//! Pipelines may delegate trigger execution to a managed service account via
//! each trigger's `runAsUser` field. When the pipeline's configured service
//! account changes, triggers must not keep a stale delegated identity, and
//! whether the account is usable at all depends on the pipeline's `roles`.

use capstan_core::PipelineDocument;
use serde_json::Value;

/// Suffix of a service account managed for a single pipeline
pub const SERVICE_ACCOUNT_SUFFIX: &str = "@managed-service-account";

/// Suffix of a service account shared across an application's pipelines
pub const SHARED_SERVICE_ACCOUNT_SUFFIX: &str = "@shared-managed-service-account";

/// Normalizes `runAsUser` across the pipeline's triggers
///
/// - With no roles configured, the service account has nothing backing it:
///   triggers currently delegated to it lose their `runAsUser` entirely.
/// - With roles configured, triggers that are unowned or owned by a managed
///   account are re-pointed at `service_account`. Triggers owned by an
///   unrelated identity are left untouched.
///
/// No-op when `service_account` is empty or the pipeline has no triggers.
pub fn update_service_account(pipeline: &mut PipelineDocument, service_account: &str) {
    if service_account.is_empty() {
        return;
    }

    let has_roles = pipeline.has_roles();

    let Some(triggers) = pipeline.triggers_mut() else {
        return;
    };

    if !has_roles {
        for trigger in triggers.iter_mut() {
            if let Some(record) = trigger.as_object_mut() {
                // Equality-conditional removal: only the stale delegation to
                // this exact account is dropped.
                if record.get("runAsUser").and_then(Value::as_str) == Some(service_account) {
                    record.remove("runAsUser");
                }
            }
        }
        return;
    }

    for trigger in triggers.iter_mut() {
        if let Some(record) = trigger.as_object_mut() {
            let run_as_user = record.get("runAsUser").and_then(Value::as_str);
            if run_as_user.is_none_or(is_managed_service_account) {
                record.insert(
                    "runAsUser".to_string(),
                    Value::String(service_account.to_string()),
                );
            }
        }
    }
}

/// Whether an identity string denotes a system-managed service account
fn is_managed_service_account(run_as_user: &str) -> bool {
    run_as_user.ends_with(SERVICE_ACCOUNT_SUFFIX)
        || run_as_user.ends_with(SHARED_SERVICE_ACCOUNT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> PipelineDocument {
        match value {
            serde_json::Value::Object(fields) => PipelineDocument::new(fields),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_no_roles_strips_matching_run_as_user() {
        let mut doc = document(json!({
            "triggers": [
                {"type": "cron", "runAsUser": "svc@managed-service-account"},
                {"type": "webhook", "runAsUser": "someone-else"},
            ],
        }));

        update_service_account(&mut doc, "svc@managed-service-account");

        let triggers = doc.triggers_mut().unwrap();
        assert!(!triggers[0].as_object().unwrap().contains_key("runAsUser"));
        assert_eq!(triggers[1]["runAsUser"], json!("someone-else"));
    }

    #[test]
    fn test_empty_roles_list_behaves_like_no_roles() {
        let mut doc = document(json!({
            "roles": [],
            "triggers": [{"runAsUser": "svc@managed-service-account"}],
        }));

        update_service_account(&mut doc, "svc@managed-service-account");

        let triggers = doc.triggers_mut().unwrap();
        assert!(!triggers[0].as_object().unwrap().contains_key("runAsUser"));
    }

    #[test]
    fn test_roles_assign_account_to_unowned_triggers() {
        let mut doc = document(json!({
            "roles": ["admin"],
            "triggers": [
                {"type": "cron"},
                {"type": "webhook", "runAsUser": null},
            ],
        }));

        update_service_account(&mut doc, "svc@managed-service-account");

        let triggers = doc.triggers_mut().unwrap();
        assert_eq!(triggers[0]["runAsUser"], json!("svc@managed-service-account"));
        assert_eq!(triggers[1]["runAsUser"], json!("svc@managed-service-account"));
    }

    #[test]
    fn test_roles_replace_managed_owners_only() {
        let mut doc = document(json!({
            "roles": ["admin"],
            "triggers": [
                {"runAsUser": "old@managed-service-account"},
                {"runAsUser": "team@shared-managed-service-account"},
                {"runAsUser": "human@example.com"},
            ],
        }));

        update_service_account(&mut doc, "new@managed-service-account");

        let triggers = doc.triggers_mut().unwrap();
        assert_eq!(triggers[0]["runAsUser"], json!("new@managed-service-account"));
        assert_eq!(triggers[1]["runAsUser"], json!("new@managed-service-account"));
        assert_eq!(triggers[2]["runAsUser"], json!("human@example.com"));
    }

    #[test]
    fn test_empty_account_is_a_no_op() {
        let mut doc = document(json!({
            "roles": ["admin"],
            "triggers": [{"runAsUser": "old@managed-service-account"}],
        }));

        update_service_account(&mut doc, "");

        let triggers = doc.triggers_mut().unwrap();
        assert_eq!(triggers[0]["runAsUser"], json!("old@managed-service-account"));
    }

    #[test]
    fn test_pipeline_without_triggers_is_a_no_op() {
        let mut doc = document(json!({"roles": ["admin"]}));
        update_service_account(&mut doc, "svc@managed-service-account");
        assert!(!doc.contains_key("triggers"));
    }
}
