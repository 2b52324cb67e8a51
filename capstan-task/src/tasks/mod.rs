//! Workflow tasks

mod save_pipeline;

pub use save_pipeline::SavePipelineTask;
