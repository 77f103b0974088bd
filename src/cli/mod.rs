//! Command workflows, decoupled from argument parsing

pub mod orchestration;

pub use orchestration::{run_announce, run_index, run_publish, PublishWorkflowArgs};
