//! Pipeline components: context, walk, hashing workers, result writer, orchestrator.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod walk;
pub mod workers;
pub mod writer;

pub use context::{
    PipelineChannels, PipelineContext, PipelineTuning, ResultLine, create_pipeline_channels,
};
pub use error_handler::report_skipped_paths;
pub use orchestrator::{RunState, run_pipeline, setup_pipeline_context, verify_units};
pub use walk::{WalkOutcome, WalkReport, collect_units, run_walk_loop};
pub use workers::spawn_hash_workers;
pub use writer::{Destination, ResultWriter, WriteSummary};
