pub mod pipeline;

pub use pipeline::{
    CycleOutcome, DiscoveryConfig, DiscoveryPipeline, PollContext, EMPTY_WARN_EVERY,
};
