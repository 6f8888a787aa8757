// Data processing pipeline: record cleaning and fallback generation

pub mod fallback;
pub mod processing;

pub use fallback::FallbackGenerator;
pub use processing::cleaning::{CleaningOutcome, CleaningPipeline, RejectionReason, RejectionStats};
