// Pipeline processing: validation gates, deduplication and batch cleaning

pub mod cleaning;
pub mod dedup;
pub mod validators;
