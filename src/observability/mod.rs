// Observability: metric recording helpers (logging setup lives in crate::logging)

pub mod metrics;
