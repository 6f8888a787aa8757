pub mod clean_use_case;
pub mod collect_use_case;
pub mod ports;
pub mod run_use_case;
