mod analysis_service_test;
pub mod common;
