pub mod config;
pub mod grading_config;
pub mod http;
pub mod languages;
