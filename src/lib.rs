pub mod archive;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod sanitize;
