pub mod api;
pub mod chain;
pub mod config;
pub mod error;
pub mod report;
pub mod snapshot;
