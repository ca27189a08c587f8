pub mod api;
pub mod config;
pub mod deps;
pub mod dir_id;
pub mod engine;
pub mod error;
pub mod owners;
pub mod report;
pub mod source;
