pub mod ci;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod dedup;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod gate;
pub mod healthcheck;
pub mod reporting;
pub mod summary;
pub mod types;
