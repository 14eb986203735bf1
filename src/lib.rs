pub mod analyzers;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod prompt;
pub mod session;
pub mod trips;
pub mod viewer;
