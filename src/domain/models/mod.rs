pub mod config;
pub mod instance;
