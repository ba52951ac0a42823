pub mod avatar_service;
pub mod config_store;
pub mod instance_store;
pub mod state;
pub mod theme_service;
pub mod time_store;
