pub mod avatar;
pub mod models;
