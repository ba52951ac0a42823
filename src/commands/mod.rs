pub mod avatar;
pub mod instances;
pub mod logging;
pub mod settings;
