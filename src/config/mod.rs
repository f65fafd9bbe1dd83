pub mod constants;
pub mod lib;
pub mod models;
pub mod source;
pub mod validation;

pub use lib::{ConfigError, load_config};
