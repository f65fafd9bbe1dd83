pub mod config;
pub mod dispatch;
pub mod extraction;
pub mod registry;

pub use reqwest;
pub use serde_json;
