pub mod config;
pub mod error;
pub mod google;
pub mod model;
pub mod report;
pub mod services;
pub mod sync;
pub mod todoist;

pub use error::{Error, Result};
