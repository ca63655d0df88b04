pub mod api;
pub mod config;
pub mod error;
pub mod probe;

pub use error::{Error, Result};
