pub mod engine;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{Error, Result};
