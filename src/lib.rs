pub mod error;
pub mod graphs;
pub mod search;
pub mod storage;
pub mod utility;

pub use error::{Error, Result};
