#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod error;
pub mod sink;
pub mod types;

pub use error::*;
pub use sink::*;
pub use types::*;
