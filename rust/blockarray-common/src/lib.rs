//! Core definitions (error type and argument checks), relied upon by all blockarray-* crates.

pub mod error;
pub mod result;

pub use error::{Error, ErrorKind};
pub use result::Result;
