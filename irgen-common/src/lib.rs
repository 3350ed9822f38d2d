//! irgen - Common Types and Utilities
//! 
//! This crate contains the error taxonomy and source location types
//! shared by the frontend, the code generator and the driver.

pub mod error;
pub mod source_loc;

pub use error::{GenError, Role};
pub use source_loc::{SourceLocation, SourceSpan};
