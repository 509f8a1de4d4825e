//! Domain error taxonomy and result alias.
//!
//! All fallible library operations return [`Result<T, ScrubError>`]:
//!
//! ```rust
//! use cvscrub::domain::{Result, ScrubError};
//!
//! fn example(text: &str) -> Result<()> {
//!     if text.is_empty() {
//!         return Err(ScrubError::Validation("empty document".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::{OracleError, ScrubError};
pub use result::Result;
