//! Result type alias for cvscrub

use super::errors::ScrubError;

/// Result type alias for cvscrub operations
///
/// # Examples
///
/// ```
/// use cvscrub::domain::result::Result;
/// use cvscrub::domain::errors::ScrubError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ScrubError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ScrubError>;
