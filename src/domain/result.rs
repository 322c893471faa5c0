//! Result type alias for Receta
//!
//! This module provides a convenient Result type alias that uses RecetaError
//! as the error type.

use super::errors::RecetaError;

/// Result type alias for Receta operations
///
/// # Examples
///
/// ```
/// use receta::domain::result::Result;
/// use receta::domain::errors::RecetaError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RecetaError::Configuration("missing endpoint".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RecetaError>;
