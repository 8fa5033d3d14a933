//! Result type alias for ehrlink

use super::errors::EhrError;

/// Result type alias for ehrlink operations
///
/// # Examples
///
/// ```
/// use ehrlink::domain::result::Result;
/// use ehrlink::domain::errors::EhrError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EhrError::Conversion("missing birthDate".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EhrError>;
