//! Result type aliases

use crate::error::UdError;

/// Standard Result type for user directory operations
pub type UdResult<T> = Result<T, UdError>;
