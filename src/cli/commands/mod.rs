//! CLI command implementations
//!
//! Every command returns its process exit code:
//! 0 success, 1 invalid request, 2 configuration error,
//! 3 upstream rejection, 4 connection error, 5 fatal error.

pub mod check;
pub mod init;
pub mod proxy;
pub mod submit;
pub mod templates;
pub mod validate;
