//! Wire types shared by the REST server and the dashboard client
//!
//! Pure data only; each side wraps these with its own HTTP framework.

pub mod types;

pub use types::{Envelope, ERROR_KIND_HEADER};
