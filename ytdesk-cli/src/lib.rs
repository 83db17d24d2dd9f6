//! ytdesk dashboard library
//!
//! The coordinator and its server backend, separated from the terminal front
//! end so they can be driven from tests.

pub mod action;
pub mod backend;
pub mod coordinator;
pub mod render;

pub use action::{ActionKind, ActionState, Outcome};
pub use backend::{DashboardBackend, HttpBackend};
pub use coordinator::Coordinator;
