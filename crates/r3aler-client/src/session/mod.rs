//! Chat session controller.
//!
//! A `SessionController` owns the auth token lifecycle and the
//! conversation log, drives the `AssistantState` machine, and dispatches
//! chat requests one at a time with timeout, retry, and cancellation.

mod auth;
mod chat;
mod controller;
mod types;
mod voice;


pub use controller::SessionController;
pub use types::{ControllerOptions, Session, TokenValidator, TrustStoredToken};
