//! Repository implementations for database access
//!
//! Repositories borrow the pool and run one statement per call.
//! Conflicts are handled via ON CONFLICT (no check-then-insert).

pub mod messages;

pub use messages::{DbError, MessageRepo};
