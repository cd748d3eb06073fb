//! Wire models shared by handlers and repositories

pub mod message;

pub use message::Message;
