//! Shared domain types for Botline.
//!
//! This crate contains the data shapes exchanged with a hosted bot
//! backend and the error types for delivery failures: reply envelopes,
//! display messages, session identifiers, and connection settings.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod session;
