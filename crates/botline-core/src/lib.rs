//! Conversation logic for the Botline connector.
//!
//! This crate defines the transport port implemented by the
//! infrastructure layer and the conversation flow built on top of it:
//! session lifecycle, endpoint discovery, reply normalization, and the
//! fallback boundary that turns transport failures into a canned reply.
//! Depends only on `botline-types` -- never on HTTP or other I/O crates.

pub mod client;
pub mod fallback;
pub mod normalize;
pub mod prober;
pub mod session;
pub mod transport;
