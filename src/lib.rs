//! Introduction validator: checks five-sentence introductions and relays
//! the verdict to chat channels.

pub mod channels;
pub mod config;
pub mod error;
pub mod relay;
pub mod validation;
