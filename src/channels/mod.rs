//! Message I/O around the validation engine.

pub mod cli;
pub mod whatsapp;

pub use cli::CliChannel;
pub use whatsapp::{LogOnlyOutbound, Outbound, WhatsAppClient};
