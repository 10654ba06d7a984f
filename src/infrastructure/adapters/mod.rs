//! Platform connections

pub mod console;
pub mod discord;

pub use console::ConsoleConnection;
pub use discord::DiscordConnection;
