mod client;
mod loader;

pub use client::DrinksClient;
pub use loader::{DirectoryLoader, DirectorySource, LoadStatus, LoadTicket};
