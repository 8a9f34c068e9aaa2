pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod http;
pub mod models;
pub mod render;
pub mod server;
pub mod shell;

#[cfg(test)]
pub(crate) mod testing;
