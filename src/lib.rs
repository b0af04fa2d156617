pub mod config;
pub mod llm;
pub mod logging;
pub mod quiz;
pub mod server;
