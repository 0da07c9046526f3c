// trilingo - trilingual community site gateway for the Gemini API

pub mod cli;
pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod gemini;
pub mod lang;
pub mod metrics;
pub mod models;
pub mod server;
pub mod utils;
