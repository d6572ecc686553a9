//! WikiAI Backend
//!
//! A thin HTTP relay that turns topic searches into AI-generated,
//! Wikipedia-style articles. A client POSTs a topic, the relay forwards a
//! fixed prompt template to the OpenRouter chat-completions API, and the
//! generated article comes back with light metadata.
//!
//! ## Module Structure
//!
//! - `config`: server, CORS, and upstream configuration
//! - `prompt`: the fixed article prompt template
//! - `openrouter`: chat-completions client and upstream error taxonomy
//! - `api`: REST handlers and the error translation table
//! - `server`: router assembly and process startup

pub mod api;
pub mod config;
pub mod openrouter;
pub mod prompt;
pub mod server;

pub use api::ApiState;
pub use config::RelayConfig;
pub use openrouter::{OpenRouterClient, OpenRouterConfig};
