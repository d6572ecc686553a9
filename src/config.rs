//! Relay Configuration
//!
//! Groups the server binding, CORS policy, and upstream client settings.
//! Defaults reproduce the deployed service; every field can be overridden
//! from the CLI or environment (see `main.rs`).

use crate::openrouter::OpenRouterConfig;

/// Complete relay configuration
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// HTTP server binding
    pub server: ServerConfig,
    /// CORS policy
    pub cors: CorsConfig,
    /// OpenRouter client settings
    pub upstream: OpenRouterConfig,
}

/// HTTP server binding configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_body_bytes: 100 * 1024,
        }
    }
}

/// CORS policy configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins allowed to call the API
    pub allowed_origins: Vec<String>,
    /// Whether browsers may send credentials with cross-origin requests
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "https://wikiai-f51a1.web.app".to_string(),
                "http://localhost:5500".to_string(),
            ],
            allow_credentials: true,
        }
    }
}
