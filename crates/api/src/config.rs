/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Fixed prefix of synthesized briquette identifiers (default: `DWC`).
    pub briquette_id_prefix: String,
    /// Zero-padding width of the identifier counter (default: `3`).
    pub briquette_id_pad: usize,
    /// Rows per briquette when the upload does not specify one (default: `20`).
    pub default_group_size: usize,
    /// Maximum accepted upload size in bytes (default: 50 MiB).
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `BRIQUETTE_ID_PREFIX`  | `DWC`                      |
    /// | `BRIQUETTE_ID_PAD`     | `3`                        |
    /// | `DEFAULT_GROUP_SIZE`   | `20`                       |
    /// | `MAX_UPLOAD_BYTES`     | `52428800`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let briquette_id_prefix =
            std::env::var("BRIQUETTE_ID_PREFIX").unwrap_or_else(|_| "DWC".into());

        let briquette_id_pad: usize = std::env::var("BRIQUETTE_ID_PAD")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("BRIQUETTE_ID_PAD must be a valid usize");

        let default_group_size: usize = std::env::var("DEFAULT_GROUP_SIZE")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DEFAULT_GROUP_SIZE must be a valid usize");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (50 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            briquette_id_prefix,
            briquette_id_pad,
            default_group_size,
            max_upload_bytes,
        }
    }

    /// Identifier settings for new session registries.
    pub fn identifier_config(&self) -> briq_core::identifier::IdentifierConfig {
        briq_core::identifier::IdentifierConfig {
            prefix: self.briquette_id_prefix.clone(),
            pad: self.briquette_id_pad,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".into()],
            request_timeout_secs: 30,
            briquette_id_prefix: "DWC".into(),
            briquette_id_pad: 3,
            default_group_size: 20,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}
