use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// Everything except the mutation password has a default suitable for local
/// development. In production, override via environment variables.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded images are written to and served from.
    pub images_dir: PathBuf,
    /// Largest accepted request body, which bounds image uploads.
    pub max_upload_bytes: usize,
    /// Shared secret required by update and delete forms.
    pub mutation_password: String,
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
    /// | `IMAGES_DIR`           | `public/images`            |
    /// | `MAX_UPLOAD_BYTES`     | `5242880` (5 MiB)          |
    /// | `PASSWORD`             | required                   |
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

        let images_dir = PathBuf::from(
            std::env::var("IMAGES_DIR").unwrap_or_else(|_| "public/images".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "5242880".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let mutation_password = std::env::var("PASSWORD").expect("PASSWORD must be set");
        assert!(
            !mutation_password.is_empty(),
            "PASSWORD must not be empty"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            images_dir,
            max_upload_bytes,
            mutation_password,
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("images_dir", &self.images_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("mutation_password", &"<redacted>")
            .finish()
    }
}
