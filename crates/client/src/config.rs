use std::path::PathBuf;

/// Client configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for a locally running
/// portal backend. Override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Portal API base URL (default: `http://localhost:8000`).
    pub base_url: String,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Where the session file lives
    /// (default: `$HOME/.scholarbase/session.json`).
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                           |
    /// |----------------------------|-----------------------------------|
    /// | `SCHOLARBASE_API_URL`      | `http://localhost:8000`           |
    /// | `SCHOLARBASE_TIMEOUT_SECS` | `30`                              |
    /// | `SCHOLARBASE_SESSION_FILE` | `$HOME/.scholarbase/session.json` |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("SCHOLARBASE_API_URL").unwrap_or_else(|_| "http://localhost:8000".into());

        let request_timeout_secs: u64 = std::env::var("SCHOLARBASE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SCHOLARBASE_TIMEOUT_SECS must be a valid u64");

        let session_file = std::env::var("SCHOLARBASE_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        Self {
            base_url,
            request_timeout_secs,
            session_file,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            session_file: default_session_file(),
        }
    }
}

fn default_session_file() -> PathBuf {
    let mut path = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(".scholarbase");
    path.push("session.json");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.session_file.ends_with(".scholarbase/session.json"));
    }
}
