//! Listener address for the book API

/// Where the HTTP server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    /// Host name or IP, `0.0.0.0` for every interface
    pub host: String,
    pub port: u16,
}

/// Every interface
pub const DEFAULT_HOST: &str = "0.0.0.0";

pub const DEFAULT_PORT: u16 = 3000;

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl HttpServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Default host on `port`
    pub fn with_port(port: u16) -> Self {
        Self::new(DEFAULT_HOST, port)
    }

    /// `host:port`, resolved when the listener binds
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listens_everywhere_on_3000_by_default() {
        assert_eq!(HttpServerConfig::default().socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_hostname_kept_verbatim() {
        let config = HttpServerConfig::new("localhost", 8080);
        assert_eq!(config.socket_addr(), "localhost:8080");
        assert_eq!(HttpServerConfig::with_port(8080).host, DEFAULT_HOST);
    }
}
