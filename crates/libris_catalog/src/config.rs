use libris_base::{LibrisResult, err};

/// Port the service listens on when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime configuration for the catalog service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// The listening port comes from the `PORT` variable, defaulting to 3000.
    /// An unparsable value is an error rather than a silent fallback.
    pub fn from_env() -> LibrisResult<Self> {
        Self::from_port_value(std::env::var("PORT").ok().as_deref())
    }

    fn from_port_value(value: Option<&str>) -> LibrisResult<Self> {
        match value {
            None => Ok(Self { port: DEFAULT_PORT }),
            Some(raw) => raw
                .parse::<u16>()
                .map(|port| Self { port })
                .map_err(|_| err!("invalid PORT value '{}': expected a port number", raw)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        assert_eq!(Config::default().port, 3000);
        assert_eq!(Config::from_port_value(None).unwrap().port, 3000);
    }

    #[test]
    fn test_port_from_value() {
        assert_eq!(Config::from_port_value(Some("8080")).unwrap().port, 8080);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_port_value(Some("not-a-port")).unwrap_err();
        assert!(err.to_string().contains("invalid PORT value"));

        assert!(Config::from_port_value(Some("70000")).is_err());
        assert!(Config::from_port_value(Some("")).is_err());
    }
}
