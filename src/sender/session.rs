//! Trap target session.

use crate::error::{Error, Result};
use crate::version::Version;

use super::TrapConfig;

/// Where and how a sender delivers its traps. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    host: String,
    port: u16,
    version: Version,
    community: Option<String>,
}

impl Session {
    /// Validate `config` and copy its target into an owned session.
    ///
    /// Fails with [`Error::InvalidTarget`] when no host (or an empty one) is
    /// configured, and with [`Error::UnsupportedVersion`] for anything but
    /// SNMPv2c.
    pub fn from_config(config: &TrapConfig) -> Result<Self> {
        let host = match config.host.as_deref() {
            Some(host) if !host.is_empty() => host,
            _ => return Err(Error::InvalidTarget),
        };
        if !config.version.carries_trap_v2() {
            return Err(Error::UnsupportedVersion {
                version: config.version,
            });
        }

        Ok(Self {
            host: host.to_owned(),
            port: config.port,
            version: config.version,
            community: config.community.clone(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Community string bytes; empty when none was configured.
    pub fn community(&self) -> &[u8] {
        self.community.as_deref().map(str::as_bytes).unwrap_or_default()
    }

    /// `host:port`, as used in logs and errors.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_copies_target() {
        let config = TrapConfig {
            host: Some("192.0.2.1".into()),
            community: Some("public".into()),
            port: 1162,
            ..TrapConfig::default()
        };
        let session = Session::from_config(&config).unwrap();
        assert_eq!(session.host(), "192.0.2.1");
        assert_eq!(session.port(), 1162);
        assert_eq!(session.version(), Version::V2c);
        assert_eq!(session.community(), b"public");
        assert_eq!(session.target(), "192.0.2.1:1162");
    }

    #[test]
    fn test_missing_or_empty_host() {
        let config = TrapConfig::default();
        assert!(matches!(
            Session::from_config(&config),
            Err(Error::InvalidTarget)
        ));

        let config = TrapConfig {
            host: Some(String::new()),
            ..TrapConfig::default()
        };
        assert!(matches!(
            Session::from_config(&config),
            Err(Error::InvalidTarget)
        ));
    }

    #[test]
    fn test_rejects_v1() {
        let config = TrapConfig {
            host: Some("localhost".into()),
            version: Version::V1,
            ..TrapConfig::default()
        };
        assert!(matches!(
            Session::from_config(&config),
            Err(Error::UnsupportedVersion {
                version: Version::V1
            })
        ));
    }

    #[test]
    fn test_absent_community_is_empty() {
        let config = TrapConfig {
            host: Some("localhost".into()),
            ..TrapConfig::default()
        };
        assert!(Session::from_config(&config).unwrap().community().is_empty());
    }
}
