//! Dispatcher configuration loaded from TOML

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Map content format version, `major.minor.patch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ProtoVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ProtoVersion {
    /// Content without any of the later semantics
    pub const LEGACY: ProtoVersion = ProtoVersion::new(1, 0, 0);

    /// First version evaluating all scopes in one declaration-ordered pass
    pub const REGION_PRIORITY: ProtoVersion = ProtoVersion::new(1, 3, 6);

    /// First version attributing explosion damage to the player who lit it
    pub const FILTER_OWNED_TNT: ProtoVersion = ProtoVersion::new(1, 4, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        ProtoVersion {
            major,
            minor,
            patch,
        }
    }
}

impl Default for ProtoVersion {
    fn default() -> Self {
        ProtoVersion::LEGACY
    }
}

impl fmt::Display for ProtoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for ProtoVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .trim()
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidVersion(s.to_string()))?;

        match parts.as_slice() {
            [major] => Ok(ProtoVersion::new(*major, 0, 0)),
            [major, minor] => Ok(ProtoVersion::new(*major, *minor, 0)),
            [major, minor, patch] => Ok(ProtoVersion::new(*major, *minor, *patch)),
            _ => Err(Error::InvalidVersion(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProtoVersion {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Per-match dispatcher settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchConfig {
    /// Format version of the loaded map content
    #[serde(default)]
    pub proto: ProtoVersion,

    /// Force a regime regardless of `proto`
    #[serde(default)]
    pub use_region_priority: Option<bool>,

    #[serde(default)]
    pub max_build_height: Option<i32>,
}

impl DispatchConfig {
    pub fn for_proto(proto: ProtoVersion) -> Self {
        DispatchConfig {
            proto,
            ..DispatchConfig::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Whether rules are evaluated in one declaration-ordered pass across scopes
    pub fn use_region_priority(&self) -> bool {
        self.use_region_priority
            .unwrap_or(self.proto >= ProtoVersion::REGION_PRIORITY)
    }

    /// Whether explosion-caused block changes keep their player actor
    pub fn owned_explosions(&self) -> bool {
        self.proto >= ProtoVersion::FILTER_OWNED_TNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!("1.4.0".parse::<ProtoVersion>().unwrap(), ProtoVersion::FILTER_OWNED_TNT);
        assert_eq!("1.3".parse::<ProtoVersion>().unwrap(), ProtoVersion::new(1, 3, 0));
        assert!(matches!(
            "1.x".parse::<ProtoVersion>(),
            Err(Error::InvalidVersion(_))
        ));
        assert!(matches!(
            "1.2.3.4".parse::<ProtoVersion>(),
            Err(Error::InvalidVersion(_))
        ));
    }

    #[test]
    fn test_version_ordering() {
        assert!(ProtoVersion::new(1, 3, 5) < ProtoVersion::REGION_PRIORITY);
        assert!(ProtoVersion::new(1, 10, 0) > ProtoVersion::FILTER_OWNED_TNT);
        assert_eq!(ProtoVersion::REGION_PRIORITY.to_string(), "1.3.6");
    }

    #[test]
    fn test_config_from_toml() {
        let config = DispatchConfig::from_toml_str(
            r#"
            proto = "1.4.0"
            max_build_height = 96
            "#,
        )
        .unwrap();

        assert!(config.use_region_priority());
        assert!(config.owned_explosions());
        assert_eq!(config.max_build_height, Some(96));
    }

    #[test]
    fn test_config_defaults_to_legacy() {
        let config = DispatchConfig::from_toml_str("").unwrap();
        assert_eq!(config.proto, ProtoVersion::LEGACY);
        assert!(!config.use_region_priority());
        assert!(!config.owned_explosions());
        assert_eq!(config.max_build_height, None);
    }

    #[test]
    fn test_config_override() {
        let config = DispatchConfig::from_toml_str(
            r#"
            proto = "1.3.0"
            use_region_priority = true
            "#,
        )
        .unwrap();
        assert!(config.use_region_priority());
        assert!(!config.owned_explosions());
    }

    #[test]
    fn test_config_rejects_bad_version() {
        let result = DispatchConfig::from_toml_str(r#"proto = "one""#);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
