//! Standard paths used by kiln

use std::path::PathBuf;

/// Environment variable that points kiln at a different config file
pub const CONFIG_ENV: &str = "KILN_CONFIG";

/// Standard kiln paths
pub struct Paths {
    /// Config directory (~/.config/kiln)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("kiln");

        Self { config }
    }

    /// Default location of the config file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.yaml")
    }

    /// Config file to use: `KILN_CONFIG` when set, otherwise the default
    pub fn resolve_config_file(&self) -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => self.config_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_under_config_dir() {
        let paths = Paths::new();
        assert!(paths.config.ends_with("kiln"));
        assert_eq!(paths.config_file(), paths.config.join("config.yaml"));
    }
}
