pub mod deploy;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result, bail};
use cluster_core::{ClusterConfig, ConfigError, ConfigResult};

/// Load `path`, or `~/.cluster` when no path is given.
pub fn load_config(path: Option<&str>) -> Result<ClusterConfig> {
    match path {
        Some(path) => ClusterConfig::from_file(Path::new(path))
            .with_context(|| format!("loading cluster config {path}")),
        None => load_default(ClusterConfig::from_default_path()),
    }
}

/// Turn the outcome of a default-path lookup into an operator-facing error.
fn load_default(loaded: ConfigResult<ClusterConfig>) -> Result<ClusterConfig> {
    match loaded {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound(path)) => bail!(
            "couldn't find {}; create it or pass --config <path>",
            path.display()
        ),
        Err(e) => Err(e).context("loading default cluster config"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_core::DEFAULT_CONFIG_FILE;
    use std::fs;

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster.conf");
        fs::write(&path, "node = u@h:2\n").unwrap();

        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.nodes.len(), 1);
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.conf");

        let err = load_config(path.to_str()).unwrap_err();
        assert!(err.to_string().contains("missing.conf"));
    }

    #[test]
    fn test_load_default_missing_suggests_config_flag() {
        let home = tempfile::tempdir().unwrap();

        let err = load_default(ClusterConfig::from_default_in(home.path())).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("couldn't find"));
        assert!(msg.contains(DEFAULT_CONFIG_FILE));
        assert!(msg.contains("--config"));
    }

    #[test]
    fn test_load_default_from_home() {
        let home = tempfile::tempdir().unwrap();
        fs::write(home.path().join(DEFAULT_CONFIG_FILE), "node = u@a
node = u@b:3
").unwrap();

        let config = load_default(ClusterConfig::from_default_in(home.path())).unwrap();
        assert_eq!(config.nodes.len(), 2);
    }

    #[test]
    fn test_load_default_without_home() {
        let err = load_default(Err(ConfigError::NoHomeDir)).unwrap_err();
        assert!(err.to_string().contains("default cluster config"));
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NoHomeDir)
        ));
    }

    #[test]
    fn test_load_reports_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cluster.conf");
        fs::write(&path, "port = lots\n").unwrap();

        let err = load_config(path.to_str()).unwrap_err();
        let cause = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(cause, ConfigError::Format { line: 1, .. }));
    }
}
