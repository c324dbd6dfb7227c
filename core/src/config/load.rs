use std::path::Path;

use super::types::AppConfig;
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "reel.toml";

pub fn load_default() -> Result<AppConfig, ConfigError> {
    let cfg = if Path::new(DEFAULT_CONFIG_FILE).exists() {
        read_file(Path::new(DEFAULT_CONFIG_FILE))?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(cfg, |key| std::env::var(key).ok())
}

pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let cfg = read_file(path.as_ref())?;
    apply_env_overrides(cfg, |key| std::env::var(key).ok())
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Blank values are ignored so an exported-but-empty variable keeps the file value.
fn apply_env_overrides<F>(mut cfg: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("REEL_APP_NAME") {
        cfg.app_name = v;
    }
    if let Some(v) = get("REEL_HTTP_HOST") {
        cfg.http_server.host = v;
    }
    if let Some(v) = get("REEL_HTTP_PORT") {
        cfg.http_server.port = v.trim().parse().map_err(|_| ConfigError::EnvInvalid {
            key: "REEL_HTTP_PORT".to_string(),
            value: v.clone(),
        })?;
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_survive_empty_environment() {
        let cfg = apply_env_overrides(AppConfig::default(), env(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.http_server.port, 3000);
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let cfg = apply_env_overrides(
            AppConfig::default(),
            env(&[
                ("REEL_APP_NAME", "Codi"),
                ("REEL_HTTP_HOST", "0.0.0.0"),
                ("REEL_HTTP_PORT", "8088"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.app_name, "Codi");
        assert_eq!(cfg.http_server.host, "0.0.0.0");
        assert_eq!(cfg.http_server.port, 8088);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let cfg =
            apply_env_overrides(AppConfig::default(), env(&[("REEL_APP_NAME", "  ")])).unwrap();
        assert_eq!(cfg.app_name, "Alaa hijazi");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = apply_env_overrides(AppConfig::default(), env(&[("REEL_HTTP_PORT", "nope")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvInvalid { ref key, .. } if key == "REEL_HTTP_PORT"));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "app_name = \"Reel\"\n\n[http_server]\nport = 4000").unwrap();

        let cfg = read_file(file.path()).unwrap();
        assert_eq!(cfg.app_name, "Reel");
        assert_eq!(cfg.http_server.port, 4000);
        assert_eq!(cfg.http_server.host, "127.0.0.1");
        assert_eq!(cfg.http_server.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "app_name = ").unwrap();

        let err = read_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
