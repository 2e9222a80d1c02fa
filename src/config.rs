use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "dayplanner.toml";
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;
pub const SECRET_KEY_ENV: &str = "DAYPLANNER_SECRET_KEY";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub water: WaterConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            json: false,
            data_dir: PathBuf::from(".dayplanner"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WaterConfig {
    pub default_goal: u32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self { default_goal: 8 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    pub secret_key: String,
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: "change-me".to_string(),
            token_ttl_secs: 3600,
        }
    }
}

impl Config {
    pub fn data_dir(&self, base: &Path) -> PathBuf {
        if self.general.data_dir.is_absolute() {
            self.general.data_dir.clone()
        } else {
            base.join(&self.general.data_dir)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.water.default_goal == 0 {
            bail!("water.default_goal must be at least 1");
        }
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.auth.token_ttl_secs) {
            bail!("auth.token_ttl_secs must be between 1 and {MAX_TOKEN_TTL_SECS}");
        }
        Ok(())
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    let mut loaded = if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        LoadedConfig {
            config: read_config(path)?,
            path: Some(path.to_path_buf()),
        }
    } else {
        let local_path = cwd.join(CONFIG_FILE_NAME);
        if local_path.exists() {
            LoadedConfig {
                config: read_config(&local_path)?,
                path: Some(local_path),
            }
        } else {
            LoadedConfig {
                config: Config::default(),
                path: None,
            }
        }
    };

    if let Ok(secret) = std::env::var(SECRET_KEY_ENV) {
        if !secret.is_empty() {
            loaded.config.auth.secret_key = secret;
        }
    }

    loaded.config.validate()?;
    Ok(loaded)
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_round_trips_through_toml() {
        let rendered = default_config_toml().expect("render");
        assert!(rendered.contains("[water]"));
        assert!(rendered.contains("default_goal = 8"));
        let parsed: Config = toml::from_str(&rendered).expect("parse");
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let parsed: Config = toml::from_str("[water]\ndefault_goal = 10\n").expect("parse");
        assert_eq!(parsed.water.default_goal, 10);
        assert_eq!(parsed.auth.token_ttl_secs, 3600);
        assert_eq!(parsed.general.data_dir, PathBuf::from(".dayplanner"));
    }

    #[test]
    fn loads_local_file_and_rejects_missing_explicit_path() {
        let dir = TempDir::new().expect("tempdir");
        let loaded = load_config(None, dir.path()).expect("defaults");
        assert!(loaded.path.is_none());

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[general]\njson = true\n",
        )
        .expect("write");
        let loaded = load_config(None, dir.path()).expect("local");
        assert!(loaded.config.general.json);

        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn zero_water_goal_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[water]\ndefault_goal = 0\n").expect("write");
        assert!(load_config(Some(&path), dir.path()).is_err());
    }

    #[test]
    fn token_lifetime_must_be_bounded() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("custom.toml");
        for ttl in ["0", "9223372036854775807"] {
            fs::write(&path, format!("[auth]\ntoken_ttl_secs = {ttl}\n")).expect("write");
            assert!(load_config(Some(&path), dir.path()).is_err());
        }
        fs::write(&path, "[auth]\ntoken_ttl_secs = 86400\n").expect("write");
        let loaded = load_config(Some(&path), dir.path()).expect("valid ttl");
        assert_eq!(loaded.config.auth.token_ttl_secs, 86_400);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path).expect("first write");
        assert!(write_default_config(&path).is_err());
    }

    #[test]
    fn relative_data_dir_resolves_against_base() {
        let config = Config::default();
        assert_eq!(
            config.data_dir(Path::new("/home/sam")),
            PathBuf::from("/home/sam/.dayplanner")
        );
    }
}
