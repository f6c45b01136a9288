// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{DriverkitError, Result};
use crate::models::target::TargetVariant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "DRIVERKIT";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DRIVER_DIRECTORY: &str = "/tmp/driver";
const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://github.com/draios/sysdig/archive";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DriverkitConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub build: BuildSettings,

    #[serde(default)]
    pub mirrors: MirrorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildSettings {
    /// Directory the generated script builds the driver in
    #[serde(default = "default_driver_directory")]
    pub driver_directory: String,

    /// Base URL the driver source tarball is downloaded from
    #[serde(default = "default_download_base_url")]
    pub download_base_url: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            driver_directory: default_driver_directory(),
            download_base_url: default_download_base_url(),
        }
    }
}

/// Overrides for the mirror roots of each target.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MirrorsConfig {
    #[serde(default)]
    pub amazonlinux: Option<String>,

    #[serde(default)]
    pub amazonlinux2: Option<String>,
}

impl MirrorsConfig {
    pub fn root_for(&self, target: TargetVariant) -> String {
        let configured = match target {
            TargetVariant::AmazonLinux => self.amazonlinux.as_deref(),
            TargetVariant::AmazonLinux2 => self.amazonlinux2.as_deref(),
        };
        configured
            .unwrap_or_else(|| target.default_mirror_root())
            .trim_end_matches('/')
            .to_string()
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_driver_directory() -> String {
    DEFAULT_DRIVER_DIRECTORY.to_string()
}

fn default_download_base_url() -> String {
    DEFAULT_DOWNLOAD_BASE_URL.to_string()
}

/// Location of the user config file, if a config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("driverkit").join(CONFIG_FILE_NAME))
}

impl DriverkitConfig {
    /// Layers defaults, the TOML file (if present) and `DRIVERKIT_*` variables.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(DriverkitError::ConfigError(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                log::debug!("Loading config from {path:?}");
                builder = builder.add_source(
                    config::File::from(path)
                        .format(config::FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                if let Some(default_path) = default_config_path() {
                    log::debug!("Looking for config at {default_path:?}");
                    builder = builder.add_source(
                        config::File::from(default_path.as_path())
                            .format(config::FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: DriverkitConfig = builder
            .build()
            .and_then(|c| c.try_deserialize::<DriverkitConfig>())
            .map_err(|e| DriverkitError::ConfigError(format!("Failed to load config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(DriverkitError::InvalidConfig(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }

        let urls = [
            ("build.download_base_url", Some(&self.build.download_base_url)),
            ("mirrors.amazonlinux", self.mirrors.amazonlinux.as_ref()),
            ("mirrors.amazonlinux2", self.mirrors.amazonlinux2.as_ref()),
        ];
        for (key, value) in urls {
            if let Some(url) = value {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(DriverkitError::InvalidConfig(format!(
                        "{key} must be an http(s) URL, got '{url}'"
                    )));
                }
            }
        }

        if self.build.driver_directory.trim().is_empty() {
            return Err(DriverkitError::InvalidConfig(
                "build.driver_directory cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        unsafe {
            std::env::remove_var("DRIVERKIT_HTTP__TIMEOUT_SECS");
            std::env::remove_var("DRIVERKIT_MIRRORS__AMAZONLINUX2");
        }
    }

    #[test]
    fn test_default_config() {
        let config = DriverkitConfig::default();
        assert_eq!(config.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.build.driver_directory, "/tmp/driver");
        assert_eq!(config.mirrors, MirrorsConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mirror_root_defaults_and_overrides() {
        let mut mirrors = MirrorsConfig::default();
        assert_eq!(
            mirrors.root_for(TargetVariant::AmazonLinux2),
            "http://amazonlinux.us-east-1.amazonaws.com/2/core"
        );

        mirrors.amazonlinux = Some("http://localhost:8080/al1/".to_string());
        assert_eq!(
            mirrors.root_for(TargetVariant::AmazonLinux),
            "http://localhost:8080/al1"
        );
    }

    #[test]
    #[serial]
    fn test_load_explicit_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
[http]
timeout_secs = 90

[mirrors]
amazonlinux2 = "http://mirror.internal/2/core"
"#,
        )
        .unwrap();

        let config = DriverkitConfig::load(Some(&path)).unwrap();
        assert_eq!(config.http.timeout_secs, 90);
        assert_eq!(config.timeout(), Duration::from_secs(90));
        assert_eq!(
            config.mirrors.amazonlinux2.as_deref(),
            Some("http://mirror.internal/2/core")
        );
        assert_eq!(config.build, BuildSettings::default());
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_error() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let result = DriverkitConfig::load(Some(&temp_dir.path().join("nope.toml")));
        assert!(matches!(result, Err(DriverkitError::ConfigError(_))));
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[http]\ntimeout_secs = 90\n").unwrap();

        unsafe {
            std::env::set_var("DRIVERKIT_HTTP__TIMEOUT_SECS", "7");
            std::env::set_var("DRIVERKIT_MIRRORS__AMAZONLINUX2", "http://env.mirror/core");
        }

        let config = DriverkitConfig::load(Some(&path));
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.http.timeout_secs, 7);
        assert_eq!(
            config.mirrors.root_for(TargetVariant::AmazonLinux2),
            "http://env.mirror/core"
        );
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);

        fs::write(&path, "[http]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(
            DriverkitConfig::load(Some(&path)),
            Err(DriverkitError::InvalidConfig(_))
        ));

        fs::write(&path, "[mirrors]\namazonlinux = \"ftp://old.mirror\"\n").unwrap();
        assert!(matches!(
            DriverkitConfig::load(Some(&path)),
            Err(DriverkitError::InvalidConfig(msg)) if msg.contains("mirrors.amazonlinux")
        ));
    }
}
