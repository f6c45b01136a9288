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

pub mod resolve;
pub mod script;
pub mod targets;

use crate::config::DriverkitConfig;
use crate::error::{DriverkitError, Result};
use crate::http::AttohttpcClient;
use crate::models::build::BuildConfig;
use crate::models::target::TargetVariant;
use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Arguments identifying the kernel a driver is built for
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Target distribution (amazonlinux, amazonlinux2)
    #[arg(short, long)]
    pub target: String,

    /// Kernel release (e.g., "4.14.152-127.182.amzn2.x86_64")
    #[arg(short, long, value_name = "RELEASE")]
    pub kernel_release: String,

    /// Target architecture
    #[arg(short, long, default_value = "x86_64")]
    pub arch: String,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl BuildArgs {
    pub fn target(&self) -> Result<TargetVariant> {
        TargetVariant::from_str(&self.target)
    }

    pub fn build_config(&self) -> Result<BuildConfig> {
        Ok(BuildConfig::new(self.target()?, &self.kernel_release, &self.arch))
    }
}

/// Optional outputs of the driver build
#[derive(Args, Debug, Clone, Default)]
pub struct DriverArgs {
    /// Driver version to download sources for
    #[arg(long, default_value = "master")]
    pub driver_version: String,

    /// Path the built kernel module is written to
    #[arg(long, value_name = "PATH")]
    pub module_file: Option<PathBuf>,

    /// Path the built eBPF probe is written to
    #[arg(long, value_name = "PATH")]
    pub probe_file: Option<PathBuf>,
}

/// HTTP client honoring the configured timeout unless overridden
pub fn http_client(config: &DriverkitConfig, timeout_secs: Option<u64>) -> Result<AttohttpcClient> {
    let timeout = match timeout_secs {
        Some(0) => {
            return Err(DriverkitError::InvalidConfig(
                "--timeout must be greater than zero".to_string(),
            ));
        }
        Some(secs) => Duration::from_secs(secs),
        None => config.timeout(),
    };
    Ok(AttohttpcClient::new().with_timeout(timeout))
}
