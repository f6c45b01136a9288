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

use crate::config::BuildSettings;
use crate::error::Result;
use crate::models::build::BuildConfig;
use crate::models::target::TargetVariant;
use askama::Template;

/// Values rendered into the Amazon Linux build script.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "amazonlinux.sh", escape = "none")]
pub struct ScriptTemplateInput {
    pub target: String,
    pub driver_build_dir: String,
    pub module_download_url: String,
    pub kernel_download_urls: Vec<String>,
    pub build_module: bool,
    pub build_probe: bool,
}

impl ScriptTemplateInput {
    pub fn new(
        target: TargetVariant,
        build: &BuildConfig,
        settings: &BuildSettings,
        kernel_download_urls: Vec<String>,
    ) -> Self {
        Self {
            target: target.to_string(),
            driver_build_dir: settings.driver_directory.clone(),
            module_download_url: module_download_url(
                &settings.download_base_url,
                &build.driver_version,
            ),
            kernel_download_urls,
            build_module: build.build_module(),
            build_probe: build.build_probe(),
        }
    }

    pub fn render_script(&self) -> Result<String> {
        Ok(self.render()?)
    }

    /// Package URLs come from a downloaded index and are never trusted as shell.
    pub fn quoted_kernel_download_urls(&self) -> Vec<String> {
        self.kernel_download_urls
            .iter()
            .map(|url| shell_quote(url))
            .collect()
    }
}

/// Single-quotes `value` for bash, closing and reopening around embedded quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Tarball URL of the driver sources for a driver version.
pub fn module_download_url(base_url: &str, driver_version: &str) -> String {
    format!("{}/{driver_version}.tar.gz", base_url.trim_end_matches('/'))
}
