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

use crate::models::target::TargetVariant;
use std::path::PathBuf;

/// Inbound request describing the driver build to prepare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub target: TargetVariant,
    pub kernel_release: String,
    pub architecture: String,
    pub driver_version: String,
    pub module_file_path: Option<PathBuf>,
    pub probe_file_path: Option<PathBuf>,
}

impl BuildConfig {
    pub fn new(target: TargetVariant, kernel_release: &str, architecture: &str) -> Self {
        Self {
            target,
            kernel_release: kernel_release.to_string(),
            architecture: architecture.to_string(),
            driver_version: String::new(),
            module_file_path: None,
            probe_file_path: None,
        }
    }

    pub fn with_driver_version(mut self, driver_version: &str) -> Self {
        self.driver_version = driver_version.to_string();
        self
    }

    pub fn with_module_file(mut self, path: PathBuf) -> Self {
        self.module_file_path = Some(path);
        self
    }

    pub fn with_probe_file(mut self, path: PathBuf) -> Self {
        self.probe_file_path = Some(path);
        self
    }

    pub fn build_module(&self) -> bool {
        self.module_file_path
            .as_ref()
            .is_some_and(|p| !p.as_os_str().is_empty())
    }

    pub fn build_probe(&self) -> bool {
        self.probe_file_path
            .as_ref()
            .is_some_and(|p| !p.as_os_str().is_empty())
    }
}
