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
use crate::repo::compression::Compression;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const AMAZONLINUX_GENERATIONS: &[&str] = &[
    "latest/updates",
    "latest/main",
    "2017.03/updates",
    "2017.03/main",
    "2017.09/updates",
    "2017.09/main",
    "2018.03/updates",
    "2018.03/main",
];

const AMAZONLINUX2_GENERATIONS: &[&str] = &["2.0", "latest"];

const AMAZONLINUX_MIRROR_ROOT: &str = "http://repo.us-east-1.amazonaws.com";
const AMAZONLINUX2_MIRROR_ROOT: &str = "http://amazonlinux.us-east-1.amazonaws.com/2/core";

/// Distribution flavors that kernel packages can be resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetVariant {
    AmazonLinux,
    AmazonLinux2,
}

impl TargetVariant {
    pub fn all() -> &'static [TargetVariant] {
        &[TargetVariant::AmazonLinux, TargetVariant::AmazonLinux2]
    }

    /// Repository generations in probe order.
    pub fn generations(&self) -> &'static [&'static str] {
        match self {
            TargetVariant::AmazonLinux => AMAZONLINUX_GENERATIONS,
            TargetVariant::AmazonLinux2 => AMAZONLINUX2_GENERATIONS,
        }
    }

    /// Codec the package index is published with.
    pub fn compression(&self) -> Compression {
        match self {
            TargetVariant::AmazonLinux => Compression::Bzip2,
            TargetVariant::AmazonLinux2 => Compression::Gzip,
        }
    }

    pub fn default_mirror_root(&self) -> &'static str {
        match self {
            TargetVariant::AmazonLinux => AMAZONLINUX_MIRROR_ROOT,
            TargetVariant::AmazonLinux2 => AMAZONLINUX2_MIRROR_ROOT,
        }
    }

    /// Base URL of one repository generation below `mirror_root`.
    ///
    /// Amazon Linux uses a flat `<root>/<generation>` layout while Amazon
    /// Linux 2 nests repositories per architecture.
    pub fn repository_base_url(&self, mirror_root: &str, generation: &str, arch: &str) -> String {
        let root = mirror_root.trim_end_matches('/');
        match self {
            TargetVariant::AmazonLinux => format!("{root}/{generation}"),
            TargetVariant::AmazonLinux2 => format!("{root}/{generation}/{arch}"),
        }
    }
}

impl FromStr for TargetVariant {
    type Err = DriverkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "amazonlinux" => Ok(TargetVariant::AmazonLinux),
            "amazonlinux2" => Ok(TargetVariant::AmazonLinux2),
            _ => Err(DriverkitError::UnsupportedTarget(s.to_string())),
        }
    }
}

impl std::fmt::Display for TargetVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TargetVariant::AmazonLinux => "amazonlinux",
            TargetVariant::AmazonLinux2 => "amazonlinux2",
        };
        write!(f, "{name}")
    }
}
