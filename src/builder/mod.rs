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

//! Build script generation for each supported target.

pub mod amazonlinux;
pub mod script;

pub use amazonlinux::{AmazonLinux, AmazonLinux2};
pub use script::{ScriptTemplateInput, module_download_url};

use crate::cancellation::CancellationToken;
use crate::config::DriverkitConfig;
use crate::error::{DriverkitError, Result};
use crate::http::HttpClient;
use crate::models::build::BuildConfig;
use crate::models::target::TargetVariant;
use crate::repo::ResolvedUrlSet;
use std::collections::HashMap;

/// Collaborators shared by builders during one request.
pub struct BuildContext<'a> {
    pub client: &'a dyn HttpClient,
    pub config: &'a DriverkitConfig,
    pub cancellation: CancellationToken,
}

impl<'a> BuildContext<'a> {
    pub fn new(client: &'a dyn HttpClient, config: &'a DriverkitConfig) -> Self {
        Self {
            client,
            config,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }
}

/// Prepares the driver build for one target distribution.
pub trait Builder: Send + Sync {
    fn target(&self) -> TargetVariant;

    /// Resolves the kernel package URLs the build depends on.
    fn kernel_urls(&self, build: &BuildConfig, ctx: &BuildContext<'_>) -> Result<ResolvedUrlSet>;

    /// Renders the script that builds the kernel module and/or eBPF probe.
    fn script(&self, build: &BuildConfig, ctx: &BuildContext<'_>) -> Result<String>;
}

pub struct BuilderRegistry {
    builders: HashMap<TargetVariant, Box<dyn Builder>>,
}

impl BuilderRegistry {
    /// Registry with a builder for every supported target.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(AmazonLinux));
        registry.register(Box::new(AmazonLinux2));
        registry
    }

    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    pub fn register(&mut self, builder: Box<dyn Builder>) {
        self.builders.insert(builder.target(), builder);
    }

    pub fn get(&self, target: TargetVariant) -> Result<&dyn Builder> {
        self.builders
            .get(&target)
            .map(|b| b.as_ref())
            .ok_or_else(|| DriverkitError::UnsupportedTarget(target.to_string()))
    }

    /// Registered targets in declaration order.
    pub fn targets(&self) -> Vec<TargetVariant> {
        TargetVariant::all()
            .iter()
            .copied()
            .filter(|t| self.builders.contains_key(t))
            .collect()
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
