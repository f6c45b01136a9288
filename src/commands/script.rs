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

use crate::builder::{BuildContext, BuilderRegistry};
use crate::cancellation::CancellationToken;
use crate::commands::{BuildArgs, DriverArgs, http_client};
use crate::config::DriverkitConfig;
use crate::error::Result;
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;

pub struct ScriptCommand<'a> {
    config: &'a DriverkitConfig,
    registry: BuilderRegistry,
    cancellation: CancellationToken,
}

impl<'a> ScriptCommand<'a> {
    pub fn new(config: &'a DriverkitConfig) -> Result<Self> {
        Ok(Self {
            config,
            registry: BuilderRegistry::new(),
            cancellation: CancellationToken::new(),
        })
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn execute(
        &self,
        build_args: &BuildArgs,
        driver_args: &DriverArgs,
        output: Option<&Path>,
    ) -> Result<()> {
        let mut build = build_args
            .build_config()?
            .with_driver_version(&driver_args.driver_version);
        if let Some(path) = &driver_args.module_file {
            build = build.with_module_file(path.clone());
        }
        if let Some(path) = &driver_args.probe_file {
            build = build.with_probe_file(path.clone());
        }

        let client = http_client(self.config, build_args.timeout)?;
        let ctx =
            BuildContext::new(&client, self.config).with_cancellation(self.cancellation.clone());

        let builder = self.registry.get(build.target)?;
        let script = builder.script(&build, &ctx)?;

        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                fs::write(path, &script)?;
                info!("Wrote build script to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(script.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}
