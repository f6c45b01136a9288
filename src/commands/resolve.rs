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
use crate::commands::{BuildArgs, http_client};
use crate::config::DriverkitConfig;
use crate::error::Result;

pub struct ResolveCommand<'a> {
    config: &'a DriverkitConfig,
    registry: BuilderRegistry,
    cancellation: CancellationToken,
}

impl<'a> ResolveCommand<'a> {
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

    pub fn execute(&self, build_args: &BuildArgs, json: bool) -> Result<()> {
        let build = build_args.build_config()?;

        let client = http_client(self.config, build_args.timeout)?;
        let ctx =
            BuildContext::new(&client, self.config).with_cancellation(self.cancellation.clone());

        let urls = self.registry.get(build.target)?.kernel_urls(&build, &ctx)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&urls)?);
        } else {
            for url in urls.urls() {
                println!("{url}");
            }
        }

        Ok(())
    }
}
