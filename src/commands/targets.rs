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

use crate::builder::BuilderRegistry;
use crate::config::DriverkitConfig;
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TargetSummary {
    target: String,
    mirror_root: String,
    index_compression: String,
    generations: Vec<&'static str>,
}

pub struct TargetsCommand<'a> {
    config: &'a DriverkitConfig,
    registry: BuilderRegistry,
}

impl<'a> TargetsCommand<'a> {
    pub fn new(config: &'a DriverkitConfig) -> Result<Self> {
        Ok(Self {
            config,
            registry: BuilderRegistry::new(),
        })
    }

    fn summaries(&self) -> Vec<TargetSummary> {
        self.registry
            .targets()
            .into_iter()
            .map(|target| TargetSummary {
                target: target.to_string(),
                mirror_root: self.config.mirrors.root_for(target),
                index_compression: target.compression().to_string(),
                generations: target.generations().to_vec(),
            })
            .collect()
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let summaries = self.summaries();

        if json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }

        for summary in summaries {
            println!("{} ({})", summary.target, summary.index_compression);
            println!("  mirror root: {}", summary.mirror_root);
            println!("  generations: {}", summary.generations.join(", "));
        }

        Ok(())
    }
}
