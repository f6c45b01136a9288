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

use crate::builder::script::ScriptTemplateInput;
use crate::builder::{BuildContext, Builder};
use crate::error::{DriverkitError, Result};
use crate::models::build::BuildConfig;
use crate::models::kernel_release::KernelRelease;
use crate::models::target::TargetVariant;
use crate::repo::{PackageResolver, ResolvedUrlSet};
use std::str::FromStr;

/// Amazon Linux (2017.03 - 2018.03 and `latest`)
pub struct AmazonLinux;

/// Amazon Linux 2
pub struct AmazonLinux2;

impl Builder for AmazonLinux {
    fn target(&self) -> TargetVariant {
        TargetVariant::AmazonLinux
    }

    fn kernel_urls(&self, build: &BuildConfig, ctx: &BuildContext<'_>) -> Result<ResolvedUrlSet> {
        resolve_kernel_urls(self.target(), build, ctx)
    }

    fn script(&self, build: &BuildConfig, ctx: &BuildContext<'_>) -> Result<String> {
        script(self.target(), build, ctx)
    }
}

impl Builder for AmazonLinux2 {
    fn target(&self) -> TargetVariant {
        TargetVariant::AmazonLinux2
    }

    fn kernel_urls(&self, build: &BuildConfig, ctx: &BuildContext<'_>) -> Result<ResolvedUrlSet> {
        resolve_kernel_urls(self.target(), build, ctx)
    }

    fn script(&self, build: &BuildConfig, ctx: &BuildContext<'_>) -> Result<String> {
        script(self.target(), build, ctx)
    }
}

fn resolve_kernel_urls(
    target: TargetVariant,
    build: &BuildConfig,
    ctx: &BuildContext<'_>,
) -> Result<ResolvedUrlSet> {
    let arch = build.architecture.trim();
    if arch.is_empty() {
        return Err(DriverkitError::InvalidConfig(
            "architecture cannot be empty".to_string(),
        ));
    }

    let kernel = KernelRelease::from_str(&build.kernel_release)?;

    PackageResolver::new(ctx.client)
        .with_mirror_root(ctx.config.mirrors.root_for(target))
        .with_cancellation(ctx.cancellation.clone())
        .resolve(target, &kernel, arch)
}

fn script(target: TargetVariant, build: &BuildConfig, ctx: &BuildContext<'_>) -> Result<String> {
    let urls = resolve_kernel_urls(target, build, ctx)?;
    ctx.cancellation.check()?;

    let input = ScriptTemplateInput::new(target, build, &ctx.config.build, urls.into_urls());
    input.render_script()
}
