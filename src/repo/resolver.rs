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

use crate::cancellation::CancellationToken;
use crate::error::{DriverkitError, Result};
use crate::http::HttpClient;
use crate::models::kernel_release::KernelRelease;
use crate::models::target::TargetVariant;
use crate::repo::fetch::{VisitedSet, fetch_index, index_url, substitute_arch};
use crate::repo::index::{KernelPackageQuery, PackageIndex};
use crate::repo::mirror::{mirror_list_url, resolve_repository};
use log::{debug, info};
use serde::Serialize;

/// One `kernel` and one `kernel-devel` package.
///
/// Assumes every repository generation publishes exactly this pair for a
/// release; more or fewer matches are reported as a mismatch.
pub const EXPECTED_PACKAGE_COUNT: usize = 2;

/// Absolute package URLs in generation probe order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedUrlSet {
    urls: Vec<String>,
}

impl ResolvedUrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: String) {
        self.urls.push(url);
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

/// Resolves kernel package URLs by probing each repository generation in turn.
pub struct PackageResolver<'a> {
    client: &'a dyn HttpClient,
    mirror_root: Option<String>,
    cancellation: CancellationToken,
}

impl<'a> PackageResolver<'a> {
    pub fn new(client: &'a dyn HttpClient) -> Self {
        Self {
            client,
            mirror_root: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Overrides the target's default mirror root.
    pub fn with_mirror_root(mut self, mirror_root: impl Into<String>) -> Self {
        self.mirror_root = Some(mirror_root.into());
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Resolves the package URLs and requires exactly `EXPECTED_PACKAGE_COUNT` of them.
    pub fn resolve(
        &self,
        target: TargetVariant,
        kernel: &KernelRelease,
        arch: &str,
    ) -> Result<ResolvedUrlSet> {
        let urls = self.collect(target, kernel, arch)?;

        if urls.len() != EXPECTED_PACKAGE_COUNT {
            return Err(DriverkitError::PackageCountMismatch {
                target,
                expected: EXPECTED_PACKAGE_COUNT,
                found: urls.len(),
            });
        }

        info!("Resolved {} kernel packages for {target}", urls.len());
        Ok(urls)
    }

    /// Collects every matching package URL across all generations of `target`.
    pub fn collect(
        &self,
        target: TargetVariant,
        kernel: &KernelRelease,
        arch: &str,
    ) -> Result<ResolvedUrlSet> {
        let query = KernelPackageQuery::new(kernel, arch);
        let mirror_root = self
            .mirror_root
            .clone()
            .unwrap_or_else(|| target.default_mirror_root().to_string());

        debug!(
            "Looking for kernel {} release {} ({arch}) on {target}",
            query.version, query.release
        );

        let mut visited = VisitedSet::new();
        let mut urls = ResolvedUrlSet::new();

        for generation in target.generations() {
            self.cancellation.check()?;

            let base = target.repository_base_url(&mirror_root, generation, arch);
            let repository =
                substitute_arch(&resolve_repository(self.client, &mirror_list_url(&base))?, arch);

            let index_url = index_url(&repository, target.compression());
            if !visited.insert(&index_url) {
                debug!("Skipping generation {generation}: {index_url} already processed");
                continue;
            }

            self.cancellation.check()?;
            let bytes = fetch_index(self.client, &index_url, target.compression())?;
            self.cancellation.check()?;

            let index = PackageIndex::from_bytes(&bytes, &target.to_string())?;
            let packages = index.kernel_packages(&query)?;
            self.cancellation.check()?;

            debug!(
                "Generation {generation} has {} matching package(s)",
                packages.len()
            );
            for package in packages {
                urls.push(format!(
                    "{repository}/{}",
                    package.location_href.trim_start_matches('/')
                ));
            }
        }

        // A signal delivered during the last download must still abort the run
        self.cancellation.check()?;
        Ok(urls)
    }
}
