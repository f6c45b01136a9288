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
use crate::http::{HttpClient, get_success};
use crate::repo::compression::Compression;
use log::debug;
use std::collections::HashSet;

/// Token yum mirror lists use in place of the architecture.
pub const ARCH_PLACEHOLDER: &str = "$basearch";

pub fn substitute_arch(url: &str, arch: &str) -> String {
    url.replace(ARCH_PLACEHOLDER, arch)
}

/// URL of the compressed `primary.sqlite` index below a repository.
pub fn index_url(repository: &str, compression: Compression) -> String {
    format!(
        "{}/repodata/primary.sqlite.{}",
        repository.trim_end_matches('/'),
        compression.extension()
    )
}

/// Package index URLs already processed during one resolution.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the URL was already visited.
    pub fn insert(&mut self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }
}

/// Downloads a package index and returns its decompressed bytes.
pub fn fetch_index(client: &dyn HttpClient, url: &str, compression: Compression) -> Result<Vec<u8>> {
    debug!("Downloading {url}");
    let response = get_success(client, url)?;

    let bytes = compression
        .decompress(response)
        .map_err(|source| DriverkitError::Decompression {
            url: url.to_string(),
            codec: compression,
            source,
        })?;

    debug!("Decompressed {} bytes from {url}", bytes.len());
    Ok(bytes)
}
