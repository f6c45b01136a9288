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

#![allow(dead_code)]

pub mod fixtures;

use mockito::{Mock, ServerGuard};
use std::path::PathBuf;
use tempfile::TempDir;

/// Mocks every `mirror.list` below `server` to point at `<server>/repo`.
pub fn mock_mirror_lists(server: &mut ServerGuard) -> Mock {
    let body = format!("{}/repo\n", server.url());
    server
        .mock(
            "GET",
            mockito::Matcher::Regex(r"/mirror\.list$".to_string()),
        )
        .with_status(200)
        .with_body(body)
        .create()
}

/// Writes a config file that redirects both targets to `mirror_root`.
pub fn write_config(dir: &TempDir, mirror_root: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    let contents = format!(
        "[http]\ntimeout_secs = 5\n\n[mirrors]\namazonlinux = \"{mirror_root}\"\namazonlinux2 = \"{mirror_root}\"\n"
    );
    std::fs::write(&path, contents).unwrap();
    path
}
