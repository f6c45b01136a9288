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
use log::debug;
use std::io::{BufRead, BufReader};

pub const MIRROR_LIST_FILE: &str = "mirror.list";

pub fn mirror_list_url(repository_base: &str) -> String {
    format!(
        "{}/{MIRROR_LIST_FILE}",
        repository_base.trim_end_matches('/')
    )
}

/// Resolves the live repository URL from the first line of a mirror list.
pub fn resolve_repository(client: &dyn HttpClient, mirror_url: &str) -> Result<String> {
    debug!("Looking for repository at {mirror_url}");
    let response = get_success(client, mirror_url)?;

    let mut first_line = String::new();
    BufReader::new(response)
        .read_line(&mut first_line)
        .map_err(|e| DriverkitError::Network {
            url: mirror_url.to_string(),
            message: format!("Failed to read mirror list: {e}"),
        })?;

    let repository = first_line.trim().trim_end_matches('/');
    if repository.is_empty() {
        return Err(DriverkitError::MirrorNotFound {
            url: mirror_url.to_string(),
        });
    }

    debug!("Mirror list {mirror_url} resolved to {repository}");
    Ok(repository.to_string())
}
