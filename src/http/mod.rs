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

mod client;

pub use client::{AttohttpcClient, DEFAULT_TIMEOUT, HttpClient, HttpResponse};

use crate::error::{DriverkitError, Result};
use log::trace;

/// Issues a GET and rejects any non-2xx status as a network error.
pub fn get_success(client: &dyn HttpClient, url: &str) -> Result<Box<dyn HttpResponse>> {
    let response = client.get(url)?;
    let status = response.status();
    trace!("GET {url} -> {status}");

    if !(200..300).contains(&status) {
        return Err(DriverkitError::Network {
            url: url.to_string(),
            message: format!("HTTP {status}"),
        });
    }

    Ok(response)
}
