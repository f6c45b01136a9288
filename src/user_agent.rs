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

//! User-Agent strings sent by driverkit's HTTP clients.

/// The driverkit package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent for mirror list and package index requests
pub fn repository_client() -> String {
    format!("driverkit/repository/{VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_user_agent() {
        assert_eq!(repository_client(), format!("driverkit/repository/{VERSION}"));
        assert!(repository_client().ends_with(env!("CARGO_PKG_VERSION")));
    }
}
