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

/// Yum `primary.sqlite` fixtures for integration tests
use driverkit::repo::Compression;
use rusqlite::{Connection, params};
use tempfile::NamedTempFile;

/// Creates an index holding `(name, version, release)` rows for x86_64
///
/// # Returns
/// The compressed database bytes, ready to serve as `primary.sqlite.<ext>`
pub fn create_index(packages: &[(&str, &str, &str)], codec: Compression) -> Vec<u8> {
    let file = NamedTempFile::new().unwrap();
    {
        let conn = Connection::open(file.path()).unwrap();
        conn.execute_batch(
            "CREATE TABLE packages (
                pkgKey INTEGER PRIMARY KEY,
                name TEXT,
                arch TEXT,
                version TEXT,
                release TEXT,
                location_href TEXT
            );",
        )
        .unwrap();
        for (name, version, release) in packages {
            conn.execute(
                "INSERT INTO packages (name, arch, version, release, location_href)
                 VALUES (?1, 'x86_64', ?2, ?3, ?4)",
                params![
                    name,
                    version,
                    release,
                    location_href(name, version, release)
                ],
            )
            .unwrap();
        }
    }
    let raw = std::fs::read(file.path()).unwrap();
    codec.compress(&raw).unwrap()
}

pub fn location_href(name: &str, version: &str, release: &str) -> String {
    format!("Packages/{name}-{version}-{release}.x86_64.rpm")
}
