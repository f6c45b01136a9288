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

/// Shared fixtures for building yum package indexes in unit tests
use rusqlite::{Connection, params};
use tempfile::NamedTempFile;

const PRIMARY_SCHEMA: &str = "
CREATE TABLE db_info (dbversion INTEGER, checksum TEXT);
CREATE TABLE packages (
    pkgKey INTEGER PRIMARY KEY,
    pkgId TEXT,
    name TEXT,
    arch TEXT,
    version TEXT,
    epoch TEXT,
    release TEXT,
    summary TEXT,
    location_href TEXT
);
INSERT INTO db_info (dbversion, checksum) VALUES (10, 'fixture');
";

/// A package row to place in a fixture index
#[derive(Debug, Clone)]
pub struct FixturePackage {
    pub name: String,
    pub version: String,
    pub release: String,
    pub arch: String,
    pub location_href: String,
}

impl FixturePackage {
    /// Creates an x86_64 package stored under `Packages/`
    pub fn new(name: &str, version: &str, release: &str) -> Self {
        Self::with_arch(name, version, release, "x86_64")
    }

    pub fn with_arch(name: &str, version: &str, release: &str, arch: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            release: release.to_string(),
            arch: arch.to_string(),
            location_href: format!("Packages/{name}-{version}-{release}.{arch}.rpm"),
        }
    }
}

/// Builds an uncompressed `primary.sqlite` containing the given packages
///
/// # Returns
/// The raw bytes of the SQLite database file
pub fn create_primary_sqlite(packages: &[FixturePackage]) -> Vec<u8> {
    let file = NamedTempFile::new().unwrap();
    {
        let conn = Connection::open(file.path()).unwrap();
        conn.execute_batch(PRIMARY_SCHEMA).unwrap();
        for (key, pkg) in packages.iter().enumerate() {
            conn.execute(
                "INSERT INTO packages (pkgKey, pkgId, name, arch, version, epoch, release, summary, location_href)
                 VALUES (?1, ?2, ?3, ?4, ?5, '0', ?6, ?7, ?8)",
                params![
                    key as i64 + 1,
                    format!("{:064x}", key + 1),
                    pkg.name,
                    pkg.arch,
                    pkg.version,
                    pkg.release,
                    format!("The {} package", pkg.name),
                    pkg.location_href,
                ],
            )
            .unwrap();
        }
    }
    std::fs::read(file.path()).unwrap()
}
