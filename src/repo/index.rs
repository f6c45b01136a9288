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
use crate::models::kernel_release::KernelRelease;
use log::{debug, trace};
use rusqlite::{Connection, OpenFlags, params};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const KERNEL_PACKAGES_QUERY: &str = "SELECT name, arch, version, release, location_href
     FROM packages
     WHERE name LIKE 'kernel%'
       AND name NOT LIKE 'kernel-livepatch%'
       AND name NOT LIKE '%doc%'
       AND name NOT LIKE '%tools%'
       AND name NOT LIKE '%headers%'
       AND version = ?1
       AND release = ?2
     ORDER BY name, location_href";

/// A row of the `packages` table in a yum `primary.sqlite` index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub arch: String,
    pub version: String,
    pub release: String,
    pub location_href: String,
}

/// Exact version and release the kernel packages must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelPackageQuery {
    pub version: String,
    pub release: String,
}

impl KernelPackageQuery {
    pub fn new(kernel: &KernelRelease, arch: &str) -> Self {
        Self {
            version: kernel.fullversion.clone(),
            release: kernel.release_filter(arch),
        }
    }
}

/// A decompressed package index opened read-only from a temporary file.
///
/// The connection is closed and the file deleted when the index is dropped.
pub struct PackageIndex {
    // Declared before `file` so the connection closes before the file is removed
    conn: Connection,
    file: NamedTempFile,
}

impl PackageIndex {
    /// Materializes raw index bytes into a temporary SQLite file and opens it.
    pub fn from_bytes(bytes: &[u8], label: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(&format!("{label}-"))
            .suffix(".sqlite")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;

        let conn = open_read_only(file.path())?;
        debug!("Opened package index {}", file.path().display());

        Ok(Self { conn, file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Kernel and kernel-devel style packages for an exact version/release.
    ///
    /// Livepatch, documentation, tools and headers packages are excluded.
    pub fn kernel_packages(&self, query: &KernelPackageQuery) -> Result<Vec<PackageRecord>> {
        let mut stmt = self
            .conn
            .prepare(KERNEL_PACKAGES_QUERY)
            .map_err(database_error("preparing kernel package query"))?;

        let rows = stmt
            .query_map(params![query.version, query.release], |row| {
                Ok(PackageRecord {
                    name: row.get(0)?,
                    arch: row.get(1)?,
                    version: row.get(2)?,
                    release: row.get(3)?,
                    location_href: row.get(4)?,
                })
            })
            .map_err(database_error("querying kernel packages"))?;

        let mut packages = Vec::new();
        for row in rows {
            let record = row.map_err(database_error("reading kernel package row"))?;
            trace!(
                "Matched {}-{}-{}.{} at {}",
                record.name, record.version, record.release, record.arch, record.location_href
            );
            packages.push(record);
        }

        Ok(packages)
    }
}

fn database_error(context: &str) -> impl FnOnce(rusqlite::Error) -> DriverkitError {
    let context = context.to_string();
    move |source| DriverkitError::Database { context, source }
}

fn open_read_only(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| DriverkitError::Database {
        context: format!("opening package index {}", path.display()),
        source,
    })
}
