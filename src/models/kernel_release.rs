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
use std::fmt;
use std::str::FromStr;

/// A kernel release string split into its version and extraversion parts.
///
/// `4.14.152-127.182.amzn2.x86_64` parses into a full version of `4.14.152`
/// and a full extraversion of `-127.182.amzn2.x86_64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelRelease {
    pub fullversion: String,
    pub version: u32,
    pub patchlevel: u32,
    pub sublevel: Option<u32>,
    pub extraversion: Option<u32>,
    pub full_extraversion: String,
    pub localversion: String,
}

impl KernelRelease {
    /// Derives the RPM `release` value for this kernel on the given architecture.
    ///
    /// A trailing `.<arch>` is removed first, then a single leading `-`.
    pub fn release_filter(&self, arch: &str) -> String {
        let arch_suffix = format!(".{arch}");
        let without_arch = self
            .full_extraversion
            .strip_suffix(&arch_suffix)
            .unwrap_or(&self.full_extraversion);
        without_arch
            .strip_prefix('-')
            .unwrap_or(without_arch)
            .to_string()
    }
}

fn take_number(input: &str) -> (Option<u32>, &str) {
    let end = input
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    if end == 0 {
        return (None, input);
    }
    (input[..end].parse::<u32>().ok(), &input[end..])
}

impl FromStr for KernelRelease {
    type Err = DriverkitError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DriverkitError::InvalidKernelRelease(
                "Kernel release cannot be empty".to_string(),
            ));
        }

        let invalid = || DriverkitError::InvalidKernelRelease(trimmed.to_string());

        let (version, rest) = take_number(trimmed);
        let version = version.ok_or_else(invalid)?;
        let rest = rest.strip_prefix('.').ok_or_else(invalid)?;
        let (patchlevel, mut rest) = take_number(rest);
        let patchlevel = patchlevel.ok_or_else(invalid)?;

        // The sublevel separator is only consumed when digits follow it
        let mut sublevel = None;
        if let Some(after_sep) = rest.strip_prefix(['.', '+']) {
            let (number, after_number) = take_number(after_sep);
            if number.is_some() {
                sublevel = number;
                rest = after_number;
            }
        }

        let fullversion = trimmed[..trimmed.len() - rest.len()].to_string();

        if !rest.is_empty() && !rest.starts_with(['-', '.', '+']) {
            return Err(invalid());
        }

        let full_extraversion = rest.to_string();
        let (extraversion, localversion) = match rest.get(1..) {
            Some(tail) => {
                let (number, after) = take_number(tail);
                let local = after.strip_prefix('.').unwrap_or(after);
                (number, local.to_string())
            }
            None => (None, String::new()),
        };

        Ok(KernelRelease {
            fullversion,
            version,
            patchlevel,
            sublevel,
            extraversion,
            full_extraversion,
            localversion,
        })
    }
}

impl fmt::Display for KernelRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.fullversion, self.full_extraversion)
    }
}
