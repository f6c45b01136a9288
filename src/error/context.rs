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

use crate::error::DriverkitError;
use crate::models::target::TargetVariant;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a DriverkitError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a DriverkitError) -> Self {
        let (suggestion, details) = match error {
            DriverkitError::Network { url, message } => {
                let suggestion = if message.contains("timed out") || message.contains("timeout")
                {
                    Some(
                        "Increase the request timeout with DRIVERKIT_HTTP__TIMEOUT_SECS or the \
                         [http] section of the config file."
                            .to_string(),
                    )
                } else if message.contains("404") {
                    Some(
                        "The repository path does not exist. Check the architecture and the \
                         mirror root configured for this target."
                            .to_string(),
                    )
                } else {
                    Some("Check your internet connection and proxy settings.".to_string())
                };
                let details = Some(format!("Request to {url} failed: {message}"));
                (suggestion, details)
            }
            DriverkitError::MirrorNotFound { url } => {
                let suggestion = Some(
                    "The mirror list returned no repository. The generation may have been \
                     retired; verify the mirror root for this target."
                        .to_string(),
                );
                let details = Some(format!("Empty mirror list: {url}"));
                (suggestion, details)
            }
            DriverkitError::Decompression { url, codec, .. } => {
                let suggestion = Some(
                    "The package index may be truncated or served with a different encoding. \
                     Try again later."
                        .to_string(),
                );
                let details = Some(format!("Expected a {codec} stream from {url}"));
                (suggestion, details)
            }
            DriverkitError::Database { context, .. } => {
                let suggestion = Some(
                    "The downloaded package index is not a readable SQLite database.".to_string(),
                );
                let details = Some(format!("While {context}"));
                (suggestion, details)
            }
            DriverkitError::PackageCountMismatch {
                target,
                expected,
                found,
            } => {
                let suggestion = if *found == 0 {
                    Some(format!(
                        "No kernel packages match this release on {target}. Check the kernel \
                         release string and architecture (e.g. 4.14.152-127.182.amzn2.x86_64)."
                    ))
                } else {
                    Some(
                        "The repositories returned an ambiguous set of kernel packages. Report \
                         the kernel release so the package filter can be adjusted."
                            .to_string(),
                    )
                };
                let details = Some(format!(
                    "Resolved {found} package URL(s), expected {expected} (kernel and \
                     kernel-devel)"
                ));
                (suggestion, details)
            }
            DriverkitError::UnsupportedTarget(target) => {
                let supported = TargetVariant::all()
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let suggestion = Some(format!("Supported targets: {supported}."));
                let details = Some(format!("Target '{target}' is not supported."));
                (suggestion, details)
            }
            DriverkitError::InvalidKernelRelease(msg) => {
                let suggestion = Some(
                    "Kernel release format should be '<version>.<patchlevel>.<sublevel>-<extra>' \
                     (e.g. '4.14.152-127.182.amzn2.x86_64')."
                        .to_string(),
                );
                let details = Some(format!("Invalid format: {msg}"));
                (suggestion, details)
            }
            DriverkitError::ConfigError(msg) | DriverkitError::InvalidConfig(msg) => {
                let suggestion =
                    Some("Check config.toml and DRIVERKIT_* environment variables.".to_string());
                let details = Some(msg.clone());
                (suggestion, details)
            }
            DriverkitError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check file permissions of the output path.".to_string())
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
