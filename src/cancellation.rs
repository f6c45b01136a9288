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

//! Cooperative cancellation of a resolution run.
//!
//! The resolver polls its token before each mirror lookup, after each index
//! download and query, and once more before the URLs are returned. Builders
//! poll again before rendering a script.

use crate::error::{DriverkitError, Result};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::flag;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exit status used when a run is interrupted (128 + SIGINT).
pub const CANCELLED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(DriverkitError::Cancelled);
        }
        Ok(())
    }
}

/// Returns a token that SIGINT and SIGTERM cancel.
///
/// The first signal only marks the token so the run stops at its next
/// polling point. A second signal exits immediately with
/// [`CANCELLED_EXIT_CODE`], which interrupts a blocked download.
pub fn install_signal_handlers() -> Result<CancellationToken> {
    let token = CancellationToken::new();
    for signal in [SIGINT, SIGTERM] {
        // Registered first so it sees the flag as it was before this signal
        flag::register_conditional_shutdown(
            signal,
            CANCELLED_EXIT_CODE,
            Arc::clone(&token.cancelled),
        )?;
        flag::register(signal, Arc::clone(&token.cancelled))?;
    }
    Ok(token)
}
