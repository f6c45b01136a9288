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

use crate::cancellation::CANCELLED_EXIT_CODE;
use crate::error::DriverkitError;

pub fn get_exit_code(error: &DriverkitError) -> i32 {
    match error {
        DriverkitError::InvalidKernelRelease(_)
        | DriverkitError::InvalidConfig(_)
        | DriverkitError::UnsupportedTarget(_) => 2,

        DriverkitError::MirrorNotFound { .. } | DriverkitError::PackageCountMismatch { .. } => 4,

        DriverkitError::Decompression { .. } | DriverkitError::Database { .. } => 5,

        DriverkitError::Network { .. } => 20,

        DriverkitError::Cancelled => CANCELLED_EXIT_CODE,

        _ => 1,
    }
}
