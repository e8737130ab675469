// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when boundary geometry cannot be used for ray casting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Boundary solid is unavailable")]
    MissingSolid,

    #[error("Boundary solid has no faces")]
    EmptySolid,

    #[error("Boundary solid is not closed: {0} boundary edges remain")]
    OpenShell(usize),

    #[error("Degenerate face {index}: {reason}")]
    DegenerateFace { index: usize, reason: String },

    #[error("Point has non-finite coordinates")]
    NonFinitePoint,
}
