// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading reference data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// A seed file could not be opened.
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A seed file is not valid CSV, or a row does not fit its columns.
    #[error("Failed to parse {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    /// Rows refer to data that does not exist, or repeat a key.
    #[error("Inconsistent reference data in {file}: {reason}")]
    Integrity { file: &'static str, reason: String },
}
