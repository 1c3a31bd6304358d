// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use territory::{NameCatalog, SelectionChain, StagingSet};

/// Everything one operator has in flight.
///
/// Sessions are created explicitly and owned by the caller; nothing here is
/// global. Dropping the session discards anything still staged.
#[derive(Debug, Clone, Default)]
pub struct OperatorSession {
    /// Pending operations.
    pub staging: StagingSet,
    /// The rep type / source rep lookup chain.
    pub selection: SelectionChain,
    /// Display names for type and rep ids seen so far.
    pub names: NameCatalog,
}

impl OperatorSession {
    /// Creates a session with nothing staged or selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that starts with the given display names.
    #[must_use]
    pub fn with_names(names: NameCatalog) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }
}
