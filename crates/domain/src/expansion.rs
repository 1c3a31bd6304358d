// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::selector::{Location, LocationSelector};

/// Expands a selector into one location per covered county or ZIP code.
///
/// Counties come back in selection order. ZIP ranges come back in ascending
/// numeric order, inclusive of both bounds.
///
/// No de-duplication against other operations is performed; overlapping
/// ranges are the authority's concern.
#[must_use]
pub fn expand(selector: &LocationSelector) -> Vec<Location> {
    match selector {
        LocationSelector::Counties(selection) => selection
            .names()
            .iter()
            .cloned()
            .map(Location::County)
            .collect(),
        LocationSelector::Zips(range) => range.iter().map(Location::Zip).collect(),
    }
}

/// Expands a selector into its location tokens.
///
/// Tokens are county names or zero-padded five-digit ZIP strings.
#[must_use]
pub fn expand_tokens(selector: &LocationSelector) -> Vec<String> {
    expand(selector).iter().map(Location::token).collect()
}
