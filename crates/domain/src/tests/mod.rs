// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Zip;

/// Parses a ZIP code that the test knows to be valid.
pub fn zip(value: &str) -> Zip {
    Zip::parse(value).unwrap()
}
