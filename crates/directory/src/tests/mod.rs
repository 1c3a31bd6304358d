// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod seed_tests;

use std::path::PathBuf;
use territory_domain::{LocationSelector, Zip, ZipRange};

pub fn zip(value: &str) -> Zip {
    Zip::parse(value).unwrap()
}

pub fn zip_selector(from: &str, to: &str) -> LocationSelector {
    LocationSelector::zips(ZipRange::new(zip(from), zip(to)).unwrap())
}

/// The seed directory checked in at the repository root.
pub fn seed_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../seed")
}
