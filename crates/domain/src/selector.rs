// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Zip, ZipRange};
use serde::{Deserialize, Serialize};

/// An ordered set of county names.
///
/// Order is selection order. A county is a set member: selecting it
/// again removes it rather than adding a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CountySelection {
    names: Vec<String>,
}

impl CountySelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Builds a selection from names in selection order.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is blank or appears more than once.
    pub fn from_names<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection: Self = Self::new();
        for name in names {
            let name: String = name.into();
            if name.trim().is_empty() {
                return Err(DomainError::InvalidCountyName(name));
            }
            if selection.contains(&name) {
                return Err(DomainError::DuplicateCounty(name));
            }
            selection.names.push(name);
        }
        Ok(selection)
    }

    /// Toggles membership of a county.
    ///
    /// Returns `true` if the county is selected after the call.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(position) = self.names.iter().position(|n| n == name) {
            self.names.remove(position);
            false
        } else {
            self.names.push(name.to_string());
            true
        }
    }

    /// Returns whether the county is selected.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns the selected names in selection order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the number of selected counties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether no county is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl TryFrom<Vec<String>> for CountySelection {
    type Error = DomainError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_names(names)
    }
}

impl From<CountySelection> for Vec<String> {
    fn from(selection: CountySelection) -> Self {
        selection.names
    }
}

/// Which locations an operation covers.
///
/// An operation names counties or a ZIP range, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLocationSelector", into = "RawLocationSelector")]
pub enum LocationSelector {
    /// A non-empty set of counties, by name.
    Counties(CountySelection),
    /// An inclusive ZIP range.
    Zips(ZipRange),
}

/// Wire shape of a [`LocationSelector`]; validated on the way in.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawLocationSelector {
    Counties(CountySelection),
    Zips(ZipRange),
}

impl TryFrom<RawLocationSelector> for LocationSelector {
    type Error = DomainError;

    fn try_from(raw: RawLocationSelector) -> Result<Self, Self::Error> {
        match raw {
            RawLocationSelector::Counties(selection) => Self::counties(selection),
            RawLocationSelector::Zips(range) => Ok(Self::zips(range)),
        }
    }
}

impl From<LocationSelector> for RawLocationSelector {
    fn from(selector: LocationSelector) -> Self {
        match selector {
            LocationSelector::Counties(selection) => Self::Counties(selection),
            LocationSelector::Zips(range) => Self::Zips(range),
        }
    }
}

impl LocationSelector {
    /// Creates a county selector.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyCountySelection` if no county is selected.
    pub fn counties(selection: CountySelection) -> Result<Self, DomainError> {
        if selection.is_empty() {
            return Err(DomainError::EmptyCountySelection);
        }
        Ok(Self::Counties(selection))
    }

    /// Creates a ZIP range selector.
    #[must_use]
    pub const fn zips(range: ZipRange) -> Self {
        Self::Zips(range)
    }

    /// Returns whether a resolved location falls under this selector.
    #[must_use]
    pub fn covers(&self, location: &Location) -> bool {
        match (self, location) {
            (Self::Counties(selection), Location::County(name)) => selection.contains(name),
            (Self::Zips(range), Location::Zip(zip)) => range.contains(*zip),
            _ => false,
        }
    }

    /// Returns the number of locations this selector resolves to.
    #[must_use]
    pub fn location_count(&self) -> usize {
        match self {
            Self::Counties(selection) => selection.len(),
            Self::Zips(range) => range.len(),
        }
    }
}

impl std::fmt::Display for LocationSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Counties(selection) => write!(f, "counties [{}]", selection.names().join(", ")),
            Self::Zips(range) => write!(f, "ZIP range {range}"),
        }
    }
}

/// A single resolved location: one county or one ZIP code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// A county, by name.
    County(String),
    /// A ZIP code.
    Zip(Zip),
}

impl Location {
    /// Returns the location token: the county name or the zero-padded ZIP.
    #[must_use]
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::County(name) => write!(f, "{name}"),
            Self::Zip(zip) => write!(f, "{zip}"),
        }
    }
}
