// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A category of sales representative (e.g. Inside, Outside, Regional).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepType {
    /// The rep type identifier.
    pub type_id: i64,
    /// The human-readable type name.
    pub type_name: String,
}

impl RepType {
    /// Creates a new `RepType`.
    #[must_use]
    pub const fn new(type_id: i64, type_name: String) -> Self {
        Self { type_id, type_name }
    }
}

/// A sales representative.
///
/// Every rep belongs to exactly one [`RepType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalesRep {
    /// The rep identifier.
    pub sales_rep_id: i64,
    /// The rep's number as shown to operators.
    pub sales_rep_no: String,
    /// The division the rep works in.
    pub division: String,
    /// The rep type this rep belongs to.
    pub type_id: i64,
}

impl SalesRep {
    /// Creates a new `SalesRep`.
    #[must_use]
    pub const fn new(
        sales_rep_id: i64,
        sales_rep_no: String,
        division: String,
        type_id: i64,
    ) -> Self {
        Self {
            sales_rep_id,
            sales_rep_no,
            division,
            type_id,
        }
    }

    /// Returns the name used for this rep in display rows.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.sales_rep_no, self.division)
    }
}

/// A county.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct County {
    /// The county code. ZIP codes reference their county by this code.
    pub county_code: String,
    /// The county name. County selections are made by name.
    pub county_name: String,
    /// The two-letter state code.
    pub state_code: String,
}

impl County {
    /// Creates a new `County`.
    #[must_use]
    pub const fn new(county_code: String, county_name: String, state_code: String) -> Self {
        Self {
            county_code,
            county_name,
            state_code,
        }
    }
}

/// A five-digit ZIP code.
///
/// ZIP codes compare numerically and always render zero-padded,
/// so "08000" sorts before "09000" and round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Zip {
    value: u32,
}

impl Zip {
    /// The largest representable ZIP value.
    pub const MAX_VALUE: u32 = 99_999;

    /// Parses a ZIP code.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is exactly five ASCII digits.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value.len() != 5 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidZipCode(value.to_string()));
        }
        let numeric: u32 = value
            .parse()
            .map_err(|_| DomainError::InvalidZipCode(value.to_string()))?;
        Ok(Self { value: numeric })
    }

    /// Creates a ZIP code from its numeric value.
    ///
    /// Returns `None` if the value does not fit in five digits.
    #[must_use]
    pub const fn from_value(value: u32) -> Option<Self> {
        if value > Self::MAX_VALUE {
            None
        } else {
            Some(Self { value })
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }
}

impl std::fmt::Display for Zip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:05}", self.value)
    }
}

impl FromStr for Zip {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Zip {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Zip> for String {
    fn from(zip: Zip) -> Self {
        zip.to_string()
    }
}

/// An inclusive, ordered range of ZIP codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawZipRange", into = "RawZipRange")]
pub struct ZipRange {
    from: Zip,
    to: Zip,
}

/// Wire shape of a [`ZipRange`]; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawZipRange {
    zip_from: Zip,
    zip_to: Zip,
}

impl ZipRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ZipRangeOutOfOrder` if `from` is greater than `to`.
    pub fn new(from: Zip, to: Zip) -> Result<Self, DomainError> {
        if from > to {
            return Err(DomainError::ZipRangeOutOfOrder { from, to });
        }
        Ok(Self { from, to })
    }

    /// Creates a range holding a single ZIP code.
    #[must_use]
    pub const fn single(zip: Zip) -> Self {
        Self { from: zip, to: zip }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn from(&self) -> Zip {
        self.from
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn to(&self) -> Zip {
        self.to
    }

    /// Returns the number of ZIP codes in the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.to.value - self.from.value) as usize + 1
    }

    /// Ranges always hold at least one ZIP code.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns whether the range contains the given ZIP code.
    #[must_use]
    pub fn contains(&self, zip: Zip) -> bool {
        self.from <= zip && zip <= self.to
    }

    /// Iterates the range in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Zip> + use<> {
        (self.from.value..=self.to.value).map(|value| Zip { value })
    }
}

impl std::fmt::Display for ZipRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl TryFrom<RawZipRange> for ZipRange {
    type Error = DomainError;

    fn try_from(raw: RawZipRange) -> Result<Self, Self::Error> {
        Self::new(raw.zip_from, raw.zip_to)
    }
}

impl From<ZipRange> for RawZipRange {
    fn from(range: ZipRange) -> Self {
        Self {
            zip_from: range.from,
            zip_to: range.to,
        }
    }
}

/// A ZIP code and the county it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZipCode {
    /// The ZIP code.
    pub zip_code: Zip,
    /// The code of the county this ZIP code belongs to.
    pub county_code: String,
}

impl ZipCode {
    /// Creates a new `ZipCode`.
    #[must_use]
    pub const fn new(zip_code: Zip, county_code: String) -> Self {
        Self {
            zip_code,
            county_code,
        }
    }
}

/// A ZIP code currently held by a rep, as reported by the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrentAssignment {
    /// The held ZIP code.
    pub zip_code: Zip,
}

impl CurrentAssignment {
    /// Creates a new `CurrentAssignment`.
    #[must_use]
    pub const fn new(zip_code: Zip) -> Self {
        Self { zip_code }
    }
}
