// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DomainError, FieldError};
use crate::selector::{CountySelection, LocationSelector};
use crate::types::{Zip, ZipRange};
use std::collections::BTreeSet;

/// Raw location input as entered by an operator.
///
/// This is the form-level shape: nothing here has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationForm {
    /// Selected county names, in selection order.
    pub counties: Vec<String>,
    /// The lower ZIP bound, if entered.
    pub zip_from: Option<String>,
    /// The upper ZIP bound, if entered.
    pub zip_to: Option<String>,
}

/// Normalizes an optional text field: blank input counts as absent.
fn entered(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Validates a location form and builds its selector.
///
/// This is the form-level precondition that runs before an operation is
/// ever constructed. Every problem found is reported, tagged with the
/// field it belongs to.
///
/// # Arguments
///
/// * `form` - The raw form input
///
/// # Returns
///
/// * `Ok(LocationSelector)` if the form is well-formed
/// * `Err(Vec<FieldError>)` with one entry per problem otherwise
///
/// # Errors
///
/// Returns errors if:
/// - Both counties and a ZIP bound were supplied, or neither was
/// - A county name is blank or repeated
/// - A ZIP bound is missing or is not exactly 5 digits
/// - The lower ZIP bound is numerically greater than the upper bound
pub fn validate_location_form(form: &LocationForm) -> Result<LocationSelector, Vec<FieldError>> {
    let zip_from: Option<&str> = entered(form.zip_from.as_ref());
    let zip_to: Option<&str> = entered(form.zip_to.as_ref());
    let has_counties: bool = !form.counties.is_empty();
    let has_zips: bool = zip_from.is_some() || zip_to.is_some();

    // Rule: exactly one selector variant
    if has_counties && has_zips {
        return Err(vec![FieldError::new(
            "location",
            DomainError::ConflictingSelectors,
        )]);
    }
    if !has_counties && !has_zips {
        return Err(vec![FieldError::new("location", DomainError::MissingSelector)]);
    }

    if has_counties {
        let errors: Vec<FieldError> = county_errors(&form.counties);
        if !errors.is_empty() {
            return Err(errors);
        }
        let selection: CountySelection = CountySelection::from_names(form.counties.iter().cloned())
            .map_err(|e| vec![FieldError::new("counties", e)])?;
        return LocationSelector::counties(selection)
            .map_err(|e| vec![FieldError::new("counties", e)]);
    }

    let mut errors: Vec<FieldError> = Vec::new();
    let from: Option<Zip> = parse_bound("zip_from", zip_from, &mut errors);
    let to: Option<Zip> = parse_bound("zip_to", zip_to, &mut errors);

    match (from, to) {
        (Some(from), Some(to)) if errors.is_empty() => ZipRange::new(from, to)
            .map(LocationSelector::zips)
            .map_err(|e| vec![FieldError::new("zip_from", e)]),
        _ => Err(errors),
    }
}

/// Reports each blank or repeated county name, in selection order.
fn county_errors(names: &[String]) -> Vec<FieldError> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    names
        .iter()
        .filter_map(|name| {
            if name.trim().is_empty() {
                Some(DomainError::InvalidCountyName(name.clone()))
            } else if seen.insert(name.as_str()) {
                None
            } else {
                Some(DomainError::DuplicateCounty(name.clone()))
            }
        })
        .map(|e| FieldError::new("counties", e))
        .collect()
}

/// Parses one ZIP bound, recording any problem against its field.
fn parse_bound(
    field: &'static str,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<Zip> {
    let Some(value) = value else {
        errors.push(FieldError::new(
            field,
            DomainError::MissingZipBound { bound: field },
        ));
        return None;
    };
    match Zip::parse(value) {
        Ok(zip) => Some(zip),
        Err(e) => {
            errors.push(FieldError::new(field, e));
            None
        }
    }
}
