// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::SeedError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use territory_domain::{County, LocationSelector, RepType, SalesRep, Zip, ZipCode};

/// One ZIP code held by one rep under one rep type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub type_id: i64,
    pub zip_code: Zip,
    pub sales_rep_id: i64,
}

impl AssignmentRecord {
    /// Creates a new `AssignmentRecord`.
    #[must_use]
    pub const fn new(type_id: i64, zip_code: Zip, sales_rep_id: i64) -> Self {
        Self {
            type_id,
            zip_code,
            sales_rep_id,
        }
    }
}

/// Who holds each ZIP code, per rep type.
pub type AssignmentMap = BTreeMap<(i64, Zip), i64>;

/// The complete reference data set behind the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryData {
    pub rep_types: Vec<RepType>,
    pub sales_reps: Vec<SalesRep>,
    pub counties: Vec<County>,
    pub zip_codes: Vec<ZipCode>,
    pub assignments: Vec<AssignmentRecord>,
}

impl DirectoryData {
    /// Returns the built-in sample data.
    ///
    /// Three rep types, five reps and three Colorado counties. Rep 101
    /// holds 80019 and 80022 as an Inside rep.
    #[must_use]
    pub fn sample() -> Self {
        let rep_types: Vec<RepType> = vec![
            RepType::new(1, String::from("Inside")),
            RepType::new(2, String::from("Outside")),
            RepType::new(3, String::from("Regional")),
        ];
        let sales_reps: Vec<SalesRep> = vec![
            SalesRep::new(101, String::from("R-101"), String::from("Metro"), 1),
            SalesRep::new(102, String::from("R-102"), String::from("Plains"), 1),
            SalesRep::new(201, String::from("R-201"), String::from("Metro"), 2),
            SalesRep::new(202, String::from("R-202"), String::from("Mountain"), 2),
            SalesRep::new(301, String::from("R-301"), String::from("Front Range"), 3),
        ];
        let counties: Vec<County> = vec![
            County::new(String::from("08001"), String::from("Adams"), String::from("CO")),
            County::new(
                String::from("08005"),
                String::from("Arapahoe"),
                String::from("CO"),
            ),
            County::new(String::from("08031"), String::from("Denver"), String::from("CO")),
        ];

        let county_zips: [(&str, &[u32]); 3] = [
            ("08001", &[80019, 80022, 80024, 80030]),
            ("08005", &[80010, 80011, 80012, 80013]),
            ("08031", &[80202, 80203, 80204]),
        ];
        let zip_codes: Vec<ZipCode> = county_zips
            .iter()
            .flat_map(|(code, zips)| {
                zips.iter()
                    .filter_map(|z| Zip::from_value(*z))
                    .map(|zip| ZipCode::new(zip, (*code).to_string()))
            })
            .collect();

        let held: [(i64, u32, i64); 5] = [
            (1, 80019, 101),
            (1, 80022, 101),
            (1, 80202, 102),
            (2, 80010, 201),
            (3, 80030, 301),
        ];
        let assignments: Vec<AssignmentRecord> = held
            .iter()
            .filter_map(|(type_id, zip, rep_id)| {
                Zip::from_value(*zip).map(|zip| AssignmentRecord::new(*type_id, zip, *rep_id))
            })
            .collect();

        Self {
            rep_types,
            sales_reps,
            counties,
            zip_codes,
            assignments,
        }
    }

    /// Checks that every reference resolves and no key repeats.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Integrity` naming the first problem found.
    pub fn check_integrity(&self) -> Result<(), SeedError> {
        let mut type_ids: HashSet<i64> = HashSet::new();
        for rep_type in &self.rep_types {
            if !type_ids.insert(rep_type.type_id) {
                return Err(integrity(
                    "rep_types.csv",
                    format!("duplicate type_id {}", rep_type.type_id),
                ));
            }
        }

        let mut rep_ids: HashSet<i64> = HashSet::new();
        for rep in &self.sales_reps {
            if !rep_ids.insert(rep.sales_rep_id) {
                return Err(integrity(
                    "sales_reps.csv",
                    format!("duplicate sales_rep_id {}", rep.sales_rep_id),
                ));
            }
            if !type_ids.contains(&rep.type_id) {
                return Err(integrity(
                    "sales_reps.csv",
                    format!(
                        "rep {} refers to unknown type_id {}",
                        rep.sales_rep_id, rep.type_id
                    ),
                ));
            }
        }

        let mut county_codes: HashSet<&str> = HashSet::new();
        let mut county_names: HashSet<&str> = HashSet::new();
        for county in &self.counties {
            if !county_codes.insert(&county.county_code) {
                return Err(integrity(
                    "counties.csv",
                    format!("duplicate county_code {}", county.county_code),
                ));
            }
            if !county_names.insert(&county.county_name) {
                return Err(integrity(
                    "counties.csv",
                    format!("duplicate county_name {}", county.county_name),
                ));
            }
        }

        let mut zips: HashSet<Zip> = HashSet::new();
        for row in &self.zip_codes {
            if !zips.insert(row.zip_code) {
                return Err(integrity(
                    "zip_codes.csv",
                    format!("ZIP {} is listed more than once", row.zip_code),
                ));
            }
            if !county_codes.contains(row.county_code.as_str()) {
                return Err(integrity(
                    "zip_codes.csv",
                    format!(
                        "ZIP {} refers to unknown county_code {}",
                        row.zip_code, row.county_code
                    ),
                ));
            }
        }

        let mut held: HashSet<(i64, Zip)> = HashSet::new();
        for record in &self.assignments {
            let Some(rep) = self.rep(record.sales_rep_id) else {
                return Err(integrity(
                    "assignments.csv",
                    format!("unknown sales_rep_id {}", record.sales_rep_id),
                ));
            };
            if rep.type_id != record.type_id {
                return Err(integrity(
                    "assignments.csv",
                    format!(
                        "rep {} does not belong to type_id {}",
                        record.sales_rep_id, record.type_id
                    ),
                ));
            }
            if !zips.contains(&record.zip_code) {
                return Err(integrity(
                    "assignments.csv",
                    format!("unknown ZIP {}", record.zip_code),
                ));
            }
            if !held.insert((record.type_id, record.zip_code)) {
                return Err(integrity(
                    "assignments.csv",
                    format!(
                        "ZIP {} is assigned twice under type_id {}",
                        record.zip_code, record.type_id
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Returns the rep type with the given id.
    #[must_use]
    pub fn rep_type(&self, type_id: i64) -> Option<&RepType> {
        self.rep_types.iter().find(|t| t.type_id == type_id)
    }

    /// Returns the rep with the given id.
    #[must_use]
    pub fn rep(&self, rep_id: i64) -> Option<&SalesRep> {
        self.sales_reps.iter().find(|r| r.sales_rep_id == rep_id)
    }

    /// Returns the county with the given name.
    #[must_use]
    pub fn county_by_name(&self, name: &str) -> Option<&County> {
        self.counties.iter().find(|c| c.county_name == name)
    }

    /// Builds the ownership map from the assignment rows.
    #[must_use]
    pub fn assignment_map(&self) -> AssignmentMap {
        self.assignments
            .iter()
            .map(|a| ((a.type_id, a.zip_code), a.sales_rep_id))
            .collect()
    }

    /// Resolves a selector to known ZIP codes.
    ///
    /// Returns the ZIP codes, ascending, and any county names not found.
    #[must_use]
    pub fn resolve(&self, selector: &LocationSelector) -> (Vec<Zip>, Vec<String>) {
        let mut zips: BTreeSet<Zip> = BTreeSet::new();
        let mut unknown: Vec<String> = Vec::new();

        match selector {
            LocationSelector::Counties(selection) => {
                for name in selection.names() {
                    match self.county_by_name(name) {
                        Some(county) => zips.extend(
                            self.zip_codes
                                .iter()
                                .filter(|z| z.county_code == county.county_code)
                                .map(|z| z.zip_code),
                        ),
                        None => unknown.push(name.clone()),
                    }
                }
            }
            LocationSelector::Zips(range) => zips.extend(
                self.zip_codes
                    .iter()
                    .map(|z| z.zip_code)
                    .filter(|zip| range.contains(*zip)),
            ),
        }

        (zips.into_iter().collect(), unknown)
    }
}

fn integrity(file: &'static str, reason: String) -> SeedError {
    SeedError::Integrity { file, reason }
}
