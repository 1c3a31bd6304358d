// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BatchResponse, BatchUpdate, CommunicationError, DirectoryService, TerritoryAuthority,
    ValidationReport,
};
use std::cell::{Cell, RefCell};
use territory_domain::{
    AssignOperation, County, CountySelection, CurrentAssignment, LocationSelector,
    ReassignOperation, RepType, SalesRep, StagedOperation, Zip, ZipCode, ZipRange,
};

pub fn zip(value: &str) -> Zip {
    Zip::parse(value).unwrap()
}

pub fn zip_selector(from: &str, to: &str) -> LocationSelector {
    LocationSelector::zips(ZipRange::new(zip(from), zip(to)).unwrap())
}

pub fn county_selector(names: &[&str]) -> LocationSelector {
    LocationSelector::counties(CountySelection::from_names(names.iter().copied()).unwrap())
        .unwrap()
}

pub fn create_test_assign(rep_id: i64, from: &str, to: &str) -> AssignOperation {
    AssignOperation::new(1, rep_id, zip_selector(from, to))
}

pub fn create_test_reassign(
    from_rep_id: i64,
    to_rep_id: i64,
    selector: LocationSelector,
) -> ReassignOperation {
    ReassignOperation::new(1, from_rep_id, to_rep_id, selector).unwrap()
}

/// A directory with two counties. Rep 101 holds 80019 and 80022.
pub struct FakeDirectory {
    pub unavailable: Cell<bool>,
    pub zip_lookups: Cell<usize>,
}

impl FakeDirectory {
    pub const fn new() -> Self {
        Self {
            unavailable: Cell::new(false),
            zip_lookups: Cell::new(0),
        }
    }

    fn check(&self, operation: &'static str) -> Result<(), CommunicationError> {
        if self.unavailable.get() {
            return Err(CommunicationError::Unavailable { operation });
        }
        Ok(())
    }
}

impl DirectoryService for FakeDirectory {
    fn rep_types(&self) -> Result<Vec<RepType>, CommunicationError> {
        self.check("rep_types")?;
        Ok(vec![
            RepType::new(1, String::from("Inside")),
            RepType::new(2, String::from("Outside")),
        ])
    }

    fn sales_reps(&self, type_id: i64) -> Result<Vec<SalesRep>, CommunicationError> {
        self.check("sales_reps")?;
        let all: Vec<SalesRep> = vec![
            SalesRep::new(101, String::from("R-101"), String::from("Metro"), 1),
            SalesRep::new(102, String::from("R-102"), String::from("Plains"), 1),
            SalesRep::new(201, String::from("R-201"), String::from("Metro"), 2),
        ];
        Ok(all.into_iter().filter(|r| r.type_id == type_id).collect())
    }

    fn counties(&self) -> Result<Vec<County>, CommunicationError> {
        self.check("counties")?;
        Ok(vec![
            County::new(String::from("08001"), String::from("Adams"), String::from("CO")),
            County::new(
                String::from("08005"),
                String::from("Arapahoe"),
                String::from("CO"),
            ),
        ])
    }

    fn zip_codes(&self, county_code: &str) -> Result<Vec<ZipCode>, CommunicationError> {
        self.check("zip_codes")?;
        self.zip_lookups.set(self.zip_lookups.get() + 1);
        let zips: &[&str] = match county_code {
            "08001" => &["80019", "80022", "80024"],
            "08005" => &["80010", "80011", "80012"],
            _ => &[],
        };
        Ok(zips
            .iter()
            .map(|z| ZipCode::new(zip(z), county_code.to_string()))
            .collect())
    }

    fn current_assignments(
        &self,
        rep_id: i64,
    ) -> Result<Vec<CurrentAssignment>, CommunicationError> {
        self.check("current_assignments")?;
        if rep_id == 101 {
            return Ok(vec![
                CurrentAssignment::new(zip("80019")),
                CurrentAssignment::new(zip("80022")),
            ]);
        }
        Ok(Vec::new())
    }
}

/// An authority whose answers are scripted by the test.
pub struct FakeAuthority {
    pub validate_errors: Vec<String>,
    pub batch_success: bool,
    pub unavailable: bool,
    pub validated: RefCell<Vec<StagedOperation>>,
    pub batches: RefCell<Vec<BatchUpdate>>,
}

impl FakeAuthority {
    pub const fn accepting() -> Self {
        Self {
            validate_errors: Vec::new(),
            batch_success: true,
            unavailable: false,
            validated: RefCell::new(Vec::new()),
            batches: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting_batches() -> Self {
        let mut authority: Self = Self::accepting();
        authority.batch_success = false;
        authority
    }

    pub fn unavailable() -> Self {
        let mut authority: Self = Self::accepting();
        authority.unavailable = true;
        authority
    }
}

impl TerritoryAuthority for FakeAuthority {
    fn validate(
        &self,
        operation: &StagedOperation,
    ) -> Result<ValidationReport, CommunicationError> {
        if self.unavailable {
            return Err(CommunicationError::Unavailable {
                operation: "validate",
            });
        }
        self.validated.borrow_mut().push(operation.clone());
        Ok(ValidationReport::rejected(self.validate_errors.clone()))
    }

    fn batch_update(&self, batch: &BatchUpdate) -> Result<BatchResponse, CommunicationError> {
        if self.unavailable {
            return Err(CommunicationError::Unavailable {
                operation: "batch_update",
            });
        }
        self.batches.borrow_mut().push(batch.clone());
        Ok(BatchResponse {
            success: self.batch_success,
        })
    }
}
