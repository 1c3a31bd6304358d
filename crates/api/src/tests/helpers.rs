// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    LocationRequest, OperatorSession, StageAssignRequest, StageReassignRequest, prime_names,
};
use territory_directory::InMemoryDirectory;

pub fn zip_location(from: &str, to: &str) -> LocationRequest {
    LocationRequest {
        counties: Vec::new(),
        zip_from: Some(from.to_string()),
        zip_to: Some(to.to_string()),
    }
}

pub fn county_location(names: &[&str]) -> LocationRequest {
    LocationRequest {
        counties: names.iter().map(|n| (*n).to_string()).collect(),
        zip_from: None,
        zip_to: None,
    }
}

pub fn create_assign_request(
    type_id: i64,
    rep_id: i64,
    location: LocationRequest,
) -> StageAssignRequest {
    StageAssignRequest {
        type_id,
        rep_id,
        location,
    }
}

pub fn create_reassign_request(
    from_rep_id: i64,
    to_rep_id: i64,
    location: LocationRequest,
) -> StageReassignRequest {
    StageReassignRequest {
        type_id: 1,
        from_rep_id,
        to_rep_id,
        location,
    }
}

/// A sample directory and a session with its names loaded.
pub fn setup() -> (InMemoryDirectory, OperatorSession) {
    let directory: InMemoryDirectory = InMemoryDirectory::sample();
    let mut session: OperatorSession = OperatorSession::new();
    prime_names(&mut session, &directory).unwrap();
    (directory, session)
}
