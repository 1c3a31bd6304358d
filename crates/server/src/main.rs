// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use territory::{ConfirmOutcome, LookupTicket, RowMatch};
use territory_api::{
    ApiError, ConfirmResponse, CountiesResponse, CurrentAssignmentsResponse, LocationRequest,
    OperatorSession, PreviewResponse, RemoveResponse, RepTypesResponse, SalesRepsResponse,
    StageAssignRequest, StageReassignRequest, StageResponse, StagingResponse, ZipCodesResponse,
    apply_current_assignments, apply_sales_reps, clear_staging, confirm_batch,
    fetch_current_assignments, fetch_sales_reps, get_staging, list_counties, list_rep_types,
    list_zip_codes, preview, prime_names, remove_assign, remove_reassign, remove_row,
    select_rep_type, select_source_rep, stage_assign, stage_reassign,
};
use territory_directory::{DirectoryData, InMemoryDirectory};
use territory_domain::{CurrentAssignment, SalesRep};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Territory Server - HTTP server for staging and confirming territory assignments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Directory holding the reference CSV files. If not provided, uses the built-in sample data.
    #[arg(short, long)]
    seed_dir: Option<PathBuf>,
}

/// Application state shared across handlers.
///
/// The operator session sits behind a Mutex; the directory guards its own
/// assignment table.
#[derive(Clone)]
struct AppState {
    /// The operator's staging set, lookup chain and display names.
    session: Arc<Mutex<OperatorSession>>,
    /// Reference directory and territory authority.
    directory: Arc<InMemoryDirectory>,
    /// Live staging event fan-out.
    broadcaster: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(directory: InMemoryDirectory, session: OperatorSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            directory: Arc::new(directory),
            broadcaster: Arc::new(LiveEventBroadcaster::new()),
        }
    }
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.broadcaster)
    }
}

/// Query parameters for the sales rep lookup.
#[derive(Debug, Deserialize)]
struct SalesRepsQuery {
    /// The rep type to list.
    type_id: i64,
}

/// Query parameters for the ZIP code lookup.
#[derive(Debug, Deserialize)]
struct ZipCodesQuery {
    /// The county whose ZIP codes to list.
    county_code: String,
}

/// Query parameters for the current assignment lookup.
#[derive(Debug, Deserialize)]
struct CurrentAssignmentsQuery {
    /// The rep whose assignments to fetch.
    rep_id: i64,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always true.
    error: bool,
    /// Summary of what went wrong.
    message: String,
    /// Individual problems, when there are several.
    details: Vec<String>,
}

/// HTTP error wrapper.
#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
    details: Vec<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: ErrorResponse = ErrorResponse {
            error: true,
            message: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::CommunicationFailure { .. } => StatusCode::BAD_GATEWAY,
            ApiError::ConfirmRejected { .. } => StatusCode::CONFLICT,
        };
        Self {
            status,
            message: err.to_string(),
            details: err.details(),
        }
    }
}

/// Handler for GET `/rep_types` endpoint.
async fn handle_list_rep_types(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<RepTypesResponse>, HttpError> {
    info!("Handling list_rep_types request");

    let mut session = app_state.session.lock().await;
    let response: RepTypesResponse = list_rep_types(&mut session, app_state.directory.as_ref())?;
    drop(session);

    Ok(Json(response))
}

/// Handler for GET `/sales_reps` endpoint.
///
/// Selecting the type resets the rest of the lookup chain. The directory is
/// queried without holding the session lock, so a newer selection made in
/// the meantime wins.
async fn handle_list_sales_reps(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SalesRepsQuery>,
) -> Result<Json<SalesRepsResponse>, HttpError> {
    info!(type_id = query.type_id, "Handling list_sales_reps request");

    let ticket: LookupTicket =
        select_rep_type(&mut *app_state.session.lock().await, query.type_id);
    let sales_reps: Vec<SalesRep> =
        fetch_sales_reps(app_state.directory.as_ref(), query.type_id)?;

    let mut session = app_state.session.lock().await;
    let response: SalesRepsResponse =
        apply_sales_reps(&mut session, ticket, query.type_id, sales_reps);
    drop(session);

    if !response.current {
        warn!(type_id = query.type_id, "Sales rep lookup superseded");
    }
    Ok(Json(response))
}

/// Handler for GET `/counties` endpoint.
async fn handle_list_counties(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<CountiesResponse>, HttpError> {
    info!("Handling list_counties request");

    let response: CountiesResponse = list_counties(app_state.directory.as_ref())?;
    Ok(Json(response))
}

/// Handler for GET `/zip_codes` endpoint.
async fn handle_list_zip_codes(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ZipCodesQuery>,
) -> Result<Json<ZipCodesResponse>, HttpError> {
    info!(county_code = %query.county_code, "Handling list_zip_codes request");

    let response: ZipCodesResponse =
        list_zip_codes(app_state.directory.as_ref(), &query.county_code)?;
    Ok(Json(response))
}

/// Handler for GET `/current_assignments` endpoint.
async fn handle_list_current_assignments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CurrentAssignmentsQuery>,
) -> Result<Json<CurrentAssignmentsResponse>, HttpError> {
    info!(rep_id = query.rep_id, "Handling list_current_assignments request");

    let ticket: LookupTicket =
        select_source_rep(&mut *app_state.session.lock().await, query.rep_id);
    let assignments: Vec<CurrentAssignment> =
        fetch_current_assignments(app_state.directory.as_ref(), query.rep_id)?;

    let mut session = app_state.session.lock().await;
    let response: CurrentAssignmentsResponse =
        apply_current_assignments(&mut session, ticket, query.rep_id, &assignments);
    drop(session);

    if !response.current {
        warn!(rep_id = query.rep_id, "Current assignment lookup superseded");
    }
    Ok(Json(response))
}

/// Handler for POST `/preview` endpoint.
async fn handle_preview(
    Json(req): Json<LocationRequest>,
) -> Result<Json<PreviewResponse>, HttpError> {
    info!("Handling preview request");

    let response: PreviewResponse = preview(req)?;
    Ok(Json(response))
}

/// Handler for GET `/staging` endpoint.
async fn handle_get_staging(AxumState(app_state): AxumState<AppState>) -> Json<StagingResponse> {
    info!("Handling get_staging request");

    let session = app_state.session.lock().await;
    let response: StagingResponse = get_staging(&session);
    drop(session);

    Json(response)
}

/// Handler for POST `/staging/assign` endpoint.
async fn handle_stage_assign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<StageAssignRequest>,
) -> Result<Json<StageResponse>, HttpError> {
    info!(
        type_id = req.type_id,
        rep_id = req.rep_id,
        "Handling stage_assign request"
    );

    let mut session = app_state.session.lock().await;
    let result: Result<StageResponse, ApiError> =
        stage_assign(&mut session, app_state.directory.as_ref(), req);
    drop(session);

    let response: StageResponse = result.inspect_err(log_rejection)?;
    app_state
        .broadcaster
        .broadcast(&LiveEvent::staged(&response.staged));
    Ok(Json(response))
}

/// Handler for POST `/staging/reassign` endpoint.
async fn handle_stage_reassign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<StageReassignRequest>,
) -> Result<Json<StageResponse>, HttpError> {
    info!(
        type_id = req.type_id,
        from_rep_id = req.from_rep_id,
        to_rep_id = req.to_rep_id,
        "Handling stage_reassign request"
    );

    let directory: &InMemoryDirectory = app_state.directory.as_ref();
    let mut session = app_state.session.lock().await;
    let result: Result<StageResponse, ApiError> =
        stage_reassign(&mut session, directory, directory, req);
    drop(session);

    let response: StageResponse = result.inspect_err(log_rejection)?;
    app_state
        .broadcaster
        .broadcast(&LiveEvent::staged(&response.staged));
    Ok(Json(response))
}

/// Handler for DELETE `/staging/assign/{index}` endpoint.
async fn handle_remove_assign(
    AxumState(app_state): AxumState<AppState>,
    Path(index): Path<usize>,
) -> Json<RemoveResponse> {
    info!(index, "Handling remove_assign request");

    let mut session = app_state.session.lock().await;
    let response: RemoveResponse = remove_assign(&mut session, index);
    drop(session);

    announce_removal(&app_state.broadcaster, &response);
    Json(response)
}

/// Handler for DELETE `/staging/reassign/{index}` endpoint.
async fn handle_remove_reassign(
    AxumState(app_state): AxumState<AppState>,
    Path(index): Path<usize>,
) -> Json<RemoveResponse> {
    info!(index, "Handling remove_reassign request");

    let mut session = app_state.session.lock().await;
    let response: RemoveResponse = remove_reassign(&mut session, index);
    drop(session);

    announce_removal(&app_state.broadcaster, &response);
    Json(response)
}

/// Handler for POST `/staging/remove_row` endpoint.
async fn handle_remove_row(
    AxumState(app_state): AxumState<AppState>,
    Json(row): Json<RowMatch>,
) -> Json<RemoveResponse> {
    info!(?row, "Handling remove_row request");

    let mut session = app_state.session.lock().await;
    let response: RemoveResponse = remove_row(&mut session, &row);
    drop(session);

    announce_removal(&app_state.broadcaster, &response);
    Json(response)
}

/// Handler for POST `/staging/clear` endpoint.
async fn handle_clear_staging(AxumState(app_state): AxumState<AppState>) -> Json<StagingResponse> {
    info!("Handling clear_staging request");

    let mut session = app_state.session.lock().await;
    let response: StagingResponse = clear_staging(&mut session);
    drop(session);

    app_state.broadcaster.broadcast(&LiveEvent::StagingCleared);
    Json(response)
}

/// Handler for POST `/staging/confirm` endpoint.
///
/// The session lock is held for the whole call so nothing can be staged or
/// removed while the batch is in flight.
async fn handle_confirm(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ConfirmResponse>, HttpError> {
    info!("Handling confirm request");

    let mut session = app_state.session.lock().await;
    let staged: usize = session.staging.len();
    let result: Result<ConfirmResponse, ApiError> =
        confirm_batch(&mut session, app_state.directory.as_ref());
    drop(session);

    match result {
        Ok(response) => {
            if let ConfirmOutcome::Confirmed { assigns, reassigns } = response.outcome {
                app_state
                    .broadcaster
                    .broadcast(&LiveEvent::BatchConfirmed { assigns, reassigns });
            }
            Ok(Json(response))
        }
        Err(err) => {
            if matches!(err, ApiError::ConfirmRejected { .. }) {
                app_state
                    .broadcaster
                    .broadcast(&LiveEvent::BatchRejected { staged });
            }
            log_rejection(&err);
            Err(err.into())
        }
    }
}

fn log_rejection(err: &ApiError) {
    match err {
        ApiError::CommunicationFailure { .. } => error!(%err, "Request failed"),
        _ => warn!(%err, "Request rejected"),
    }
}

fn announce_removal(broadcaster: &LiveEventBroadcaster, response: &RemoveResponse) {
    if let Some(operation) = &response.removed {
        broadcaster.broadcast(&LiveEvent::OperationRemoved {
            operation: operation.clone(),
        });
    }
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/rep_types", get(handle_list_rep_types))
        .route("/sales_reps", get(handle_list_sales_reps))
        .route("/counties", get(handle_list_counties))
        .route("/zip_codes", get(handle_list_zip_codes))
        .route("/current_assignments", get(handle_list_current_assignments))
        .route("/preview", post(handle_preview))
        .route("/staging", get(handle_get_staging))
        .route("/staging/assign", post(handle_stage_assign))
        .route("/staging/reassign", post(handle_stage_reassign))
        .route("/staging/assign/{index}", delete(handle_remove_assign))
        .route("/staging/reassign/{index}", delete(handle_remove_reassign))
        .route("/staging/remove_row", post(handle_remove_row))
        .route("/staging/clear", post(handle_clear_staging))
        .route("/staging/confirm", post(handle_confirm))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

/// Loads reference data and primes a fresh operator session with display names.
fn load_directory(
    seed_dir: Option<&std::path::Path>,
) -> Result<(InMemoryDirectory, OperatorSession), Box<dyn std::error::Error>> {
    let directory: InMemoryDirectory = match seed_dir {
        Some(dir) => {
            info!(seed_dir = %dir.display(), "Loading reference directory from CSV");
            InMemoryDirectory::new(DirectoryData::load_from_dir(dir)?)
        }
        None => {
            info!("Using built-in sample directory");
            InMemoryDirectory::sample()
        }
    };

    let mut session: OperatorSession = OperatorSession::new();
    prime_names(&mut session, &directory)?;
    Ok((directory, session))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let (directory, session) = load_directory(args.seed_dir.as_deref())?;
    let app_state: AppState = AppState::new(directory, session);
    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Starting server on {}", addr);

    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let (directory, session) = load_directory(None).unwrap();
        AppState::new(directory, session)
    }

    fn create_test_app() -> (Router, AppState) {
        let app_state: AppState = create_test_state();
        (build_router(app_state.clone()), app_state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (HttpStatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request: Request<Body> = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status: HttpStatusCode = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    fn assign_80010() -> Value {
        json!({"type_id": 1, "rep_id": 101, "zip_from": "80010", "zip_to": "80010"})
    }

    #[tokio::test]
    async fn test_list_rep_types() {
        let (app, _) = create_test_app();

        let (status, body) = send(&app, "GET", "/rep_types", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["rep_types"].as_array().unwrap().len(), 3);
        assert_eq!(body["rep_types"][0]["type_name"], "Inside");
    }

    #[tokio::test]
    async fn test_list_sales_reps_for_type() {
        let (app, _) = create_test_app();

        let (status, body) = send(&app, "GET", "/sales_reps?type_id=1", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["current"], true);
        assert_eq!(body["sales_reps"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_zip_codes_of_county() {
        let (app, _) = create_test_app();

        let (status, body) = send(&app, "GET", "/zip_codes?county_code=08005", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["zip_codes"][0]["zip_code"], "80010");
    }

    #[tokio::test]
    async fn test_current_assignments_snapshot() {
        let (app, app_state) = create_test_app();

        let (status, body) = send(&app, "GET", "/current_assignments?rep_id=101", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["zip_codes"], json!(["80019", "80022"]));
        let session = app_state.session.lock().await;
        assert_eq!(session.selection.source_rep_id(), Some(101));
    }

    #[tokio::test]
    async fn test_preview_zip_range() {
        let (app, _) = create_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/preview",
            Some(json!({"zip_from": "80010", "zip_to": "80012"})),
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["tokens"], json!(["80010", "80011", "80012"]));
    }

    #[tokio::test]
    async fn test_preview_rejects_both_selectors() {
        let (app, _) = create_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/preview",
            Some(json!({"counties": ["Adams"], "zip_from": "80010", "zip_to": "80012"})),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn test_stage_assign_then_confirm() {
        let (app, app_state) = create_test_app();

        let (status, body) = send(&app, "POST", "/staging/assign", Some(assign_80010())).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["staging"]["assigns"].as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "POST", "/staging/confirm", None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["outcome"]["outcome"], "confirmed");
        assert!(body["staging"]["assigns"].as_array().unwrap().is_empty());

        let owner = app_state
            .directory
            .owner(1, territory_domain::Zip::parse("80010").unwrap())
            .unwrap();
        assert_eq!(owner, Some(101));
    }

    #[tokio::test]
    async fn test_stage_assign_overlap_is_unprocessable() {
        let (app, _) = create_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/staging/assign",
            Some(json!({"type_id": 1, "rep_id": 102, "zip_from": "80019", "zip_to": "80019"})),
        )
        .await;

        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"], json!(["ZIP 80019 overlaps Rep 101"]));
    }

    #[tokio::test]
    async fn test_stage_reassign_not_owned_names_zip() {
        let (app, app_state) = create_test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/staging/reassign",
            Some(json!({
                "type_id": 1,
                "from_rep_id": 101,
                "to_rep_id": 102,
                "zip_from": "80019",
                "zip_to": "80024"
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].as_str().unwrap().contains("80024"));
        assert!(app_state.session.lock().await.staging.is_empty());
    }

    #[tokio::test]
    async fn test_remove_assign_by_index() {
        let (app, _) = create_test_app();
        send(&app, "POST", "/staging/assign", Some(assign_80010())).await;

        let (status, body) = send(&app, "DELETE", "/staging/assign/0", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["removed"]["kind"], "assign");
        assert!(body["staging"]["assigns"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_assign_out_of_range_is_noop() {
        let (app, _) = create_test_app();
        send(&app, "POST", "/staging/assign", Some(assign_80010())).await;

        let (status, body) = send(&app, "DELETE", "/staging/assign/5", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert!(body["removed"].is_null());
        assert_eq!(body["staging"]["assigns"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_row_removes_whole_operation() {
        let (app, _) = create_test_app();
        send(
            &app,
            "POST",
            "/staging/assign",
            Some(json!({"type_id": 1, "rep_id": 101, "zip_from": "80010", "zip_to": "80012"})),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            "/staging/remove_row",
            Some(json!({
                "kind": "assign",
                "type_id": 1,
                "rep_id": 101,
                "location": {"zip": "80011"}
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        assert!(!body["removed"].is_null());
        assert!(body["staging"]["rows"]["assigns"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_staging() {
        let (app, _) = create_test_app();
        send(&app, "POST", "/staging/assign", Some(assign_80010())).await;

        let (status, body) = send(&app, "POST", "/staging/clear", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert!(body["assigns"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_nothing_staged() {
        let (app, _) = create_test_app();

        let (status, body) = send(&app, "POST", "/staging/confirm", None).await;

        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["outcome"]["outcome"], "nothing_staged");
    }

    #[tokio::test]
    async fn test_confirm_when_unavailable_keeps_staging() {
        let (app, app_state) = create_test_app();
        send(&app, "POST", "/staging/assign", Some(assign_80010())).await;
        app_state.directory.set_available(false);

        let (status, body) = send(&app, "POST", "/staging/confirm", None).await;

        assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], true);
        assert_eq!(app_state.session.lock().await.staging.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_when_unavailable_is_bad_gateway() {
        let (app, app_state) = create_test_app();
        app_state.directory.set_available(false);

        let (status, _) = send(&app, "GET", "/counties", None).await;

        assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_stage_assign_broadcasts_event() {
        let (app, app_state) = create_test_app();
        let mut rx = app_state.broadcaster.subscribe();

        send(&app, "POST", "/staging/assign", Some(assign_80010())).await;

        assert!(matches!(
            rx.try_recv(),
            Ok(LiveEvent::AssignStaged { rep_id: 101, .. })
        ));
    }

    #[test]
    fn test_http_error_status_mapping() {
        let rejected: HttpError = ApiError::ConfirmRejected {
            message: String::from("rejected"),
        }
        .into();
        assert_eq!(rejected.status, HttpStatusCode::CONFLICT);

        let invalid: HttpError =
            ApiError::invalid_input("zip_from", String::from("bad")).into();
        assert_eq!(invalid.status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(invalid.details, vec![String::from("zip_from: bad")]);
    }
}
