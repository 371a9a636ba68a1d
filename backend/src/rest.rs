//! # REST API Interface Layer
//!
//! HTTP endpoints for the shift planner. This layer handles:
//! - JSON request/response serialization
//! - Translation between string-typed DTOs and domain commands
//! - Error translation from domain to HTTP status codes
//! - CORS configuration for frontend integration
//! - Request logging
//!
//! Validation failures map to 400, missing entities to 404 and stale
//! preview generations to 409; anything else is a 500 with the detail
//! kept server-side.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::db::DbConnection;
use crate::domain::commands::rota::{
    ConfirmPreviewCommand, DiscardPreviewCommand, DuplicatePreviewRowCommand,
    GeneratePreviewCommand, PreviewRowsResult, RemovePreviewRowCommand, UpdatePreviewRowCommand,
};
use crate::domain::commands::shift::{DeleteShiftCommand, ShiftRangeQuery, UpdateShiftCommand};
use crate::domain::commands::team::{
    CreateEmployeeCommand, CreateLocationCommand, UpdateEmployeeCommand,
};
use crate::domain::commands::template::{
    CreateTemplateCommand, DeleteTemplateCommand, TemplateSetQuery,
};
use crate::domain::models::{parse_date, parse_time};
use crate::domain::{
    EmployeeService, LocationService, PreviewService, ReferenceCache, RotaService, ShiftService,
    TemplateService, ValidationError,
};
use crate::storage::{
    EmployeeRepository, LocationRepository, ShiftRepository, TemplateRepository,
};
use shared::{
    ConfirmPreviewRequest, ConfirmPreviewResponse, CreateEmployeeRequest, CreateLocationRequest,
    CreateTemplateRequest, DeleteShiftResponse, DuplicatePreviewRowRequest, EmployeeListResponse,
    GeneratePreviewRequest, LocationListResponse, PreviewResponse, RemovePreviewRowRequest,
    ShiftListResponse, TemplateListResponse, UpdatePreviewRowRequest, UpdateShiftRequest,
};

/// Preview expansion is bounded at the API; the engine itself only
/// requires at least one week
const MAX_PREVIEW_WEEKS: u32 = 12;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub preview_service: PreviewService,
    pub template_service: TemplateService,
    pub shift_service: ShiftService,
    pub employee_service: EmployeeService,
    pub location_service: LocationService,
    pub reference_cache: ReferenceCache,
}

impl AppState {
    pub fn from_db(db: DbConnection) -> Self {
        let template_repository = TemplateRepository::new(db.clone());
        let shift_repository = ShiftRepository::new(db.clone());
        let employee_repository = EmployeeRepository::new(db.clone());
        let location_repository = LocationRepository::new(db);

        let reference_cache =
            ReferenceCache::new(employee_repository.clone(), location_repository.clone());
        let rota_service = RotaService::new(template_repository.clone(), shift_repository.clone());

        AppState {
            preview_service: PreviewService::new(rota_service, shift_repository.clone()),
            template_service: TemplateService::new(template_repository, location_repository.clone()),
            shift_service: ShiftService::new(shift_repository),
            employee_service: EmployeeService::new(employee_repository, reference_cache.clone()),
            location_service: LocationService::new(location_repository, reference_cache.clone()),
            reference_cache,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> anyhow::Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::init().await?;

    info!("Setting up application state");
    Ok(AppState::from_db(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/preview/generate", post(generate_preview))
        .route("/preview/rows/update", post(update_preview_row))
        .route("/preview/rows/remove", post(remove_preview_row))
        .route("/preview/rows/duplicate", post(duplicate_preview_row))
        .route("/preview/confirm", post(confirm_preview))
        .route("/preview/discard", post(discard_preview))
        .route("/templates", get(list_templates).post(create_template))
        .route("/templates/versions", get(list_template_versions))
        .route("/templates/:template_id", delete(delete_template))
        .route("/shifts", get(list_shifts))
        .route("/shifts/:shift_id", axum::routing::put(update_shift).delete(delete_shift))
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:employee_id",
            axum::routing::put(update_employee).delete(delete_employee),
        )
        .route("/locations", get(list_locations).post(create_location))
        .route("/locations/:location_id", delete(delete_location));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

/// Translate a service error into an HTTP response
fn error_response(err: anyhow::Error) -> Response {
    match err.downcast_ref::<ValidationError>() {
        Some(ValidationError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Some(ValidationError::StaleGeneration { .. }) => {
            (StatusCode::CONFLICT, err.to_string()).into_response()
        }
        Some(_) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        None => {
            error!("Internal error: {:#}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

fn preview_response(
    generation: u64,
    instances: Vec<crate::domain::models::rota::ShiftInstance>,
    conflict_count: usize,
    location_name: Option<String>,
) -> PreviewResponse {
    PreviewResponse {
        generation,
        instances: instances.into_iter().map(Into::into).collect(),
        conflict_count,
        location_name,
    }
}

fn rows_response(result: PreviewRowsResult) -> PreviewResponse {
    preview_response(result.generation, result.instances, result.conflict_count, None)
}

// ---- Preview lifecycle ----

/// Expand a template set into a dated preview
pub async fn generate_preview(
    State(state): State<AppState>,
    Json(request): Json<GeneratePreviewRequest>,
) -> impl IntoResponse {
    info!("POST /api/preview/generate - request: {:?}", request);

    if request.weeks < 1 || request.weeks > MAX_PREVIEW_WEEKS {
        return error_response(
            ValidationError::WeeksOutOfBounds {
                requested: request.weeks,
                max: MAX_PREVIEW_WEEKS,
            }
            .into(),
        );
    }
    let start_date = match parse_date(&request.start_date) {
        Ok(date) => date,
        Err(e) => return error_response(e.into()),
    };

    let command = GeneratePreviewCommand {
        location_id: request.location_id.clone(),
        version: request.version,
        start_date,
        weeks: request.weeks,
    };

    match state.preview_service.generate_preview(command).await {
        Ok(result) => {
            let location_name = state
                .reference_cache
                .location_name(&request.location_id)
                .await
                .unwrap_or(None);
            (
                StatusCode::OK,
                Json(preview_response(
                    result.generation,
                    result.instances,
                    result.conflict_count,
                    location_name,
                )),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Edit one row of the active preview
pub async fn update_preview_row(
    State(state): State<AppState>,
    Json(request): Json<UpdatePreviewRowRequest>,
) -> impl IntoResponse {
    info!("POST /api/preview/rows/update - request: {:?}", request);

    let start_time = match request.start_time.as_deref().map(parse_time).transpose() {
        Ok(time) => time,
        Err(e) => return error_response(e.into()),
    };
    let end_time = match request.end_time.as_deref().map(parse_time).transpose() {
        Ok(time) => time,
        Err(e) => return error_response(e.into()),
    };

    let command = UpdatePreviewRowCommand {
        generation: request.generation,
        row: request.row,
        start_time,
        end_time,
        employee_id: request.employee_id,
    };

    match state.preview_service.update_row(command) {
        Ok(result) => (StatusCode::OK, Json(rows_response(result))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Remove one row of the active preview
pub async fn remove_preview_row(
    State(state): State<AppState>,
    Json(request): Json<RemovePreviewRowRequest>,
) -> impl IntoResponse {
    info!("POST /api/preview/rows/remove - request: {:?}", request);

    let command = RemovePreviewRowCommand {
        generation: request.generation,
        row: request.row,
    };
    match state.preview_service.remove_row(command) {
        Ok(result) => (StatusCode::OK, Json(rows_response(result))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Duplicate one row of the active preview
pub async fn duplicate_preview_row(
    State(state): State<AppState>,
    Json(request): Json<DuplicatePreviewRowRequest>,
) -> impl IntoResponse {
    info!("POST /api/preview/rows/duplicate - request: {:?}", request);

    let command = DuplicatePreviewRowCommand {
        generation: request.generation,
        row: request.row,
    };
    match state.preview_service.duplicate_row(command) {
        Ok(result) => (StatusCode::OK, Json(rows_response(result))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Commit the active preview as persisted shifts
pub async fn confirm_preview(
    State(state): State<AppState>,
    Json(request): Json<ConfirmPreviewRequest>,
) -> impl IntoResponse {
    info!("POST /api/preview/confirm - request: {:?}", request);

    let command = ConfirmPreviewCommand {
        generation: request.generation,
    };
    match state.preview_service.confirm(command).await {
        Ok(result) => {
            let created_count = result.created.len();
            (
                StatusCode::CREATED,
                Json(ConfirmPreviewResponse {
                    created_count,
                    success_message: format!("{} shifts created", created_count),
                }),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Discard the active preview
pub async fn discard_preview(
    State(state): State<AppState>,
    Json(request): Json<ConfirmPreviewRequest>,
) -> impl IntoResponse {
    info!("POST /api/preview/discard - request: {:?}", request);

    let command = DiscardPreviewCommand {
        generation: request.generation,
    };
    match state.preview_service.discard(command) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

// ---- Templates ----

#[derive(Debug, Deserialize)]
pub struct TemplateSetParams {
    pub location_id: String,
    pub version: i64,
}

#[derive(Debug, Deserialize)]
pub struct TemplateVersionsParams {
    pub location_id: String,
}

/// Create a new shift template
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreateTemplateRequest>,
) -> impl IntoResponse {
    info!("POST /api/templates - request: {:?}", request);

    let start_time = match parse_time(&request.start_time) {
        Ok(time) => time,
        Err(e) => return error_response(e.into()),
    };
    let end_time = match parse_time(&request.end_time) {
        Ok(time) => time,
        Err(e) => return error_response(e.into()),
    };

    let command = CreateTemplateCommand {
        location_id: request.location_id,
        day_of_week: request.day_of_week,
        start_time,
        end_time,
        employee_id: request.employee_id,
        version: request.version,
    };

    match state.template_service.create_template(command).await {
        Ok(result) => {
            let dto: shared::ShiftTemplate = result.template.into();
            (StatusCode::CREATED, Json(dto)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// List the templates of one (location, version) set
pub async fn list_templates(
    State(state): State<AppState>,
    Query(params): Query<TemplateSetParams>,
) -> impl IntoResponse {
    info!("GET /api/templates - params: {:?}", params);

    let query = TemplateSetQuery {
        location_id: params.location_id,
        version: params.version,
    };
    match state.template_service.get_template_set(query).await {
        Ok(result) => (
            StatusCode::OK,
            Json(TemplateListResponse {
                templates: result.templates.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// List the template set versions known for a location
pub async fn list_template_versions(
    State(state): State<AppState>,
    Query(params): Query<TemplateVersionsParams>,
) -> impl IntoResponse {
    info!("GET /api/templates/versions - params: {:?}", params);

    match state.template_service.list_versions(&params.location_id).await {
        Ok(versions) => (StatusCode::OK, Json(versions)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Delete a template
pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/templates/{}", template_id);

    let command = DeleteTemplateCommand { template_id };
    match state.template_service.delete_template(command).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

// ---- Shifts ----

#[derive(Debug, Deserialize)]
pub struct ShiftListParams {
    pub location_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// List persisted shifts, optionally narrowed by location and date range
pub async fn list_shifts(
    State(state): State<AppState>,
    Query(params): Query<ShiftListParams>,
) -> impl IntoResponse {
    info!("GET /api/shifts - params: {:?}", params);

    let start_date = match params.start_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return error_response(e.into()),
    };
    let end_date = match params.end_date.as_deref().map(parse_date).transpose() {
        Ok(date) => date,
        Err(e) => return error_response(e.into()),
    };

    let query = ShiftRangeQuery {
        location_id: params.location_id,
        start_date,
        end_date,
    };
    match state.shift_service.list_shifts(query).await {
        Ok(result) => (
            StatusCode::OK,
            Json(ShiftListResponse {
                shifts: result.shifts.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Update a persisted shift
pub async fn update_shift(
    State(state): State<AppState>,
    Path(shift_id): Path<String>,
    Json(request): Json<UpdateShiftRequest>,
) -> impl IntoResponse {
    info!("PUT /api/shifts/{} - request: {:?}", shift_id, request);

    let start_time = match request.start_time.as_deref().map(parse_time).transpose() {
        Ok(time) => time,
        Err(e) => return error_response(e.into()),
    };
    let end_time = match request.end_time.as_deref().map(parse_time).transpose() {
        Ok(time) => time,
        Err(e) => return error_response(e.into()),
    };

    let command = UpdateShiftCommand {
        shift_id,
        start_time,
        end_time,
        employee_id: request.employee_id,
        status: request.status.map(Into::into),
    };

    match state.shift_service.update_shift(command).await {
        Ok(result) => {
            let dto: shared::Shift = result.shift.into();
            (StatusCode::OK, Json(dto)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Delete a persisted shift
pub async fn delete_shift(
    State(state): State<AppState>,
    Path(shift_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/shifts/{}", shift_id);

    let command = DeleteShiftCommand {
        shift_id: shift_id.clone(),
    };
    match state.shift_service.delete_shift(command).await {
        Ok(()) => (
            StatusCode::OK,
            Json(DeleteShiftResponse {
                deleted: true,
                success_message: format!("Shift {} deleted", shift_id),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

// ---- Employees ----

/// Create a new employee
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<CreateEmployeeRequest>,
) -> impl IntoResponse {
    info!("POST /api/employees - request: {:?}", request);

    let command = CreateEmployeeCommand { name: request.name };
    match state.employee_service.create_employee(command).await {
        Ok(result) => {
            let dto: shared::Employee = result.employee.into();
            (StatusCode::CREATED, Json(dto)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// List all employees
pub async fn list_employees(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/employees");

    match state.employee_service.list_employees().await {
        Ok(employees) => (
            StatusCode::OK,
            Json(EmployeeListResponse {
                employees: employees.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Update an employee
pub async fn update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Json(request): Json<shared::UpdateEmployeeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/employees/{} - request: {:?}", employee_id, request);

    let command = UpdateEmployeeCommand {
        employee_id,
        name: request.name,
    };
    match state.employee_service.update_employee(command).await {
        Ok(result) => {
            let dto: shared::Employee = result.employee.into();
            (StatusCode::OK, Json(dto)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Delete an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/employees/{}", employee_id);

    match state.employee_service.delete_employee(&employee_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

// ---- Locations ----

/// Create a new location
pub async fn create_location(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> impl IntoResponse {
    info!("POST /api/locations - request: {:?}", request);

    let command = CreateLocationCommand { name: request.name };
    match state.location_service.create_location(command).await {
        Ok(result) => {
            let dto: shared::Location = result.location.into();
            (StatusCode::CREATED, Json(dto)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// List all locations
pub async fn list_locations(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/locations");

    match state.location_service.list_locations().await {
        Ok(locations) => (
            StatusCode::OK,
            Json(LocationListResponse {
                locations: locations.into_iter().map(Into::into).collect(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Delete a location
pub async fn delete_location(
    State(state): State<AppState>,
    Path(location_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/locations/{}", location_id);

    match state.location_service.delete_location(&location_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        create_router(AppState::from_db(db))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed_location(router: &Router) -> shared::Location {
        let response = router
            .clone()
            .oneshot(post_json("/api/locations", json!({ "name": "Main Branch" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    async fn seed_template(router: &Router, location_id: &str, day_of_week: u8) {
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/templates",
                json!({
                    "location_id": location_id,
                    "day_of_week": day_of_week,
                    "start_time": "09:00:00",
                    "end_time": "17:00:00",
                    "employee_id": null,
                    "version": 1,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_preview_generate_and_confirm() {
        let router = test_router().await;
        let location = seed_location(&router).await;
        seed_template(&router, &location.id, 1).await;
        seed_template(&router, &location.id, 3).await;

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/preview/generate",
                json!({
                    "location_id": location.id,
                    "version": 1,
                    "start_date": "2024-06-05",
                    "weeks": 2,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let preview: PreviewResponse = read_json(response).await;
        assert_eq!(preview.instances.len(), 4);
        assert_eq!(preview.location_name.as_deref(), Some("Main Branch"));

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/preview/confirm",
                json!({ "generation": preview.generation }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let confirmed: ConfirmPreviewResponse = read_json(response).await;
        assert_eq!(confirmed.created_count, 4);

        let response = router.clone().oneshot(get("/api/shifts")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let shifts: ShiftListResponse = read_json(response).await;
        assert_eq!(shifts.shifts.len(), 4);
    }

    #[tokio::test]
    async fn test_preview_generate_rejects_bad_input() {
        let router = test_router().await;

        // Weeks out of bounds
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/preview/generate",
                json!({
                    "location_id": "location::1",
                    "version": 1,
                    "start_date": "2024-06-05",
                    "weeks": 13,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Unparseable date
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/preview/generate",
                json!({
                    "location_id": "location::1",
                    "version": 1,
                    "start_date": "05/06/2024",
                    "weeks": 2,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Empty template set
        let response = router
            .clone()
            .oneshot(post_json(
                "/api/preview/generate",
                json!({
                    "location_id": "location::1",
                    "version": 1,
                    "start_date": "2024-06-05",
                    "weeks": 2,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stale_generation_maps_to_conflict() {
        let router = test_router().await;
        let location = seed_location(&router).await;
        seed_template(&router, &location.id, 1).await;

        let generate = |weeks: u32| {
            post_json(
                "/api/preview/generate",
                json!({
                    "location_id": &location.id,
                    "version": 1,
                    "start_date": "2024-06-05",
                    "weeks": weeks,
                }),
            )
        };

        let first: PreviewResponse =
            read_json(router.clone().oneshot(generate(1)).await.unwrap()).await;
        let _second: PreviewResponse =
            read_json(router.clone().oneshot(generate(2)).await.unwrap()).await;

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/preview/rows/remove",
                json!({ "generation": first.generation, "row": 0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_preview_row_edit_roundtrip() {
        let router = test_router().await;
        let location = seed_location(&router).await;
        seed_template(&router, &location.id, 1).await;

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/preview/generate",
                json!({
                    "location_id": location.id,
                    "version": 1,
                    "start_date": "2024-06-05",
                    "weeks": 1,
                }),
            ))
            .await
            .unwrap();
        let preview: PreviewResponse = read_json(response).await;

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/preview/rows/update",
                json!({
                    "generation": preview.generation,
                    "row": 0,
                    "start_time": "10:00:00",
                    "end_time": "18:00:00",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: PreviewResponse = read_json(response).await;
        assert_eq!(updated.instances[0].start_time, "10:00:00");
        assert_eq!(updated.instances[0].end_time, "18:00:00");
    }

    #[tokio::test]
    async fn test_template_and_shift_not_found() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/templates/template::42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/shifts/shift::1::0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_employee_crud() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(post_json("/api/employees", json!({ "name": "Alice" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let employee: shared::Employee = read_json(response).await;

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri(format!("/api/employees/{}", employee.id))
                    .header("content-type", "application/json")
                    .body(Body::from(json!({ "name": "Alice B" }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.clone().oneshot(get("/api/employees")).await.unwrap();
        let list: EmployeeListResponse = read_json(response).await;
        assert_eq!(list.employees.len(), 1);
        assert_eq!(list.employees[0].name, "Alice B");

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/api/employees/{}", employee.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let router = test_router().await;

        let response = router
            .clone()
            .oneshot(post_json("/api/locations", json!({ "name": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
