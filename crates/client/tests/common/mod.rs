//! Stub portal the HTTP-level client tests run against.
//!
//! A small axum app reproduces the backend's wire shapes (multipart
//! login, bare-array listings, `detail`-keyed errors) and records every
//! request it sees, so tests can assert both what the client sent and
//! how it parsed the reply.

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use scholarbase_client::{ClientConfig, PortalApi, SessionStore};

/// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub label: String,
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
    /// Multipart text fields in arrival order; file parts are recorded
    /// as `(name, "file:<filename>:<len>")`.
    pub fields: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl SeenRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Default)]
pub struct StubState {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl StubState {
    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// The most recent request with this label. Panics when none.
    pub fn last(&self, label: &str) -> SeenRequest {
        self.seen()
            .into_iter()
            .rev()
            .find(|r| r.label == label)
            .unwrap_or_else(|| panic!("stub never saw a `{label}` request"))
    }

    fn record(
        &self,
        label: &str,
        headers: &HeaderMap,
        query: Vec<(String, String)>,
        fields: Vec<(String, String)>,
        body: Option<Value>,
    ) {
        self.seen.lock().unwrap().push(SeenRequest {
            label: label.to_string(),
            bearer: bearer_of(headers),
            query,
            fields,
            body,
        });
    }
}

/// A running stub portal plus the client wired to it.
pub struct StubPortal {
    pub base_url: String,
    pub state: StubState,
}

impl StubPortal {
    /// Build a [`PortalApi`] against this stub with an in-memory
    /// session store.
    pub fn client(&self) -> (PortalApi, Arc<SessionStore>) {
        let session = Arc::new(SessionStore::in_memory());
        let config = ClientConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: 5,
            ..ClientConfig::default()
        };
        let api = PortalApi::new(&config, Arc::clone(&session)).expect("client should build");
        (api, session)
    }
}

/// Bind the stub portal on an ephemeral port and serve it in the
/// background for the rest of the test.
pub async fn spawn_portal() -> StubPortal {
    let state = StubState::default();
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub portal should bind");
    let addr = listener.local_addr().expect("stub portal address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub portal serve");
    });

    StubPortal {
        base_url: format!("http://{addr}"),
        state,
    }
}

// ---------------------------------------------------------------------------
// Canned payloads
// ---------------------------------------------------------------------------

pub const STUB_TOKEN: &str = "stub-token";
pub const ADA_PASSWORD: &str = "hunter22!";

/// The stub's one seeded student.
pub fn ada_json() -> Value {
    json!({
        "id": 7,
        "name": "Ada Obi",
        "email": "ada@university.edu",
        "role": "Student",
        "department": "Computer Science",
        "email_verified": true,
        "created_at": "2024-03-15T08:00:00",
        "matric_no": "CSC/2020/041"
    })
}

pub fn project_json(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "year": "2024",
        "description": format!("{title} description"),
        "status": status,
        "created_at": "2024-06-02T09:15:00.250000",
        "updated_at": "2024-06-02T09:15:00.250000",
        "student_id": 7,
        "tags": ["AI"]
    })
}

fn auth_response_json() -> Value {
    json!({
        "access_token": STUB_TOKEN,
        "token_type": "bearer",
        "user": ada_json()
    })
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

async fn collect_fields(mut multipart: Multipart) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .expect("multipart field should read")
    {
        let name = field.name().unwrap_or("").to_string();
        if let Some(file_name) = field.file_name() {
            let file_name = file_name.to_string();
            let bytes = field.bytes().await.expect("file part should read");
            fields.push((name, format!("file:{file_name}:{}", bytes.len())));
        } else {
            let text = field.text().await.expect("text field should read");
            fields.push((name, text));
        }
    }
    fields
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

fn router(state: StubState) -> Router {
    Router::new()
        .route("/auth/login/", post(login))
        .route("/auth/register/{role}", post(register))
        .route("/auth/me", get(me))
        .nest("/projects/", projects_router())
        .nest("/supervisor", supervisor_router())
        .nest("/admin", admin_router())
        .route("/tags", get(tags))
        .route("/departments", get(departments))
        .route("/years", get(years))
        .route("/upload", post(upload))
        .with_state(state)
}

fn projects_router() -> Router<StubState> {
    Router::new()
        .route("/", get(list_mine).post(create_project))
        .route("/all", get(list_all))
        .route(
            "/{id}",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route("/{id}/approve", patch(approve))
        .route("/{id}/reject", patch(reject))
        .route("/{id}/review", put(review))
        .route("/{id}/assign-supervisor", patch(assign_supervisor))
}

fn supervisor_router() -> Router<StubState> {
    Router::new()
        .route("/projects", get(supervised_projects))
        .route("/students", get(supervised_students))
        .route("/dashboard/stats", get(supervisor_stats))
}

fn admin_router() -> Router<StubState> {
    Router::new()
        .route("/dashboard/stats", get(admin_stats))
        .route("/students", get(admin_students).post(admin_create_student))
        .route(
            "/students/{id}",
            put(admin_update_student).delete(admin_delete_student),
        )
        .route("/supervisors", get(admin_supervisors))
        .route("/projects", get(admin_projects).post(admin_create_project))
        .route(
            "/projects/{id}",
            put(admin_update_project).delete(admin_delete_project),
        )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn login(
    State(state): State<StubState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let fields = collect_fields(multipart).await;
    state.record("login", &headers, Vec::new(), fields.clone(), None);

    let email = fields.iter().find(|(n, _)| n == "email").map(|(_, v)| v);
    let password = fields.iter().find(|(n, _)| n == "password").map(|(_, v)| v);
    match (email, password) {
        (Some(e), Some(p)) if e == "ada@university.edu" && p == ADA_PASSWORD => {
            Json(auth_response_json()).into_response()
        }
        _ => detail(StatusCode::UNAUTHORIZED, "Incorrect email or password"),
    }
}

async fn register(
    State(state): State<StubState>,
    Path(role): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let label = format!("register_{role}");
    state.record(&label, &headers, Vec::new(), Vec::new(), Some(body.clone()));

    if body["email"] == "taken@university.edu" {
        let errors = json!({
            "detail": [
                { "loc": ["body", "email"], "msg": "Email already registered", "type": "value_error" }
            ]
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
    }
    Json(auth_response_json()).into_response()
}

async fn me(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    state.record("me", &headers, query, Vec::new(), None);
    match bearer_of(&headers) {
        Some(token) if token == STUB_TOKEN => Json(ada_json()).into_response(),
        _ => detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"),
    }
}

async fn list_all(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    state.record("list_all", &headers, query, Vec::new(), None);
    Json(json!([
        project_json(12, "Flood Prediction", "Approved"),
        project_json(13, "Smart Irrigation", "Pending"),
    ]))
    .into_response()
}

async fn list_mine(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("list_mine", &headers, Vec::new(), Vec::new(), None);
    Json(json!([project_json(12, "Flood Prediction", "Approved")])).into_response()
}

async fn get_project(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.record("get_project", &headers, Vec::new(), Vec::new(), None);
    match id {
        12 => Json(project_json(12, "Flood Prediction", "Approved")).into_response(),
        // Non-JSON and empty failure bodies, for error normalization.
        500 => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        503 => (StatusCode::SERVICE_UNAVAILABLE, "").into_response(),
        _ => detail(StatusCode::NOT_FOUND, "Project not found"),
    }
}

async fn create_project(
    State(state): State<StubState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let fields = collect_fields(multipart).await;
    let title = fields
        .iter()
        .find(|(n, _)| n == "title")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    state.record("create_project", &headers, Vec::new(), fields, None);
    Json(project_json(99, &title, "Pending")).into_response()
}

async fn update_project(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let fields = collect_fields(multipart).await;
    state.record("update_project", &headers, Vec::new(), fields, None);
    Json(project_json(id, "Flood Prediction v2", "Pending")).into_response()
}

async fn delete_project(
    State(state): State<StubState>,
    Path(_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.record("delete_project", &headers, Vec::new(), Vec::new(), None);
    Json(json!({ "message": "Project deleted successfully" })).into_response()
}

async fn approve(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.record("approve", &headers, Vec::new(), Vec::new(), None);
    match bearer_of(&headers) {
        Some(token) if token == STUB_TOKEN => {
            Json(project_json(id, "Flood Prediction", "Approved")).into_response()
        }
        _ => detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"),
    }
}

async fn reject(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("reject", &headers, Vec::new(), Vec::new(), Some(body));
    Json(project_json(id, "Flood Prediction", "Rejected")).into_response()
}

async fn review(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let status = body["status"].as_str().unwrap_or("Pending").to_string();
    state.record("review", &headers, Vec::new(), Vec::new(), Some(body));
    Json(project_json(id, "Flood Prediction", &status)).into_response()
}

async fn assign_supervisor(
    State(state): State<StubState>,
    Path(_student_id): Path<i64>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    state.record("assign_supervisor", &headers, query, Vec::new(), None);
    let mut student = ada_json();
    student["supervisor_id"] = json!(3);
    Json(student).into_response()
}

async fn supervised_projects(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("supervised_projects", &headers, Vec::new(), Vec::new(), None);
    Json(json!([project_json(13, "Smart Irrigation", "Pending")])).into_response()
}

async fn supervised_students(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("supervised_students", &headers, Vec::new(), Vec::new(), None);
    Json(json!([student_row_json()])).into_response()
}

async fn supervisor_stats(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("supervisor_stats", &headers, Vec::new(), Vec::new(), None);
    Json(json!({
        "total_students": 4,
        "total_projects": 6,
        "pending_projects": 2,
        "approved_projects": 3,
        "rejected_projects": 1,
        "recent_submissions": 2
    }))
    .into_response()
}

async fn admin_stats(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("admin_stats", &headers, Vec::new(), Vec::new(), None);
    Json(json!({
        "total_projects": 42,
        "pending_projects": 10,
        "approved_projects": 25,
        "rejected_projects": 7,
        "total_students": 30,
        "total_supervisors": 5
    }))
    .into_response()
}

pub fn student_row_json() -> Value {
    json!({
        "id": 7,
        "name": "Ada Obi",
        "email": "ada@university.edu",
        "matric_no": "CSC/2020/041",
        "year": "2024",
        "department": "Computer Science",
        "role": "Student",
        "supervisor_id": 3,
        "created_at": "2024-03-15T08:00:00",
        "updated_at": "2024-03-15T08:00:00",
        "project_count": 2,
        "latest_project": {
            "id": 12,
            "title": "Flood Prediction",
            "status": "Approved",
            "created_at": "2024-06-02T09:15:00"
        }
    })
}

async fn admin_students(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    state.record("admin_students", &headers, query, Vec::new(), None);
    Json(json!([student_row_json()])).into_response()
}

async fn admin_create_student(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("admin_create_student", &headers, Vec::new(), Vec::new(), Some(body));
    Json(ada_json()).into_response()
}

async fn admin_update_student(
    State(state): State<StubState>,
    Path(_id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("admin_update_student", &headers, Vec::new(), Vec::new(), Some(body));
    Json(ada_json()).into_response()
}

async fn admin_delete_student(
    State(state): State<StubState>,
    Path(_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.record("admin_delete_student", &headers, Vec::new(), Vec::new(), None);
    StatusCode::OK.into_response()
}

async fn admin_supervisors(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("admin_supervisors", &headers, Vec::new(), Vec::new(), None);
    Json(json!([{
        "id": 3,
        "name": "Dr. Bello",
        "email": "bello@university.edu",
        "role": "Supervisor",
        "department": "Computer Science",
        "email_verified": true,
        "title": "Senior Lecturer"
    }]))
    .into_response()
}

async fn admin_projects(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("admin_projects", &headers, Vec::new(), Vec::new(), None);
    Json(json!([
        project_json(12, "Flood Prediction", "Approved"),
        project_json(14, "Campus Marketplace", "Suspended"),
    ]))
    .into_response()
}

async fn admin_create_project(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let title = body["title"].as_str().unwrap_or("").to_string();
    state.record("admin_create_project", &headers, Vec::new(), Vec::new(), Some(body));
    Json(project_json(77, &title, "In Progress")).into_response()
}

async fn admin_update_project(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("admin_update_project", &headers, Vec::new(), Vec::new(), Some(body));
    Json(project_json(id, "Flood Prediction", "Completed")).into_response()
}

async fn admin_delete_project(
    State(state): State<StubState>,
    Path(_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    state.record("admin_delete_project", &headers, Vec::new(), Vec::new(), None);
    StatusCode::OK.into_response()
}

async fn tags(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("tags", &headers, Vec::new(), Vec::new(), None);
    Json(json!(["AI", "Machine Learning", "Internet of Things (IoT)", "UI/UX Design"]))
        .into_response()
}

async fn departments(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("departments", &headers, Vec::new(), Vec::new(), None);
    Json(json!(["Computer Science", "Agricultural Engineering"])).into_response()
}

async fn years(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.record("years", &headers, Vec::new(), Vec::new(), None);
    Json(json!(["2023", "2024"])).into_response()
}

async fn upload(
    State(state): State<StubState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let fields = collect_fields(multipart).await;
    state.record("upload", &headers, Vec::new(), fields, None);
    Json(json!({ "url": "/files/report.pdf" })).into_response()
}
