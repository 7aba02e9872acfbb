//! In-memory mock of the remote time-tracking API.
//!
//! Implements just enough of the service for integration tests: an
//! `api-key` check on every route, project CRUD, time-entry listing that
//! applies the `user/id eq` / `date ge` / `date le` fragments of a
//! `$filter` expression, and the expense bulk-status/status-history
//! endpoints. Deletes answer `204 No Content` with an empty body, like the
//! real service.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub active: bool,
    pub customer_id: Option<u64>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub customer_id: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub customer_id: Option<u64>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: u64,
    pub user_id: u64,
    pub project_id: Option<u64>,
    pub date: String,
    pub hours: f64,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeEntry {
    pub user_id: u64,
    #[serde(default)]
    pub project_id: Option<u64>,
    pub date: String,
    pub hours: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    pub user_id: u64,
    pub date: String,
    pub notes: Option<String>,
    pub status: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpense {
    pub user_id: u64,
    pub date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct BulkStatusUpdate {
    #[serde(default)]
    pub message: Option<String>,
    pub ids: Vec<u64>,
    pub status: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct StatusEvent {
    pub status: String,
    pub message: String,
}

pub struct MockState {
    api_key: String,
    next_id: AtomicU64,
    projects: RwLock<HashMap<u64, Project>>,
    time_entries: RwLock<Vec<TimeEntry>>,
    expenses: RwLock<HashMap<u64, Expense>>,
    histories: RwLock<HashMap<u64, Vec<StatusEvent>>>,
}

type Shared = Arc<MockState>;

pub fn app(api_key: &str) -> Router {
    let state: Shared = Arc::new(MockState {
        api_key: api_key.to_string(),
        next_id: AtomicU64::new(1),
        projects: RwLock::new(HashMap::new()),
        time_entries: RwLock::new(Vec::new()),
        expenses: RwLock::new(HashMap::new()),
        histories: RwLock::new(HashMap::new()),
    });
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/timeEntries", get(list_time_entries).post(create_time_entry))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/status", put(update_expense_status))
        .route("/expenses/{id}/statusHistory", get(expense_status_history))
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

async fn require_api_key(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let provided = request.headers().get("api-key").and_then(|v| v.to_str().ok());
    if provided != Some(state.api_key.as_str()) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }
    next.run(request).await
}

fn fresh_id(state: &MockState) -> u64 {
    state.next_id.fetch_add(1, Ordering::Relaxed)
}

/// Apply the filter fragments a project listing understands.
fn project_matches(project: &Project, filter: &str) -> bool {
    filter.split(" and ").all(|fragment| match fragment {
        "" => true,
        "active eq true" => project.active,
        _ => true,
    })
}

/// Apply the filter fragments a time-entry listing understands.
fn entry_matches(entry: &TimeEntry, filter: &str) -> bool {
    filter.split(" and ").all(|fragment| {
        if let Some(v) = fragment.strip_prefix("user/id eq ") {
            entry.user_id.to_string() == v
        } else if let Some(v) = fragment.strip_prefix("project/id eq ") {
            entry.project_id.is_some_and(|id| id.to_string() == v)
        } else if let Some(v) = fragment.strip_prefix("date ge ") {
            entry.date.as_str() >= v
        } else if let Some(v) = fragment.strip_prefix("date le ") {
            entry.date.as_str() <= v
        } else {
            true
        }
    })
}

async fn list_projects(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Project>> {
    let filter = params.get("$filter").cloned().unwrap_or_default();
    let projects = state.projects.read().await;
    let mut listed: Vec<Project> = projects
        .values()
        .filter(|p| project_matches(p, &filter))
        .cloned()
        .collect();
    listed.sort_by_key(|p| p.id);
    Json(listed)
}

async fn create_project(
    State(state): State<Shared>,
    Json(input): Json<CreateProject>,
) -> (StatusCode, Json<Project>) {
    let project = Project {
        id: fresh_id(&state),
        name: input.name,
        active: input.active,
        customer_id: input.customer_id,
        notes: input.notes,
    };
    state.projects.write().await.insert(project.id, project.clone());
    (StatusCode::CREATED, Json(project))
}

async fn get_project(
    State(state): State<Shared>,
    Path(id): Path<u64>,
) -> Result<Json<Project>, StatusCode> {
    let projects = state.projects.read().await;
    projects.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_project(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateProject>,
) -> Result<Json<Project>, StatusCode> {
    let mut projects = state.projects.write().await;
    let project = projects.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        project.name = name;
    }
    if let Some(active) = input.active {
        project.active = active;
    }
    if let Some(customer_id) = input.customer_id {
        project.customer_id = Some(customer_id);
    }
    if let Some(notes) = input.notes {
        project.notes = Some(notes);
    }
    Ok(Json(project.clone()))
}

async fn delete_project(
    State(state): State<Shared>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut projects = state.projects.write().await;
    projects
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_time_entries(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<TimeEntry>> {
    let filter = params.get("$filter").cloned().unwrap_or_default();
    let entries = state.time_entries.read().await;
    Json(entries.iter().filter(|e| entry_matches(e, &filter)).cloned().collect())
}

async fn create_time_entry(
    State(state): State<Shared>,
    Json(input): Json<CreateTimeEntry>,
) -> (StatusCode, Json<TimeEntry>) {
    let entry = TimeEntry {
        id: fresh_id(&state),
        user_id: input.user_id,
        project_id: input.project_id,
        date: input.date,
        hours: input.hours,
        notes: input.notes,
    };
    state.time_entries.write().await.push(entry.clone());
    (StatusCode::CREATED, Json(entry))
}

async fn list_expenses(State(state): State<Shared>) -> Json<Vec<Expense>> {
    let expenses = state.expenses.read().await;
    let mut listed: Vec<Expense> = expenses.values().cloned().collect();
    listed.sort_by_key(|e| e.id);
    Json(listed)
}

async fn create_expense(
    State(state): State<Shared>,
    Json(input): Json<CreateExpense>,
) -> (StatusCode, Json<Expense>) {
    let expense = Expense {
        id: fresh_id(&state),
        user_id: input.user_id,
        date: input.date,
        notes: input.notes,
        status: "Open".to_string(),
    };
    state.expenses.write().await.insert(expense.id, expense.clone());
    (StatusCode::CREATED, Json(expense))
}

async fn update_expense_status(
    State(state): State<Shared>,
    Json(input): Json<BulkStatusUpdate>,
) -> Json<Value> {
    let mut expenses = state.expenses.write().await;
    let mut histories = state.histories.write().await;
    let mut updated = 0;
    for id in &input.ids {
        if let Some(expense) = expenses.get_mut(id) {
            expense.status = input.status.clone();
            histories.entry(*id).or_default().push(StatusEvent {
                status: input.status.clone(),
                message: input.message.clone().unwrap_or_default(),
            });
            updated += 1;
        }
    }
    Json(json!({ "updated": updated }))
}

async fn expense_status_history(
    State(state): State<Shared>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<StatusEvent>>, StatusCode> {
    let expenses = state.expenses.read().await;
    if !expenses.contains_key(&id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let histories = state.histories.read().await;
    Ok(Json(histories.get(&id).cloned().unwrap_or_default()))
}
