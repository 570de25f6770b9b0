//! In-memory implementation of the todo HTTP API.
//!
//! Serves the same routes and envelopes as the production backend so the
//! store can be exercised end to end: `{status, data}` on success,
//! `{error, message}` on failure.

use std::{collections::BTreeMap, fmt, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Success body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: T,
}

/// Todos keyed by id; ids are handed out sequentially from 1 and never reused.
#[derive(Debug, Default)]
pub struct Repository {
    todos: BTreeMap<u64, Todo>,
    last_id: u64,
}

impl Repository {
    /// All todos in ascending id order.
    pub fn list(&self) -> Vec<Todo> {
        self.todos.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Option<Todo> {
        self.todos.get(&id).cloned()
    }

    pub fn create(&mut self, input: CreateTodo) -> Todo {
        self.last_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: self.last_id,
            title: input.title,
            description: input.description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }

    pub fn update(&mut self, id: u64, input: UpdateTodo) -> Option<Todo> {
        let todo = self.todos.get_mut(&id)?;
        if let Some(title) = input.title {
            todo.title = title;
        }
        if let Some(description) = input.description {
            todo.description = description;
        }
        if let Some(completed) = input.completed {
            todo.completed = completed;
        }
        todo.updated_at = Utc::now();
        Some(todo.clone())
    }

    pub fn toggle(&mut self, id: u64) -> Option<Todo> {
        let completed = !self.todos.get(&id)?.completed;
        self.update(
            id,
            UpdateTodo {
                completed: Some(completed),
                ..UpdateTodo::default()
            },
        )
    }

    pub fn delete(&mut self, id: u64) -> Option<Todo> {
        self.todos.remove(&id)
    }
}

pub type Db = Arc<RwLock<Repository>>;

/// An error response: `{"error": ..., "message": ...}` with its status.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl Failure {
    fn bad_request(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
            message: message.into(),
        }
    }

    fn not_found(id: impl fmt::Display) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "Todo not found",
            message: format!("todo with ID {id} not found"),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.error, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

type Reply<T> = Result<(StatusCode, Json<Envelope<T>>), Failure>;

fn success<T>(status: StatusCode, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        status,
        Json(Envelope {
            status: "success".to_string(),
            data,
        }),
    )
}

/// Any integer is a well-formed id; negative ones simply never exist.
fn parse_id(raw: &str) -> Result<u64, Failure> {
    let id: i64 = raw
        .parse()
        .map_err(|_| Failure::bad_request("Invalid todo ID", "ID must be a number"))?;
    u64::try_from(id).map_err(|_| Failure::not_found(id))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Repository::default()));
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Welcome to Todo API",
        "version": "1.0.0",
        "description": "A simple in-memory todo management API",
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "message": "Todo API is running!" }))
}

async fn list_todos(State(db): State<Db>) -> Reply<Vec<Todo>> {
    let todos = db.read().await.list();
    Ok(success(StatusCode::OK, todos))
}

async fn create_todo(
    State(db): State<Db>,
    body: Result<Json<CreateTodo>, JsonRejection>,
) -> Reply<Todo> {
    let Json(input) = body.map_err(|e| Failure::bad_request("Invalid request", e.body_text()))?;
    if input.title.is_empty() {
        return Err(Failure::bad_request("Invalid request", "title is required"));
    }
    let todo = db.write().await.create(input);
    tracing::debug!(id = todo.id, "created todo");
    Ok(success(StatusCode::CREATED, todo))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<String>) -> Reply<Todo> {
    let id = parse_id(&id)?;
    let todo = db.read().await.get(id).ok_or(Failure::not_found(id))?;
    Ok(success(StatusCode::OK, todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTodo>, JsonRejection>,
) -> Reply<Todo> {
    let id = parse_id(&id)?;
    let Json(input) = body.map_err(|e| Failure::bad_request("Invalid request", e.body_text()))?;
    let todo = db
        .write()
        .await
        .update(id, input)
        .ok_or(Failure::not_found(id))?;
    Ok(success(StatusCode::OK, todo))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, Failure> {
    let id = parse_id(&id)?;
    db.write().await.delete(id).ok_or(Failure::not_found(id))?;
    tracing::debug!(id, "deleted todo");
    Ok(Json(json!({
        "status": "success",
        "message": "Todo deleted successfully",
    })))
}

async fn toggle_todo(State(db): State<Db>, Path(id): Path<String>) -> Reply<Todo> {
    let id = parse_id(&id)?;
    let todo = db.write().await.toggle(id).ok_or(Failure::not_found(id))?;
    Ok(success(StatusCode::OK, todo))
}
