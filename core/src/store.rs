//! Client-side mirror of the remote todo collection.
//!
//! # Design
//! `TodoStore` owns an ordered `Vec<Todo>`, a loading flag and the last error
//! message. Every network operation follows the same contract:
//!
//! 1. set loading and clear the previous error,
//! 2. issue exactly one request through the `Transport`,
//! 3. apply the response to the collection, or record an error message,
//! 4. release loading.
//!
//! Step 4 is done by a guard's `Drop`, so loading is also released when
//! response handling panics or the operation's future is dropped mid-flight.
//!
//! State sits behind `Cell`/`RefCell` so operations take `&self` and several
//! can be in flight on one task at the same time. Borrows are never held
//! across an `.await`. Concurrent operations are neither queued nor
//! coalesced: each applies its own response when it arrives, and the loading
//! and error fields are last-write-wins.
//!
//! Callers only ever get copies of the state. The derived views
//! (`completed_todos`, `pending_count`, ...) are recomputed on each call.

use std::cell::{Cell, RefCell};

use tracing::{debug, error};

use crate::client::TodoClient;
use crate::config::StoreConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, UpdateTodo};

type Parser<R> = fn(&TodoClient, HttpResponse) -> Result<R, ApiError>;

pub struct TodoStore<T> {
    client: TodoClient,
    transport: T,
    todos: RefCell<Vec<Todo>>,
    loading: Cell<bool>,
    error: RefCell<Option<String>>,
}

/// Clears the loading flag when dropped.
struct LoadingGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl<T: Transport> TodoStore<T> {
    /// An empty, idle store.
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            todos: RefCell::new(Vec::new()),
            loading: Cell::new(false),
            error: RefCell::new(None),
        }
    }

    pub fn from_config(config: &StoreConfig, transport: T) -> Self {
        Self::new(TodoClient::new(&config.api_base), transport)
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.todos.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn completed_todos(&self) -> Vec<Todo> {
        self.filtered(true)
    }

    pub fn pending_todos(&self) -> Vec<Todo> {
        self.filtered(false)
    }

    pub fn todo_count(&self) -> usize {
        self.todos.borrow().len()
    }

    pub fn completed_count(&self) -> usize {
        self.count(true)
    }

    pub fn pending_count(&self) -> usize {
        self.count(false)
    }

    pub fn clear_error(&self) {
        *self.error.borrow_mut() = None;
    }

    /// Replace the local collection with the server's list. On failure the
    /// collection is left as it was.
    pub async fn fetch_todos(&self) {
        let _loading = self.begin();
        let request = self.client.build_list_todos();
        match self.call(request, TodoClient::parse_list_todos).await {
            Ok(todos) => {
                debug!(count = todos.len(), "fetched todos");
                *self.todos.borrow_mut() = todos;
            }
            Err(err) => self.fail(&err, "Failed to fetch todos"),
        }
    }

    /// Fetch a single record without touching the local collection.
    pub async fn fetch_todo_by_id(&self, id: u64) -> Option<Todo> {
        let _loading = self.begin();
        let request = self.client.build_get_todo(id);
        match self.call(request, TodoClient::parse_get_todo).await {
            Ok(todo) => Some(todo),
            Err(err) => {
                self.fail(&err, "Failed to fetch todo");
                None
            }
        }
    }

    /// Create a todo and append the server's record to the collection.
    pub async fn create_todo(&self, input: &CreateTodo) -> bool {
        let _loading = self.begin();
        let result = match self.client.build_create_todo(input) {
            Ok(request) => self.call(request, TodoClient::parse_create_todo).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(todo) => {
                debug!(id = todo.id, "created todo");
                self.todos.borrow_mut().push(todo);
                true
            }
            Err(err) => {
                self.fail(&err, "Failed to create todo");
                false
            }
        }
    }

    /// Apply a partial update. A success for an id that is not held locally
    /// still reports `true` and leaves the collection unchanged.
    pub async fn update_todo(&self, id: u64, input: &UpdateTodo) -> bool {
        let _loading = self.begin();
        let result = match self.client.build_update_todo(id, input) {
            Ok(request) => self.call(request, TodoClient::parse_update_todo).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(todo) => {
                self.replace_local(id, todo);
                true
            }
            Err(err) => {
                self.fail(&err, "Failed to update todo");
                false
            }
        }
    }

    pub async fn delete_todo(&self, id: u64) -> bool {
        let _loading = self.begin();
        let request = self.client.build_delete_todo(id);
        match self.call(request, TodoClient::parse_delete_todo).await {
            Ok(()) => {
                self.todos.borrow_mut().retain(|todo| todo.id != id);
                true
            }
            Err(err) => {
                self.fail(&err, "Failed to delete todo");
                false
            }
        }
    }

    /// Flip `completed` on the server. Local replacement follows
    /// [`update_todo`](Self::update_todo).
    pub async fn toggle_complete(&self, id: u64) -> bool {
        let _loading = self.begin();
        let request = self.client.build_toggle_todo(id);
        match self.call(request, TodoClient::parse_toggle_todo).await {
            Ok(todo) => {
                self.replace_local(id, todo);
                true
            }
            Err(err) => {
                self.fail(&err, "Failed to toggle todo");
                false
            }
        }
    }

    fn begin(&self) -> LoadingGuard<'_> {
        self.loading.set(true);
        *self.error.borrow_mut() = None;
        LoadingGuard {
            flag: &self.loading,
        }
    }

    async fn call<R>(&self, request: HttpRequest, parse: Parser<R>) -> Result<R, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request).await?;
        parse(&self.client, response)
    }

    fn replace_local(&self, id: u64, todo: Todo) {
        let mut todos = self.todos.borrow_mut();
        match todos.iter_mut().find(|existing| existing.id == id) {
            Some(slot) => *slot = todo,
            None => debug!(id, "updated todo is not held locally"),
        }
    }

    fn fail(&self, err: &ApiError, fallback: &str) {
        error!(error = %err, "{fallback}");
        let message = err.to_string();
        let message = if message.is_empty() {
            fallback.to_string()
        } else {
            message
        };
        *self.error.borrow_mut() = Some(message);
    }

    fn filtered(&self, completed: bool) -> Vec<Todo> {
        self.todos
            .borrow()
            .iter()
            .filter(|todo| todo.completed == completed)
            .cloned()
            .collect()
    }

    fn count(&self, completed: bool) -> usize {
        self.todos
            .borrow()
            .iter()
            .filter(|todo| todo.completed == completed)
            .count()
    }
}
