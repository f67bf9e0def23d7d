//! Shared request state: the database connection and paging settings.

use std::sync::{Arc, Mutex};

use emp_core::{EmployeeService, SqliteEmployeeRepository};
use rusqlite::Connection;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
    pub page_size: u32,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection, config: &Config) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            page_size: config.page_size,
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Runs `work` against an employee service on the blocking pool.
    ///
    /// The connection lock is held for the whole closure, so each request
    /// sees one consistent store.
    pub async fn with_service<T, E, F>(&self, work: F) -> AppResult<T>
    where
        T: Send + 'static,
        E: Into<AppError> + 'static,
        F: for<'c> FnOnce(&EmployeeService<SqliteEmployeeRepository<'c>>) -> Result<T, E>
            + Send
            + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| AppError::internal("database connection lock poisoned"))?;
            let service = EmployeeService::new(SqliteEmployeeRepository::new(&guard));
            work(&service).map_err(Into::into)
        })
        .await
        .map_err(|err| AppError::internal(format!("blocking task failed: {err}")))?
    }
}
