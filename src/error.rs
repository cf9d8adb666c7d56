use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Body sent for every listing that cannot be produced.
pub const DIRECTORY_NOT_FOUND: &str = "Directory not found or is not accessible";

/// Body sent for every download that cannot be served.
pub const FILE_NOT_FOUND: &str = "File not found";

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Path is outside root directory")]
    PathEscape,

    #[error("Directory operation not allowed on file")]
    NotADirectory,

    #[error("File operation not allowed on directory")]
    NotAFile,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl BrowserError {
    /// True for every error that is reported to the client as a 404.
    ///
    /// `PathEscape` belongs here: an escape attempt must answer exactly like a
    /// missing path.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BrowserError::NotFound(_)
                | BrowserError::PathEscape
                | BrowserError::NotADirectory
                | BrowserError::NotAFile
        )
    }

    /// Re-tag a not-found class error raised while serving a listing.
    pub fn for_listing(self) -> Self {
        if self.is_not_found() {
            BrowserError::NotADirectory
        } else {
            self
        }
    }
}

impl IntoResponse for BrowserError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            BrowserError::NotADirectory => (StatusCode::NOT_FOUND, DIRECTORY_NOT_FOUND),
            BrowserError::NotFound(_) | BrowserError::PathEscape | BrowserError::NotAFile => {
                (StatusCode::NOT_FOUND, FILE_NOT_FOUND)
            }
            BrowserError::Io(_) | BrowserError::Template(_) | BrowserError::Task(_) => {
                error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
