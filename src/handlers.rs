use std::path::PathBuf;

use askama::Template;
use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::AppState;
use crate::error::BrowserError;
use crate::listing::{self, DirectoryListing};
use crate::media::{Disposition, guess_mime};
use crate::resolve::{ResolvedPath, join_segments, normalize};
use crate::view::{ListingPage, listing_href};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ============================================================================
// Helper functions
// ============================================================================

/// Clients asking for `application/json` get the listing data instead of HTML.
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

/// Resolve `relative` to a directory and enumerate it.
fn load_listing(state: &AppState, relative: &str) -> Result<DirectoryListing, BrowserError> {
    let segments = normalize(relative)?;
    let ResolvedPath::Directory(dir) = state.root.resolve(relative)? else {
        return Err(BrowserError::NotADirectory);
    };

    debug!("Listing directory: {}", dir.display());
    listing::list(&state.config, &state.root, &dir, &join_segments(&segments))
}

/// Run the resolver on the blocking pool; it canonicalizes and stats paths.
async fn resolve_blocking(state: &AppState, relative: &str) -> Result<ResolvedPath, BrowserError> {
    let root = state.root.clone();
    let relative = relative.to_string();
    tokio::task::spawn_blocking(move || root.resolve(&relative))
        .await
        .map_err(|err| BrowserError::Task(err.to_string()))?
}

async fn render_listing(
    state: AppState,
    relative: String,
    headers: &HeaderMap,
) -> Result<Response, BrowserError> {
    let listing = tokio::task::spawn_blocking(move || load_listing(&state, &relative))
        .await
        .map_err(|err| BrowserError::Task(err.to_string()))?
        .map_err(BrowserError::for_listing)?;

    if wants_json(headers) {
        return Ok(Json(listing).into_response());
    }

    let html = ListingPage::from_listing(&listing).render()?;
    Ok(Html(html).into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET / - List the media root
pub async fn list_root(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, BrowserError> {
    render_listing(state, String::new(), &headers).await
}

/// GET /{path}/ - List a directory below the media root
///
/// The trailing slash is significant: a directory requested without it is
/// redirected to its canonical listing URL, anything else is a 404.
pub async fn browse(
    State(state): State<AppState>,
    Path(path): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, BrowserError> {
    if uri.path().ends_with('/') {
        return render_listing(state, path, &headers).await;
    }

    let segments = normalize(&path).map_err(BrowserError::for_listing)?;
    let resolved = resolve_blocking(&state, &path)
        .await
        .map_err(BrowserError::for_listing)?;

    if !resolved.is_dir() {
        return Err(BrowserError::NotADirectory);
    }

    Ok(Redirect::permanent(&listing_href(&join_segments(&segments))).into_response())
}

/// GET /download/{path} - Stream a file
///
/// Images, video and audio are served inline; everything else is sent as an
/// attachment. The body is streamed, the file handle is released when the
/// stream ends or the client goes away.
pub async fn download(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, BrowserError> {
    let segments = normalize(&path)?;
    let ResolvedPath::File(file_path) = resolve_blocking(&state, &path).await? else {
        return Err(BrowserError::NotAFile);
    };

    // Name and type come from what the client asked for, not the link target.
    let file_name = segments.last().cloned().unwrap_or_default();
    let mime = guess_mime(&PathBuf::from(&file_name));
    let disposition = Disposition::for_mime(&mime);

    debug!("Streaming file ({}): {}", disposition, file_path.display());

    let file = fs::File::open(&file_path).await?;
    let file_size = file.metadata().await?.len();
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_LENGTH, file_size.to_string()),
            (
                header::CONTENT_DISPOSITION,
                disposition.header_value(&file_name),
            ),
        ],
        body,
    )
        .into_response())
}
