//! Test utilities and common setup.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use media_browser::{AppState, Config, MediaRoot};
use tempfile::TempDir;
use tower::ServiceExt;

/// A media tree on disk plus a router serving it.
///
/// ```text
/// media_files/
///   a.txt, b.txt, photo.jpg, archive.zip
///   sub/
///     song.mp3
///     nested/deep.txt
///   my photos/
///     beach day.png
/// media_files2/secret.txt
/// ```
pub struct TestMedia {
    pub dir: TempDir,
    pub app: Router,
}

pub fn test_app() -> TestMedia {
    test_app_with_config(Config::default())
}

pub fn test_app_with_config(config: Config) -> TestMedia {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("media_files");

    std::fs::create_dir_all(root.join("sub/nested")).unwrap();
    std::fs::create_dir_all(root.join("my photos")).unwrap();
    std::fs::write(root.join("b.txt"), "bbbb").unwrap();
    std::fs::write(root.join("a.txt"), "a").unwrap();
    std::fs::write(root.join("photo.jpg"), vec![0xffu8; 2048]).unwrap();
    std::fs::write(root.join("archive.zip"), "PK").unwrap();
    std::fs::write(root.join("sub/song.mp3"), "ID3").unwrap();
    std::fs::write(root.join("sub/nested/deep.txt"), "deep").unwrap();
    std::fs::write(root.join("my photos/beach day.png"), "png").unwrap();

    let sibling = dir.path().join("media_files2");
    std::fs::create_dir_all(&sibling).unwrap();
    std::fs::write(sibling.join("secret.txt"), "secret").unwrap();

    let media_root = MediaRoot::new(&root).unwrap();
    let app = media_browser::app(AppState::with_config(media_root, config));

    TestMedia { dir, app }
}

impl TestMedia {
    pub fn root(&self) -> std::path::PathBuf {
        self.dir.path().join("media_files")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_string(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
