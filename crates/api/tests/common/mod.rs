#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use vidya_api::config::ServerConfig;
use vidya_api::router::build_app_router;
use vidya_api::state::AppState;
use vidya_api::storage::ImageStorage;
use vidya_core::access::SharedSecretGate;
use vidya_db::models::game::{CreateGame, Game};
use vidya_db::models::genre::{CreateGenre, Genre};
use vidya_db::models::image::Image;
use vidya_db::store::{CatalogStore, MemoryCatalogStore};

pub const PASSWORD: &str = "letmein";

/// Build a test `ServerConfig` with safe defaults and the given image directory.
pub fn test_config(images_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        images_dir: images_dir.to_path_buf(),
        max_upload_bytes: 5 * 1024 * 1024,
        mutation_password: PASSWORD.to_string(),
    }
}

/// The full application over an in-memory store and a temporary image
/// directory.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCatalogStore>,
    pub images: ImageStorage,
    _dir: TempDir,
}

/// Build the application router exactly as `main.rs` does, backed by
/// [`MemoryCatalogStore`].
pub fn build_test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(&dir.path().join("images"));
    let store = Arc::new(MemoryCatalogStore::new());
    let images = ImageStorage::new(config.images_dir.clone());

    let state = AppState {
        store: store.clone(),
        gate: Arc::new(SharedSecretGate::new(&config.mutation_password)),
        images: images.clone(),
        config: Arc::new(config.clone()),
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        images,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn genre(&self, name: &str) -> Genre {
        self.store
            .create_genre(&CreateGenre {
                name: name.into(),
                description: format!("{name} games"),
            })
            .await
            .unwrap()
    }

    pub async fn game(&self, title: &str, genre_id: i64, image_id: Option<i64>) -> Game {
        self.store
            .create_game(&CreateGame {
                title: title.into(),
                description: format!("About {title}"),
                stock: 3,
                price: 15.0,
                genre_id,
                image_id,
            })
            .await
            .unwrap()
    }

    /// Store a real image (record plus backing file) the way an upload would.
    pub async fn image(&self) -> Image {
        let upload = vidya_api::storage::UploadedFile {
            file_name: "cover.png".into(),
            content_type: "image/png".into(),
            bytes: axum::body::Bytes::from_static(PNG),
        };
        let filename = self.images.write(&upload).await.unwrap();
        self.store
            .create_image(&vidya_db::models::image::CreateImage {
                filename,
                content_type: "image/png".into(),
            })
            .await
            .unwrap()
    }

    pub fn file_exists(&self, filename: &str) -> bool {
        self.images.path_of(filename).exists()
    }

    /// Swap a stored file for a non-empty directory so removing it fails
    /// with something other than `NotFound`.
    pub fn make_unremovable(&self, filename: &str) {
        let path = self.images.path_of(filename);
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();
    }

    /// Number of files in the image directory.
    pub fn file_count(&self) -> usize {
        std::fs::read_dir(self.images.root())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub async fn get(&self, uri: &str) -> Response {
        get(&self.router, uri).await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> Response {
        post_form(&self.router, uri, fields).await
    }

    pub async fn post_multipart(&self, uri: &str, body: MultipartBody) -> Response {
        post_multipart(&self.router, uri, body).await
    }
}

/// A few bytes standing in for an image file.
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n0000";

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencode(k), urlencode(v)))
        .collect::<Vec<_>>()
        .join("&");
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn post_multipart(app: &Router, uri: &str, body: MultipartBody) -> Response {
    let (content_type, bytes) = body.finish();
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(CONTENT_TYPE, content_type)
                .body(Body::from(bytes))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect has a Location header")
        .to_str()
        .unwrap()
}

fn urlencode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{b:02X}"),
        })
        .collect()
}

const BOUNDARY: &str = "vidya-test-boundary";

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title, description, stock, price and genre of a valid game.
    pub fn game(title: &str, genre_id: i64) -> Self {
        Self::new()
            .text("title", title)
            .text("description", "A fine game")
            .text("stock", "4")
            .text("price", "19.99")
            .text("genre", &genre_id.to_string())
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> (String, Vec<u8>) {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), self.bytes)
    }
}
