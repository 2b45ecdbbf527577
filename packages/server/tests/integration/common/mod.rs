use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, redirect};
use sea_orm::{DatabaseConnection, Set};
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

use ::common::storage::filesystem::FilesystemObjectStore;
use venus::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, StorageBackend,
    StorageConfig,
};
use venus::entity::profile;
use venus::state::AppState;
use venus::utils::hash::hash_password;
use venus::utils::rate_limit::LoginLimiter;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";
pub const EDITOR_EMAIL: &str = "editor@example.com";
pub const EDITOR_PASSWORD: &str = "editor-password";
pub const MAX_UPLOAD_SIZE: u64 = 256 * 1024;

pub mod routes {
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const LOGOUT: &str = "/api/v1/auth/logout";
    pub const ME: &str = "/api/v1/auth/me";
    pub const CONTACT: &str = "/api/v1/contact";
    pub const WORKS: &str = "/api/v1/works";
    pub const TESTIMONIALS: &str = "/api/v1/testimonials";
    pub const SETTINGS: &str = "/api/v1/settings";
    pub const HOME_PAGE: &str = "/api/v1/pages/home";
    pub const ABOUT_PAGE: &str = "/api/v1/pages/about";
    pub const SERVICES_PAGE: &str = "/api/v1/pages/services";
    pub const WORKS_PAGE: &str = "/api/v1/pages/works";

    pub const ADMIN_WORKS: &str = "/api/v1/admin/works";
    pub const ADMIN_TESTIMONIALS: &str = "/api/v1/admin/testimonials";
    pub const ADMIN_MESSAGES: &str = "/api/v1/admin/messages";
    pub const ADMIN_UPLOADS: &str = "/api/v1/admin/uploads";
    pub const ADMIN_DASHBOARD: &str = "/api/v1/admin/dashboard";

    pub fn work(id: &str) -> String {
        format!("/api/v1/works/{id}")
    }

    pub fn admin_work(id: &str) -> String {
        format!("/api/v1/admin/works/{id}")
    }

    pub fn admin_testimonial(id: &str) -> String {
        format!("/api/v1/admin/testimonials/{id}")
    }

    pub fn toggle_approval(id: &str) -> String {
        format!("/api/v1/admin/testimonials/{id}/toggle-approval")
    }

    pub fn admin_message(id: &str) -> String {
        format!("/api/v1/admin/messages/{id}")
    }

    pub fn admin_setting(key: &str) -> String {
        format!("/api/v1/admin/settings/{key}")
    }
}

/// A running test server backed by a throwaway SQLite file and object directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("venus.db").display());
        let objects = dir.path().join("objects");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();
        let public_base_url = format!("http://{addr}");

        let db = venus::database::init_db(&db_url)
            .await
            .expect("Failed to initialize test database");
        venus::seed::ensure_indexes(&db)
            .await
            .expect("Failed to create indexes");

        let auth = AuthConfig {
            jwt_secret: "test-secret-for-integration-tests".to_string(),
            session_ttl_hours: 1,
            cookie_secure: false,
            admin_email: Some(ADMIN_EMAIL.to_string()),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            login_attempts_per_minute: 5,
        };
        venus::seed::ensure_admin_profile(&db, &auth)
            .await
            .expect("Failed to seed admin profile");
        insert_profile(&db, EDITOR_EMAIL, EDITOR_PASSWORD, "editor").await;

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            database: DatabaseConfig { url: db_url },
            auth,
            storage: StorageConfig {
                backend: StorageBackend::Filesystem,
                root: objects.display().to_string(),
                public_base_url: public_base_url.clone(),
                max_upload_size: MAX_UPLOAD_SIZE,
                s3: None,
            },
        };

        let store = FilesystemObjectStore::new(
            objects,
            format!("{public_base_url}/storage"),
            MAX_UPLOAD_SIZE,
        )
        .await
        .expect("Failed to open object store");

        let state = AppState {
            db: db.clone(),
            login_limiter: Arc::new(LoginLimiter::new(app_config.auth.login_attempts_per_minute)),
            config: app_config,
            store: Arc::new(store),
        };

        let app = venus::build_router(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::builder()
                .redirect(redirect::Policy::none())
                .build()
                .expect("Failed to build HTTP client"),
            db,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn send(&self, req: RequestBuilder, token: Option<&str>) -> TestResponse {
        let req = match token {
            Some(token) => req.header("Authorization", format!("Bearer {token}")),
            None => req,
        };
        let res = req.send().await.expect("Failed to send request");
        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        self.send(self.client.get(self.url(path)), None).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        self.send(self.client.get(self.url(path)), Some(token)).await
    }

    /// GET the way a browser navigates: HTML accepted, no token.
    pub async fn browse(&self, path: &str, token: Option<&str>) -> TestResponse {
        let req = self
            .client
            .get(self.url(path))
            .header("Accept", "text/html,application/xhtml+xml");
        self.send(req, token).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        self.send(self.client.post(self.url(path)).json(body), None)
            .await
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        self.send(self.client.post(self.url(path)).json(body), Some(token))
            .await
    }

    pub async fn put_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        self.send(self.client.put(self.url(path)).json(body), Some(token))
            .await
    }

    pub async fn patch_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        self.send(self.client.patch(self.url(path)).json(body), Some(token))
            .await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        self.send(self.client.delete(self.url(path)), Some(token))
            .await
    }

    pub async fn delete_without_token(&self, path: &str) -> TestResponse {
        self.send(self.client.delete(self.url(path)), None).await
    }

    pub async fn post_form(&self, path: &str, form: Form, token: Option<&str>) -> TestResponse {
        self.send(self.client.post(self.url(path)).multipart(form), token)
            .await
    }

    pub async fn put_form(&self, path: &str, form: Form, token: Option<&str>) -> TestResponse {
        self.send(self.client.put(self.url(path)).multipart(form), token)
            .await
    }

    /// Fetch an absolute URL, such as a stored object's public URL.
    pub async fn fetch(&self, url: &str) -> TestResponse {
        self.send(self.client.get(url), None).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let res = self
            .post_without_token(
                routes::LOGIN,
                &serde_json::json!({"email": email, "password": password}),
            )
            .await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);
        res.body["token"]
            .as_str()
            .expect("Login response should contain a token")
            .to_string()
    }

    pub async fn login_admin(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    pub async fn login_editor(&self) -> String {
        self.login(EDITOR_EMAIL, EDITOR_PASSWORD).await
    }

    /// Create an image work and return the response body's `data`.
    pub async fn create_image_work(&self, token: &str, title: &str, favorite: bool) -> Value {
        let form = Form::new()
            .text("title", title.to_string())
            .text("category", "Painting")
            .text("type", "image")
            .text("is_favorite", favorite.to_string())
            .part("image", png_part(64, 48));
        let res = self.post_form(routes::ADMIN_WORKS, form, Some(token)).await;
        assert_eq!(res.status, 201, "create_image_work failed: {}", res.text);
        res.body["data"].clone()
    }

    /// Create a testimonial and return its ID.
    pub async fn create_testimonial(&self, token: &str, name: &str, approved: bool) -> String {
        let res = self
            .post_with_token(
                routes::ADMIN_TESTIMONIALS,
                &serde_json::json!({
                    "name": name,
                    "text": "Wonderful to work with.",
                    "rating": 5,
                    "approved": approved,
                }),
                token,
            )
            .await;
        assert_eq!(res.status, 201, "create_testimonial failed: {}", res.text);
        res.body["data"]["id"]
            .as_str()
            .expect("testimonial id")
            .to_string()
    }
}

async fn insert_profile(db: &DatabaseConnection, email: &str, password: &str, role: &str) {
    let now = Utc::now();
    let model = profile::ActiveModel {
        id: Set(Uuid::now_v7()),
        email: Set(email.to_string()),
        password: Set(hash_password(password).expect("hash")),
        role: Set(role.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    venus::repo::profile::insert_if_absent(db, model)
        .await
        .expect("Failed to insert profile");
}

/// A `w`x`h` PNG.
pub fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([200, 120, 40]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

pub fn png_part(w: u32, h: u32) -> Part {
    Part::bytes(png_bytes(w, h))
        .file_name("artwork.png")
        .mime_str("image/png")
        .unwrap()
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self {
            status,
            headers,
            text,
            body,
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
