use std::net::SocketAddr;

use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use vote_server::config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig, VotingConfig};
use vote_server::state::AppState;

pub const TEST_TOPIC: &str = "Integration test round";

pub mod routes {
    pub const ITEMS: &str = "/items";
    pub const VOTES: &str = "/votes";
    pub const RESULTS: &str = "/results";
    pub const RESULTS_RANKED: &str = "/results/ranked";
    pub const RESULTS_DISTRIBUTION: &str = "/results/distribution";
    pub const TOPIC: &str = "/topic";

    pub fn item_image(id: i32) -> String {
        format!("/items/{id}/image")
    }

    pub fn item_result(id: i32) -> String {
        format!("/results/{id}")
    }
}

/// A running test server backed by its own in-memory SQLite database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = res
            .bytes()
            .await
            .expect("Failed to read response body")
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Self {
            status,
            content_type,
            bytes,
            body,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// The `id` field of a JSON object body.
    pub fn id(&self) -> i32 {
        self.body["id"].as_i64().expect("Response should contain an id") as i32
    }

    /// A JSON array body.
    pub fn array(&self) -> &Vec<Value> {
        self.body.as_array().expect("Response should be a JSON array")
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec!["*".to_string()],
                    max_age: 3600,
                },
                max_upload_bytes: 1024 * 1024,
            },
            database: DatabaseConfig {
                // One connection: every pooled connection to `:memory:` is a
                // separate database.
                url: "sqlite::memory:".to_string(),
                sql_echo: false,
                max_connections: 1,
            },
            voting: VotingConfig {
                topic: TEST_TOPIC.to_string(),
            },
        };

        let db = vote_server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize test database");

        let state = AppState {
            db: db.clone(),
            config: app_config,
        };

        let app = vote_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(&self, path: &str, form: reqwest::multipart::Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    /// Upload an item through the API.
    pub async fn upload_item(
        &self,
        description: &str,
        file_name: &str,
        image: Vec<u8>,
        mime: Option<&str>,
    ) -> TestResponse {
        let mut part = reqwest::multipart::Part::bytes(image).file_name(file_name.to_string());
        if let Some(mime) = mime {
            part = part.mime_str(mime).expect("Failed to set MIME type");
        }
        let form = reqwest::multipart::Form::new()
            .text("description", description.to_string())
            .part("image", part);

        self.post_form(routes::ITEMS, form).await
    }

    /// Upload an item and return its `id`.
    pub async fn create_item(&self, description: &str) -> i32 {
        let res = self
            .upload_item(description, "image.png", b"PNG_DATA".to_vec(), Some("image/png"))
            .await;
        assert_eq!(res.status, 201, "create_item failed: {}", res.text());
        res.id()
    }

    /// Submit `(item_id, score)` votes for `user_id`.
    pub async fn vote(&self, user_id: &str, votes: &[(i32, i32)]) -> TestResponse {
        let votes: Vec<Value> = votes
            .iter()
            .map(|&(item_id, score)| serde_json::json!({ "item_id": item_id, "score": score }))
            .collect();

        self.post_json(
            routes::VOTES,
            &serde_json::json!({ "user_id": user_id, "votes": votes }),
        )
        .await
    }

    /// Result entry for `item_id` from `GET /results`, if present.
    pub async fn result_for(&self, item_id: i32) -> Option<Value> {
        let res = self.get(routes::RESULTS).await;
        assert_eq!(res.status, 200, "get results failed: {}", res.text());
        res.array()
            .iter()
            .find(|r| r["item_id"].as_i64() == Some(i64::from(item_id)))
            .cloned()
    }
}
