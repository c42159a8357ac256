use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

use super::error::ApiError;
use crate::state::data::{CreatedWork, Credentials, NewWork, Work, WorkId};

/// Body and status of a JSON POST, returned for every status code
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub data: Value,
    pub status: u16,
}

/// Thin wrapper over `reqwest` for the portfolio API.
/// No retries and no timeouts: a failed call is reported once.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn works_url(&self) -> String {
        format!("{}/api/works", self.base_url)
    }

    pub fn work_url(&self, id: WorkId) -> String {
        format!("{}/api/works/{}", self.base_url, id)
    }

    pub fn login_url(&self) -> String {
        format!("{}/api/users/login", self.base_url)
    }

    /// GET `url` and parse the body on a 2xx answer
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("GET {} failed: {}", url, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} answered {}", url, status);
            return Err(ApiError::from_status(status));
        }

        Ok(response.json::<T>().await?)
    }

    /// POST a JSON body. Non-2xx statuses are not errors here;
    /// the caller decides from `status`.
    pub async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<JsonResponse, ApiError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!("POST {} failed: {}", url, e);
                ApiError::from(e)
            })?;

        let status = response.status().as_u16();
        let data: Value = response.json().await.map_err(|e| {
            warn!("POST {} answered {} with a non-JSON body", url, status);
            ApiError::from(e)
        })?;

        debug!(status, "POST {}", url);
        Ok(JsonResponse { data, status })
    }

    pub async fn fetch_works(&self) -> Result<Vec<Work>, ApiError> {
        let works: Vec<Work> = self.fetch_json(&self.works_url()).await?;
        info!("📥 Fetched {} works", works.len());
        Ok(works)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<JsonResponse, ApiError> {
        self.post_json(&self.login_url(), credentials).await
    }

    /// Upload a new work as multipart data with the bearer token
    pub async fn create_work(&self, token: &str, new_work: &NewWork) -> Result<Work, ApiError> {
        let bytes = tokio::fs::read(&new_work.image_path)
            .await
            .map_err(|e| ApiError::Upload(format!("{}: {}", new_work.image_path.display(), e)))?;

        let file_name = new_work
            .image_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        let image = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(&new_work.image_path))?;

        let form = Form::new()
            .part("image", image)
            .text("title", new_work.title.clone())
            .text("category", new_work.category.id.to_string());

        let url = self.works_url();
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("POST {} failed: {}", url, e);
                ApiError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("POST {} answered {}", url, status);
            return Err(ApiError::from_status(status));
        }

        let created: CreatedWork = response.json().await?;
        info!(id = created.id, "work created");
        Ok(created.into_work(&new_work.category))
    }

    /// Delete a work; any 2xx answer counts as success
    pub async fn delete_work(&self, token: &str, id: WorkId) -> Result<(), ApiError> {
        let url = self.work_url(id);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                warn!("DELETE {} failed: {}", url, e);
                ApiError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("DELETE {} answered {}", url, status);
            return Err(ApiError::from_status(status));
        }

        info!(id, "work deleted");
        Ok(())
    }

    /// Download the raw bytes of a tile picture
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Content type of the upload, from its extension
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Category;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Nothing listens on port 1 on a test machine
    const DEAD_BASE: &str = "http://127.0.0.1:1";

    /// Answer a single request on a local port with `status` and a JSON
    /// `body`. The handle yields the raw request as received.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (base, handle)
    }

    /// Read headers, then as many body bytes as `content-length` announces
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    #[test]
    fn test_endpoints() {
        let api = ApiClient::new("http://localhost:5678/");

        assert_eq!(api.works_url(), "http://localhost:5678/api/works");
        assert_eq!(api.work_url(4), "http://localhost:5678/api/works/4");
        assert_eq!(api.login_url(), "http://localhost:5678/api/users/login");
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("a/b/photo.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("photo.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("photo")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        let api = ApiClient::new(DEAD_BASE);

        let result = api.fetch_works().await;

        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_login_unreachable_is_an_error_not_a_status() {
        let api = ApiClient::new(DEAD_BASE);
        let credentials = Credentials {
            email: "sophie.bluel@test.tld".to_string(),
            password: "S0phie".to_string(),
        };

        assert!(matches!(api.login(&credentials).await, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_create_with_missing_file_fails_before_sending() {
        let api = ApiClient::new(DEAD_BASE);
        let new_work = NewWork {
            image_path: PathBuf::from("/definitely/not/here.png"),
            title: "Lamp".to_string(),
            category: Category { id: 1, name: "Objets".to_string() },
        };

        let result = api.create_work("token", &new_work).await;

        assert!(matches!(result, Err(ApiError::Upload(_))));
    }

    #[tokio::test]
    async fn test_fetch_parses_success_body() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"imageUrl":"a.png","title":"Alpha","category":{"id":1,"name":"Objets"}}]"#,
        )
        .await;
        let api = ApiClient::new(base);

        let works = api.fetch_works().await.unwrap();

        assert_eq!(works.len(), 1);
        assert_eq!(works[0].title, "Alpha");
        assert_eq!(works[0].category.name, "Objets");
        assert!(server.await.unwrap().starts_with("GET /api/works "));
    }

    #[tokio::test]
    async fn test_fetch_error_statuses() {
        let (base, _server) = serve_once("404 Not Found", "{}").await;
        let api = ApiClient::new(base);
        assert_eq!(api.fetch_works().await, Err(ApiError::NotFound));

        let (base, _server) = serve_once("500 Internal Server Error", "{}").await;
        let api = ApiClient::new(base);
        assert_eq!(api.fetch_works().await, Err(ApiError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_bad_body_is_a_decode_error() {
        let (base, _server) = serve_once("200 OK", "{").await;
        let api = ApiClient::new(base);

        assert!(matches!(api.fetch_works().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_login_returns_refusals_with_their_status() {
        let (base, server) = serve_once("401 Unauthorized", r#"{"error":{}}"#).await;
        let api = ApiClient::new(base);
        let credentials = Credentials {
            email: "sophie.bluel@test.tld".to_string(),
            password: "wrong".to_string(),
        };

        let response = api.login(&credentials).await.unwrap();

        assert_eq!(response.status, 401);
        assert_eq!(response.data, serde_json::json!({ "error": {} }));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/users/login "));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.contains(r#""email":"sophie.bluel@test.tld""#));
    }

    #[tokio::test]
    async fn test_delete_sends_bearer_token() {
        let (base, server) = serve_once("204 No Content", "").await;
        let api = ApiClient::new(base);

        api.delete_work("secret.jwt", 7).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("DELETE /api/works/7 "));
        assert!(request.to_lowercase().contains("authorization: bearer secret.jwt"));
    }

    #[tokio::test]
    async fn test_delete_refused() {
        let (base, _server) = serve_once("401 Unauthorized", "{}").await;
        let api = ApiClient::new(base);

        assert_eq!(api.delete_work("expired", 7).await, Err(ApiError::Unauthorized(401)));
    }

    #[tokio::test]
    async fn test_create_posts_multipart_with_bearer() {
        let path = std::env::temp_dir().join(format!("portfolio-upload-{}.png", std::process::id()));
        std::fs::write(&path, b"not really a png").unwrap();
        let (base, server) = serve_once(
            "201 Created",
            r#"{"id":12,"imageUrl":"http://localhost:5678/images/lamp.png","title":"Lamp","categoryId":1}"#,
        )
        .await;
        let api = ApiClient::new(base);
        let objets = Category { id: 1, name: "Objets".to_string() };
        let new_work = NewWork {
            image_path: path.clone(),
            title: "Lamp".to_string(),
            category: objets.clone(),
        };

        let created = api.create_work("secret.jwt", &new_work).await.unwrap();

        // No embedded category in the answer: the selected one is kept
        assert_eq!(created.id, 12);
        assert_eq!(created.category, objets);

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /api/works "));
        assert!(lower.contains("authorization: bearer secret.jwt"));
        assert!(lower.contains("content-type: multipart/form-data"));
        assert!(request.contains(r#"name="image""#));
        assert!(request.contains("image/png"));
        assert!(request.contains(r#"name="title""#));
        assert!(request.contains("Lamp"));
        assert!(request.contains(r#"name="category""#));
        assert!(request.contains("not really a png"));

        let _ = std::fs::remove_file(&path);
    }
}
