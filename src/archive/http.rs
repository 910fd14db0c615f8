//! HTTP archive service client.
//!
//! - `GET  {endpoint}/api/briefs/list` returns a JSON array of
//!   [`ArchivedFile`] records.
//! - `POST {endpoint}/api/briefs/save` takes a multipart form with parts
//!   `file`, `filename` and `clientName`.
//!
//! Error responses may carry `{"error": "..."}`; that text is used as the
//! failure reason when present.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;

use super::ArchivedFile;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct HttpArchive {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn unavailable(e: impl std::fmt::Display) -> AppError {
    AppError::ArchiveUnavailable(e.to_string())
}

/// Turn a non-2xx response into an error, preferring the server's reason.
async fn failure(what: &str, response: Response) -> AppError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) if !body.error.trim().is_empty() => unavailable(body.error),
        _ => unavailable(format!("{what} failed with status {status}")),
    }
}

impl HttpArchive {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}/api/briefs/{route}", self.endpoint)
    }

    pub async fn list(&self) -> Result<Vec<ArchivedFile>, AppError> {
        let response = self
            .client
            .get(self.url("list"))
            .send()
            .await
            .map_err(unavailable)?;
        if !response.status().is_success() {
            return Err(failure("archive listing", response).await);
        }
        response
            .json::<Vec<ArchivedFile>>()
            .await
            .map_err(|e| unavailable(format!("unreadable archive listing: {e}")))
    }

    pub async fn upload(&self, bytes: Vec<u8>, filename: &str, client: &str) -> Result<(), AppError> {
        let file = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")
            .map_err(unavailable)?;
        let form = Form::new()
            .part("file", file)
            .text("filename", filename.to_string())
            .text("clientName", client.to_string());

        let response = self
            .client
            .post(self.url("save"))
            .multipart(form)
            .send()
            .await
            .map_err(unavailable)?;
        if !response.status().is_success() {
            return Err(failure("archive upload", response).await);
        }
        tracing::debug!(filename, status = %response.status(), "archive upload accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn archive(server: &MockServer) -> HttpArchive {
        HttpArchive::new(&format!("{}/", server.uri()), Duration::from_secs(5)).expect("client")
    }

    #[tokio::test]
    async fn list_parses_records_in_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/briefs/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "name": "7ciel_ramadan_special_2026-03-01.pdf",
                    "client": "7Ciel",
                    "createdAt": "2026-03-01T10:00:00Z",
                    "size": 48213,
                    "path": "7Ciel/7ciel_ramadan_special_2026-03-01.pdf"
                },
                {
                    "name": "acme_launch_2026-02-11.pdf",
                    "client": "Acme",
                    "createdAt": "2026-02-11T08:30:00Z",
                    "size": 1024,
                    "path": "Acme/acme_launch_2026-02-11.pdf"
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let files = archive(&server).list().await.expect("list");
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["7ciel_ramadan_special_2026-03-01.pdf", "acme_launch_2026-02-11.pdf"]
        );
        assert_eq!(files[0].size, 48213);
        assert_eq!(files[1].client, "Acme");
    }

    #[tokio::test]
    async fn empty_listing_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/briefs/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        assert!(archive(&server).list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn non_success_listing_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/briefs/list"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let err = archive(&server).list().await.unwrap_err();
        assert!(matches!(err, AppError::ArchiveUnavailable(ref m) if m.contains("503")));
    }

    #[tokio::test]
    async fn unparseable_listing_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/briefs/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        let err = archive(&server).list().await.unwrap_err();
        assert!(matches!(err, AppError::ArchiveUnavailable(ref m) if m.contains("unreadable")));
    }

    #[tokio::test]
    async fn upload_sends_multipart_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/briefs/save"))
            .and(body_string_contains("name=\"clientName\""))
            .and(body_string_contains("7Ciel"))
            .and(body_string_contains("name=\"filename\""))
            .and(body_string_contains("%PDF-1.3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        archive(&server)
            .upload(b"%PDF-1.3 test".to_vec(), "7ciel_x_2026-03-01.pdf", "7Ciel")
            .await
            .expect("upload");
    }

    #[tokio::test]
    async fn upload_failure_uses_server_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/briefs/save"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "error": "BRIEFS_BUCKET binding not found" })),
            )
            .mount(&server)
            .await;

        let err = archive(&server)
            .upload(b"%PDF".to_vec(), "a.pdf", "Acme")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "BRIEFS_BUCKET binding not found");
    }

    #[tokio::test]
    async fn upload_failure_without_reason_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/briefs/save"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = archive(&server)
            .upload(b"%PDF".to_vec(), "a.pdf", "Acme")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let a = HttpArchive::new("http://127.0.0.1:1", Duration::from_secs(2)).expect("client");
        assert!(matches!(a.list().await, Err(AppError::ArchiveUnavailable(_))));
    }
}
