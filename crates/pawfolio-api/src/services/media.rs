//! Photo uploads to backend storage

use futures_util::future::try_join_all;
use reqwest::multipart;
use reqwest::Method;

use crate::client::ApiClient;
use crate::types::UploadResponse;
use crate::Result;

/// A file selected for upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    /// Upload a single file; the response carries its public URL
    ///
    /// Multipart bodies cannot be replayed, so a 401 here surfaces
    /// directly instead of going through the refresh-and-retry path.
    pub async fn upload_file(&self, file: UploadFile) -> Result<UploadResponse> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = multipart::Form::new().part("file", part);

        let request = self
            .request(Method::POST, "/api/storage/upload")
            .multipart(form);
        self.execute(request).await
    }

    /// Upload several files concurrently, preserving input order
    pub async fn upload_files(&self, files: Vec<UploadFile>) -> Result<Vec<String>> {
        let uploads = files.into_iter().map(|file| async move {
            self.upload_file(file).await.map(|response| response.url)
        });
        try_join_all(uploads).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawfolio_auth::{SessionManager, TokenPair, TokenStore};
    use pawfolio_storage::Database;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_url: &str) -> ApiClient {
        let store = TokenStore::new(Database::open_in_memory().unwrap());
        let session =
            SessionManager::new(store, format!("{server_url}/api/auth/refresh"), "/login");
        session
            .set_tokens(&TokenPair {
                access_token: "tok".to_string(),
                refresh_token: "r".to_string(),
                token_type: "Bearer".to_string(),
            })
            .unwrap();
        ApiClient::new(server_url, session).unwrap()
    }

    fn png(name: &str) -> UploadFile {
        UploadFile {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[tokio::test]
    async fn test_upload_file() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/storage/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://cdn.example/uploads/miso.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let response = client.upload_file(png("miso.png")).await.unwrap();
        assert_eq!(response.url, "https://cdn.example/uploads/miso.png");
    }

    #[tokio::test]
    async fn test_upload_files_fan_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/storage/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://cdn.example/uploads/photo.png"
            })))
            .expect(3)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let urls = client
            .upload_files(vec![png("a.png"), png("b.png"), png("c.png")])
            .await
            .unwrap();

        assert_eq!(urls.len(), 3);
    }
}
