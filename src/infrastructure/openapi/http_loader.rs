//! HTTP-based specification loader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::parser::OpenApiParser;
use crate::generation::{GenerationError, OpenApiLoader, SpecDocument};

/// Loads specifications from HTTP/HTTPS URLs
pub struct HttpOpenApiLoader {
    client: Client,
}

impl HttpOpenApiLoader {
    pub fn new() -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| GenerationError::LoadError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl OpenApiLoader for HttpOpenApiLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument, GenerationError> {
        // Only handle HTTP(S) URLs
        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(GenerationError::LoadError(format!(
                "HttpOpenApiLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await.map_err(|e| {
            GenerationError::LoadError(format!(
                "Failed to fetch specification from {source}: {e}"
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::LoadError(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let content = response.text().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read response body: {e}"))
        })?;

        // Content type wins over the URL's extension
        let spec_value = if content_type.contains("json") {
            serde_json::from_str(&content).map_err(GenerationError::SerializationError)?
        } else if content_type.contains("yaml") {
            serde_yaml::from_str(&content)
                .map_err(|e| GenerationError::LoadError(format!("Failed to parse YAML: {e}")))?
        } else {
            super::file_loader::parse_content(&content, source)?
        };

        OpenApiParser::new(spec_value).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_loader_json() {
        let mock_server = MockServer::start().await;

        let spec_json = r#"{
            "swagger": "2.0",
            "definitions": {
                "Pet": { "type": "object", "properties": { "name": { "type": "string" } } }
            },
            "paths": {}
        }"#;

        Mock::given(method("GET"))
            .and(path("/swagger.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(spec_json)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let loader = HttpOpenApiLoader::new().unwrap();
        let url = format!("{}/swagger.json", mock_server.uri());
        let spec = loader.load(&url).await.unwrap();

        assert!(spec.definitions.contains_key("Pet"));
    }

    #[tokio::test]
    async fn test_http_loader_yaml() {
        let mock_server = MockServer::start().await;

        let spec_yaml = r#"swagger: "2.0"
definitions:
  Pet:
    type: object
paths: {}"#;

        Mock::given(method("GET"))
            .and(path("/swagger.yaml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(spec_yaml)
                    .insert_header("content-type", "application/x-yaml"),
            )
            .mount(&mock_server)
            .await;

        let loader = HttpOpenApiLoader::new().unwrap();
        let url = format!("{}/swagger.yaml", mock_server.uri());
        let spec = loader.load(&url).await.unwrap();

        assert_eq!(spec.definitions.len(), 1);
    }

    #[tokio::test]
    async fn test_http_loader_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notfound"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let loader = HttpOpenApiLoader::new().unwrap();
        let url = format!("{}/notfound", mock_server.uri());
        let result = loader.load(&url).await;

        match result.unwrap_err() {
            GenerationError::LoadError(msg) => {
                assert!(msg.contains("HTTP 404"));
            }
            other => panic!("Expected LoadError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_loader_non_http_url() {
        let loader = HttpOpenApiLoader::new().unwrap();
        let result = loader.load("file:///path/to/spec.yaml").await;

        match result.unwrap_err() {
            GenerationError::LoadError(msg) => {
                assert!(msg.contains("only handles HTTP"));
            }
            other => panic!("Expected LoadError, got {other:?}"),
        }
    }
}
