//! Specification document model, parser and loaders

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;
pub mod parser;
pub mod types;

pub use composite_loader::CompositeOpenApiLoader;
pub use file_loader::FileOpenApiLoader;
pub use http_loader::HttpOpenApiLoader;
pub use parser::OpenApiParser;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::OpenApiLoader;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SPEC_JSON: &str = r#"{
        "swagger": "2.0",
        "definitions": {
            "Pet": { "type": "object", "properties": { "id": { "type": "integer" } } }
        },
        "paths": {}
    }"#;

    fn temp_spec(suffix: &str, content: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write temp file");
        temp_file.flush().expect("Failed to flush temp file");
        temp_file
    }

    #[tokio::test]
    async fn test_file_loader_json() {
        let loader = FileOpenApiLoader::new();
        let temp_file = temp_spec(".json", SPEC_JSON);

        let spec = loader
            .load(temp_file.path().to_str().unwrap())
            .await
            .unwrap();
        assert!(spec.definitions.contains_key("Pet"));
    }

    #[tokio::test]
    async fn test_file_loader_yaml() {
        let loader = FileOpenApiLoader::new();
        let spec_yaml = r#"swagger: "2.0"
definitions:
  Pet:
    type: object
    properties:
      id:
        type: integer
paths: {}"#;
        let temp_file = temp_spec(".yaml", spec_yaml);

        let spec = loader
            .load(temp_file.path().to_str().unwrap())
            .await
            .unwrap();
        assert!(spec.definitions.contains_key("Pet"));
    }

    #[tokio::test]
    async fn test_file_loader_without_extension_falls_back() {
        let loader = FileOpenApiLoader::new();
        let temp_file = temp_spec("", "swagger: \"2.0\"\ndefinitions: {}\n");

        let spec = loader
            .load(temp_file.path().to_str().unwrap())
            .await
            .unwrap();
        assert!(spec.definitions.is_empty());
    }

    #[tokio::test]
    async fn test_file_loader_not_found() {
        let loader = FileOpenApiLoader::new();

        let result = loader.load("/nonexistent/file.yaml").await;
        assert!(matches!(
            result,
            Err(crate::generation::GenerationError::LoadError(_))
        ));
    }

    #[tokio::test]
    async fn test_composite_loader_file() {
        let loader = CompositeOpenApiLoader::new().unwrap();
        let temp_file = temp_spec(".json", SPEC_JSON);

        let result = loader.load(temp_file.path().to_str().unwrap()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_composite_loader_http() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api-spec.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(SPEC_JSON)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let loader = CompositeOpenApiLoader::new().unwrap();
        let url = format!("{}/api-spec.json", mock_server.uri());
        let spec = loader.load(&url).await.unwrap();

        assert!(spec.definitions.contains_key("Pet"));
    }
}
