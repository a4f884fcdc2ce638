//! Composite loader that dispatches on the source's scheme

use async_trait::async_trait;
use url::Url;

use super::{FileOpenApiLoader, HttpOpenApiLoader};
use crate::generation::{GenerationError, OpenApiLoader, SpecDocument};

/// Loads from URLs over HTTP and from everything else as a local file
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Result<Self, GenerationError> {
        Ok(Self {
            http: HttpOpenApiLoader::new()?,
            file: FileOpenApiLoader::new(),
        })
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument, GenerationError> {
        tracing::debug!("CompositeOpenApiLoader: Loading from source: {source}");

        match Url::parse(source) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                tracing::debug!("CompositeOpenApiLoader: Using HTTP loader");
                self.http.load(source).await
            }
            Ok(url) if url.scheme() == "file" => {
                let path = url.to_file_path().map_err(|_| {
                    GenerationError::LoadError(format!("Invalid file URL: {source}"))
                })?;
                self.file.load(&path.to_string_lossy()).await
            }
            _ => {
                tracing::debug!("CompositeOpenApiLoader: Using file loader");
                self.file.load(source).await
            }
        }
    }
}
