//! Port interfaces for the application layer

use async_trait::async_trait;
use std::path::Path;

use crate::application::ApplicationError;
use crate::generation::{PipelineOutput, RenderedFile};

/// Service for writing rendered files to the output destination
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Replace `dir` with exactly the pipeline's files and barrel.
    ///
    /// Either the whole new set lands or the previous contents stay.
    async fn write_pipeline(
        &self,
        dir: &Path,
        output: &PipelineOutput,
    ) -> Result<(), ApplicationError>;

    /// Write files below `dir`, leaving other contents alone
    async fn write_files(&self, dir: &Path, files: &[RenderedFile])
    -> Result<(), ApplicationError>;

    /// Ensure a directory exists
    async fn ensure_directory(&self, path: &Path) -> Result<(), ApplicationError>;
}
