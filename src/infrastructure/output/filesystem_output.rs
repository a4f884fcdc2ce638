//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::{ApplicationError, OutputService};
use crate::generation::{PipelineOutput, RenderedFile};

/// Output service that writes rendered files to the filesystem
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_pipeline(
        &self,
        dir: &Path,
        output: &PipelineOutput,
    ) -> Result<(), ApplicationError> {
        let (parent, name) = split_target(dir)?;
        self.ensure_directory(&parent).await?;

        let run = Uuid::new_v4().simple().to_string();
        let staging = parent.join(format!(".{name}.staging-{run}"));

        let staged = async {
            self.ensure_directory(&staging).await?;
            self.write_files(&staging, &output.files).await?;
            self.write_files(&staging, std::slice::from_ref(&output.barrel))
                .await
        }
        .await;
        if let Err(e) = staged {
            remove_quietly(&staging).await;
            return Err(e);
        }

        // Move the previous directory aside so it can be restored
        let backup = parent.join(format!(".{name}.old-{run}"));
        let had_previous = fs::try_exists(dir).await.unwrap_or(false);
        if had_previous {
            if let Err(e) = fs::rename(dir, &backup).await {
                remove_quietly(&staging).await;
                return Err(output_error("move aside", dir, e));
            }
        }

        if let Err(e) = fs::rename(&staging, dir).await {
            if had_previous {
                if let Err(restore) = fs::rename(&backup, dir).await {
                    warn!(path = %dir.display(), error = %restore, "Failed to restore previous output");
                }
            }
            remove_quietly(&staging).await;
            return Err(output_error("replace", dir, e));
        }

        if had_previous {
            remove_quietly(&backup).await;
        }

        debug!(
            path = %dir.display(),
            files = output.files.len() + 1,
            "Wrote pipeline output"
        );
        Ok(())
    }

    async fn write_files(
        &self,
        dir: &Path,
        files: &[RenderedFile],
    ) -> Result<(), ApplicationError> {
        for rendered in files {
            let contained = rendered
                .relative_path
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
            if !contained {
                return Err(ApplicationError::OutputError(format!(
                    "Refusing to write {} outside {}",
                    rendered.relative_path.display(),
                    dir.display()
                )));
            }
            let path = dir.join(&rendered.relative_path);

            if let Some(parent) = path.parent() {
                self.ensure_directory(parent).await?;
            }

            let mut file = fs::File::create(&path)
                .await
                .map_err(|e| output_error("create file", &path, e))?;
            file.write_all(rendered.content.as_bytes())
                .await
                .map_err(|e| output_error("write file", &path, e))?;
            file.flush()
                .await
                .map_err(|e| output_error("flush file", &path, e))?;
        }

        Ok(())
    }

    async fn ensure_directory(&self, path: &Path) -> Result<(), ApplicationError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| output_error("create directory", path, e))
    }
}

fn split_target(dir: &Path) -> Result<(PathBuf, String), ApplicationError> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| {
            ApplicationError::OutputError(format!(
                "Output directory {} has no name",
                dir.display()
            ))
        })?;
    let parent = match dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((parent, name))
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_dir_all(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove directory");
        }
    }
}

fn output_error(action: &str, path: &Path, e: std::io::Error) -> ApplicationError {
    ApplicationError::OutputError(format!("Failed to {action} {}: {e}", path.display()))
}
