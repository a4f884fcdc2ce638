//! Output service implementations

pub mod filesystem_output;

pub use filesystem_output::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, OutputService};
    use crate::generation::{PipelineOutput, RenderedFile};
    use tempfile::TempDir;

    fn pipeline(names: &[&str]) -> PipelineOutput {
        PipelineOutput {
            files: names
                .iter()
                .map(|name| RenderedFile::new(format!("{name}.ts"), format!("// {name}\n")))
                .collect(),
            barrel: RenderedFile::new("index.ts", names.join(",")),
        }
    }

    fn entries(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .expect("Failed to read dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_write_pipeline_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let models = temp_dir.path().join("client/models");

        output_service
            .write_pipeline(&models, &pipeline(&["Pet", "Category"]))
            .await
            .unwrap();

        assert_eq!(entries(&models), vec!["Category.ts", "Pet.ts", "index.ts"]);
        assert_eq!(
            std::fs::read_to_string(models.join("Pet.ts")).unwrap(),
            "// Pet\n"
        );
        assert_eq!(
            std::fs::read_to_string(models.join("index.ts")).unwrap(),
            "Pet,Category"
        );
        // No staging or backup directories are left behind
        assert_eq!(entries(&temp_dir.path().join("client")), vec!["models"]);
    }

    #[tokio::test]
    async fn test_write_pipeline_replaces_previous_output() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let models = temp_dir.path().join("models");

        output_service
            .write_pipeline(&models, &pipeline(&["Old"]))
            .await
            .unwrap();
        output_service
            .write_pipeline(&models, &pipeline(&["New"]))
            .await
            .unwrap();

        assert_eq!(entries(&models), vec!["New.ts", "index.ts"]);
        assert_eq!(entries(temp_dir.path()), vec!["models"]);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_output() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let models = temp_dir.path().join("models");

        output_service
            .write_pipeline(&models, &pipeline(&["Pet"]))
            .await
            .unwrap();

        // A file path that escapes through a regular file cannot be created
        let broken = PipelineOutput {
            files: vec![
                RenderedFile::new("Fine.ts", String::new()),
                RenderedFile::new("Fine.ts/child.ts", String::new()),
            ],
            barrel: RenderedFile::new("index.ts", String::new()),
        };
        let result = output_service.write_pipeline(&models, &broken).await;

        assert!(result.is_err());
        assert_eq!(entries(&models), vec!["Pet.ts", "index.ts"]);
        assert_eq!(entries(temp_dir.path()), vec!["models"]);
    }

    #[tokio::test]
    async fn test_write_files_keeps_other_contents() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        std::fs::write(temp_dir.path().join("keep.txt"), "x").unwrap();

        output_service
            .write_files(
                temp_dir.path(),
                &[RenderedFile::new("nested/a.json", "{}".to_string())],
            )
            .await
            .unwrap();

        assert!(temp_dir.path().join("keep.txt").exists());
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("nested/a.json")).unwrap(),
            "{}"
        );
    }

    #[tokio::test]
    async fn test_paths_leaving_the_target_are_refused() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let models = temp_dir.path().join("client/models");

        let escaping = PipelineOutput {
            files: vec![RenderedFile::new("../../escape.ts", String::new())],
            barrel: RenderedFile::new("index.ts", String::new()),
        };
        let result = output_service.write_pipeline(&models, &escaping).await;

        assert!(matches!(result, Err(ApplicationError::OutputError(_))));
        assert!(!temp_dir.path().join("escape.ts").exists());
        assert!(!models.exists());
        assert!(entries(&temp_dir.path().join("client")).is_empty());

        let result = output_service
            .write_files(
                temp_dir.path(),
                &[RenderedFile::new("/tmp/absolute.ts", String::new())],
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ensure_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let nested_path = temp_dir.path().join("deeply/nested/directory");

        output_service.ensure_directory(&nested_path).await.unwrap();
        assert!(nested_path.is_dir());
    }
}
