//! Result writer
//!
//! Writes the ids found in this run to `<output_dir>/<kind>_ids.txt`, one per
//! line in ascending numeric order. The file is overwritten on every run.

use std::path::PathBuf;

use tracing::info;

use crate::error::{CrawlError, CrawlResult};
use crate::models::{EntityKind, RunResult};

pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new() -> Self {
        Self::with_dir(".")
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: dir.into(),
        }
    }

    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.output_dir.join(kind.output_file_name())
    }

    /// File content: sorted lines, always newline-terminated
    pub fn render(result: &RunResult) -> String {
        let lines: Vec<String> = result.sorted_ids().iter().map(|id| id.to_line()).collect();
        let mut content = lines.join("\n");
        content.push('\n');
        content
    }

    pub async fn write(&self, kind: EntityKind, result: &RunResult) -> CrawlResult<PathBuf> {
        let path = self.path_for(kind);
        let io_err = |source| CrawlError::Io {
            path: path.clone(),
            source,
        };

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(io_err)?;
        tokio::fs::write(&path, Self::render(result))
            .await
            .map_err(io_err)?;

        info!("📄 wrote {} ids to {}", result.total(), path.display());
        Ok(path)
    }
}

impl Default for ResultWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, Legislature};

    #[test]
    fn test_render_sorts_numerically() {
        let mut result = RunResult::new();
        result.record(
            &Legislature::new("I"),
            ["33", "4", "200"].into_iter().map(EntityId::new),
        );

        assert_eq!(ResultWriter::render(&result), "4\n33\n200\n");
    }

    #[test]
    fn test_render_attendance_pairs() {
        let mut result = RunResult::new();
        result.record(
            &Legislature::new("XIII"),
            [EntityId::with_number("11", "6"), EntityId::with_number("10", "5")],
        );

        assert_eq!(ResultWriter::render(&result), "10,5\n11,6\n");
    }

    #[test]
    fn test_render_empty_result_is_a_newline() {
        assert_eq!(ResultWriter::render(&RunResult::new()), "\n");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::with_dir(dir.path());
        std::fs::write(writer.path_for(EntityKind::Mp), "stale\ncontent\n").unwrap();

        let mut result = RunResult::new();
        result.record(&Legislature::new("I"), [EntityId::new("2")]);
        let path = writer.write(EntityKind::Mp, &result).await.unwrap();

        assert_eq!(path, dir.path().join("mp_ids.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "2\n");
    }
}
