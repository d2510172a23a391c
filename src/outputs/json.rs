//! JSON output of a collection run.

use crate::models::Collection;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `collection` to `{output_dir}/{date}/{time_of_day}.json`.
///
/// A later run in the same edition overwrites the earlier file.
///
/// # Arguments
///
/// * `collection` - The run to serialize
/// * `output_dir` - Base directory; the date subdirectory is created on demand
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Fails if the directory cannot be created, serialization fails, or the
/// file cannot be written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_collection(
    collection: &Collection,
    output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(collection)?;

    let full_json_dir = Path::new(output_dir).join(&collection.local_date);
    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = full_json_dir.join(format!("{}.json", collection.time_of_day));
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON collection");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleRecord, SourceReport};

    #[tokio::test]
    async fn test_write_collection_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let collection = Collection {
            local_date: "2025-05-06".to_string(),
            time_of_day: "afternoon".to_string(),
            local_time: "12:00:00".to_string(),
            sources: vec![SourceReport {
                name: "Example".to_string(),
                url: "https://example.com/ai/".to_string(),
                articles: vec![ArticleRecord {
                    title: "Title".to_string(),
                    url: Some("https://example.com/ai/1".to_string()),
                    description: None,
                    date: "2025-05-06".to_string(),
                }],
                error: None,
            }],
        };

        let path = write_collection(&collection, dir.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("2025-05-06").join("afternoon.json"));

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let back: Collection = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.sources[0].articles, collection.sources[0].articles);
    }
}
