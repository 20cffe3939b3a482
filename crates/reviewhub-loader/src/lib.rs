//! Loading and aggregation of the review table.
//!
//! The source is a CSV file with one row per annotated review fragment.
//! [`load`] reads it, resolves which known columns are present, and groups the
//! rows into one [`ReviewRecord`] per unique review:
//!
//! ```text
//! read_table ──► Schema::resolve ──► Schema::project ──► aggregate
//! ```
//!
//! Nothing is returned unless the whole pipeline succeeds.

mod aggregate;
mod schema;
mod table;

pub use aggregate::aggregate;
pub use schema::Schema;
pub use table::{read_table, Table};

use std::io::ErrorKind;
use std::path::Path;

use reviewhub_core::{LoadError, RawRow, ReviewRecord};
use tokio::fs::File;
use tokio::io::AsyncRead;
use tracing::{debug, info, warn};

/// Loads and aggregates the review table at `path`.
pub async fn load(path: impl AsRef<Path>) -> Result<Vec<ReviewRecord>, LoadError> {
    let path = path.as_ref();
    let abs_path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    info!("Attempting to load data from: {}", abs_path.display());

    if !tokio::fs::try_exists(path).await? {
        return Err(LoadError::NotFound(abs_path.display().to_string()));
    }

    let file = File::open(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound(abs_path.display().to_string()),
        _ => LoadError::UnexpectedError(e.to_string()),
    })?;

    let records = load_from_reader(file).await?;
    info!("Successfully loaded {} reviews.", records.len());
    Ok(records)
}

/// Runs the read/resolve/aggregate pipeline over any CSV byte stream.
pub async fn load_from_reader<R>(reader: R) -> Result<Vec<ReviewRecord>, LoadError>
where
    R: AsyncRead + Unpin + Send,
{
    let table = read_table(reader).await?;
    let schema = Schema::resolve(&table.headers);

    debug!(identity = ?schema.identity_columns(), rows = table.len(), "Grouping rows");
    let missing = schema.missing_columns();
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        warn!(missing = %names.join(", "), "Source lacks columns, reading them as empty");
    }
    if schema.identity_columns().is_empty() {
        warn!("Source has no identity columns, all rows collapse into one review");
    }

    let rows: Vec<RawRow> = table.rows.iter().map(|cells| schema.project(cells)).collect();
    Ok(aggregate(&schema, &rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewhub_core::{Fragment, LoadErrorKind};
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "review,translated_review,name,sex,date,rate,review_title,image,num_reviews_usuario,subcategory_fragment,subcategory_sentiment,category,subcategory";

    fn sample_csv() -> String {
        [
            HEADER,
            "Llegó tarde,Arrived late,Ana,F,2024-03-01,2,Meh,http://img/a.png,3,tarde,negative,delivery,speed",
            "Llegó tarde,Arrived late,Ana,F,2024-03-01,2,Meh,http://img/a.png,3,,,,",
            "Muy rico,Very tasty,Luis,M,2024-03-02,5,Great,,10,rico,positive,food,taste",
            "Llegó tarde,Arrived late,Ana,F,2024-03-01,3,Other,http://img/b.png,3,frío,negative,food,temperature",
        ]
        .join("\n")
    }

    #[tokio::test]
    async fn loads_and_groups_a_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, sample_csv()).unwrap();

        let records = load(&path).await.unwrap();
        assert_eq!(records.len(), 2);

        let ana = &records[0];
        assert_eq!(ana.name, "Ana");
        assert_eq!(ana.rate, "2");
        assert_eq!(ana.review_title, "Meh");
        assert_eq!(ana.image, "http://img/a.png");
        assert_eq!(
            ana.fragments,
            vec![
                Fragment {
                    text: "tarde".into(),
                    sentiment: "negative".into(),
                    category: "delivery".into(),
                    subcategory: "speed".into(),
                },
                Fragment {
                    text: "frío".into(),
                    sentiment: "negative".into(),
                    category: "food".into(),
                    subcategory: "temperature".into(),
                },
            ]
        );
        assert_eq!(records[1].name, "Luis");
        assert_eq!(records[1].fragments.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load(dir.path().join("absent.csv")).await.unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::NotFound);
        assert!(err.to_string().contains("absent.csv"));
    }

    #[tokio::test]
    async fn directory_is_not_a_table() {
        let dir = tempdir().unwrap();
        let err = load(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::UnexpectedError);
    }

    #[tokio::test]
    async fn empty_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        let err = load(&path).await.unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::ParseError);
    }

    #[tokio::test]
    async fn header_only_yields_no_records() {
        let records = load_from_reader(HEADER.as_bytes()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn reloading_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        fs::write(&path, sample_csv()).unwrap();

        let first = load(&path).await.unwrap();
        let second = load(&path).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn missing_optional_column_reads_empty() {
        let input = "review,name,rate,subcategory_fragment\nA,X,4,slow\nB,Y,5,\n";
        let records = load_from_reader(input.as_bytes()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.image.is_empty()));
        assert!(records.iter().all(|r| r.date.is_empty()));
        assert_eq!(records[0].fragments[0].text, "slow");
        assert_eq!(records[0].fragments[0].sentiment, "");
    }

    #[tokio::test]
    async fn missing_fragment_columns_yield_no_fragments() {
        let input = "review,name\nA,X\nA,X\nB,X\n";
        let records = load_from_reader(input.as_bytes()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.fragments.is_empty()));
    }
}
