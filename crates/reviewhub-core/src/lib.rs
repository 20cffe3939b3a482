//! Core domain types and error definitions for reviewhub.
//!
//! This crate provides the types shared between the loader and the server:
//!
//! - [`Column`] — The fixed set of source columns the loader understands
//! - [`RawRow`] — One annotated fragment row read from the source table
//! - [`ReviewRecord`] and [`Fragment`] — The aggregated output unit
//! - [`LoadError`], [`LoadErrorKind`] and [`StartupError`] — Load failures
//!
//! # Example
//!
//! ```rust
//! use reviewhub_core::{Fragment, ReviewRecord};
//!
//! let record = ReviewRecord {
//!     review: "Llegó tarde".to_string(),
//!     name: "Ana".to_string(),
//!     fragments: vec![Fragment {
//!         text: "tarde".to_string(),
//!         sentiment: "negative".to_string(),
//!         category: "delivery".to_string(),
//!         subcategory: "speed".to_string(),
//!     }],
//!     ..Default::default()
//! };
//! assert_eq!(record.fragments.len(), 1);
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Columns
// ─────────────────────────────────────────────────────────────────────────────

/// A column of the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Review,
    TranslatedReview,
    Name,
    Sex,
    Date,
    Rate,
    ReviewTitle,
    Image,
    NumReviewsUsuario,
    SubcategoryFragment,
    SubcategorySentiment,
    Category,
    Subcategory,
}

impl Column {
    /// Number of known columns.
    pub const COUNT: usize = 13;

    /// Every known column, in source-table order.
    pub const ALL: [Column; Column::COUNT] = [
        Column::Review,
        Column::TranslatedReview,
        Column::Name,
        Column::Sex,
        Column::Date,
        Column::Rate,
        Column::ReviewTitle,
        Column::Image,
        Column::NumReviewsUsuario,
        Column::SubcategoryFragment,
        Column::SubcategorySentiment,
        Column::Category,
        Column::Subcategory,
    ];

    /// Columns that decide whether two rows describe the same review, in key order.
    ///
    /// Rating, title, image and reviewer review count are left out: they can
    /// differ between rows of one review and would split it into duplicates.
    pub const IDENTITY: [Column; 5] = [
        Column::Review,
        Column::TranslatedReview,
        Column::Name,
        Column::Sex,
        Column::Date,
    ];

    /// Header name as it appears in the source file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Review => "review",
            Column::TranslatedReview => "translated_review",
            Column::Name => "name",
            Column::Sex => "sex",
            Column::Date => "date",
            Column::Rate => "rate",
            Column::ReviewTitle => "review_title",
            Column::Image => "image",
            Column::NumReviewsUsuario => "num_reviews_usuario",
            Column::SubcategoryFragment => "subcategory_fragment",
            Column::SubcategorySentiment => "subcategory_sentiment",
            Column::Category => "category",
            Column::Subcategory => "subcategory",
        }
    }

    /// Looks up a column by its header name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Position of this column in [`Column::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rows and records
// ─────────────────────────────────────────────────────────────────────────────

/// One row of the source table: a single annotated fragment of a review.
///
/// Absent or unreadable cells are stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    values: [String; Column::COUNT],
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `column`, empty if it was never set.
    pub fn get(&self, column: Column) -> &str {
        &self.values[column.index()]
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.values[column.index()] = value.into();
    }

    /// Builder-style [`RawRow::set`].
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }
}

/// A sentiment-annotated snippet of a review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub sentiment: String,
    pub category: String,
    pub subcategory: String,
}

/// One unique review with its fragments collapsed into a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    pub review: String,
    pub translated_review: String,
    pub name: String,
    pub sex: String,
    pub date: String,
    pub rate: String,
    pub review_title: String,
    pub image: String,
    pub num_reviews_usuario: String,
    pub fragments: Vec<Fragment>,
}

impl ReviewRecord {
    /// Builds a record whose identity and metadata come from `row`, with no fragments.
    pub fn from_first_row(row: &RawRow) -> Self {
        Self {
            review: row.get(Column::Review).to_string(),
            translated_review: row.get(Column::TranslatedReview).to_string(),
            name: row.get(Column::Name).to_string(),
            sex: row.get(Column::Sex).to_string(),
            date: row.get(Column::Date).to_string(),
            rate: row.get(Column::Rate).to_string(),
            review_title: row.get(Column::ReviewTitle).to_string(),
            image: row.get(Column::Image).to_string(),
            num_reviews_usuario: row.get(Column::NumReviewsUsuario).to_string(),
            fragments: Vec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur while loading and aggregating the review table.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Something the loader needs before it can read data is unavailable.
    #[error("Data source unavailable: {0}")]
    DependencyMissing(String),

    /// The source file does not exist.
    #[error("Data file not found at {0}")]
    NotFound(String),

    /// The source is not a readable table.
    #[error("Failed to parse data file: {0}")]
    ParseError(String),

    /// Any other failure during the transform.
    #[error("Error loading data: {0}")]
    UnexpectedError(String),
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::DependencyMissing(_) => LoadErrorKind::DependencyMissing,
            LoadError::NotFound(_) => LoadErrorKind::NotFound,
            LoadError::ParseError(_) => LoadErrorKind::ParseError,
            LoadError::UnexpectedError(_) => LoadErrorKind::UnexpectedError,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::UnexpectedError(err.to_string())
    }
}

/// Discriminant of a [`LoadError`], kept after the error itself is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    DependencyMissing,
    NotFound,
    ParseError,
    UnexpectedError,
}

/// A recorded, non-fatal startup failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupError {
    pub kind: LoadErrorKind,
    pub message: String,
}

impl From<LoadError> for StartupError {
    fn from(err: LoadError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_name(column.name()), Some(column));
        }
        assert_eq!(Column::from_name("Review"), None);
        assert_eq!(Column::from_name("stars"), None);
    }

    #[test]
    fn column_index_matches_all_order() {
        for (i, column) in Column::ALL.into_iter().enumerate() {
            assert_eq!(column.index(), i);
        }
        assert_eq!(Column::Subcategory.index() + 1, Column::COUNT);
    }

    #[test]
    fn column_displays_as_header_name() {
        assert_eq!(Column::NumReviewsUsuario.to_string(), "num_reviews_usuario");
        assert_eq!(format!("{}", Column::Review), "review");
    }

    #[test]
    fn unset_cells_read_empty() {
        let row = RawRow::new().with(Column::Review, "A");
        assert_eq!(row.get(Column::Review), "A");
        assert_eq!(row.get(Column::Image), "");
    }

    #[test]
    fn record_serializes_in_wire_field_order() {
        let record = ReviewRecord {
            review: "A".into(),
            fragments: vec![Fragment {
                text: "slow".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"review":"A","translated_review":"","name":"","sex":"","date":"","rate":"","review_title":"","image":"","num_reviews_usuario":"","fragments":[{"text":"slow","sentiment":"","category":"","subcategory":""}]}"#
        );
    }

    #[test]
    fn startup_error_keeps_kind_and_message() {
        let err: StartupError = LoadError::NotFound("/srv/data.csv".into()).into();
        assert_eq!(err.kind, LoadErrorKind::NotFound);
        assert_eq!(err.message, "Data file not found at /srv/data.csv");
        assert_eq!(
            serde_json::to_value(err.kind).unwrap(),
            serde_json::json!("not_found")
        );
    }
}
