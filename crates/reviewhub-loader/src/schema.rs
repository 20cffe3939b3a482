//! Intersection of the known column set with the columns a source actually has.

use reviewhub_core::{Column, RawRow};

/// Which known columns a source provides, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    positions: [Option<usize>; Column::COUNT],
    identity: Vec<Column>,
}

impl Schema {
    /// Resolves header names against [`Column::ALL`].
    ///
    /// Unknown headers are ignored. When a name repeats, its first occurrence wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions = [None; Column::COUNT];
        for (i, header) in headers.iter().enumerate() {
            if let Some(column) = Column::from_name(header.as_ref()) {
                positions[column.index()].get_or_insert(i);
            }
        }

        let identity = Column::IDENTITY
            .into_iter()
            .filter(|c| positions[c.index()].is_some())
            .collect();

        Self {
            positions,
            identity,
        }
    }

    /// Identity columns present in the source, in canonical key order.
    pub fn identity_columns(&self) -> &[Column] {
        &self.identity
    }

    pub fn is_present(&self, column: Column) -> bool {
        self.positions[column.index()].is_some()
    }

    /// Known columns the source lacks. They read as empty strings.
    pub fn missing_columns(&self) -> Vec<Column> {
        Column::ALL
            .into_iter()
            .filter(|c| !self.is_present(*c))
            .collect()
    }

    /// Projects one table row onto the known columns.
    pub fn project(&self, cells: &[String]) -> RawRow {
        let mut row = RawRow::new();
        for column in Column::ALL {
            if let Some(value) = self.positions[column.index()].and_then(|i| cells.get(i)) {
                row.set(column, value.as_str());
            }
        }
        row
    }

    /// Grouping key of `row`: its values for the present identity columns.
    pub fn key<'a>(&self, row: &'a RawRow) -> Vec<&'a str> {
        self.identity.iter().map(|c| row.get(*c)).collect()
    }
}
