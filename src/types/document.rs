//! Flat schedule document, as handed over by JavaScript or read from JSON.
//!
//! Blocks live in a single list and name their column by id. Converting to a
//! [`Grid`] groups them per column, keeping document order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::grid::{default_true, Block, Column, Grid};
use crate::error::{Result, ScheduleError};

/// Column header entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnEntry {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Block entry; `row`/`height` are the start row and span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub main: String,
    pub row: u32,
    pub column_id: String,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl From<BlockEntry> for Block {
    fn from(entry: BlockEntry) -> Self {
        Block {
            start_row: entry.row,
            span: entry.height,
            label: entry.label,
            main: entry.main,
            link: entry.link,
            enabled: entry.enabled,
            visible: entry.visible,
        }
    }
}

/// The complete widget input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    #[serde(default)]
    pub row_labels: Vec<String>,
    #[serde(default)]
    pub columns: Vec<ColumnEntry>,
    #[serde(default)]
    pub blocks: Vec<BlockEntry>,
}

impl ScheduleDocument {
    /// # Errors
    /// Returns `Json` if the text is not a valid document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a document from a JSON file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read and `Json` if its contents are
    /// not a valid document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Group blocks into their columns.
    ///
    /// Blocks naming an unknown column are dropped with a warning.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` for duplicate column ids. Spans are not
    /// checked here; run [`Grid::validate`] on the result.
    pub fn into_grid(self) -> Result<Grid> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.columns.len());
        let mut index_by_id: HashMap<String, usize> = HashMap::with_capacity(self.columns.len());

        for entry in self.columns {
            if index_by_id.contains_key(&entry.id) {
                return Err(ScheduleError::InvalidConfiguration(format!(
                    "duplicate column id '{}'",
                    entry.id
                )));
            }
            index_by_id.insert(entry.id.clone(), columns.len());
            columns.push(Column {
                id: entry.id,
                label: entry.label,
                link: entry.link,
                blocks: Vec::new(),
            });
        }

        for (position, entry) in self.blocks.into_iter().enumerate() {
            let column = index_by_id
                .get(&entry.column_id)
                .and_then(|&index| columns.get_mut(index));
            match column {
                Some(column) => column.push(Block::from(entry)),
                None => log::warn!(
                    "block {position} names unknown column '{}'; skipping it",
                    entry.column_id
                ),
            }
        }

        Ok(Grid {
            row_labels: self.row_labels,
            columns,
        })
    }
}

impl TryFrom<ScheduleDocument> for Grid {
    type Error = ScheduleError;

    fn try_from(document: ScheduleDocument) -> Result<Self> {
        document.into_grid()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "rowLabels": ["9", "10", "11", "12"],
        "columns": [
            {"id": "hall", "label": "Main hall", "link": "/hall"},
            {"id": "room", "label": "Room 2"}
        ],
        "blocks": [
            {"label": "Keynote", "main": "Opening", "row": 0, "columnId": "hall", "height": 2},
            {"main": "Workshop", "row": 1, "columnId": "room", "height": 3, "enabled": false},
            {"main": "Lost", "row": 0, "columnId": "nowhere", "height": 1},
            {"main": "Q&A", "row": 1, "columnId": "hall", "height": 1, "visible": false}
        ]
    }"#;

    #[test]
    fn test_groups_blocks_by_column_in_order() {
        let grid = ScheduleDocument::from_json(DOC).unwrap().into_grid().unwrap();
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.columns.len(), 2);

        let hall = &grid.columns[0];
        assert_eq!(hall.id, "hall");
        assert_eq!(hall.link.as_deref(), Some("/hall"));
        assert_eq!(hall.blocks.len(), 2);
        assert_eq!(hall.blocks[0].label, "Keynote");
        assert_eq!(hall.blocks[0].span, 2);
        assert_eq!(hall.blocks[1].main, "Q&A");
        assert!(!hall.blocks[1].visible);

        let room = &grid.columns[1];
        assert_eq!(room.blocks.len(), 1);
        assert!(!room.blocks[0].enabled);
        assert_eq!(room.blocks[0].start_row, 1);
    }

    #[test]
    fn test_block_entry_flags_default_to_true() {
        let entry: BlockEntry =
            serde_json::from_str(r#"{"row": 2, "columnId": "hall", "height": 1}"#).unwrap();
        assert!(entry.enabled);
        assert!(entry.visible);

        let block = Block::from(entry);
        assert_eq!(block, Block::new(2, 1));
    }

    #[test]
    fn test_unknown_column_is_skipped() {
        let grid = Grid::try_from(ScheduleDocument::from_json(DOC).unwrap()).unwrap();
        let total: usize = grid.columns.iter().map(|c| c.blocks.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let doc = r#"{"columns": [{"id": "a"}, {"id": "a"}]}"#;
        let err = ScheduleDocument::from_json(doc)
            .unwrap()
            .into_grid()
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = ScheduleDocument::from_json(r#"{"blocks": [{"row": -1}]}"#).unwrap_err();
        assert!(matches!(err, ScheduleError::Json(_)));
    }
}
