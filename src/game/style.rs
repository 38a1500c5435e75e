//! Visual style table.
//!
//! Maps (cell kind, activity) to the style the rendering layer draws with.
//! Built once from the style source and read-only afterwards.

use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::game::error::GridError;
use crate::game::types::{ActivityType, CellKind};

/// How a cell is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualStyle {
    /// RGBA fill colour.
    pub color: [u8; 4],
    /// Character used by the text renderer.
    pub glyph: char,
    #[serde(default)]
    pub outline: bool,
}

/// One row of the external style source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRow {
    pub kind: CellKind,
    pub activity: ActivityType,
    pub style: VisualStyle,
}

#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    styles: HashMap<CellKind, HashMap<ActivityType, VisualStyle>>,
}

impl StyleTable {
    /// Builds the table. Later rows override earlier rows for the same key.
    pub fn from_rows(rows: Vec<StyleRow>) -> Result<Self, GridError> {
        if rows.is_empty() {
            return Err(GridError::EmptyStyleTable);
        }

        let row_count = rows.len();
        let mut styles: HashMap<CellKind, HashMap<ActivityType, VisualStyle>> = HashMap::new();
        for row in rows {
            styles
                .entry(row.kind)
                .or_default()
                .insert(row.activity, row.style);
        }
        info!(
            "[StyleTable] Loaded {} style rows for {} cell kinds",
            row_count,
            styles.len()
        );
        Ok(Self { styles })
    }

    /// A miss means "nothing special to draw", not an error.
    pub fn lookup(&self, kind: CellKind, activity: ActivityType) -> Option<&VisualStyle> {
        self.styles.get(&kind)?.get(&activity)
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
