//! Table extraction from an article's content region
//!
//! Tables are selected by 1-based document-order index and flattened into a
//! rectangular grid of text cells. The first column is promoted to row
//! labels, mirroring the wiki convention of leading label columns; an
//! optional header row is promoted to column labels. Ragged rows are padded
//! with empty strings rather than a null marker, and cell text is kept raw.

use std::fmt;
use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};

use super::error::ExtractError;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("table selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("row selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("cell selector"));

/// A table extracted from an article: ordered rows of text cells, with the
/// first column promoted to row labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column labels taken from the promoted header row, if one was requested.
    pub column_labels: Option<Vec<String>>,
    /// Data rows, in document order. Never empty.
    pub rows: Vec<TableRow>,
}

/// One data row: the promoted label cell plus the remaining cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Value of the row's first cell, serving as its label.
    pub label: String,
    /// The remaining cells, padded to the table's width.
    pub cells: Vec<String>,
}

impl Table {
    /// Number of data columns (excluding the label column).
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, |row| row.cells.len())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.column_count();

        let mut label_width = self.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        if let Some(labels) = &self.column_labels {
            for (i, label) in labels.iter().enumerate() {
                widths[i] = label.chars().count();
            }
        }
        for row in &self.rows {
            for (i, cell) in row.cells.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        if let Some(labels) = &self.column_labels {
            label_width = label_width.max(1);
            write!(f, "{:label_width$}", "")?;
            for (i, label) in labels.iter().enumerate() {
                write!(f, "  {:>width$}", label, width = widths[i])?;
            }
            writeln!(f)?;
        }

        for row in &self.rows {
            write!(f, "{:label_width$}", row.label)?;
            for (i, cell) in row.cells.iter().enumerate() {
                write!(f, "  {:>width$}", cell, width = widths[i])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Whether `element`'s nearest enclosing `ancestor_tag` element is `owner`.
/// Keeps rows of nested tables from leaking into the table that contains
/// them, and cells of nested rows likewise.
fn owned_by(element: ElementRef<'_>, ancestor_tag: &str, owner: ElementRef<'_>) -> bool {
    for node in element.ancestors() {
        if let Some(ancestor) = ElementRef::wrap(node) {
            if ancestor.value().name() == ancestor_tag {
                return ancestor.id() == owner.id();
            }
        }
    }
    false
}

/// Whitespace-normalized text of one cell.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the `index`-th table (1-based) from the content region.
pub(super) fn extract(
    region: ElementRef<'_>,
    title: &str,
    index: usize,
    first_row_is_header: bool,
) -> Result<Table, ExtractError> {
    let tables: Vec<ElementRef<'_>> = region.select(&TABLE).collect();

    if tables.is_empty() {
        return Err(ExtractError::NoTables {
            title: title.to_string(),
        });
    }
    if index == 0 || index > tables.len() {
        return Err(ExtractError::TableIndexOutOfBounds {
            title: title.to_string(),
            index,
            count: tables.len(),
        });
    }

    let selected = tables[index - 1];

    let mut grid: Vec<Vec<String>> = Vec::new();
    for row in selected.select(&ROW) {
        if !owned_by(row, "table", selected) {
            continue;
        }
        let cells: Vec<String> = row
            .select(&CELL)
            .filter(|cell| owned_by(*cell, "tr", row))
            .map(cell_text)
            .collect();
        grid.push(cells);
    }

    if grid.is_empty() {
        return Err(ExtractError::MalformedTable {
            title: title.to_string(),
            reason: "table has no rows".to_string(),
        });
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Err(ExtractError::MalformedTable {
            title: title.to_string(),
            reason: "table rows have no cells".to_string(),
        });
    }
    for row in &mut grid {
        row.resize(width, String::new());
    }

    let column_labels = if first_row_is_header {
        let mut header = grid.remove(0);
        // The corner cell sits above the label column, not above data.
        header.remove(0);
        Some(header)
    } else {
        None
    };

    let rows: Vec<TableRow> = grid
        .into_iter()
        .map(|mut cells| {
            let label = cells.remove(0);
            TableRow { label, cells }
        })
        .collect();

    if rows.is_empty() {
        return Err(ExtractError::EmptyTable {
            title: title.to_string(),
            index,
        });
    }

    Ok(Table {
        column_labels,
        rows,
    })
}
