//! CSV roster loading for HXC Stats.
//!
//! Reads a GNK-HXC roster export (comma delimited, `|` as the quote
//! character) and converts every data row into a [`CharacterRecord`].

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use hxc_core::error::{Result, StatsError};
use hxc_core::models::{CharacterRecord, Column, RecordStore};
use tracing::debug;

/// Field delimiter used by roster exports.
pub const DELIMITER: u8 = b',';
/// Quote character used by roster exports for fields containing commas.
pub const QUOTE: u8 = b'|';

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the roster at `path`.
///
/// The first row is the header row. Every required column must be present
/// and every data row must have exactly as many fields as the header.
pub fn load_records(path: &Path) -> Result<RecordStore> {
    let file = std::fs::File::open(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let store = parse_records(file)?;

    debug!("Loaded {} records from {}", store.len(), path.display());

    Ok(store)
}

/// Parse a roster from any reader. See [`load_records`].
pub fn parse_records<R: Read>(reader: R) -> Result<RecordStore> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .quote(QUOTE)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let layout = ColumnLayout::resolve(&headers)?;
    debug!("Roster columns: {:?}", headers);

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        records.push(layout.build(&row)?);
    }

    Ok(RecordStore { headers, records })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required columns within the header row.
struct ColumnLayout {
    width: usize,
    player: usize,
    class: usize,
    level: usize,
    cause_of_death: usize,
}

impl ColumnLayout {
    fn resolve(headers: &[String]) -> Result<Self> {
        let position = |column: Column| {
            headers
                .iter()
                .position(|h| h == column.header())
                .ok_or_else(|| StatsError::MissingColumn(column.header().to_string()))
        };

        Ok(Self {
            width: headers.len(),
            player: position(Column::Player)?,
            class: position(Column::Class)?,
            level: position(Column::Level)?,
            cause_of_death: position(Column::CauseOfDeath)?,
        })
    }

    /// Build one record from a data row, validating width and level.
    fn build(&self, row: &StringRecord) -> Result<CharacterRecord> {
        let line = row.position().map(|p| p.line()).unwrap_or_default();

        if row.len() != self.width {
            return Err(StatsError::RowLength {
                line,
                expected: self.width,
                found: row.len(),
            });
        }

        // Width was checked above, so every index is in range.
        let cell = |index: usize| row.get(index).unwrap_or_default();

        let raw_level = cell(self.level);
        let level = raw_level
            .trim()
            .parse::<i64>()
            .map_err(|_| StatsError::InvalidLevel {
                line,
                value: raw_level.to_string(),
            })?;

        let cause = cell(self.cause_of_death);

        Ok(CharacterRecord {
            player: cell(self.player).to_string(),
            class: cell(self.class).to_string(),
            level,
            cause_of_death: (!cause.is_empty()).then(|| cause.to_string()),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
