//! Reader for the augmented coda table.
//!
//! Columns are located by header name so that extra columns and any column
//! order are accepted. Cells stay text here; numeric parsing happens per
//! recording so that one bad row only fails its own recording.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::coda::RawRow;
use crate::error::{Result, TranscriptError};

const ORNAMENT_HEADERS: [&str; 2] = ["Extra Click", "Ornament"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    recording_id: usize,
    duration: usize,
    icis: Vec<usize>,
    ornament: usize,
    rhythm: usize,
    actor: usize,
    start_time: usize,
}

/// Splits a line on commas outside double quotes, so `"sw061b,001"` stays one cell.
/// Surrounding whitespace and quotes are stripped. Escaped quotes (`""`) are not supported.
fn split_cells(line: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    cells.push(&line[start..]);
    cells
        .into_iter()
        .map(|cell| cell.trim().trim_matches('"'))
        .collect()
}

impl TableLayout {
    pub fn from_header(header: &str) -> Result<Self> {
        let names = split_cells(header);
        let find = |name: &str| {
            names
                .iter()
                .position(|&n| n == name)
                .ok_or_else(|| TranscriptError::MissingColumn(name.to_string()))
        };

        let mut icis: Vec<(u32, usize)> = names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let number = name.strip_prefix("ICI")?.parse::<u32>().ok()?;
                Some((number, i))
            })
            .collect();
        icis.sort_unstable();

        let ornament = ORNAMENT_HEADERS
            .iter()
            .find_map(|name| find(*name).ok())
            .ok_or_else(|| TranscriptError::MissingColumn(ORNAMENT_HEADERS.join(" | ")))?;

        Ok(Self {
            recording_id: find("REC")?,
            duration: find("Duration")?,
            icis: icis.into_iter().map(|(_, i)| i).collect(),
            ornament,
            rhythm: find("Rhythm")?,
            actor: find("Whale")?,
            start_time: find("TsTo")?,
        })
    }

    /// Missing trailing cells read as empty and fail later as malformed.
    pub fn row(&self, row: usize, line: &str) -> RawRow {
        let cells = split_cells(line);
        let cell = |i: usize| cells.get(i).copied().unwrap_or_default().to_string();
        RawRow {
            row,
            recording_id: cell(self.recording_id),
            duration: cell(self.duration),
            icis: self.icis.iter().map(|&i| cell(i)).collect(),
            ornament: cell(self.ornament),
            rhythm: cell(self.rhythm),
            actor: cell(self.actor),
            start_time: cell(self.start_time),
        }
    }
}

pub fn parse_table(text: &str) -> Result<Vec<RawRow>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header = lines
        .next()
        .ok_or_else(|| TranscriptError::MissingColumn("REC".to_string()))?;
    let layout = TableLayout::from_header(header)?;
    let rows: Vec<RawRow> = lines
        .enumerate()
        .map(|(i, line)| layout.row(i + 1, line))
        .collect();
    debug!(rows = rows.len(), icis = layout.icis.len(), "table parsed");
    Ok(rows)
}

pub fn load_table(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading table {}", path.display()))?;
    let rows = parse_table(&text).with_context(|| format!("parsing header of {}", path.display()))?;
    Ok(rows)
}
