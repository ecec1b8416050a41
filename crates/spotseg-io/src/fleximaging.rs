//! flexImaging spot lists
//!
//! A spot list is a whitespace-separated text export with two header lines
//! followed by one line per spot:
//!
//! ```text
//! # flexImaging spot list
//! # x-pos y-pos spot region
//! -3990 2110 R00X012Y034 0
//! -3970 2110 R00X013Y034 0
//! ```
//!
//! The `spot` column encodes the raster and the integer pixel coordinate as
//! `R<raster>X<x>Y<y>`. Lines carry no spot id; they are matched to the
//! dataset's spots by position.

use crate::error::{IoError, IoResult};
use log::debug;
use spotseg_core::{PlacedSpot, RasterId, SpotId, SpotTable};
use std::io::{BufReader, Read};
use std::path::Path;

/// Number of header lines before the first entry
pub const HEADER_LINES: usize = 2;

/// Maximum input size in bytes to prevent unbounded memory growth.
const MAX_INPUT_SIZE: u64 = 1_000_000_000;

/// One spot list line
#[derive(Debug, Clone, PartialEq)]
pub struct SpotListEntry {
    /// Stage x position
    pub x_pos: f64,
    /// Stage y position
    pub y_pos: f64,
    /// Raster decoded from the spot name
    pub raster: RasterId,
    /// Pixel column decoded from the spot name
    pub x: u32,
    /// Pixel row decoded from the spot name
    pub y: u32,
    /// Region column, if present
    pub region: Option<String>,
}

/// Decode a spot name of the form `R<raster>X<x>Y<y>`
///
/// `line` is only used for error reporting.
pub fn parse_spot_name(name: &str, line: usize) -> IoResult<(RasterId, u32, u32)> {
    let malformed = || IoError::format(line, format!("malformed spot name '{name}'"));

    let rest = name.strip_prefix('R').ok_or_else(malformed)?;
    let (raster, rest) = rest.split_once('X').ok_or_else(malformed)?;
    let (x, y) = rest.split_once('Y').ok_or_else(malformed)?;

    let raster = raster.parse::<RasterId>().map_err(|_| malformed())?;
    let x = x.parse::<u32>().map_err(|_| malformed())?;
    let y = y.parse::<u32>().map_err(|_| malformed())?;
    Ok((raster, x, y))
}

/// A parsed spot list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotList {
    entries: Vec<SpotListEntry>,
}

impl SpotList {
    /// Read a spot list from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> IoResult<Self> {
        let mut buf = String::new();
        reader.take(MAX_INPUT_SIZE).read_to_string(&mut buf)?;
        Self::read_from_str(&buf)
    }

    /// Read a spot list from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> IoResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let list = Self::read_from_reader(&mut BufReader::new(file))?;
        debug!(
            "read {} spot list entries from {}",
            list.len(),
            path.as_ref().display()
        );
        Ok(list)
    }

    /// Parse spot list text.
    pub fn read_from_str(text: &str) -> IoResult<Self> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate().skip(HEADER_LINES) {
            let line = idx + 1;
            let fields: Vec<&str> = raw.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 3 {
                return Err(IoError::format(
                    line,
                    format!("expected 'x-pos y-pos spot [region]', got '{}'", raw.trim()),
                ));
            }
            let x_pos = parse_position(fields[0], line)?;
            let y_pos = parse_position(fields[1], line)?;
            let (raster, x, y) = parse_spot_name(fields[2], line)?;
            entries.push(SpotListEntry {
                x_pos,
                y_pos,
                raster,
                x,
                y,
                region: fields.get(3).map(|s| s.to_string()),
            });
        }
        Ok(Self { entries })
    }

    /// Parsed entries in file order
    pub fn entries(&self) -> &[SpotListEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pair entries with `spot_ids` by position and build a spot table
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Format`] if the entry count differs from the
    /// number of spots; the line number is the first line without a
    /// counterpart.
    pub fn to_spot_table(&self, spot_ids: &[SpotId]) -> IoResult<SpotTable> {
        if self.entries.len() != spot_ids.len() {
            let paired = self.entries.len().min(spot_ids.len());
            return Err(IoError::format(
                HEADER_LINES + paired + 1,
                format!(
                    "spot list has {} entries but the dataset has {} spots",
                    self.entries.len(),
                    spot_ids.len()
                ),
            ));
        }
        let rows = spot_ids
            .iter()
            .zip(&self.entries)
            .map(|(&id, e)| PlacedSpot::new(id, e.raster, e.x, e.y))
            .collect();
        Ok(SpotTable::from_rows(rows)?)
    }
}

fn parse_position(field: &str, line: usize) -> IoResult<f64> {
    field
        .parse::<f64>()
        .map_err(|_| IoError::format(line, format!("invalid position '{field}'")))
}
