//! Edge-list input
//!
//! One edge per line, `start end weight`, separated by whitespace. A line
//! holding only `*` ends the list; lines after it are not read. Blank lines
//! are skipped. The same format is used for interactive input and files.

use crate::graph::Edge;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line that terminates an edge list
pub const SENTINEL: &str = "*";

/// Errors produced while reading an edge list
///
/// Line numbers are 1-based.
#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("failed to read edge list: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected `start end weight`, found {found} field(s)")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: `{token}` is not a valid integer")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: edge weight {weight} is negative")]
    NegativeWeight { line: usize, weight: i64 },

    #[error("edge list ended without the `*` terminator line")]
    MissingSentinel,
}

/// Reads edges from `reader` up to the sentinel line
pub fn parse_edges<R: BufRead>(reader: R) -> Result<Vec<Edge<u64>>, InputError> {
    let mut edges = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed == SENTINEL {
            log::debug!("read {} edge(s)", edges.len());
            return Ok(edges);
        }
        if trimmed.is_empty() {
            continue;
        }
        edges.push(parse_edge(index + 1, trimmed)?);
    }

    Err(InputError::MissingSentinel)
}

/// Reads edges from the file at `path`
pub fn load_edges(path: impl AsRef<Path>) -> Result<Vec<Edge<u64>>, InputError> {
    let file = File::open(path.as_ref())?;
    log::debug!("loading edges from {}", path.as_ref().display());
    parse_edges(BufReader::new(file))
}

fn parse_edge(line: usize, text: &str) -> Result<Edge<u64>, InputError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [start, end, weight] = fields[..] else {
        return Err(InputError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let start = parse_number::<usize>(line, start)?;
    let end = parse_number::<usize>(line, end)?;
    let weight = parse_number::<i64>(line, weight)?;
    let weight = u64::try_from(weight).map_err(|_| InputError::NegativeWeight { line, weight })?;

    Ok(Edge::new(start, end, weight))
}

fn parse_number<N: std::str::FromStr>(line: usize, token: &str) -> Result<N, InputError> {
    token.parse().map_err(|_| InputError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}
