//! Status file parsing
//!
//! `pool.status` is three independent JSON objects, one per line. The parser
//! hides that layout behind a single merged [`PoolStats`].

use crate::domain::stats::{PoolStatusLine1, PoolStatusLine2, PoolStatusLine3, PoolStats, UserStats};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Number of lines a pool status artifact must contain
pub const POOL_STATUS_LINES: usize = 3;

/// Status artifact decoding errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("pool.status has {found} line(s), expected at least {POOL_STATUS_LINES}")]
    TooFewLines { found: usize },

    #[error("failed to decode pool.status line {line}: {reason}")]
    PoolLine { line: usize, reason: String },

    #[error("failed to decode user status: {0}")]
    User(String),
}

/// Parse a raw `pool.status` artifact into merged pool statistics
pub fn parse_pool_status(raw: &[u8]) -> Result<PoolStats, ParseError> {
    let lines: Vec<&[u8]> = raw.split(|b| *b == b'\n').collect();
    if lines.len() < POOL_STATUS_LINES {
        return Err(ParseError::TooFewLines { found: lines.len() });
    }

    let l1: PoolStatusLine1 = decode_line(lines[0], 1)?;
    let l2: PoolStatusLine2 = decode_line(lines[1], 2)?;
    let l3: PoolStatusLine3 = decode_line(lines[2], 3)?;

    Ok(PoolStats::from_lines(l1, l2, l3))
}

/// Parse a raw per-user artifact
pub fn parse_user_status(raw: &[u8]) -> Result<UserStats, ParseError> {
    serde_json::from_slice(raw).map_err(|e| ParseError::User(e.to_string()))
}

fn decode_line<T: DeserializeOwned>(line: &[u8], number: usize) -> Result<T, ParseError> {
    serde_json::from_slice(line).map_err(|e| ParseError::PoolLine {
        line: number,
        reason: e.to_string(),
    })
}
