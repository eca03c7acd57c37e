//! Plain-text level descriptions
//!
//! A level is one row of symbols per line, every row the same width:
//!
//! | symbol | meaning |
//! |--------|---------|
//! | `.`    | open floor |
//! | `X`    | blocking wall |
//! | `D`    | door (blocking until unlocked) |
//! | `1`-`4`| numbered player spawn point (floor underneath) |
//! | `P`    | powerup spawn point (floor underneath) |
//!
//! Parsing is strict: ragged rows and unknown symbols are fatal, reported
//! with their position rather than silently truncated.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

/// One grid symbol from a level description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Floor,
    Wall,
    Door,
    /// Numbered player spawn, 1-4
    Spawn(u8),
    PowerupSpot,
}

impl Symbol {
    /// Whether this symbol reads as solid to the autotile classifier.
    pub fn is_blocking(self) -> bool {
        matches!(self, Symbol::Wall | Symbol::Door)
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Symbol::Floor),
            'X' => Some(Symbol::Wall),
            'D' => Some(Symbol::Door),
            '1'..='4' => Some(Symbol::Spawn(ch as u8 - b'0')),
            'P' => Some(Symbol::PowerupSpot),
            _ => None,
        }
    }
}

/// Errors raised while reading a level description.
#[derive(Error, Debug)]
pub enum LevelError {
    /// Underlying I/O failure, propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The description contained no rows at all.
    #[error("level has no rows")]
    Empty,

    /// A row's width disagreed with the first row's.
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character outside the level alphabet.
    #[error("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
}

/// A parsed symbol grid. This is the raw input to both room construction
/// and autotile classification; it never changes after parsing.
#[derive(Debug, Clone)]
pub struct LevelMap {
    width: usize,
    height: usize,
    rows: Vec<Vec<Symbol>>,
}

impl LevelMap {
    /// Parse a level description from text.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut rows: Vec<Vec<Symbol>> = Vec::new();
        let mut width = 0;

        for (row_idx, line) in text.lines().enumerate() {
            let line = line.trim_end();
            let mut row = Vec::with_capacity(width);
            for (col, ch) in line.chars().enumerate() {
                let symbol = Symbol::from_char(ch).ok_or(LevelError::UnknownSymbol {
                    symbol: ch,
                    row: row_idx,
                    col,
                })?;
                row.push(symbol);
            }
            if row_idx == 0 {
                width = row.len();
            } else if row.len() != width {
                return Err(LevelError::RaggedRow {
                    row: row_idx,
                    expected: width,
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        if rows.is_empty() || width == 0 {
            return Err(LevelError::Empty);
        }

        Ok(Self {
            width,
            height: rows.len(),
            rows,
        })
    }

    /// Parse a level description from a file on disk.
    pub fn from_file(path: &Path) -> Result<Self, LevelError> {
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Symbol at a cell, or `None` outside the grid.
    pub fn symbol(&self, cx: i32, cy: i32) -> Option<Symbol> {
        if cx < 0 || cy < 0 || cx >= self.width as i32 || cy >= self.height as i32 {
            return None;
        }
        Some(self.rows[cy as usize][cx as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_symbol() {
        let map = LevelMap::parse("XD.\n1P4\n").unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.symbol(0, 0), Some(Symbol::Wall));
        assert_eq!(map.symbol(1, 0), Some(Symbol::Door));
        assert_eq!(map.symbol(2, 0), Some(Symbol::Floor));
        assert_eq!(map.symbol(0, 1), Some(Symbol::Spawn(1)));
        assert_eq!(map.symbol(1, 1), Some(Symbol::PowerupSpot));
        assert_eq!(map.symbol(2, 1), Some(Symbol::Spawn(4)));
    }

    #[test]
    fn out_of_range_is_none() {
        let map = LevelMap::parse("XX\nXX\n").unwrap();
        assert_eq!(map.symbol(-1, 0), None);
        assert_eq!(map.symbol(0, -1), None);
        assert_eq!(map.symbol(2, 0), None);
        assert_eq!(map.symbol(0, 2), None);
    }

    #[test]
    fn ragged_rows_are_fatal() {
        let err = LevelMap::parse("XXX\nXX\n").unwrap_err();
        match err {
            LevelError::RaggedRow {
                row,
                expected,
                found,
            } => {
                assert_eq!((row, expected, found), (1, 3, 2));
            }
            other => panic!("expected RaggedRow, got {other:?}"),
        }
    }

    #[test]
    fn unknown_symbols_are_fatal() {
        let err = LevelMap::parse("X?X\n").unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownSymbol {
                symbol: '?',
                row: 0,
                col: 1
            }
        ));
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(matches!(LevelMap::parse(""), Err(LevelError::Empty)));
        assert!(matches!(LevelMap::parse("\n\n"), Err(LevelError::Empty)));
    }

    #[test]
    fn doors_count_as_blocking_symbols() {
        assert!(Symbol::Door.is_blocking());
        assert!(Symbol::Wall.is_blocking());
        assert!(!Symbol::Floor.is_blocking());
        assert!(!Symbol::Spawn(2).is_blocking());
        assert!(!Symbol::PowerupSpot.is_blocking());
    }
}
