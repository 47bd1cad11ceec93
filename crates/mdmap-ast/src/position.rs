/*
 * position.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde::{Deserialize, Serialize};

/// A single place in the source file.
///
/// `line` and `column` are 1-indexed, `offset` is a 0-indexed byte offset
/// and is optional because not every producer records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl Point {
    pub fn new(line: usize, column: usize, offset: Option<usize>) -> Self {
        Point {
            line,
            column,
            offset,
        }
    }
}

/// Source span of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    pub fn new(start: Point, end: Point) -> Self {
        Position { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_unist_position() {
        let json = r#"{"start":{"line":2,"column":1,"offset":10},"end":{"line":6,"column":4,"offset":80}}"#;
        let pos: Position = serde_json::from_str(json).unwrap();
        assert_eq!(
            pos,
            Position::new(Point::new(2, 1, Some(10)), Point::new(6, 4, Some(80)))
        );
    }

    #[test]
    fn test_offset_omitted_when_absent() {
        let json = serde_json::to_string(&Point::new(1, 1, None)).unwrap();
        assert_eq!(json, r#"{"line":1,"column":1}"#);
    }
}
