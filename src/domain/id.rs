//! Hierarchical task identifiers
//!
//! ID Format: one or more dot-separated positive integers (e.g. `1`, `1.1`,
//! `1.1.2`). Each segment names a position under the parent formed by the
//! preceding segments, so `1.1.2` is the second child of `1.1`.
//!
//! Ordering is segment-wise numeric: `1.2 < 1.3 < 1.10`, and a parent always
//! sorts before its descendants. Iterating identifiers in order is therefore
//! a depth-first walk of the hierarchy in child order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Task ID cannot be empty")]
    Empty,

    #[error("Task ID part '{0}' must be a positive integer")]
    InvalidSegment(String),

    #[error("Task ID part '{0}' must be positive")]
    ZeroSegment(String),

    #[error("Task ID part '{0}' is too large (maximum 4294967295)")]
    SegmentTooLarge(String),
}

/// Task ID in the format `{n}.{n}...`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    segments: Vec<u32>,
}

impl TaskId {
    /// Creates an ID from raw segments; `None` if empty or any segment is zero
    pub fn from_segments(segments: Vec<u32>) -> Option<Self> {
        if segments.is_empty() || segments.contains(&0) {
            return None;
        }
        Some(Self { segments })
    }

    /// Returns the numeric segments (e.g., `[1, 1, 2]` for `1.1.2`)
    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    /// Returns the parent task ID, or None if this is a top-level task
    pub fn parent(&self) -> Option<TaskId> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(TaskId {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Returns every ancestor, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = TaskId> {
        std::iter::successors(self.parent(), TaskId::parent)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        let segments = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(IdError::InvalidSegment(part.to_string()));
                }
                match part.parse::<u32>() {
                    Ok(0) => Err(IdError::ZeroSegment(part.to_string())),
                    Ok(n) => Ok(n),
                    // all digits, so the only failure left is overflow
                    Err(_) => Err(IdError::SegmentTooLarge(part.to_string())),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TaskId {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        let parsed = id("1.1.2");
        assert_eq!(parsed.segments(), &[1, 1, 2]);
        assert_eq!(parsed.to_string(), "1.1.2");
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(id("  4.2 ").to_string(), "4.2");
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_eq!("".parse::<TaskId>(), Err(IdError::Empty));
        assert_eq!(
            "1..2".parse::<TaskId>(),
            Err(IdError::InvalidSegment(String::new()))
        );
        assert_eq!(
            "1.a".parse::<TaskId>(),
            Err(IdError::InvalidSegment("a".to_string()))
        );
        assert_eq!(
            "1.0".parse::<TaskId>(),
            Err(IdError::ZeroSegment("0".to_string()))
        );
        assert!("-1".parse::<TaskId>().is_err());
        assert!("+1".parse::<TaskId>().is_err());
        assert!("1.".parse::<TaskId>().is_err());
    }

    #[test]
    fn numeric_ordering() {
        let mut ids = vec![id("1.10"), id("1.2"), id("1.3"), id("1"), id("2")];
        ids.sort();
        let rendered: Vec<_> = ids.iter().map(|i| i.to_string()).collect();
        assert_eq!(rendered, vec!["1", "1.2", "1.3", "1.10", "2"]);
    }

    #[test]
    fn parent_and_ancestors() {
        let leaf = id("3.1.4");
        assert_eq!(leaf.parent(), Some(id("3.1")));
        assert_eq!(id("3").parent(), None);

        let ancestors: Vec<_> = leaf.ancestors().map(|a| a.to_string()).collect();
        assert_eq!(ancestors, vec!["3.1", "3"]);
    }

    #[test]
    fn from_segments_rejects_zero_and_empty() {
        assert!(TaskId::from_segments(vec![]).is_none());
        assert!(TaskId::from_segments(vec![1, 0]).is_none());
        assert_eq!(TaskId::from_segments(vec![1, 2]), Some(id("1.2")));
    }

    #[test]
    fn rejects_segments_beyond_u32() {
        assert_eq!(
            "1.4294967296".parse::<TaskId>(),
            Err(IdError::SegmentTooLarge("4294967296".to_string()))
        );
        assert_eq!(id("4294967295").segments(), &[u32::MAX]);

        let err = "4294967296".parse::<TaskId>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Task ID part '4294967296' is too large (maximum 4294967295)"
        );
    }
}
