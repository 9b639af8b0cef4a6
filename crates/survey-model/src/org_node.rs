//! Organizational hierarchy paths.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A respondent's position in the organization, one level index per tier.
///
/// Parsed from labels such as `N02.3.5.10.11.20`, where letters and other
/// decoration around the numeric path are ignored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrgNode {
    levels: Vec<u32>,
}

impl OrgNode {
    pub fn new(levels: Vec<u32>) -> Self {
        Self { levels }
    }

    /// Parses an org path, keeping only ASCII digits and `separator` before
    /// splitting. Empty segments are dropped.
    pub fn parse(value: &str, separator: char) -> Result<Self> {
        let filtered: String = value
            .chars()
            .filter(|ch| ch.is_ascii_digit() || *ch == separator)
            .collect();

        let levels = filtered
            .split(separator)
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment
                    .parse::<u32>()
                    .map_err(|_| ModelError::InvalidOrgNodeString {
                        value: value.to_string(),
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    /// Number of tiers in the path.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// True if `other` sits strictly below this node.
    pub fn is_ancestor_of(&self, other: &OrgNode) -> bool {
        other.levels.len() > self.levels.len() && other.levels.starts_with(&self.levels)
    }

    /// Renders the levels joined by `separator`.
    pub fn to_path(&self, separator: char) -> String {
        let mut out = String::new();
        for (idx, level) in self.levels.iter().enumerate() {
            if idx > 0 {
                out.push(separator);
            }
            out.push_str(&level.to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_paths() {
        let cases: [(&str, &[u32]); 6] = [
            ("N01.", &[1]),
            ("N01.01.", &[1, 1]),
            ("N01.5", &[1, 5]),
            ("N02.3.5.10.11.20", &[2, 3, 5, 10, 11, 20]),
            ("N01.0.0.3", &[1, 0, 0, 3]),
            ("N0a.1", &[0, 1]),
        ];
        for (input, expected) in cases {
            let node = OrgNode::parse(input, '.').unwrap();
            assert_eq!(node.levels(), expected, "input {input}");
        }
    }

    #[test]
    fn parse_other_separator() {
        let node = OrgNode::parse("Dept 4/12/7", '/').unwrap();
        assert_eq!(node.levels(), &[4, 12, 7]);
        assert_eq!(node.to_path('.'), "4.12.7");
    }

    #[test]
    fn parse_without_digits_is_empty() {
        let node = OrgNode::parse("Head office", '.').unwrap();
        assert!(node.is_empty());
    }

    #[test]
    fn parse_overflowing_level_fails() {
        let err = OrgNode::parse("N1.99999999999", '.').unwrap_err();
        assert!(matches!(err, ModelError::InvalidOrgNodeString { segment, .. } if segment == "99999999999"));
    }

    #[test]
    fn ancestry() {
        let root = OrgNode::new(vec![1]);
        let child = OrgNode::new(vec![1, 3]);
        assert!(root.is_ancestor_of(&child));
        assert!(!child.is_ancestor_of(&root));
        assert!(!root.is_ancestor_of(&root));
    }
}
