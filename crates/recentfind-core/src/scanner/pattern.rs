/// File-name pattern that must match the entire base name.
use crate::error::{Result, SearchError};
use regex::Regex;

#[derive(Clone, Debug)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Compile `pattern` anchored at both ends, so `report` does not match
    /// `report_2024.txt`.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            SearchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as supplied by the caller, without anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_whole_name_only() {
        let full = NamePattern::new(r"report_\d+\.txt").unwrap();
        assert!(full.is_match("report_2024.txt"));
        assert!(!full.is_match("old_report_2024.txt"));
        assert!(!full.is_match("report_2024.txt.bak"));

        let prefix = NamePattern::new("report").unwrap();
        assert!(!prefix.is_match("report_2024.txt"));
        assert!(prefix.is_match("report"));
    }

    /// Alternation must stay inside the anchors: `a|b` may not match `ab`
    /// or `xa`.
    #[test]
    fn alternation_is_anchored_as_a_group() {
        let p = NamePattern::new("a|b").unwrap();
        assert!(p.is_match("a"));
        assert!(p.is_match("b"));
        assert!(!p.is_match("ab"));
        assert!(!p.is_match("xa"));
    }

    #[test]
    fn non_ascii_names_are_matched() {
        let p = NamePattern::new(r"отчёт_\d+\.pdf").unwrap();
        assert!(p.is_match("отчёт_7.pdf"));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = NamePattern::new("x_(").unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern { ref pattern, .. } if pattern == "x_("));
    }

    #[test]
    fn source_is_kept_unanchored() {
        let p = NamePattern::new(r"x_\d+\.log").unwrap();
        assert_eq!(p.as_str(), r"x_\d+\.log");
    }
}
