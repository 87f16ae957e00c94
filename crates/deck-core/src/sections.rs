//! Slide index to section label lookup.

use serde::Serialize;

/// Label shown for slides without a mapped section.
pub const DEFAULT_SECTION: &str = "Introduction";

/// A contiguous run of slides sharing one section label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRange {
    pub first: usize,
    pub last: usize,
    pub label: String,
}

/// Static lookup from slide index to section label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMap {
    ranges: Vec<SectionRange>,
}

impl SectionMap {
    /// Build a map from inclusive `(first, last, label)` ranges.
    pub fn new<I, S>(ranges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, S)>,
        S: Into<String>,
    {
        Self {
            ranges: ranges
                .into_iter()
                .map(|(first, last, label)| SectionRange {
                    first,
                    last,
                    label: label.into(),
                })
                .collect(),
        }
    }

    /// Sections of the nuclear society deck.
    pub fn nuclear_society() -> Self {
        Self::new([
            (0, 0, "Introduction"),
            (1, 5, "Motivation"),
            (6, 7, "India's Program"),
            (8, 11, "Challenges"),
            (12, 13, "Your Role"),
            (14, 16, "Outcomes"),
            (17, 19, "Timeline"),
        ])
    }

    /// Label for a slide, falling back to [`DEFAULT_SECTION`].
    pub fn label(&self, index: usize) -> &str {
        self.ranges
            .iter()
            .find(|r| (r.first..=r.last).contains(&index))
            .map(|r| r.label.as_str())
            .unwrap_or(DEFAULT_SECTION)
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        Self::nuclear_society()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_range() {
        let map = SectionMap::nuclear_society();
        assert_eq!(map.label(0), "Introduction");
        assert_eq!(map.label(3), "Motivation");
        assert_eq!(map.label(7), "India's Program");
        assert_eq!(map.label(12), "Your Role");
        assert_eq!(map.label(19), "Timeline");
    }

    #[test]
    fn unmapped_defaults_to_introduction() {
        let map = SectionMap::new([(4, 6, "Middle")]);
        assert_eq!(map.label(0), DEFAULT_SECTION);
        assert_eq!(map.label(5), "Middle");
        assert_eq!(map.label(100), DEFAULT_SECTION);
    }
}
