//! Which slide carries which chart, and which charts are already drawn.

use serde::{Deserialize, Serialize};

use crate::chart::ChartTarget;

/// Static slide index to chart lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMap {
    entries: Vec<(usize, ChartTarget)>,
}

impl ContentMap {
    pub fn new(entries: impl IntoIterator<Item = (usize, ChartTarget)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Chart placement of the nuclear society deck.
    pub fn nuclear_society() -> Self {
        Self::new([
            (2, ChartTarget::FlowDiagram),
            (5, ChartTarget::Investment),
            (12, ChartTarget::Workforce),
        ])
    }

    /// Chart shown on a slide, if any.
    pub fn chart_for(&self, index: usize) -> Option<ChartTarget> {
        self.entries
            .iter()
            .find(|(slide, _)| *slide == index)
            .map(|(_, target)| *target)
    }

    /// Slide that shows a chart, if any.
    pub fn slide_for(&self, target: ChartTarget) -> Option<usize> {
        self.entries
            .iter()
            .find(|(_, t)| *t == target)
            .map(|(slide, _)| *slide)
    }
}

impl Default for ContentMap {
    fn default() -> Self {
        Self::nuclear_society()
    }
}

/// Per-chart "already drawn" flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedFlags {
    loaded: [bool; 3],
}

impl LoadedFlags {
    pub fn is_loaded(&self, target: ChartTarget) -> bool {
        self.loaded[target.slot()]
    }

    pub fn mark(&mut self, target: ChartTarget) {
        self.loaded[target.slot()] = true;
    }

    /// Forget a draw so the next dispatch rebuilds the chart.
    pub fn clear(&mut self, target: ChartTarget) {
        self.loaded[target.slot()] = false;
    }

    pub fn loaded(&self) -> impl Iterator<Item = ChartTarget> + '_ {
        ChartTarget::ALL.into_iter().filter(|t| self.is_loaded(*t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping() {
        let map = ContentMap::nuclear_society();
        assert_eq!(map.chart_for(2), Some(ChartTarget::FlowDiagram));
        assert_eq!(map.chart_for(5), Some(ChartTarget::Investment));
        assert_eq!(map.chart_for(12), Some(ChartTarget::Workforce));
        assert_eq!(map.chart_for(0), None);
        assert_eq!(map.slide_for(ChartTarget::Workforce), Some(12));
    }

    #[test]
    fn flags_mark_and_clear() {
        let mut flags = LoadedFlags::default();
        assert!(!flags.is_loaded(ChartTarget::Investment));
        flags.mark(ChartTarget::Investment);
        assert!(flags.is_loaded(ChartTarget::Investment));
        assert!(!flags.is_loaded(ChartTarget::Workforce));
        assert_eq!(flags.loaded().collect::<Vec<_>>(), vec![ChartTarget::Investment]);
        flags.clear(ChartTarget::Investment);
        assert!(!flags.is_loaded(ChartTarget::Investment));
    }
}
