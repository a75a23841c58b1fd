//! Per-level score table.

use crate::level::CognitiveLevel;

/// Scores for all six levels, indexed by [`CognitiveLevel::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBoard {
    scores: [f64; 6],
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, level: CognitiveLevel) -> f64 {
        self.scores[level.index()]
    }

    /// Set a score, flooring it at zero. NaN is kept so it can be reported.
    pub fn set(&mut self, level: CognitiveLevel, score: f64) {
        self.scores[level.index()] = if score < 0.0 { 0.0 } else { score };
    }

    pub fn add(&mut self, level: CognitiveLevel, delta: f64) {
        self.set(level, self.get(level) + delta);
    }

    pub fn iter(&self) -> impl Iterator<Item = (CognitiveLevel, f64)> + '_ {
        CognitiveLevel::ALL.into_iter().map(|level| (level, self.get(level)))
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Levels sorted by descending score; ties keep level order.
    pub fn ranked(&self) -> Vec<(CognitiveLevel, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// The highest and second-highest entries.
    pub fn top_two(&self) -> ((CognitiveLevel, f64), (CognitiveLevel, f64)) {
        let ranked = self.ranked();
        (ranked[0], ranked[1])
    }

    /// The first non-finite entry, if any.
    pub fn non_finite(&self) -> Option<(CognitiveLevel, f64)> {
        self.iter().find(|(_, score)| !score.is_finite())
    }
}
