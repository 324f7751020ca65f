use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::result::NightResult;

/// Accumulates night results over the whole game.
///
/// Results are never mutated once pushed; the log only exposes shared slices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    results: Vec<NightResult>,
    #[serde(default)]
    max_results: usize,
}

impl History {
    /// Create a log with the given maximum capacity (0 = unlimited).
    pub fn new(max_results: usize) -> Self {
        Self {
            results: Vec::new(),
            max_results,
        }
    }

    /// Append a result, dropping the oldest results if the log exceeds its capacity.
    pub fn push(&mut self, result: NightResult) {
        self.results.push(result);
        if self.max_results > 0 && self.results.len() > self.max_results {
            let drain_count = self.results.len() - self.max_results;
            self.results.drain(..drain_count);
        }
    }

    /// All recorded results, oldest first.
    pub fn results(&self) -> &[NightResult] {
        &self.results
    }

    /// Results produced on the given night.
    pub fn results_for_night(&self, night: u32) -> Vec<&NightResult> {
        self.results
            .iter()
            .filter(|r| r.night_number == night)
            .collect()
    }

    /// Results involving the given player as actor or target.
    pub fn results_for_player(&self, id: PlayerId) -> Vec<&NightResult> {
        self.results.iter().filter(|r| r.involves(id)).collect()
    }

    /// Number of recorded results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ResultKind;

    fn kill(night: u32, actor: u32, target: u32) -> NightResult {
        NightResult::new(ResultKind::Kill, night, "lupo")
            .with_players(vec![PlayerId(actor)])
            .with_target(PlayerId(target))
    }

    #[test]
    fn push_and_query() {
        let mut log = History::new(0);
        log.push(kill(1, 1, 2));
        log.push(kill(2, 1, 3));
        assert_eq!(log.len(), 2);
        assert_eq!(log.results_for_night(1).len(), 1);
        assert_eq!(log.results_for_player(PlayerId(1)).len(), 2);
        assert_eq!(log.results_for_player(PlayerId(3)).len(), 1);
        assert!(log.results_for_player(PlayerId(9)).is_empty());
    }

    #[test]
    fn max_results_trims_oldest() {
        let mut log = History::new(2);
        for night in 1..=5 {
            log.push(kill(night, 1, 2));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.results()[0].night_number, 4);
        assert_eq!(log.results()[1].night_number, 5);
    }

    #[test]
    fn unlimited_capacity_keeps_everything() {
        let mut log = History::new(0);
        for night in 0..500 {
            log.push(kill(night, 1, 2));
        }
        assert_eq!(log.len(), 500);
    }
}
