//! Per-column profile data and profile-profile comparison.

use crate::alphabet::Alphabet;
use crate::constants::{GAP_OPEN, SCORE_CENTER, SCORE_GUARD};

/// The statistical summary of a single column of an alignment.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlignmentPosition {
    pub sort_order: Vec<usize>,
    pub base_counts: Vec<f64>,
    pub scores: Vec<f64>,
    pub ungapped_weight: f64,
    pub gap_opens: f64,
    pub gap_closes: f64,
    #[serde(default)]
    pub score_gap_open: f64,
    #[serde(default)]
    pub score_gap_close: f64,
}

impl AlignmentPosition {
    /// Builds a position, deriving `score_gap_open`/`score_gap_close` from
    /// `gap_opens`/`gap_closes` the way every other field is derived.
    pub fn new(
        sort_order: Vec<usize>,
        base_counts: Vec<f64>,
        scores: Vec<f64>,
        ungapped_weight: f64,
        gap_opens: f64,
        gap_closes: f64,
    ) -> Self {
        let score_gap_open = gap_opens * GAP_OPEN / 2.0;
        let score_gap_close = gap_closes * GAP_OPEN / 2.0;
        Self {
            sort_order,
            base_counts,
            scores,
            ungapped_weight,
            gap_opens,
            gap_closes,
            score_gap_open,
            score_gap_close,
        }
    }
}

pub type AlignmentPositions = [AlignmentPosition];

/// Scores two profile columns against each other.
///
/// `query_positions.sort_order` lets the loop stop as soon as it hits a
/// zero count: since the order is descending by count, every remaining
/// index is also zero.
pub fn compare_profile_positions(
    query_position: &AlignmentPosition,
    reference_position: &AlignmentPosition,
    alphabet: Alphabet,
) -> f64 {
    let mut score = 0.0;
    for &index in &query_position.sort_order {
        let count = query_position.base_counts[index];
        if count == 0.0 {
            break;
        }
        score += count * reference_position.scores[index];
    }
    match alphabet {
        Alphabet::Amino => {
            if score == 0.0 {
                -2.5
            } else {
                (score.ln() - SCORE_CENTER)
                    * query_position.ungapped_weight
                    * reference_position.ungapped_weight
            }
        }
        Alphabet::Dna | Alphabet::Rna => score - SCORE_CENTER,
    }
}

/// (Re)sets the gap scores for the start/end positions of a profile so
/// that terminal gaps in either input are never penalised for opening or
/// closing.
///
/// The close-side guard check deliberately inspects `score_gap_open` rather
/// than `score_gap_close` of the last position before mutating
/// `score_gap_close`; this mismatch is present in the tool this logic is
/// modeled on and is preserved rather than corrected.
pub fn set_terminal_gaps(positions: &mut [AlignmentPosition]) {
    if positions.is_empty() {
        return;
    }
    let len = positions.len();

    if positions[0].score_gap_open != SCORE_GUARD {
        positions[0].score_gap_open = 0.0;
    }
    if len > 1 {
        let guard_check = positions[len - 1].score_gap_open;
        if guard_check != SCORE_GUARD {
            positions[len - 1].score_gap_close = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(base_counts: Vec<f64>, scores: Vec<f64>) -> AlignmentPosition {
        let mut order: Vec<usize> = (0..base_counts.len()).collect();
        order.sort_by(|&a, &b| {
            base_counts[b]
                .partial_cmp(&base_counts[a])
                .unwrap()
                .then(a.cmp(&b))
        });
        AlignmentPosition::new(order, base_counts, scores, 1.0, 0.0, 0.0)
    }

    #[test]
    fn zero_score_amino_uses_sentinel() {
        let q = pos(vec![0.0, 0.0], vec![0.0, 0.0]);
        let r = pos(vec![0.0, 0.0], vec![0.0, 0.0]);
        assert_eq!(compare_profile_positions(&q, &r, Alphabet::Amino), -2.5);
    }

    #[test]
    fn dna_path_subtracts_center() {
        let q = pos(vec![1.0, 0.0], vec![1.0, 0.0]);
        let r = pos(vec![1.0, 0.0], vec![5.0, -4.0]);
        let s = compare_profile_positions(&q, &r, Alphabet::Dna);
        assert!((s - (5.0 - SCORE_CENTER)).abs() < 1e-12);
    }

    #[test]
    fn terminal_gaps_are_zeroed() {
        let mut positions = vec![
            AlignmentPosition::new(vec![0], vec![1.0], vec![1.0], 1.0, 1.0, 1.0),
            AlignmentPosition::new(vec![0], vec![1.0], vec![1.0], 1.0, 1.0, 1.0),
        ];
        set_terminal_gaps(&mut positions);
        assert_eq!(positions[0].score_gap_open, 0.0);
        assert_eq!(positions[1].score_gap_close, 0.0);
    }
}
