//! Score rank derivation.
//!
//! Rank thresholds are fixed fractions of the puzzle's max score. The rule is
//! strict and uniform: the rank is the greatest index whose rounded threshold
//! the score meets.

/// Ascending score fractions, one per rank. Index 8 is Genius, index 9 is
/// Queen Bee (every point in the puzzle).
pub const RANK_FRACTIONS: [f32; 10] = [0.0, 0.02, 0.05, 0.08, 0.15, 0.25, 0.40, 0.50, 0.70, 1.0];

pub const GENIUS_RANK: usize = 8;
pub const QUEEN_BEE_RANK: usize = 9;

/// Greatest rank index `i` with `score >= round(max_score * RANK_FRACTIONS[i])`.
/// A zero `max_score` (no puzzle) reports rank 0.
pub fn rank_index(score: u32, max_score: u32) -> usize {
    if max_score == 0 {
        return 0;
    }
    let mut rank = 0;
    for (i, fraction) in RANK_FRACTIONS.iter().enumerate() {
        if score >= (fraction * max_score as f32).round() as u32 {
            rank = i;
        }
    }
    rank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_score_is_rank_zero() {
        assert_eq!(rank_index(0, 100), 0);
    }

    #[test]
    fn genius_boundary_is_inclusive() {
        // round(137 * 0.70) = 96
        assert_eq!(rank_index(96, 137), GENIUS_RANK);
        assert_eq!(rank_index(95, 137), 7);
    }

    #[test]
    fn full_score_is_queen_bee() {
        assert_eq!(rank_index(137, 137), QUEEN_BEE_RANK);
        assert_eq!(rank_index(13, 13), QUEEN_BEE_RANK);
    }

    #[test]
    fn no_puzzle_is_rank_zero() {
        assert_eq!(rank_index(0, 0), 0);
    }

    #[test]
    fn ranks_ascend_with_score() {
        let max = 200;
        let mut last = 0;
        for score in 0..=max {
            let rank = rank_index(score, max);
            assert!(rank >= last, "rank regressed at score {score}");
            last = rank;
        }
        assert_eq!(last, QUEEN_BEE_RANK);
    }
}
