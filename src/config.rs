//! Calibration knobs for the aggregation engine. Every ceiling, weight and
//! factor used by the extractors and aggregators lives here so recalibration
//! never touches algorithmic code.

use crate::models::Platform;

// Normalization ceilings (log-scaled counters).
pub const MAX_CONTRIBUTIONS_PER_YEAR: f64 = 1000.0;
pub const MAX_CONTRIBUTED_REPOS: f64 = 50.0;
pub const MAX_PULL_REQUESTS: f64 = 200.0;
pub const MAX_TOTAL_STARS: f64 = 1000.0;
pub const MAX_REPUTATION: f64 = 10_000.0;
pub const MAX_ACCEPTED_ANSWERS: f64 = 100.0;
pub const MAX_REACH: f64 = 1_000_000.0;
pub const MAX_PROBLEMS_SOLVED: f64 = 500.0;
pub const MAX_HARD_PROBLEMS: f64 = 100.0;

// Linear ceilings (bounded or rate-like quantities).
pub const MAX_BADGE_SCORE: f64 = 150.0;
pub const MAX_CONTEST_RATING: f64 = 3000.0;
pub const MAX_COURSES_COMPLETED: f64 = 50.0;
pub const MAX_CERTIFICATIONS: f64 = 20.0;
pub const MAX_SKILL_BREADTH: f64 = 30.0;

// Badge weighting: gold / silver / bronze.
pub const GOLD_BADGE_WEIGHT: u32 = 10;
pub const SILVER_BADGE_WEIGHT: u32 = 3;
pub const BRONZE_BADGE_WEIGHT: u32 = 1;

// Dimension aggregation.
pub const DIMINISHING_RETURNS_FACTOR: f64 = 0.2;
pub const DEPTH_TOP_SKILLS: usize = 5;
pub const TOP_LANGUAGES_AS_SKILLS: usize = 3;

// Skill confidence: grows primarily with corroboration count, secondarily
// with score magnitude.
pub const CONFIDENCE_PER_EVIDENCE: f64 = 15.0;
pub const CONFIDENCE_PER_SCORE_POINT: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct DimensionWeights {
    pub contribution: f64,
    pub problem_solving: f64,
    pub learning: f64,
    pub community: f64,
    pub breadth: f64,
    pub depth: f64,
}

/// Must sum to 1.0; changing any weight requires re-balancing the others.
pub const DIMENSION_WEIGHTS: DimensionWeights = DimensionWeights {
    contribution: 0.20,
    problem_solving: 0.18,
    learning: 0.18,
    community: 0.15,
    breadth: 0.14,
    depth: 0.15,
};

/// Per-platform credibility multiplier applied to signal scores during
/// dimension aggregation.
pub fn platform_score_weight(platform: Platform) -> f64 {
    match platform {
        Platform::GitHub => 1.5,
        Platform::StackOverflow => 1.2,
        Platform::LeetCode => 1.3,
        Platform::Udemy => 0.8,
        Platform::Coursera => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_weights_sum_to_one() {
        let w = DIMENSION_WEIGHTS;
        let sum = w.contribution + w.problem_solving + w.learning + w.community + w.breadth + w.depth;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn every_platform_has_a_positive_weight() {
        for platform in Platform::all() {
            assert!(platform_score_weight(*platform) > 0.0);
        }
    }
}
