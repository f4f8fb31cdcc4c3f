use chrono::{DateTime, Utc};

use crate::config;
use crate::dimensions::calculate_dimensions;
use crate::models::{
    AchievementSignal, DimensionScores, LearningDnaProfile, Platform, PlatformConnection,
    PlatformDataCache,
};
use crate::skills::derive_skill_proficiencies;

/// Fixed-weight combination of the six dimensions into the single Learning
/// DNA score.
pub fn calculate_overall_score(dimensions: &DimensionScores) -> u32 {
    let w = config::DIMENSION_WEIGHTS;
    let score = dimensions.contribution as f64 * w.contribution
        + dimensions.problem_solving as f64 * w.problem_solving
        + dimensions.learning as f64 * w.learning
        + dimensions.community as f64 * w.community
        + dimensions.breadth as f64 * w.breadth
        + dimensions.depth as f64 * w.depth;
    score.round() as u32
}

/// Replace within a platform, additive across platforms: the platform's old
/// signal slice is dropped, every other platform's signals are kept as-is.
pub fn merge_platform_signals(
    mut existing: Vec<AchievementSignal>,
    platform: Platform,
    fresh: Vec<AchievementSignal>,
) -> Vec<AchievementSignal> {
    existing.retain(|s| s.platform != platform);
    existing.extend(fresh);
    existing
}

/// Removes a disconnected platform's signals from the aggregate list.
pub fn purge_platform(
    mut signals: Vec<AchievementSignal>,
    platform: Platform,
) -> Vec<AchievementSignal> {
    signals.retain(|s| s.platform != platform);
    signals
}

/// Assembles a complete profile snapshot from the current signal set. Pure
/// composition, no I/O; zero signals produce a well-formed zero-scored
/// profile rather than an error.
pub fn build_learning_dna_profile(
    user_id: &str,
    signals: Vec<AchievementSignal>,
    platform_data: PlatformDataCache,
    platforms: Vec<PlatformConnection>,
    created_at: DateTime<Utc>,
) -> LearningDnaProfile {
    let dimensions = calculate_dimensions(&signals);
    let skills = derive_skill_proficiencies(&signals);
    let overall_score = calculate_overall_score(&dimensions);
    let last_synced_at = platforms.iter().filter_map(|c| c.last_synced_at).max();

    LearningDnaProfile {
        user_id: user_id.to_string(),
        overall_score,
        dimensions,
        platforms,
        signals,
        skills,
        platform_data,
        last_synced_at,
        created_at,
        updated_at: Utc::now(),
    }
}
