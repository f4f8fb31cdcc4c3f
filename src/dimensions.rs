use std::collections::{HashMap, HashSet};

use crate::config;
use crate::models::{AchievementSignal, DimensionScores, SignalCategory};
use crate::normalize::linear_normalize;

/// Weighted score for one group of signals. Zero signals means zero score:
/// "no evidence yet", never an error.
pub fn category_score(signals: &[&AchievementSignal]) -> u32 {
    if signals.is_empty() {
        return 0;
    }

    let weighted_sum: f64 = signals
        .iter()
        .map(|s| s.normalized_score as f64 * config::platform_score_weight(s.platform))
        .sum();
    let mean = weighted_sum / signals.len() as f64;

    // Multiple corroborating signals are worth more than one, without
    // runaway inflation.
    let corroboration =
        1.0 + (signals.len() as f64).max(1.0).log10() * config::DIMINISHING_RETURNS_FACTOR;

    (mean * corroboration).min(100.0).round() as u32
}

pub fn calculate_dimensions(signals: &[AchievementSignal]) -> DimensionScores {
    let in_categories = |categories: &[SignalCategory]| -> Vec<&AchievementSignal> {
        signals
            .iter()
            .filter(|s| categories.contains(&s.category))
            .collect()
    };

    let contribution = category_score(&in_categories(&[SignalCategory::Contribution]));
    let problem_solving = category_score(&in_categories(&[SignalCategory::ProblemSolving]));
    let learning = category_score(&in_categories(&[
        SignalCategory::Completion,
        SignalCategory::SkillValidation,
    ]));
    let community = category_score(&in_categories(&[
        SignalCategory::Community,
        SignalCategory::Reputation,
    ]));

    let unique_skills: HashSet<&str> = signals
        .iter()
        .flat_map(|s| s.skills.iter().map(String::as_str))
        .collect();
    let breadth = linear_normalize(unique_skills.len() as f64, config::MAX_SKILL_BREADTH);

    DimensionScores {
        contribution,
        problem_solving,
        learning,
        community,
        breadth,
        depth: depth_score(signals),
    }
}

/// Mean of the top per-skill maximum scores. Depth rewards a few strong
/// skills independently of how many weak ones exist.
fn depth_score(signals: &[AchievementSignal]) -> u32 {
    let mut best_per_skill: HashMap<&str, u32> = HashMap::new();
    for signal in signals {
        for skill in &signal.skills {
            let entry = best_per_skill.entry(skill.as_str()).or_insert(0);
            *entry = (*entry).max(signal.normalized_score);
        }
    }

    if best_per_skill.is_empty() {
        return 0;
    }

    let mut scores: Vec<u32> = best_per_skill.into_values().collect();
    scores.sort_unstable_by(|a, b| b.cmp(a));
    let top: Vec<u32> = scores.into_iter().take(config::DEPTH_TOP_SKILLS).collect();
    let mean = top.iter().sum::<u32>() as f64 / top.len() as f64;
    mean.round() as u32
}
