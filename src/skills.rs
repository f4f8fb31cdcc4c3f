use std::collections::HashMap;

use crate::config;
use crate::models::{AchievementSignal, DerivedSkill, Proficiency, SkillEvidence};

/// Cross-references every signal by skill tag and scores each skill from the
/// accumulated evidence. Recomputed in full on every pass; no incremental
/// updates.
pub fn derive_skill_proficiencies(signals: &[AchievementSignal]) -> Vec<DerivedSkill> {
    let mut evidence_by_skill: HashMap<String, (Vec<u32>, Vec<SkillEvidence>)> = HashMap::new();

    for signal in signals {
        for skill in &signal.skills {
            let entry = evidence_by_skill
                .entry(skill.clone())
                .or_insert_with(|| (Vec::new(), Vec::new()));
            entry.0.push(signal.normalized_score);
            entry.1.push(SkillEvidence {
                platform: signal.platform,
                category: signal.category,
                evidence: signal.title.clone(),
                weight: config::platform_score_weight(signal.platform),
            });
        }
    }

    let mut skills: Vec<DerivedSkill> = evidence_by_skill
        .into_iter()
        .map(|(id, (scores, evidence))| {
            let average = scores.iter().sum::<u32>() as f64 / scores.len() as f64;
            let confidence = (scores.len() as f64 * config::CONFIDENCE_PER_EVIDENCE
                + average * config::CONFIDENCE_PER_SCORE_POINT)
                .round()
                .min(100.0) as u32;
            DerivedSkill {
                name: display_name(&id),
                id,
                confidence,
                proficiency: Proficiency::from_average_score(average),
                evidence,
            }
        })
        .collect();

    // Confidence descending; skill id breaks ties so output is deterministic.
    skills.sort_by(|a, b| b.confidence.cmp(&a.confidence).then(a.id.cmp(&b.id)));
    skills
}

/// Title-cases hyphen-separated skill ids, e.g. `open-source` -> "Open Source".
/// Cosmetic only.
pub fn display_name(id: &str) -> String {
    id.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
