use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::config;
use crate::models::{
    AchievementSignal, CompetitiveData, CourseData, Platform, PlatformRawData, QaData,
    SignalCategory, VersionControlData,
};
use crate::normalize::{linear_normalize, normalize_value};

/// Turns one platform's raw payload into a flat list of achievement signals.
/// Pure except for id generation and the extraction timestamp.
pub fn extract_signals(
    data: &PlatformRawData,
    platform: Platform,
    now: DateTime<Utc>,
) -> Vec<AchievementSignal> {
    match data {
        PlatformRawData::VersionControl(vc) => extract_version_control(vc, platform, now),
        PlatformRawData::QAndA(qa) => extract_qa(qa, platform, now),
        PlatformRawData::CompetitiveProgramming(cp) => extract_competitive(cp, platform, now),
        PlatformRawData::Course(course) => extract_course(course, now),
    }
}

/// Folds trivial spelling variants so skill evidence does not fragment
/// across platforms.
pub fn canonical_skill(tag: &str) -> String {
    let tag = tag.trim().to_lowercase().replace(' ', "-");
    match tag.as_str() {
        "node" | "node.js" => "nodejs".to_string(),
        "js" => "javascript".to_string(),
        "ts" => "typescript".to_string(),
        "golang" => "go".to_string(),
        "postgres" => "postgresql".to_string(),
        _ => tag,
    }
}

fn signal_id(platform: Platform, slug: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{platform}-{slug}-{}", &suffix[..8])
}

fn new_signal(
    platform: Platform,
    category: SignalCategory,
    slug: &str,
    title: &str,
    description: String,
    raw_value: f64,
    normalized_score: u32,
    skills: Vec<String>,
    now: DateTime<Utc>,
) -> AchievementSignal {
    AchievementSignal {
        id: signal_id(platform, slug),
        platform,
        category,
        title: title.to_string(),
        description,
        raw_value,
        normalized_score,
        skills,
        earned_at: now,
        metadata: serde_json::Map::new(),
    }
}

fn top_languages(data: &VersionControlData) -> Vec<String> {
    let mut languages: Vec<(&String, &f64)> = data.languages.iter().collect();
    languages.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
    languages
        .into_iter()
        .take(config::TOP_LANGUAGES_AS_SKILLS)
        .map(|(name, _)| canonical_skill(name))
        .collect()
}

fn extract_version_control(
    data: &VersionControlData,
    platform: Platform,
    now: DateTime<Utc>,
) -> Vec<AchievementSignal> {
    let mut signals = Vec::new();
    let languages = top_languages(data);

    signals.push(new_signal(
        platform,
        SignalCategory::Contribution,
        "contributions",
        "Active Contributor",
        format!(
            "{} contributions in the last year",
            data.contributions_last_year
        ),
        data.contributions_last_year as f64,
        normalize_value(
            data.contributions_last_year as f64,
            config::MAX_CONTRIBUTIONS_PER_YEAR,
        ),
        languages.clone(),
        now,
    ));

    if data.contributed_repos > 0 {
        signals.push(new_signal(
            platform,
            SignalCategory::Contribution,
            "open-source",
            "Open Source Contributor",
            format!("Contributed to {} repositories", data.contributed_repos),
            data.contributed_repos as f64,
            normalize_value(data.contributed_repos as f64, config::MAX_CONTRIBUTED_REPOS),
            vec!["open-source".to_string(), "collaboration".to_string()],
            now,
        ));
    }

    if data.total_prs > 0 {
        let merge_rate = data.merged_prs as f64 / data.total_prs as f64;
        let mut signal = new_signal(
            platform,
            SignalCategory::ProjectWork,
            "pull-requests",
            "Pull Request Author",
            format!(
                "{} pull requests opened, {} merged",
                data.total_prs, data.merged_prs
            ),
            data.total_prs as f64,
            normalize_value(data.total_prs as f64, config::MAX_PULL_REQUESTS),
            vec!["code-review".to_string(), "collaboration".to_string()],
            now,
        );
        signal.metadata.insert("mergedPrs".to_string(), json!(data.merged_prs));
        signal.metadata.insert("mergeRate".to_string(), json!(merge_rate));
        signals.push(signal);
    }

    if data.total_stars > 0 {
        signals.push(new_signal(
            platform,
            SignalCategory::Community,
            "stars",
            "Community Impact",
            format!("{} stars across public repositories", data.total_stars),
            data.total_stars as f64,
            normalize_value(data.total_stars as f64, config::MAX_TOTAL_STARS),
            vec!["open-source".to_string()],
            now,
        ));
    }

    signals
}

fn extract_qa(data: &QaData, platform: Platform, now: DateTime<Utc>) -> Vec<AchievementSignal> {
    let mut signals = Vec::new();
    let tag_skills: Vec<String> = data
        .top_tags
        .iter()
        .take(3)
        .map(|t| canonical_skill(t))
        .collect();

    // Reputation and reach are emitted unconditionally, even at zero, so a
    // freshly connected account still surfaces in the profile timeline.
    signals.push(new_signal(
        platform,
        SignalCategory::Reputation,
        "reputation",
        "Q&A Reputation",
        format!("{} reputation earned answering questions", data.reputation),
        data.reputation as f64,
        normalize_value(data.reputation as f64, config::MAX_REPUTATION),
        tag_skills.clone(),
        now,
    ));

    signals.push(new_signal(
        platform,
        SignalCategory::Community,
        "reach",
        "Community Reach",
        format!("Answers reached an estimated {} people", data.reach),
        data.reach as f64,
        normalize_value(data.reach as f64, config::MAX_REACH),
        vec!["community-engagement".to_string()],
        now,
    ));

    if data.accepted_answers > 0 {
        signals.push(new_signal(
            platform,
            SignalCategory::Community,
            "answers",
            "Knowledge Sharing",
            format!("{} answers accepted as solutions", data.accepted_answers),
            data.accepted_answers as f64,
            normalize_value(data.accepted_answers as f64, config::MAX_ACCEPTED_ANSWERS),
            vec!["knowledge-sharing".to_string(), "mentoring".to_string()],
            now,
        ));
    }

    let badge_score = data.gold_badges * config::GOLD_BADGE_WEIGHT
        + data.silver_badges * config::SILVER_BADGE_WEIGHT
        + data.bronze_badges * config::BRONZE_BADGE_WEIGHT;
    if badge_score > 0 {
        let mut signal = new_signal(
            platform,
            SignalCategory::Reputation,
            "badges",
            "Badge Collection",
            format!(
                "{} gold, {} silver, {} bronze badges",
                data.gold_badges, data.silver_badges, data.bronze_badges
            ),
            badge_score as f64,
            linear_normalize(badge_score as f64, config::MAX_BADGE_SCORE),
            vec!["community-engagement".to_string()],
            now,
        );
        signal.metadata.insert("goldBadges".to_string(), json!(data.gold_badges));
        signal.metadata.insert("silverBadges".to_string(), json!(data.silver_badges));
        signal.metadata.insert("bronzeBadges".to_string(), json!(data.bronze_badges));
        signals.push(signal);
    }

    signals
}

fn extract_competitive(
    data: &CompetitiveData,
    platform: Platform,
    now: DateTime<Utc>,
) -> Vec<AchievementSignal> {
    let mut signals = Vec::new();

    let mut solved = new_signal(
        platform,
        SignalCategory::ProblemSolving,
        "solved",
        "Problem Solver",
        format!("{} problems solved", data.total_solved),
        data.total_solved as f64,
        normalize_value(data.total_solved as f64, config::MAX_PROBLEMS_SOLVED),
        vec![
            "algorithms".to_string(),
            "data-structures".to_string(),
            "problem-solving".to_string(),
        ],
        now,
    );
    solved.metadata.insert("easySolved".to_string(), json!(data.easy_solved));
    solved.metadata.insert("mediumSolved".to_string(), json!(data.medium_solved));
    solved.metadata.insert("hardSolved".to_string(), json!(data.hard_solved));
    signals.push(solved);

    if data.hard_solved > 0 {
        signals.push(new_signal(
            platform,
            SignalCategory::ProblemSolving,
            "hard",
            "Hard Problem Expertise",
            format!("{} hard problems solved", data.hard_solved),
            data.hard_solved as f64,
            normalize_value(data.hard_solved as f64, config::MAX_HARD_PROBLEMS),
            vec!["advanced-algorithms".to_string(), "optimization".to_string()],
            now,
        ));
    }

    if data.contest_rating > 0 {
        let mut signal = new_signal(
            platform,
            SignalCategory::ProblemSolving,
            "contest",
            "Contest Participant",
            format!("Contest rating of {}", data.contest_rating),
            data.contest_rating as f64,
            linear_normalize(data.contest_rating as f64, config::MAX_CONTEST_RATING),
            vec!["competitive-programming".to_string()],
            now,
        );
        signal.metadata.insert("ranking".to_string(), json!(data.ranking));
        signals.push(signal);
    }

    signals
}

fn extract_course(data: &CourseData, now: DateTime<Utc>) -> Vec<AchievementSignal> {
    let mut signals = Vec::new();
    let skills: Vec<String> = data
        .skills_learned
        .iter()
        .map(|s| canonical_skill(s))
        .collect();

    let mut completion = new_signal(
        data.platform,
        SignalCategory::Completion,
        "courses",
        "Course Completions",
        format!(
            "{} courses completed over {:.0} hours",
            data.courses_completed, data.total_hours
        ),
        data.courses_completed as f64,
        linear_normalize(data.courses_completed as f64, config::MAX_COURSES_COMPLETED),
        skills.clone(),
        now,
    );
    completion.metadata.insert("totalHours".to_string(), json!(data.total_hours));
    signals.push(completion);

    if data.certifications > 0 {
        signals.push(new_signal(
            data.platform,
            SignalCategory::SkillValidation,
            "certifications",
            "Certified Skills",
            format!("{} certifications earned", data.certifications),
            data.certifications as f64,
            linear_normalize(data.certifications as f64, config::MAX_CERTIFICATIONS),
            skills,
            now,
        ));
    }

    signals
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn sample_version_control() -> VersionControlData {
        let mut languages = HashMap::new();
        languages.insert("TypeScript".to_string(), 65.0);
        languages.insert("JavaScript".to_string(), 20.0);
        VersionControlData {
            public_repos: 24,
            followers: 40,
            contributions_last_year: 1000,
            contributed_repos: 12,
            total_prs: 89,
            merged_prs: 72,
            total_stars: 234,
            languages,
        }
    }

    #[test]
    fn version_control_emits_four_signals_for_full_activity() {
        let data = PlatformRawData::VersionControl(sample_version_control());
        let signals = extract_signals(&data, Platform::GitHub, Utc::now());
        assert_eq!(signals.len(), 4);

        let contribution = signals
            .iter()
            .find(|s| s.category == SignalCategory::Contribution && s.title == "Active Contributor")
            .unwrap();
        // 1000 contributions is exactly the ceiling.
        assert_eq!(contribution.normalized_score, 100);
        assert_eq!(
            contribution.skills,
            vec!["typescript".to_string(), "javascript".to_string()]
        );

        let pr = signals
            .iter()
            .find(|s| s.category == SignalCategory::ProjectWork)
            .unwrap();
        let merge_rate = pr.metadata.get("mergeRate").unwrap().as_f64().unwrap();
        assert!((merge_rate - 72.0 / 89.0).abs() < 1e-9);
    }

    #[test]
    fn version_control_skips_conditional_signals_without_activity() {
        let mut data = sample_version_control();
        data.contributed_repos = 0;
        data.total_prs = 0;
        data.total_stars = 0;
        let signals = extract_signals(
            &PlatformRawData::VersionControl(data),
            Platform::GitHub,
            Utc::now(),
        );
        assert_eq!(signals.len(), 1);
    }

    #[test]
    fn qa_always_emits_reputation_and_reach() {
        let data = PlatformRawData::QAndA(QaData {
            reputation: 0,
            gold_badges: 0,
            silver_badges: 0,
            bronze_badges: 0,
            accepted_answers: 0,
            total_questions: 0,
            top_tags: vec![],
            reach: 500_000,
        });
        let signals = extract_signals(&data, Platform::StackOverflow, Utc::now());
        assert_eq!(signals.len(), 2);

        let reputation = signals
            .iter()
            .find(|s| s.category == SignalCategory::Reputation)
            .unwrap();
        assert_eq!(reputation.normalized_score, 0);
    }

    #[test]
    fn badge_signal_uses_weighted_count() {
        let data = PlatformRawData::QAndA(QaData {
            reputation: 2500,
            gold_badges: 2,
            silver_badges: 10,
            bronze_badges: 25,
            accepted_answers: 40,
            total_questions: 12,
            top_tags: vec!["rust".to_string(), "Node.js".to_string()],
            reach: 80_000,
        });
        let signals = extract_signals(&data, Platform::StackOverflow, Utc::now());
        let badges = signals.iter().find(|s| s.title == "Badge Collection").unwrap();
        // 2*10 + 10*3 + 25*1 = 75 of the 150 ceiling.
        assert_eq!(badges.raw_value, 75.0);
        assert_eq!(badges.normalized_score, 50);

        let reputation = signals.iter().find(|s| s.title == "Q&A Reputation").unwrap();
        assert_eq!(
            reputation.skills,
            vec!["rust".to_string(), "nodejs".to_string()]
        );
    }

    #[test]
    fn competitive_emits_solved_breakdown_in_metadata() {
        let data = PlatformRawData::CompetitiveProgramming(CompetitiveData {
            total_solved: 320,
            easy_solved: 150,
            medium_solved: 130,
            hard_solved: 40,
            ranking: 15_234,
            contest_rating: 1850,
        });
        let signals = extract_signals(&data, Platform::LeetCode, Utc::now());
        assert_eq!(signals.len(), 3);

        let solved = signals.iter().find(|s| s.title == "Problem Solver").unwrap();
        assert_eq!(solved.metadata.get("hardSolved").unwrap(), &json!(40));

        let contest = signals.iter().find(|s| s.title == "Contest Participant").unwrap();
        assert_eq!(contest.normalized_score, 62);
    }

    #[test]
    fn course_certification_signal_is_conditional() {
        let mut course = CourseData {
            platform: Platform::Udemy,
            courses_completed: 8,
            total_hours: 94.5,
            certifications: 0,
            skills_learned: vec!["React".to_string(), "ts".to_string()],
        };
        let signals = extract_signals(
            &PlatformRawData::Course(course.clone()),
            Platform::Udemy,
            Utc::now(),
        );
        assert_eq!(signals.len(), 1);
        assert_eq!(
            signals[0].skills,
            vec!["react".to_string(), "typescript".to_string()]
        );

        course.certifications = 3;
        let signals = extract_signals(
            &PlatformRawData::Course(course),
            Platform::Udemy,
            Utc::now(),
        );
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[1].category, SignalCategory::SkillValidation);
    }

    #[test]
    fn signal_ids_are_unique_within_one_extraction() {
        let data = PlatformRawData::VersionControl(sample_version_control());
        let signals = extract_signals(&data, Platform::GitHub, Utc::now());
        let mut ids: Vec<&str> = signals.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), signals.len());
    }
}
