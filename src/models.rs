use std::collections::HashMap;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum Platform {
    GitHub,
    StackOverflow,
    LeetCode,
    Udemy,
    Coursera,
}

impl Platform {
    pub fn all() -> &'static [Platform] {
        &[
            Platform::GitHub,
            Platform::StackOverflow,
            Platform::LeetCode,
            Platform::Udemy,
            Platform::Coursera,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::GitHub => "GitHub",
            Platform::StackOverflow => "Stack Overflow",
            Platform::LeetCode => "LeetCode",
            Platform::Udemy => "Udemy",
            Platform::Coursera => "Coursera",
        }
    }

    pub fn is_course_platform(&self) -> bool {
        matches!(self, Platform::Udemy | Platform::Coursera)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Platform::GitHub => "github",
            Platform::StackOverflow => "stackoverflow",
            Platform::LeetCode => "leetcode",
            Platform::Udemy => "udemy",
            Platform::Coursera => "coursera",
        };
        write!(f, "{id}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    Contribution,
    Reputation,
    Completion,
    ProblemSolving,
    Community,
    SkillValidation,
    ProjectWork,
}

/// A single piece of achievement evidence extracted from one platform.
/// Immutable once created; a re-sync emits a whole new set for the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementSignal {
    pub id: String,
    pub platform: Platform,
    pub category: SignalCategory,
    pub title: String,
    pub description: String,
    pub raw_value: f64,
    /// Always in [0, 100]; deterministic from raw_value and the signal ceiling.
    pub normalized_score: u32,
    pub skills: Vec<String>,
    pub earned_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Pending,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConnection {
    pub platform: Platform,
    pub display_name: String,
    pub status: ConnectionStatus,
    pub username: Option<String>,
    // Tokens live only in memory for the lifetime of a sync; never persisted.
    #[serde(skip)]
    pub access_token: Option<String>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl PlatformConnection {
    pub fn initial(platform: Platform) -> Self {
        Self {
            platform,
            display_name: platform.display_name().to_string(),
            status: ConnectionStatus::Disconnected,
            username: None,
            access_token: None,
            last_synced_at: None,
            error: None,
        }
    }
}

pub fn default_connections() -> Vec<PlatformConnection> {
    Platform::all()
        .iter()
        .map(|p| PlatformConnection::initial(*p))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub contribution: u32,
    pub problem_solving: u32,
    pub learning: u32,
    pub community: u32,
    pub breadth: u32,
    pub depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    pub fn from_average_score(average: f64) -> Self {
        if average >= 80.0 {
            Proficiency::Expert
        } else if average >= 60.0 {
            Proficiency::Advanced
        } else if average >= 35.0 {
            Proficiency::Intermediate
        } else {
            Proficiency::Beginner
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillEvidence {
    pub platform: Platform,
    pub category: SignalCategory,
    pub evidence: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSkill {
    pub id: String,
    pub name: String,
    pub confidence: u32,
    pub proficiency: Proficiency,
    pub evidence: Vec<SkillEvidence>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionControlData {
    pub public_repos: u32,
    pub followers: u32,
    pub contributions_last_year: u32,
    pub contributed_repos: u32,
    pub total_prs: u32,
    pub merged_prs: u32,
    pub total_stars: u32,
    /// Language name to usage share in percent.
    pub languages: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaData {
    pub reputation: u32,
    pub gold_badges: u32,
    pub silver_badges: u32,
    pub bronze_badges: u32,
    pub accepted_answers: u32,
    pub total_questions: u32,
    pub top_tags: Vec<String>,
    pub reach: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveData {
    pub total_solved: u32,
    pub easy_solved: u32,
    pub medium_solved: u32,
    pub hard_solved: u32,
    pub ranking: u32,
    pub contest_rating: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseData {
    pub platform: Platform,
    pub courses_completed: u32,
    pub total_hours: f64,
    pub certifications: u32,
    pub skills_learned: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlatformRawData {
    VersionControl(VersionControlData),
    QAndA(QaData),
    CompetitiveProgramming(CompetitiveData),
    Course(CourseData),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDataCache {
    pub version_control: Option<VersionControlData>,
    pub q_and_a: Option<QaData>,
    pub competitive: Option<CompetitiveData>,
    pub courses: Vec<CourseData>,
}

impl PlatformDataCache {
    /// Replaces the cache slot for the payload's platform family. Course
    /// platforms each keep their own entry in the multi-valued slot.
    pub fn store(&mut self, data: PlatformRawData) {
        match data {
            PlatformRawData::VersionControl(vc) => self.version_control = Some(vc),
            PlatformRawData::QAndA(qa) => self.q_and_a = Some(qa),
            PlatformRawData::CompetitiveProgramming(cp) => self.competitive = Some(cp),
            PlatformRawData::Course(course) => {
                self.courses.retain(|c| c.platform != course.platform);
                self.courses.push(course);
            }
        }
    }

    pub fn remove(&mut self, platform: Platform) {
        match platform {
            Platform::GitHub => self.version_control = None,
            Platform::StackOverflow => self.q_and_a = None,
            Platform::LeetCode => self.competitive = None,
            Platform::Udemy | Platform::Coursera => {
                self.courses.retain(|c| c.platform != platform)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningDnaProfile {
    pub user_id: String,
    pub overall_score: u32,
    pub dimensions: DimensionScores,
    pub platforms: Vec<PlatformConnection>,
    pub signals: Vec<AchievementSignal>,
    pub skills: Vec<DerivedSkill>,
    pub platform_data: PlatformDataCache,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proficiency_buckets_follow_thresholds() {
        assert_eq!(Proficiency::from_average_score(92.0), Proficiency::Expert);
        assert_eq!(Proficiency::from_average_score(80.0), Proficiency::Expert);
        assert_eq!(Proficiency::from_average_score(65.0), Proficiency::Advanced);
        assert_eq!(
            Proficiency::from_average_score(40.0),
            Proficiency::Intermediate
        );
        assert_eq!(Proficiency::from_average_score(10.0), Proficiency::Beginner);
    }

    #[test]
    fn default_connections_cover_every_platform_disconnected() {
        let connections = default_connections();
        assert_eq!(connections.len(), Platform::all().len());
        assert!(connections
            .iter()
            .all(|c| c.status == ConnectionStatus::Disconnected));
    }

    #[test]
    fn course_cache_replaces_per_platform() {
        let mut cache = PlatformDataCache::default();
        let course = |platform, completed| {
            PlatformRawData::Course(CourseData {
                platform,
                courses_completed: completed,
                total_hours: 12.0,
                certifications: 1,
                skills_learned: vec!["rust".to_string()],
            })
        };

        cache.store(course(Platform::Udemy, 3));
        cache.store(course(Platform::Coursera, 5));
        cache.store(course(Platform::Udemy, 7));

        assert_eq!(cache.courses.len(), 2);
        let udemy = cache
            .courses
            .iter()
            .find(|c| c.platform == Platform::Udemy)
            .unwrap();
        assert_eq!(udemy.courses_completed, 7);
    }

    #[test]
    fn access_token_is_never_serialized() {
        let mut connection = PlatformConnection::initial(Platform::GitHub);
        connection.access_token = Some("secret-token".to_string());
        let json = serde_json::to_string(&connection).unwrap();
        assert!(!json.contains("secret-token"));
    }
}
