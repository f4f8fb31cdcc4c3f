use anyhow::{bail, Context};
use chrono::Utc;

use crate::extract::extract_signals;
use crate::models::{
    CompetitiveData, ConnectionStatus, CourseData, LearningDnaProfile, Platform,
    PlatformConnection, PlatformRawData, QaData, VersionControlData,
};
use crate::profile::{build_learning_dna_profile, merge_platform_signals, purge_platform};

/// Stand-in for the live platform API integrations, which are out of scope.
/// Payloads are deterministic per username so repeated syncs are stable.
pub async fn fetch_platform_data(
    platform: Platform,
    username: &str,
) -> anyhow::Result<PlatformRawData> {
    if username.trim().is_empty() {
        bail!("no username configured for {platform}");
    }

    let seed: u32 = username.bytes().map(u32::from).sum();

    let data = match platform {
        Platform::GitHub => PlatformRawData::VersionControl(VersionControlData {
            public_repos: 8 + seed % 40,
            followers: 5 + seed % 200,
            contributions_last_year: 150 + seed % 900,
            contributed_repos: seed % 20,
            total_prs: seed % 120,
            merged_prs: (seed % 120) * 3 / 4,
            total_stars: seed % 600,
            languages: [
                ("TypeScript".to_string(), 45.0 + (seed % 20) as f64),
                ("Rust".to_string(), 25.0),
                ("Python".to_string(), 15.0),
            ]
            .into_iter()
            .collect(),
        }),
        Platform::StackOverflow => PlatformRawData::QAndA(QaData {
            reputation: 300 + seed % 8000,
            gold_badges: seed % 3,
            silver_badges: seed % 12,
            bronze_badges: seed % 40,
            accepted_answers: seed % 60,
            total_questions: seed % 25,
            top_tags: vec![
                "typescript".to_string(),
                "rust".to_string(),
                "node.js".to_string(),
            ],
            reach: 10_000 + u64::from(seed) * 500,
        }),
        Platform::LeetCode => {
            let total = 40 + seed % 400;
            PlatformRawData::CompetitiveProgramming(CompetitiveData {
                total_solved: total,
                easy_solved: total / 2,
                medium_solved: total * 2 / 5,
                hard_solved: total - total / 2 - total * 2 / 5,
                ranking: 1_000 + seed % 90_000,
                contest_rating: if seed % 3 == 0 { 0 } else { 1_300 + seed % 900 },
            })
        }
        Platform::Udemy => PlatformRawData::Course(CourseData {
            platform,
            courses_completed: 1 + seed % 15,
            total_hours: 8.0 * (1 + seed % 15) as f64,
            certifications: seed % 4,
            skills_learned: vec!["react".to_string(), "javascript".to_string()],
        }),
        Platform::Coursera => PlatformRawData::Course(CourseData {
            platform,
            courses_completed: 1 + seed % 10,
            total_hours: 12.0 * (1 + seed % 10) as f64,
            certifications: 1 + seed % 3,
            skills_learned: vec!["machine-learning".to_string(), "python".to_string()],
        }),
    };

    Ok(data)
}

/// Marks a platform as pending ahead of its first sync.
pub fn begin_connect(profile: &mut LearningDnaProfile, platform: Platform, username: &str) {
    if let Some(connection) = connection_mut(profile, platform) {
        connection.status = ConnectionStatus::Pending;
        connection.username = Some(username.to_string());
        connection.error = None;
    }
}

/// Fetches one platform, replaces its signal slice and cache slot, and
/// rebuilds the profile. On fetch failure the connection records the error
/// and the existing signals are left untouched.
pub async fn sync_platform(
    profile: &mut LearningDnaProfile,
    platform: Platform,
) -> anyhow::Result<()> {
    let connection = connection_mut(profile, platform)
        .context("unknown platform")?;
    if connection.status == ConnectionStatus::Disconnected {
        bail!("{} is not connected", platform.display_name());
    }
    let username = connection.username.clone().unwrap_or_default();

    match fetch_platform_data(platform, &username).await {
        Ok(data) => {
            fold_platform_result(profile, platform, data);
            rebuild(profile);
            Ok(())
        }
        Err(err) => {
            if let Some(connection) = connection_mut(profile, platform) {
                connection.status = ConnectionStatus::Error;
                connection.error = Some(err.to_string());
            }
            rebuild(profile);
            Err(err)
        }
    }
}

#[derive(Debug)]
pub struct SyncOutcome {
    pub platform: Platform,
    pub error: Option<String>,
}

/// Fans out one fetch per connected platform, then performs a single
/// sequential fold and one profile rebuild so the derived scores never see a
/// partially updated signal list.
pub async fn sync_all(profile: &mut LearningDnaProfile) -> anyhow::Result<Vec<SyncOutcome>> {
    let targets: Vec<(Platform, String)> = profile
        .platforms
        .iter()
        .filter(|c| {
            matches!(
                c.status,
                ConnectionStatus::Connected | ConnectionStatus::Pending | ConnectionStatus::Error
            )
        })
        .map(|c| (c.platform, c.username.clone().unwrap_or_default()))
        .collect();

    let mut handles = Vec::new();
    for (platform, username) in targets {
        handles.push(tokio::spawn(async move {
            let result = fetch_platform_data(platform, &username).await;
            (platform, result)
        }));
    }

    let mut outcomes = Vec::new();
    for handle in handles {
        let (platform, result) = handle.await.context("sync task panicked")?;
        match result {
            Ok(data) => {
                fold_platform_result(profile, platform, data);
                outcomes.push(SyncOutcome {
                    platform,
                    error: None,
                });
            }
            Err(err) => {
                let message = err.to_string();
                if let Some(connection) = connection_mut(profile, platform) {
                    connection.status = ConnectionStatus::Error;
                    connection.error = Some(message.clone());
                }
                outcomes.push(SyncOutcome {
                    platform,
                    error: Some(message),
                });
            }
        }
    }

    rebuild(profile);
    Ok(outcomes)
}

/// Disconnects a platform, purging its signals and cached raw data, and
/// rebuilds the profile from what remains.
pub fn disconnect_platform(profile: &mut LearningDnaProfile, platform: Platform) {
    profile.signals = purge_platform(std::mem::take(&mut profile.signals), platform);
    profile.platform_data.remove(platform);
    if let Some(connection) = connection_mut(profile, platform) {
        connection.status = ConnectionStatus::Disconnected;
        connection.username = None;
        connection.access_token = None;
        connection.last_synced_at = None;
        connection.error = None;
    }
    rebuild(profile);
}

fn connection_mut(
    profile: &mut LearningDnaProfile,
    platform: Platform,
) -> Option<&mut PlatformConnection> {
    profile
        .platforms
        .iter_mut()
        .find(|c| c.platform == platform)
}

fn fold_platform_result(
    profile: &mut LearningDnaProfile,
    platform: Platform,
    data: PlatformRawData,
) {
    let now = Utc::now();
    let fresh = extract_signals(&data, platform, now);
    profile.signals = merge_platform_signals(std::mem::take(&mut profile.signals), platform, fresh);
    profile.platform_data.store(data);

    if let Some(connection) = connection_mut(profile, platform) {
        connection.status = ConnectionStatus::Connected;
        connection.last_synced_at = Some(now);
        connection.error = None;
    }
}

/// Recomputes dimensions, skills and the overall score, replacing the profile
/// snapshot in one step.
fn rebuild(profile: &mut LearningDnaProfile) {
    let user_id = std::mem::take(&mut profile.user_id);
    let rebuilt = build_learning_dna_profile(
        &user_id,
        std::mem::take(&mut profile.signals),
        std::mem::take(&mut profile.platform_data),
        std::mem::take(&mut profile.platforms),
        profile.created_at,
    );
    *profile = rebuilt;
}
