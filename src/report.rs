use std::fmt::Write;

use crate::models::{ConnectionStatus, LearningDnaProfile};

pub fn build_report(profile: &LearningDnaProfile) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Learning DNA Report");
    let _ = writeln!(output, "Profile for {}", profile.user_id);
    if let Some(synced) = profile.last_synced_at {
        let _ = writeln!(output, "Last synced {}", synced.format("%Y-%m-%d %H:%M UTC"));
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overall Score: {}/100", profile.overall_score);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Dimensions");

    let d = &profile.dimensions;
    for (name, score) in [
        ("Contribution", d.contribution),
        ("Problem Solving", d.problem_solving),
        ("Learning", d.learning),
        ("Community", d.community),
        ("Breadth", d.breadth),
        ("Depth", d.depth),
    ] {
        let _ = writeln!(output, "- {name}: {score}/100");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Skills");

    if profile.skills.is_empty() {
        let _ = writeln!(output, "No skills derived yet. Connect a platform and sync.");
    } else {
        for skill in profile.skills.iter().take(10) {
            let _ = writeln!(
                output,
                "- {} ({:?}, confidence {}) from {} pieces of evidence",
                skill.name,
                skill.proficiency,
                skill.confidence,
                skill.evidence.len()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Platforms");

    for connection in profile.platforms.iter() {
        let status = match connection.status {
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Pending => "pending",
            ConnectionStatus::Error => "error",
        };
        match (&connection.username, &connection.error) {
            (_, Some(error)) => {
                let _ = writeln!(output, "- {}: {status} ({error})", connection.display_name);
            }
            (Some(username), None) => {
                let _ = writeln!(
                    output,
                    "- {}: {status} as {username}",
                    connection.display_name
                );
            }
            (None, None) => {
                let _ = writeln!(output, "- {}: {status}", connection.display_name);
            }
        }
    }

    let mut recent_signals = profile.signals.clone();
    recent_signals.sort_by(|a, b| b.earned_at.cmp(&a.earned_at));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Signals");

    if recent_signals.is_empty() {
        let _ = writeln!(output, "No signals recorded yet.");
    } else {
        for signal in recent_signals.iter().take(8) {
            let _ = writeln!(
                output,
                "- {} ({}) scored {}: {}",
                signal.title,
                signal.platform.display_name(),
                signal.normalized_score,
                signal.description
            );
        }
    }

    output
}
