use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::models::LearningDnaProfile;

/// JSON-file key-value store for profiles, one blob per user id. The engine
/// never reads or writes this directly; only the CLI does.
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn profile_path(&self, user_id: &str) -> PathBuf {
        self.root.join(format!("{user_id}.json"))
    }

    pub fn load(&self, user_id: &str) -> anyhow::Result<Option<LearningDnaProfile>> {
        let path = self.profile_path(user_id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read profile at {}", path.display()))?;
        let profile = serde_json::from_str(&raw)
            .with_context(|| format!("malformed profile at {}", path.display()))?;
        Ok(Some(profile))
    }

    /// Writes through a temp file and renames, so a crash mid-write never
    /// leaves a truncated profile behind.
    pub fn save(&self, profile: &LearningDnaProfile) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        let path = self.profile_path(&profile.user_id);
        let tmp = path.with_extension("json.tmp");

        let raw = serde_json::to_string_pretty(profile).context("failed to serialize profile")?;
        fs::write(&tmp, raw)
            .with_context(|| format!("failed to write profile at {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to replace profile at {}", path.display()))?;
        Ok(())
    }
}
