//! Locally persisted drafts.
//!
//! All drafts live in one JSON document (an array, newest first) that is
//! read and rewritten as a whole. There is a single writer, so no locking.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::DistillError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub content: String,
    pub output_format: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,
    /// Epoch milliseconds
    pub updated_at: i64,
}

/// Fields of a draft to be created
#[derive(Debug, Clone, Default)]
pub struct NewDraft {
    pub content: String,
    pub output_format: String,
    pub summary: Option<String>,
}

/// Fields to overwrite on update; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub content: Option<String>,
    pub output_format: Option<String>,
    pub summary: Option<String>,
}

pub struct DraftStore {
    path: PathBuf,
}

impl DraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All drafts, newest first
    pub fn list(&self) -> Result<Vec<Draft>, DistillError> {
        match fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Draft>, DistillError> {
        Ok(self.list()?.into_iter().find(|draft| draft.id == id))
    }

    pub fn create(&self, draft: NewDraft) -> Result<Draft, DistillError> {
        let mut drafts = self.list()?;
        let now = now_millis();

        let mut id = generate_id(now);
        while drafts.iter().any(|existing| existing.id == id) {
            id = generate_id(now);
        }

        let draft = Draft {
            id,
            content: draft.content,
            output_format: draft.output_format,
            summary: draft.summary,
            updated_at: now,
        };
        drafts.insert(0, draft.clone());
        self.save(&drafts)?;
        debug!("Saved draft {}", draft.id);

        Ok(draft)
    }

    /// Merge `patch` into draft `id`; `false` when there is no such draft
    pub fn update(&self, id: &str, patch: DraftPatch) -> Result<bool, DistillError> {
        let mut drafts = self.list()?;
        let Some(draft) = drafts.iter_mut().find(|draft| draft.id == id) else {
            return Ok(false);
        };

        if let Some(content) = patch.content {
            draft.content = content;
        }
        if let Some(output_format) = patch.output_format {
            draft.output_format = output_format;
        }
        if let Some(summary) = patch.summary {
            draft.summary = Some(summary);
        }
        draft.updated_at = now_millis();

        self.save(&drafts)?;
        Ok(true)
    }

    /// Remove draft `id`; `false` when nothing was removed
    pub fn delete(&self, id: &str) -> Result<bool, DistillError> {
        let mut drafts = self.list()?;
        let before = drafts.len();
        drafts.retain(|draft| draft.id != id);

        if drafts.len() == before {
            return Ok(false);
        }

        self.save(&drafts)?;
        Ok(true)
    }

    // Write a sibling temp file, then rename over the store.
    fn save(&self, drafts: &[Draft]) -> Result<(), DistillError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_vec(drafts)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Random part followed by the timestamp, both base36
fn generate_id(now_millis: i64) -> String {
    let random = Uuid::new_v4().as_u128() >> 64;
    format!(
        "{}{}",
        to_base36(random),
        to_base36(now_millis.max(0) as u128)
    )
}

/// Render `timestamp` (epoch ms) relative to the current time
pub fn format_relative_time(timestamp: i64) -> String {
    format_relative_time_at(timestamp, Utc::now())
}

/// Render `timestamp` (epoch ms) relative to `now`.
///
/// Under an hour: minutes; under a day: hours; otherwise a calendar date
/// whose year is shown only when it differs from `now`'s.
pub fn format_relative_time_at(timestamp: i64, now: DateTime<Utc>) -> String {
    let elapsed_ms = (now.timestamp_millis() - timestamp).max(0);
    let minutes = elapsed_ms / 60_000;
    let hours = elapsed_ms / 3_600_000;

    if hours < 1 {
        return format!("{} minute{} ago", minutes, if minutes == 1 { "" } else { "s" });
    }
    if hours < 24 {
        return format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" });
    }

    match Utc.timestamp_millis_opt(timestamp).single() {
        Some(date) if date.year() != now.year() => date.format("%b %-d, %Y").to_string(),
        Some(date) => date.format("%b %-d").to_string(),
        None => String::new(),
    }
}
