use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum Priority {
    #[value(name = "High", alias = "high")]
    High,
    #[default]
    #[value(name = "Medium", alias = "medium")]
    Medium,
    #[value(name = "Low", alias = "low")]
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Case-insensitive lookup of a saved priority name.
    pub fn parse_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Saved priorities match in any case; unknown names fall back to Medium
/// instead of making the whole record unreadable.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_loose(&raw).unwrap_or_else(|| {
            tracing::warn!(priority = %raw, "unknown saved priority, using Medium");
            Self::Medium
        }))
    }
}

/// A single to-do item as persisted in the `tasks` slot.
///
/// Fields added after the first release (`completed`, `priority`,
/// `completedAt`) default when missing or `null`, so older blobs still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(rename = "completedAt", default)]
    pub completed_at: Option<String>,
}

impl Task {
    pub fn new(id: u64, text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            priority,
            completed_at: None,
        }
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.completed_at = completed.then(local_timestamp);
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Current local time, e.g. `10/19/2026, 3:04:05 PM`.
pub fn local_timestamp() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
