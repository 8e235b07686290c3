//! Notification request type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Notification";
pub const DEFAULT_TTL_SECS: u64 = 10;
pub const DEFAULT_SCALE_PERCENT: u32 = 100;

/// Where a banner is anchored on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerPosition {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    Center,
}

impl BannerPosition {
    /// Lenient parse: case-insensitive names or numeric indexes.
    /// Anything unrecognized falls back to [`BannerPosition::TopLeft`].
    pub fn parse(s: &str) -> Self {
        if let Ok(n) = s.trim().parse::<u8>() {
            return match n {
                0 => Self::TopLeft,
                1 => Self::TopCenter,
                2 => Self::TopRight,
                3 => Self::BottomLeft,
                4 => Self::BottomCenter,
                5 => Self::BottomRight,
                6 => Self::Center,
                _ => Self::TopLeft,
            };
        }
        match s.trim().to_lowercase().as_str() {
            "topleft" => Self::TopLeft,
            "topcenter" => Self::TopCenter,
            "topright" => Self::TopRight,
            "bottomleft" => Self::BottomLeft,
            "bottomcenter" => Self::BottomCenter,
            "bottomright" => Self::BottomRight,
            "center" => Self::Center,
            _ => Self::TopLeft,
        }
    }
}

/// Rendering hints carried through the pipeline untouched. The display
/// layer decides what to do with them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualHints {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_scale")]
    pub scale_percent: u32,
    #[serde(default)]
    pub sound: Option<String>,
}

fn default_scale() -> u32 {
    DEFAULT_SCALE_PERCENT
}

/// A single banner request. Immutable once admitted to the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub message: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    #[serde(default)]
    pub position: BannerPosition,
    #[serde(default)]
    pub use_primary_screen: bool,
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub exit_after_show: bool,
    #[serde(default)]
    pub hints: VisualHints,
    /// Stamped by the admission queue; `None` until then.
    #[serde(default)]
    pub enqueued_at: Option<DateTime<Utc>>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_ttl() -> u64 {
    DEFAULT_TTL_SECS
}

impl Default for NotificationRequest {
    fn default() -> Self {
        Self {
            message: String::new(),
            title: default_title(),
            ttl_seconds: DEFAULT_TTL_SECS,
            position: BannerPosition::default(),
            use_primary_screen: false,
            important: false,
            exit_after_show: false,
            hints: VisualHints::default(),
            enqueued_at: None,
        }
    }
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn has_message(&self) -> bool {
        !self.message.trim().is_empty()
    }
}

/// Parse a display duration. Non-numeric or zero input falls back to the
/// default; the result is always at least one second.
pub fn parse_ttl(s: &str) -> u64 {
    let ttl = s.trim().parse::<u64>().unwrap_or(DEFAULT_TTL_SECS);
    if ttl == 0 { DEFAULT_TTL_SECS } else { ttl }
}

/// Parse a boolean query/CLI value ("true", case-insensitive).
pub fn parse_flag(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("true")
}

/// Parse a scale percentage, falling back to 100.
pub fn parse_scale(s: &str) -> u32 {
    let scale = s.trim().parse::<u32>().unwrap_or(DEFAULT_SCALE_PERCENT);
    if scale == 0 { DEFAULT_SCALE_PERCENT } else { scale }
}
