use std::fs;

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

const CONFIG_FILE: &str = "coach.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_base_url: String,
    pub video_feed_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".into(),
            video_feed_url: "http://localhost:5000/video_feed".into(),
        }
    }
}

impl Settings {
    /// Reject non-HTTP urls up front instead of failing on the first request.
    pub fn validated(self) -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: require_http_url(&self.api_base_url)?,
            video_feed_url: require_http_url(&self.video_feed_url)?,
        })
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(CONFIG_FILE).ok();
    build_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Precedence: defaults, then `coach.toml`, then environment variables.
fn build_settings(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        if let Ok(file_cfg) = toml::from_str::<Settings>(raw) {
            settings = file_cfg;
        }
    }

    if let Some(v) = env("COACH_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("COACH_VIDEO_FEED_URL") {
        settings.video_feed_url = v;
    }
    if let Some(v) = env("APP__VIDEO_FEED_URL") {
        settings.video_feed_url = v;
    }

    settings
}

fn require_http_url(raw: &str) -> anyhow::Result<String> {
    let parsed = Url::parse(raw).with_context(|| format!("invalid url: {raw}"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        bail!("url must start with http:// or https://: {raw}");
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_local_service() {
        let settings = build_settings(None, |_| None);
        assert_eq!(settings.api_base_url, "http://localhost:5000/api");
        assert_eq!(settings.video_feed_url, "http://localhost:5000/video_feed");
    }

    #[test]
    fn file_overrides_defaults() {
        let file = r#"
            api_base_url = "http://gym.local:8000/api"
        "#;
        let settings = build_settings(Some(file), |_| None);
        assert_eq!(settings.api_base_url, "http://gym.local:8000/api");
        // Keys absent from the file keep their defaults.
        assert_eq!(settings.video_feed_url, "http://localhost:5000/video_feed");
    }

    #[test]
    fn env_overrides_file() {
        let file = r#"
            api_base_url = "http://gym.local:8000/api"
        "#;
        let settings = build_settings(Some(file), |key| {
            (key == "COACH_API_URL").then(|| "http://coach.example/api".to_string())
        });
        assert_eq!(settings.api_base_url, "http://coach.example/api");
    }

    #[test]
    fn validation_rejects_non_http_schemes() {
        let settings = Settings {
            api_base_url: "ftp://nope".into(),
            ..Settings::default()
        };
        assert!(settings.validated().is_err());
    }

    #[test]
    fn validation_trims_trailing_slashes() {
        let settings = Settings {
            api_base_url: "http://localhost:5000/api/".into(),
            ..Settings::default()
        };
        let validated = settings.validated().unwrap();
        assert_eq!(validated.api_base_url, "http://localhost:5000/api");
    }
}
