use std::{fs, path::Path};

use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "planner.toml";
pub const DEFAULT_GENERATE_PATH: &str = "/generate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub generate_path: String,
    pub budget_tiers: Vec<String>,
    pub allow_overlapping_submissions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            generate_path: DEFAULT_GENERATE_PATH.into(),
            budget_tiers: vec!["low".into(), "medium".into(), "high".into()],
            allow_overlapping_submissions: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    generate_path: Option<String>,
    budget_tiers: Option<Vec<String>>,
    allow_overlapping_submissions: Option<bool>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then `path` if it exists and parses, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = v;
                }
                if let Some(v) = file_cfg.generate_path {
                    settings.generate_path = v;
                }
                if let Some(v) = file_cfg.budget_tiers {
                    settings.budget_tiers = v;
                }
                if let Some(v) = file_cfg.allow_overlapping_submissions {
                    settings.allow_overlapping_submissions = v;
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = env("PLANNER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__GENERATE_PATH") {
        settings.generate_path = v;
    }

    if let Some(v) = env("APP__BUDGET_TIERS") {
        let tiers: Vec<String> = v
            .split(',')
            .map(str::trim)
            .filter(|tier| !tier.is_empty())
            .map(str::to_string)
            .collect();
        if !tiers.is_empty() {
            settings.budget_tiers = tiers;
        }
    }

    if let Some(v) = env("APP__ALLOW_OVERLAPPING_SUBMISSIONS") {
        if let Ok(parsed) = v.trim().parse::<bool>() {
            settings.allow_overlapping_submissions = parsed;
        }
    }

    settings
}

/// Joins the service base URL and endpoint path with exactly one slash.
pub fn endpoint_url(server_url: &str, path: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}
