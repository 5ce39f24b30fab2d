use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::calendar::latest_draw;

/// Which upstream the draws are read from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Results page, parsed from its description meta tag.
    #[default]
    Page,
    /// Lottery operator's JSON endpoint.
    Json,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "page" => Ok(Self::Page),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown source '{}' (expected page or json)", other)),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub bind: String,            // listen address
    pub source: SourceKind,
    pub page_url: String,        // "{drw_no}" is replaced with the draw index
    pub json_url: String,        // same placeholder
    pub timeout_secs: u64,       // per outbound request
    pub concurrency: usize,      // in-flight fetches while aggregating
    pub max_draw: Option<u32>,   // last draw to scan; None = derive from the clock
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            source: SourceKind::Page,
            page_url: "https://superkts.com/lotto/{drw_no}".to_string(),
            json_url: "https://www.dhlottery.co.kr/common.do?method=getLottoNumber&drwNo={drw_no}"
                .to_string(),
            timeout_secs: 10,
            concurrency: 8,
            max_draw: None,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(Path::new("config.toml"))
    }

    /// Missing file → defaults. A file that fails to parse is reported and
    /// also falls back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::from_toml(&s).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// `LOTTO_BIND` and `LOTTO_MAX_DRAW` override the file.
    pub fn apply_env(&mut self) {
        if let Ok(bind) = std::env::var("LOTTO_BIND") {
            if !bind.trim().is_empty() {
                self.bind = bind.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("LOTTO_MAX_DRAW") {
            match v.trim().parse::<u32>() {
                Ok(n) => self.max_draw = Some(n),
                Err(_) => tracing::warn!(value = %v, "ignoring non-numeric LOTTO_MAX_DRAW"),
            }
        }
    }

    /// Last draw to scan at `now`.
    pub fn max_draw_at(&self, now: DateTime<Utc>) -> u32 {
        self.max_draw.unwrap_or_else(|| latest_draw(now))
    }
}

/// Substitute the draw index into a URL template.
pub fn fill_url(template: &str, draw_no: u32) -> String {
    template.replace("{drw_no}", &draw_no.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = Config::from_toml("max_draw = 1160\nsource = \"json\"\n").expect("toml");
        assert_eq!(cfg.max_draw, Some(1160));
        assert_eq!(cfg.source, SourceKind::Json);
        assert_eq!(cfg.timeout_secs, 10);
        assert_eq!(cfg.concurrency, 8);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(Config::from_toml("concurrency = \"many\"").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = Config::load_from(Path::new("does/not/exist.toml"));
        assert_eq!(cfg.bind, "0.0.0.0:8080");
        assert_eq!(cfg.max_draw, None);
    }

    #[test]
    fn url_templates() {
        let cfg = Config::default();
        assert_eq!(fill_url(&cfg.page_url, 1155), "https://superkts.com/lotto/1155");
        assert!(fill_url(&cfg.json_url, 7).ends_with("drwNo=7"));
    }

    #[test]
    fn configured_max_draw_wins_over_clock() {
        let cfg = Config { max_draw: Some(3), ..Config::default() };
        assert_eq!(cfg.max_draw_at(Utc::now()), 3);
        let derived = Config::default().max_draw_at(Utc::now());
        assert!(derived > 1000);
    }

    #[test]
    fn source_kind_from_str() {
        assert_eq!("JSON".parse::<SourceKind>(), Ok(SourceKind::Json));
        assert!("html".parse::<SourceKind>().is_err());
    }
}
