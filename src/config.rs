use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::source::FramePattern;
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::scroll::scrub::Scrub;

/// Player settings. Every field has a default, so an empty JSON object is valid.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Directory holding the frame files.
    pub base_path: PathBuf,
    /// Container height in percent of the viewport height; sets the scroll distance.
    pub scroll_length_vh: f64,
    pub pattern: FramePattern,
    pub scrub: Scrub,
    /// Straight RGBA8 color painted under each frame; transparent when unset.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            scroll_length_vh: 300.0,
            pattern: FramePattern::default(),
            scrub: Scrub::default(),
            clear_rgba: None,
        }
    }
}

impl PlayerConfig {
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn validate(&self) -> ScrubResult<()> {
        if !self.scroll_length_vh.is_finite() || self.scroll_length_vh < 100.0 {
            return Err(ScrubError::validation(format!(
                "scroll_length_vh must be a finite value >= 100, got {}",
                self.scroll_length_vh
            )));
        }
        if let Scrub::Seconds(s) = self.scrub
            && (!s.is_finite() || s < 0.0)
        {
            return Err(ScrubError::validation(format!(
                "scrub seconds must be finite and >= 0, got {s}"
            )));
        }
        self.pattern.validate()
    }

    pub fn from_json_str(s: &str) -> ScrubResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ScrubError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON config file. A relative `base_path` is resolved against the file's directory.
    pub fn from_json_path(path: &Path) -> ScrubResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg = Self::from_json_str(&text)?;
        if cfg.base_path.is_relative()
            && let Some(dir) = path.parent()
        {
            cfg.base_path = dir.join(&cfg.base_path);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = PlayerConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, PlayerConfig::default());
        assert_eq!(cfg.scroll_length_vh, 300.0);
        assert_eq!(cfg.scrub, Scrub::Seconds(1.0));
        assert_eq!(cfg.pattern.file_name(0), "frame-001.jpg");
    }

    #[test]
    fn fields_parse() {
        let cfg = PlayerConfig::from_json_str(
            r#"{
                "base_path": "/srv/hero",
                "scroll_length_vh": 500,
                "scrub": "off",
                "clear_rgba": [0, 0, 0, 255],
                "pattern": { "extension": "png" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.base_path, PathBuf::from("/srv/hero"));
        assert_eq!(cfg.scroll_length_vh, 500.0);
        assert_eq!(cfg.scrub, Scrub::Off);
        assert_eq!(cfg.clear_rgba, Some([0, 0, 0, 255]));
        assert_eq!(cfg.pattern.file_name(1), "frame-002.png");

        let cfg = PlayerConfig::from_json_str(r#"{ "scrub": { "seconds": 0.25 } }"#).unwrap();
        assert_eq!(cfg.scrub, Scrub::Seconds(0.25));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            PlayerConfig::from_json_str(r#"{ "scroll_length_vh": 50 }"#),
            Err(ScrubError::Validation(_))
        ));
        assert!(matches!(
            PlayerConfig::from_json_str(r#"{ "scrub": { "seconds": -1 } }"#),
            Err(ScrubError::Validation(_))
        ));
        assert!(matches!(
            PlayerConfig::from_json_str(r#"{ "unknown": 1 }"#),
            Err(ScrubError::Serde(_))
        ));
    }

    #[test]
    fn relative_base_path_resolves_next_to_config() {
        let dir = PathBuf::from("target").join("scrubreel_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("player.json");
        std::fs::write(&path, r#"{ "base_path": "frames" }"#).unwrap();

        let cfg = PlayerConfig::from_json_path(&path).unwrap();
        assert_eq!(cfg.base_path, dir.join("frames"));
    }
}
