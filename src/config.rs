//! User configuration: animation tuning and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/stack-scroll/config.toml` (default
//! `~/.config/stack-scroll/config.toml`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::core::driver::DriverTiming;
use crate::core::stack::AnimatorSettings;
use crate::core::style::StyleParams;

/// Horizontal size of one terminal cell, used to compare a terminal width
/// against the pixel breakpoint.
pub const CELL_WIDTH_PX: u32 = 8;

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("line {line}: `{key}` expects a number, got `{value}`")]
    InvalidNumber {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: `{key}` expects true or false, got `{value}`")]
    InvalidBool {
        line: usize,
        key: String,
        value: String,
    },
    #[error("`{key}` = {value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

// ───────────────────────────────────────── config ────────────

/// Animation configuration.  Every tuning constant that drifted between
/// iterations of the card stack lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    pub stack_scale: f64,
    /// Percent of card height per stack level.
    pub y_offset_per_level: f64,
    /// Depth at which recession stops (the stack cap).
    pub max_visible_stack_cards: usize,
    pub extension_factor: f64,
    pub mobile_breakpoint_px: u32,
    pub reduced_motion: bool,
    pub scale_saturation: f64,
    pub max_blur_px: f64,
    pub blur_per_level: f64,
    pub blur_enabled: bool,
    pub mobile_blur: bool,
    pub parallax_factor: f64,
    pub dim_per_level: f64,
    pub mobile_y_offset_per_level: f64,
    pub resize_debounce_ms: u64,
    pub motion_idle_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            stack_scale: 0.9,
            y_offset_per_level: 4.0,
            max_visible_stack_cards: 3,
            extension_factor: 1.0,
            mobile_breakpoint_px: 768,
            reduced_motion: false,
            scale_saturation: 1.5,
            max_blur_px: 8.0,
            blur_per_level: 3.0,
            blur_enabled: true,
            mobile_blur: false,
            parallax_factor: 2.0,
            dim_per_level: 0.15,
            mobile_y_offset_per_level: 2.0,
            resize_debounce_ms: 100,
            motion_idle_ms: 500,
            frame_interval_ms: 16,
        }
    }
}

impl AnimatorConfig {
    /// `true` when a viewport of `width_px` uses the mobile constants.
    pub fn is_mobile(&self, width_px: u32) -> bool {
        width_px < self.mobile_breakpoint_px
    }

    /// Resolve the desktop or mobile constant set for a viewport width.
    pub fn style_params(&self, viewport_width_px: u32) -> StyleParams {
        let mobile = self.is_mobile(viewport_width_px);
        StyleParams {
            stack_scale: self.stack_scale,
            scale_saturation: self.scale_saturation,
            y_offset_per_level: if mobile {
                self.mobile_y_offset_per_level
            } else {
                self.y_offset_per_level
            },
            parallax_factor: self.parallax_factor,
            stack_cap: self.max_visible_stack_cards,
            blur_per_level: self.blur_per_level,
            max_blur_px: self.max_blur_px,
            blur_enabled: self.blur_enabled && (!mobile || self.mobile_blur),
            dim_per_level: self.dim_per_level,
        }
    }

    pub fn animator_settings(&self, viewport_width_px: u32) -> AnimatorSettings {
        AnimatorSettings {
            style: self.style_params(viewport_width_px),
            extension_factor: self.extension_factor,
            reduced_motion: self.reduced_motion,
        }
    }

    pub fn driver_timing(&self) -> DriverTiming {
        DriverTiming {
            resize_debounce: Duration::from_millis(self.resize_debounce_ms),
            motion_idle: Duration::from_millis(self.motion_idle_ms),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Inclusive bounds for every numeric key, as `(key, value, min, max)`.
    fn ranges(&self) -> [(&'static str, f64, f64, f64); 13] {
        [
            ("stack_scale", self.stack_scale, 0.01, 1.0),
            ("extension_factor", self.extension_factor, 0.5, 1.0),
            ("max_visible_stack_cards", self.max_visible_stack_cards as f64, 1.0, 16.0),
            ("scale_saturation", self.scale_saturation, 0.01, 16.0),
            ("y_offset_per_level", self.y_offset_per_level, 0.0, 100.0),
            ("mobile_y_offset_per_level", self.mobile_y_offset_per_level, 0.0, 100.0),
            ("parallax_factor", self.parallax_factor, 0.0, 100.0),
            ("blur_per_level", self.blur_per_level, 0.0, 64.0),
            ("max_blur_px", self.max_blur_px, 0.0, 64.0),
            ("dim_per_level", self.dim_per_level, 0.0, 1.0),
            ("resize_debounce_ms", self.resize_debounce_ms as f64, 0.0, 2000.0),
            ("motion_idle_ms", self.motion_idle_ms as f64, 0.0, 10_000.0),
            ("frame_interval_ms", self.frame_interval_ms as f64, 1.0, 1000.0),
        ]
    }

    /// Every value outside its range, in declaration order.
    pub fn range_errors(&self) -> Vec<ConfigError> {
        self.ranges()
            .into_iter()
            .filter(|&(_, value, min, max)| !(min..=max).contains(&value))
            .map(|(key, value, min, max)| ConfigError::OutOfRange {
                key,
                value,
                min,
                max,
            })
            .collect()
    }

    /// Check ranges without modifying anything.  Reports the first offender.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.range_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Pull every value back into its valid range.  Non-finite values fall
    /// back to their defaults first.
    pub fn clamp(&mut self) {
        let d = Self::default();
        let finite = |v: f64, default: f64| if v.is_finite() { v } else { default };

        self.stack_scale = finite(self.stack_scale, d.stack_scale).clamp(0.01, 1.0);
        self.extension_factor = finite(self.extension_factor, d.extension_factor).clamp(0.5, 1.0);
        self.max_visible_stack_cards = self.max_visible_stack_cards.clamp(1, 16);
        self.scale_saturation = finite(self.scale_saturation, d.scale_saturation).clamp(0.01, 16.0);
        self.y_offset_per_level =
            finite(self.y_offset_per_level, d.y_offset_per_level).clamp(0.0, 100.0);
        self.mobile_y_offset_per_level =
            finite(self.mobile_y_offset_per_level, d.mobile_y_offset_per_level).clamp(0.0, 100.0);
        self.parallax_factor = finite(self.parallax_factor, d.parallax_factor).clamp(0.0, 100.0);
        self.blur_per_level = finite(self.blur_per_level, d.blur_per_level).clamp(0.0, 64.0);
        self.max_blur_px = finite(self.max_blur_px, d.max_blur_px).clamp(0.0, 64.0);
        self.dim_per_level = finite(self.dim_per_level, d.dim_per_level).clamp(0.0, 1.0);
        self.resize_debounce_ms = self.resize_debounce_ms.min(2000);
        self.motion_idle_ms = self.motion_idle_ms.min(10_000);
        self.frame_interval_ms = self.frame_interval_ms.clamp(1, 1000);
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => {
                    let (config, errors) = Self::parse(&contents);
                    for err in &errors {
                        tracing::warn!(path = %path.display(), "{err}");
                    }
                    tracing::info!(path = %path.display(), "loaded config");
                    return config;
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "could not read config");
                }
            }
        }
        Self::default()
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Parse a config file.  Bad lines keep their default and are returned as
    /// errors; unknown keys are ignored.
    pub fn parse(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for (i, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            let line_no = i + 1;

            let number = |errors: &mut Vec<ConfigError>| -> Option<f64> {
                match value.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(v),
                    _ => {
                        errors.push(ConfigError::InvalidNumber {
                            line: line_no,
                            key: key.to_string(),
                            value: value.to_string(),
                        });
                        None
                    }
                }
            };
            let flag = |errors: &mut Vec<ConfigError>| -> Option<bool> {
                match value {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => {
                        errors.push(ConfigError::InvalidBool {
                            line: line_no,
                            key: key.to_string(),
                            value: value.to_string(),
                        });
                        None
                    }
                }
            };

            match key {
                "stack_scale" => {
                    if let Some(v) = number(&mut errors) {
                        config.stack_scale = v;
                    }
                }
                "y_offset_per_level" => {
                    if let Some(v) = number(&mut errors) {
                        config.y_offset_per_level = v;
                    }
                }
                "max_visible_stack_cards" => {
                    if let Some(v) = number(&mut errors) {
                        config.max_visible_stack_cards = v.max(0.0) as usize;
                    }
                }
                "extension_factor" => {
                    if let Some(v) = number(&mut errors) {
                        config.extension_factor = v;
                    }
                }
                "mobile_breakpoint_px" => {
                    if let Some(v) = number(&mut errors) {
                        config.mobile_breakpoint_px = v.max(0.0) as u32;
                    }
                }
                "reduced_motion" => {
                    if let Some(v) = flag(&mut errors) {
                        config.reduced_motion = v;
                    }
                }
                "scale_saturation" => {
                    if let Some(v) = number(&mut errors) {
                        config.scale_saturation = v;
                    }
                }
                "max_blur_px" => {
                    if let Some(v) = number(&mut errors) {
                        config.max_blur_px = v;
                    }
                }
                "blur_per_level" => {
                    if let Some(v) = number(&mut errors) {
                        config.blur_per_level = v;
                    }
                }
                "blur_enabled" => {
                    if let Some(v) = flag(&mut errors) {
                        config.blur_enabled = v;
                    }
                }
                "mobile_blur" => {
                    if let Some(v) = flag(&mut errors) {
                        config.mobile_blur = v;
                    }
                }
                "parallax_factor" => {
                    if let Some(v) = number(&mut errors) {
                        config.parallax_factor = v;
                    }
                }
                "dim_per_level" => {
                    if let Some(v) = number(&mut errors) {
                        config.dim_per_level = v;
                    }
                }
                "mobile_y_offset_per_level" => {
                    if let Some(v) = number(&mut errors) {
                        config.mobile_y_offset_per_level = v;
                    }
                }
                "resize_debounce_ms" => {
                    if let Some(v) = number(&mut errors) {
                        config.resize_debounce_ms = v.max(0.0) as u64;
                    }
                }
                "motion_idle_ms" => {
                    if let Some(v) = number(&mut errors) {
                        config.motion_idle_ms = v.max(0.0) as u64;
                    }
                }
                "frame_interval_ms" => {
                    if let Some(v) = number(&mut errors) {
                        config.frame_interval_ms = v.max(0.0) as u64;
                    }
                }
                _ => {}
            }
        }

        errors.extend(config.range_errors());
        config.clamp();
        (config, errors)
    }

    pub fn serialise(&self) -> String {
        [
            "# stack-scroll configuration".to_string(),
            String::new(),
            "# Stack shape".to_string(),
            format!("stack_scale = {}", self.stack_scale),
            format!("scale_saturation = {}", self.scale_saturation),
            format!("y_offset_per_level = {}", self.y_offset_per_level),
            format!("parallax_factor = {}", self.parallax_factor),
            format!("max_visible_stack_cards = {}", self.max_visible_stack_cards),
            format!("extension_factor = {}", self.extension_factor),
            String::new(),
            "# Depth cues".to_string(),
            format!("blur_enabled = {}", self.blur_enabled),
            format!("blur_per_level = {}", self.blur_per_level),
            format!("max_blur_px = {}", self.max_blur_px),
            format!("dim_per_level = {}", self.dim_per_level),
            String::new(),
            "# Mobile (viewport narrower than the breakpoint)".to_string(),
            format!("mobile_breakpoint_px = {}", self.mobile_breakpoint_px),
            format!("mobile_blur = {}", self.mobile_blur),
            format!("mobile_y_offset_per_level = {}", self.mobile_y_offset_per_level),
            String::new(),
            "# Motion".to_string(),
            format!("reduced_motion = {}", self.reduced_motion),
            format!("resize_debounce_ms = {}", self.resize_debounce_ms),
            format!("motion_idle_ms = {}", self.motion_idle_ms),
            format!("frame_interval_ms = {}", self.frame_interval_ms),
            String::new(),
        ]
        .join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/stack-scroll/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_match_documented_surface() {
        let c = AnimatorConfig::default();
        assert_eq!(c.stack_scale, 0.9);
        assert_eq!(c.max_visible_stack_cards, 3);
        assert_eq!(c.extension_factor, 1.0);
        assert_eq!(c.mobile_breakpoint_px, 768);
        assert!(!c.reduced_motion);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn parses_keys_and_skips_noise() {
        let text = "\
# comment
[animation]
stack_scale = 0.85
extension_factor = 0.5
reduced_motion = true
unknown_key = 12
not a pair
";
        let (c, errors) = AnimatorConfig::parse(text);
        assert!(errors.is_empty());
        assert_eq!(c.stack_scale, 0.85);
        assert_eq!(c.extension_factor, 0.5);
        assert!(c.reduced_motion);
    }

    #[test]
    fn bad_values_keep_defaults_and_report() {
        let (c, errors) = AnimatorConfig::parse("stack_scale = big\nblur_enabled = maybe\n");
        assert_eq!(c.stack_scale, 0.9);
        assert!(c.blur_enabled);
        assert_eq!(
            errors[0],
            ConfigError::InvalidNumber {
                line: 1,
                key: "stack_scale".into(),
                value: "big".into(),
            }
        );
        assert!(matches!(errors[1], ConfigError::InvalidBool { line: 2, .. }));
    }

    #[rstest]
    #[case("extension_factor = 3", 1.0)]
    #[case("extension_factor = 0.1", 0.5)]
    #[case("extension_factor = 0.75", 0.75)]
    fn extension_factor_is_clamped(#[case] text: &str, #[case] expected: f64) {
        let (c, _) = AnimatorConfig::parse(text);
        assert_eq!(c.extension_factor, expected);
    }

    #[test]
    fn serialise_round_trips_through_parse() {
        let mut c = AnimatorConfig::default();
        c.mobile_blur = true;
        c.max_visible_stack_cards = 4;
        let (back, errors) = AnimatorConfig::parse(&c.serialise());
        assert!(errors.is_empty());
        assert_eq!(back, c);
    }

    #[rstest]
    #[case(1024, 4.0, true)]
    #[case(767, 2.0, false)]
    fn mobile_constants_below_breakpoint(
        #[case] width: u32,
        #[case] y_offset: f64,
        #[case] blur: bool,
    ) {
        let params = AnimatorConfig::default().style_params(width);
        assert_eq!(params.y_offset_per_level, y_offset);
        assert_eq!(params.blur_enabled, blur);
    }

    #[rstest]
    #[case("parallax_factor = -40", "parallax_factor")]
    #[case("y_offset_per_level = -10", "y_offset_per_level")]
    #[case("mobile_y_offset_per_level = -1", "mobile_y_offset_per_level")]
    #[case("blur_per_level = -3", "blur_per_level")]
    #[case("motion_idle_ms = 50000", "motion_idle_ms")]
    #[case("frame_interval_ms = 0", "frame_interval_ms")]
    #[case("max_blur_px = 500", "max_blur_px")]
    fn out_of_range_keys_are_reported_and_clamped(#[case] text: &str, #[case] key: &str) {
        let (c, errors) = AnimatorConfig::parse(text);
        assert!(
            matches!(&errors[..], [ConfigError::OutOfRange { key: k, .. }] if *k == key),
            "{errors:?}"
        );
        assert!(c.validate().is_ok());
    }

    #[test]
    fn every_bad_key_is_reported_and_cards_still_recede_upward() {
        let (c, errors) = AnimatorConfig::parse(
            "motion_idle_ms = 50000\nparallax_factor = -40\ny_offset_per_level = -10\n",
        );
        assert_eq!(errors.len(), 3);
        assert_eq!(c.motion_idle_ms, 10_000);
        assert_eq!(c.parallax_factor, 0.0);
        assert_eq!(c.y_offset_per_level, 0.0);

        let style = crate::core::style::style_of(2.0, false, &c.style_params(1024));
        assert!(style.translate_y <= 0.0);
    }

    #[test]
    fn non_finite_values_fall_back_to_defaults() {
        let mut c = AnimatorConfig {
            extension_factor: f64::NAN,
            parallax_factor: f64::INFINITY,
            ..AnimatorConfig::default()
        };
        assert!(c.validate().is_err());
        c.clamp();
        assert_eq!(c.extension_factor, 1.0);
        assert_eq!(c.parallax_factor, 2.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn save_then_load_through_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let saved = AnimatorConfig {
            reduced_motion: true,
            extension_factor: 0.75,
            max_visible_stack_cards: 2,
            ..AnimatorConfig::default()
        };
        saved.save_to(&path).unwrap();
        assert_eq!(AnimatorConfig::load_from(&path), saved);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AnimatorConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(loaded, AnimatorConfig::default());
    }

    #[test]
    fn error_messages_name_the_key() {
        let err = ConfigError::OutOfRange {
            key: "stack_scale",
            value: 2.0,
            min: 0.01,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "`stack_scale` = 2 is outside 0.01..=1");
    }
}
