//! Tag editor configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A length for the tag list region.
///
/// Numbers are pixel lengths; strings are passed through verbatim as CSS
/// lengths (`"50%"`, `"10em"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    /// A pixel length.
    Px(f64),
    /// Any other CSS length.
    Css(String),
}

impl Dimension {
    /// The CSS value for this length.
    pub fn to_css(&self) -> String {
        match self {
            Dimension::Px(px) => format!("{}px", px),
            Dimension::Css(s) => s.clone(),
        }
    }

    /// Convert a CSS length to terminal cells.
    ///
    /// `available` is the size of the containing axis in cells and `cell_px`
    /// the pixel size of one cell along that axis. Returns `None` for units
    /// that have no terminal meaning.
    pub fn to_cells(&self, available: u16, cell_px: f64) -> Option<u16> {
        let cells = match self {
            Dimension::Px(px) => px / cell_px,
            Dimension::Css(s) => {
                let s = s.trim();
                if let Some(pct) = s.strip_suffix('%') {
                    pct.trim().parse::<f64>().ok()? / 100.0 * f64::from(available)
                } else if let Some(px) = s.strip_suffix("px") {
                    px.trim().parse::<f64>().ok()? / cell_px
                } else {
                    s.parse::<f64>().ok()? / cell_px
                }
            }
        };
        if !cells.is_finite() || cells < 0.0 {
            return None;
        }
        Some(cells.round().min(f64::from(available)) as u16)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<u32> for Dimension {
    fn from(px: u32) -> Self {
        Dimension::Px(f64::from(px))
    }
}

impl From<f64> for Dimension {
    fn from(px: f64) -> Self {
        Dimension::Px(px)
    }
}

impl From<&str> for Dimension {
    fn from(css: &str) -> Self {
        Dimension::Css(css.to_string())
    }
}

/// Options for a [`TagEditor`](super::TagEditor).
///
/// Every field is optional. Both `snake_case` and the `camelCase` spellings
/// used by browser-side settings objects are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Keep the active visual state on regardless of focus.
    pub debug: bool,
    /// Width of the tag list region.
    pub width: Option<Dimension>,
    /// Height of the tag list region.
    pub height: Option<Dimension>,
    /// Maximum height of the tag list region.
    #[serde(alias = "maxHeight")]
    pub max_height: Option<Dimension>,
    /// Trim whitespace from committed tag text.
    #[serde(alias = "trimInput")]
    pub trim_input: bool,
}

impl EditorConfig {
    /// Parse options from a JSON object such as `{"maxHeight": 120}`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// CSS declarations for the tag list region, in a stable order.
    pub fn dimension_styles(&self) -> Vec<(&'static str, String)> {
        [
            ("width", &self.width),
            ("height", &self.height),
            ("max-height", &self.max_height),
        ]
        .into_iter()
        .filter_map(|(prop, dim)| dim.as_ref().map(|d| (prop, d.to_css())))
        .collect()
    }

    /// Overlay the options set in `other` onto `self`.
    ///
    /// Flags are OR-ed, dimensions from `other` win when present.
    pub fn merge(&mut self, other: &EditorConfig) {
        self.debug |= other.debug;
        self.trim_input |= other.trim_input;
        if other.width.is_some() {
            self.width = other.width.clone();
        }
        if other.height.is_some() {
            self.height = other.height.clone();
        }
        if other.max_height.is_some() {
            self.max_height = other.max_height.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_dimension_is_pixels() {
        assert_eq!(Dimension::from(120u32).to_css(), "120px");
        assert_eq!(Dimension::Px(12.5).to_css(), "12.5px");
    }

    #[test]
    fn test_string_dimension_passes_through() {
        assert_eq!(Dimension::from("50%").to_css(), "50%");
        assert_eq!(Dimension::from("10em").to_string(), "10em");
    }

    #[test]
    fn test_to_cells() {
        assert_eq!(Dimension::from(120u32).to_cells(40, 20.0), Some(6));
        assert_eq!(Dimension::from("50%").to_cells(40, 20.0), Some(20));
        assert_eq!(Dimension::from("60px").to_cells(40, 20.0), Some(3));
        assert_eq!(Dimension::from(10_000u32).to_cells(40, 20.0), Some(40));
        assert_eq!(Dimension::from("10em").to_cells(40, 20.0), None);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert!(!config.debug);
        assert!(!config.trim_input);
        assert!(config.dimension_styles().is_empty());
    }

    #[test]
    fn test_from_json_camel_case() {
        let config =
            EditorConfig::from_json(r#"{"maxHeight": 120, "width": "50%", "trimInput": true}"#)
                .unwrap();
        assert_eq!(config.max_height, Some(Dimension::Px(120.0)));
        assert_eq!(config.width, Some(Dimension::Css("50%".to_string())));
        assert!(config.trim_input);
        assert!(!config.debug);
    }

    #[test]
    fn test_from_toml_snake_case() {
        let config: EditorConfig = toml::from_str("debug = true\nmax_height = \"8em\"\n").unwrap();
        assert!(config.debug);
        assert_eq!(config.max_height, Some(Dimension::from("8em")));
    }

    #[test]
    fn test_dimension_styles_order() {
        let config = EditorConfig {
            max_height: Some(120u32.into()),
            width: Some("50%".into()),
            ..Default::default()
        };
        assert_eq!(
            config.dimension_styles(),
            vec![
                ("width", "50%".to_string()),
                ("max-height", "120px".to_string())
            ]
        );
    }

    #[test]
    fn test_merge() {
        let mut base = EditorConfig {
            width: Some(100u32.into()),
            ..Default::default()
        };
        let overlay = EditorConfig {
            trim_input: true,
            max_height: Some(50u32.into()),
            ..Default::default()
        };
        base.merge(&overlay);
        assert!(base.trim_input);
        assert_eq!(base.width, Some(Dimension::Px(100.0)));
        assert_eq!(base.max_height, Some(Dimension::Px(50.0)));
    }
}
