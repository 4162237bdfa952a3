use grid_resample::PixelSettings;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Largest preview side in pixels
    pub preview_size: u32,

    /// Quiet period before a burst of edits is resampled
    pub debounce_ms: u64,

    /// Upload body limit for source images
    pub max_upload_bytes: usize,

    /// Re-compress exported PNGs with oxipng
    pub optimize_png: bool,

    /// Grid overlay appearance
    pub grid: GridStyle,

    /// Settings applied to a fresh session
    pub defaults: DefaultSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preview_size: 512,
            debounce_ms: 16,
            max_upload_bytes: 25 * 1024 * 1024,
            optimize_png: true,
            grid: GridStyle::default(),
            defaults: DefaultSettings::default(),
        }
    }
}

/// Grid overlay line color
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GridStyle {
    /// Hex RGB, e.g. "#FFFFFF"
    pub color: String,

    /// Line opacity in [0, 1]
    pub opacity: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: "#FFFFFF".to_string(),
            opacity: 0.25,
        }
    }
}

impl GridStyle {
    /// Line color as RGBA8. Unparseable colors fall back to white.
    pub fn rgba(&self) -> [u8; 4] {
        let (r, g, b) = parse_hex_rgb(&self.color).unwrap_or_else(|| {
            tracing::warn!(color = %self.color, "Invalid grid color, using white");
            (255, 255, 255)
        });
        let a = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        [r, g, b, a]
    }
}

/// Initial pixelation settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DefaultSettings {
    pub grid_size: u32,
    pub contrast: i32,
    pub saturation: i32,
    pub show_grid: bool,
    pub export_multiplier: u32,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            grid_size: 32,
            contrast: 0,
            saturation: 0,
            show_grid: true,
            export_multiplier: 16,
        }
    }
}

impl DefaultSettings {
    /// The configured defaults, clamped into range
    pub fn pixel_settings(&self) -> PixelSettings {
        PixelSettings {
            grid_size: self.grid_size,
            contrast: self.contrast,
            saturation: self.saturation,
            show_grid: self.show_grid,
        }
        .clamped()
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file configured, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        preview_size = config.preview_size,
                        debounce_ms = config.debounce_ms,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Parse "#RRGGBB" or "RRGGBB"
fn parse_hex_rgb(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
