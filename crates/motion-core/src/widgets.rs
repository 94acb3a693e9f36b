//! Configuration contracts for decorative widgets rendered elsewhere.
//!
//! The engine does not draw these. It only parses and checks the option
//! objects a page hands to them, so typos fail loudly instead of silently
//! falling back to defaults.

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WidgetConfig {
    Metaballs(MetaballsConfig),
    LaserFlow(LaserFlowConfig),
    TextPressure(TextPressureConfig),
    Particles(ParticlesConfig),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MetaballsConfig {
    pub color: String,
    pub cursor_ball_color: String,
    pub ball_count: u32,
    pub speed: f32,
    pub enable_mouse_interaction: bool,
    pub enable_transparency: bool,
}

impl Default for MetaballsConfig {
    fn default() -> Self {
        Self {
            color: "#ffffff".into(),
            cursor_ball_color: "#ffffff".into(),
            ball_count: 15,
            speed: 0.3,
            enable_mouse_interaction: true,
            enable_transparency: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LaserFlowConfig {
    pub color: String,
    pub horizontal_beam_offset: f32,
    pub vertical_beam_offset: f32,
    pub flow_speed: f32,
    pub fog_intensity: f32,
    pub mouse_tilt: bool,
}

impl Default for LaserFlowConfig {
    fn default() -> Self {
        Self {
            color: "#ff79c6".into(),
            horizontal_beam_offset: 0.1,
            vertical_beam_offset: 0.0,
            flow_speed: 0.35,
            fog_intensity: 0.45,
            mouse_tilt: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct TextPressureConfig {
    pub text: String,
    pub text_color: String,
    pub min_font_size: f32,
    pub width: bool,
    pub weight: bool,
    pub italic: bool,
    pub flex: bool,
}

impl Default for TextPressureConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_color: "#ffffff".into(),
            min_font_size: 24.0,
            width: true,
            weight: true,
            italic: true,
            flex: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ParticlesConfig {
    pub colors: Vec<String>,
    pub particle_count: u32,
    pub speed: f32,
    pub move_on_hover: bool,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            colors: vec!["#ffffff".into()],
            particle_count: 200,
            speed: 0.1,
            move_on_hover: false,
        }
    }
}

fn check_color(field: &str, value: &str) -> Result<()> {
    let hex = value.strip_prefix('#').unwrap_or("");
    let ok = matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if ok {
        Ok(())
    } else {
        Err(MotionError::InvalidConfig(format!("{field}: `{value}` is not a hex color")))
    }
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WidgetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            WidgetConfig::Metaballs(c) => {
                check_color("color", &c.color)?;
                check_color("cursorBallColor", &c.cursor_ball_color)?;
                if c.ball_count == 0 {
                    return Err(MotionError::InvalidConfig("ballCount must be at least 1".into()));
                }
            }
            WidgetConfig::LaserFlow(c) => check_color("color", &c.color)?,
            WidgetConfig::TextPressure(c) => {
                check_color("textColor", &c.text_color)?;
                if c.text.is_empty() {
                    return Err(MotionError::InvalidConfig("text must not be empty".into()));
                }
            }
            WidgetConfig::Particles(c) => {
                for color in &c.colors {
                    check_color("colors", color)?;
                }
            }
        }
        Ok(())
    }
}
