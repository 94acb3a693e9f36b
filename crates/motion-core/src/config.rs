use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

/// Particle backdrop tuning. Distances in CSS px, speeds in px per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    /// Canvas area per particle; count = floor(W*H / area_per_particle).
    pub area_per_particle: f32,
    /// Half-range of each velocity component.
    pub speed: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub link_distance: f32,
    pub link_alpha: f32,
    pub link_width: f32,
    pub pointer_distance: f32,
    pub pointer_alpha: f32,
    pub pointer_width: f32,
    /// Alpha of the black rect painted over the previous frame.
    pub trail_alpha: f32,
    pub shadow_blur: f32,
    pub particle_color: [u8; 3],
    pub link_mid_color: [u8; 3],
    pub pointer_color: [u8; 3],
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_particle: 8000.0,
            speed: 0.75,
            min_size: 0.5,
            max_size: 2.0,
            min_opacity: 0.3,
            max_opacity: 0.7,
            link_distance: 150.0,
            link_alpha: 0.4,
            link_width: 0.8,
            pointer_distance: 200.0,
            pointer_alpha: 0.3,
            pointer_width: 1.0,
            trail_alpha: 0.05,
            shadow_blur: 3.0,
            particle_color: [200, 220, 255],
            link_mid_color: [150, 180, 255],
            pointer_color: [100, 150, 255],
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.area_per_particle > 0.0) {
            return Err(MotionError::InvalidConfig(
                "area_per_particle must be positive".into(),
            ));
        }
        if self.speed < 0.0 || self.min_size > self.max_size || self.min_opacity > self.max_opacity {
            return Err(MotionError::InvalidConfig(
                "particle ranges must be non-negative and ordered".into(),
            ));
        }
        if !(self.link_distance > 0.0) || !(self.pointer_distance > 0.0) {
            return Err(MotionError::InvalidConfig(
                "link and pointer distances must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Pinned-video reveal on the work page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Raw progress at which the phase starts moving.
    pub start: f32,
    /// Raw progress at which the phase reaches 1.
    pub end: f32,
    /// Text start offset = viewport_h * text_offset_factor + text_offset_px.
    pub text_offset_factor: f32,
    pub text_offset_px: f32,
    /// Eased value below which the text stays invisible.
    pub text_fade_start: f32,
    pub overlay_max_opacity: f32,
    pub overlay_max_blur: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            start: 0.15,
            end: 1.0,
            text_offset_factor: 0.7,
            text_offset_px: 140.0,
            text_fade_start: 0.1,
            overlay_max_opacity: 0.75,
            overlay_max_blur: 16.0,
        }
    }
}

impl ScrollConfig {
    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(self.start) || !in_unit(self.end) || self.end <= self.start {
            return Err(MotionError::InvalidConfig(format!(
                "scroll window [{}, {}] must satisfy 0 <= start < end <= 1",
                self.start, self.end
            )));
        }
        if !(0.0..1.0).contains(&self.text_fade_start) {
            return Err(MotionError::InvalidConfig(
                "text_fade_start must be in [0, 1)".into(),
            ));
        }
        Ok(())
    }
}

/// Intersection options for one-shot reveals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Visible ratio needed to count as intersecting.
    pub threshold: f32,
    /// Bottom root margin in px; negative triggers before full visibility.
    pub root_margin_bottom: f32,
    /// Apply reveals immediately, ignoring per-element delays.
    pub reduced_motion: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin_bottom: -50.0,
            reduced_motion: false,
        }
    }
}

impl RevealConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MotionError::InvalidConfig(format!(
                "reveal threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }

    /// CSS `rootMargin` string for an IntersectionObserver.
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.root_margin_bottom)
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub field: FieldConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
}

impl MotionConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: MotionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        self.scroll.validate()?;
        self.reveal.validate()
    }
}
