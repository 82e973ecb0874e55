//! Viewport classes and the per-class sizing table.
//!
//! All responsive behavior is data: a [`LayoutConfig`] maps each [`ViewportClass`] to a
//! [`ViewportProfile`] of pixel constants. Callers can deserialize overrides from JSON; any
//! omitted field keeps its default.

use crate::model::{Canvas, Size};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Phones and narrow panes.
    Compact,
    /// Tablets and half-width windows.
    Medium,
    #[default]
    Full,
}

impl std::str::FromStr for ViewportClass {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" | "mobile" => Ok(Self::Compact),
            "medium" | "tablet" => Ok(Self::Medium),
            "full" | "desktop" => Ok(Self::Full),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }
}

/// Pixel constants for one viewport class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportProfile {
    pub node_width: Range,
    pub node_height: Range,
    /// Gap assumed between nodes when fitting the widest level into the canvas.
    pub sizing_allowance_x: f64,
    /// Gap assumed between levels when fitting all levels into the canvas.
    pub sizing_allowance_y: f64,
    pub gap_base_x: f64,
    pub gap_base_y: f64,
    pub gap_ratio_x: f64,
    pub gap_ratio_y: f64,
    pub gap_floor_x: f64,
    pub gap_floor_y: f64,
    pub scale: Range,
    pub padding_side: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub min_top_bias: f64,
}

impl ViewportProfile {
    pub fn compact() -> Self {
        Self {
            node_width: Range::new(120.0, 200.0),
            node_height: Range::new(80.0, 110.0),
            sizing_allowance_x: 16.0,
            sizing_allowance_y: 32.0,
            gap_base_x: 16.0,
            gap_base_y: 32.0,
            gap_ratio_x: 0.12,
            gap_ratio_y: 0.5,
            gap_floor_x: 12.0,
            gap_floor_y: 24.0,
            scale: Range::new(0.75, 1.0),
            padding_side: 16.0,
            padding_top: 64.0,
            padding_bottom: 80.0,
            min_top_bias: 12.0,
        }
    }

    pub fn medium() -> Self {
        Self {
            node_width: Range::new(150.0, 260.0),
            node_height: Range::new(90.0, 130.0),
            sizing_allowance_x: 28.0,
            sizing_allowance_y: 48.0,
            gap_base_x: 28.0,
            gap_base_y: 48.0,
            gap_ratio_x: 0.15,
            gap_ratio_y: 0.6,
            gap_floor_x: 20.0,
            gap_floor_y: 32.0,
            scale: Range::new(0.8, 1.05),
            padding_side: 48.0,
            padding_top: 72.0,
            padding_bottom: 120.0,
            min_top_bias: 16.0,
        }
    }

    /// Desktop constants: 80px header bar plus 10px of top padding, 160px reserved below.
    pub fn full() -> Self {
        Self {
            node_width: Range::new(180.0, 320.0),
            node_height: Range::new(100.0, 140.0),
            sizing_allowance_x: 40.0,
            sizing_allowance_y: 60.0,
            gap_base_x: 40.0,
            gap_base_y: 60.0,
            gap_ratio_x: 0.18,
            gap_ratio_y: 0.7,
            gap_floor_x: 25.0,
            gap_floor_y: 40.0,
            scale: Range::new(0.85, 1.1),
            padding_side: 80.0,
            padding_top: 90.0,
            padding_bottom: 160.0,
            min_top_bias: 20.0,
        }
    }

    /// Area left for nodes once padding is taken off, never below one pixel per axis.
    pub fn drawable(&self, canvas: Canvas) -> Size {
        Size::new(
            (canvas.width - 2.0 * self.padding_side).max(1.0),
            (canvas.height - self.padding_top - self.padding_bottom).max(1.0),
        )
    }

    fn validate(&self, class: ViewportClass) -> Result<()> {
        let fail = |message: String| {
            Err(Error::InvalidConfig {
                message: format!("{class:?}: {message}"),
            })
        };
        for (name, r) in [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("scale", self.scale),
        ] {
            if !(r.min.is_finite() && r.max.is_finite() && r.min > 0.0 && r.min <= r.max) {
                return fail(format!("{name} must satisfy 0 < min <= max"));
            }
        }
        for (name, v) in [
            ("sizing_allowance_x", self.sizing_allowance_x),
            ("sizing_allowance_y", self.sizing_allowance_y),
            ("gap_ratio_x", self.gap_ratio_x),
            ("gap_ratio_y", self.gap_ratio_y),
            ("gap_floor_x", self.gap_floor_x),
            ("gap_floor_y", self.gap_floor_y),
            ("padding_side", self.padding_side),
            ("padding_top", self.padding_top),
            ("padding_bottom", self.padding_bottom),
            ("min_top_bias", self.min_top_bias),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return fail(format!("{name} must be finite and non-negative"));
            }
        }
        if !(self.gap_base_x.is_finite() && self.gap_base_x >= self.gap_floor_x) {
            return fail("gap_base_x must not be below gap_floor_x".to_string());
        }
        if !(self.gap_base_y.is_finite() && self.gap_base_y >= self.gap_floor_y) {
            return fail("gap_base_y must not be below gap_floor_y".to_string());
        }
        Ok(())
    }
}

impl Default for ViewportProfile {
    fn default() -> Self {
        Self::full()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Breakpoints {
    /// Canvases narrower than this are compact.
    pub compact_max_width: f64,
    /// Canvases narrower than this (and not compact) are medium.
    pub medium_max_width: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            compact_max_width: 768.0,
            medium_max_width: 1200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub breakpoints: Breakpoints,
    /// Canvas size at which the screen scale factor is exactly 1.
    pub reference: Size,
    pub compact: ViewportProfile,
    pub medium: ViewportProfile,
    pub full: ViewportProfile,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            reference: Size::new(1400.0, 900.0),
            compact: ViewportProfile::compact(),
            medium: ViewportProfile::medium(),
            full: ViewportProfile::full(),
        }
    }
}

impl LayoutConfig {
    /// Parses a (possibly partial) JSON override on top of the defaults.
    ///
    /// Overrides merge per field, so `{"compact": {"gap_floor_x": 8}}` changes one compact
    /// constant and leaves every other value at its class default.
    pub fn from_json(text: &str) -> Result<Self> {
        let invalid = |e: serde_json::Error| Error::InvalidConfig {
            message: e.to_string(),
        };
        let overrides: serde_json::Value = serde_json::from_str(text).map_err(invalid)?;
        let mut merged = serde_json::to_value(Self::default()).map_err(invalid)?;
        merge_json(&mut merged, overrides);
        let config: Self = serde_json::from_value(merged).map_err(invalid)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let bp = self.breakpoints;
        if !(bp.compact_max_width.is_finite()
            && bp.medium_max_width.is_finite()
            && bp.compact_max_width <= bp.medium_max_width)
        {
            return Err(Error::InvalidConfig {
                message: "breakpoints must be finite with compact_max_width <= medium_max_width"
                    .to_string(),
            });
        }
        if !self.reference.is_drawable() {
            return Err(Error::InvalidConfig {
                message: "reference size must be finite and positive".to_string(),
            });
        }
        self.compact.validate(ViewportClass::Compact)?;
        self.medium.validate(ViewportClass::Medium)?;
        self.full.validate(ViewportClass::Full)
    }

    /// Classifies a canvas by its width alone.
    pub fn classify(&self, canvas: Canvas) -> ViewportClass {
        if canvas.width < self.breakpoints.compact_max_width {
            ViewportClass::Compact
        } else if canvas.width < self.breakpoints.medium_max_width {
            ViewportClass::Medium
        } else {
            ViewportClass::Full
        }
    }

    pub fn profile(&self, class: ViewportClass) -> &ViewportProfile {
        match class {
            ViewportClass::Compact => &self.compact,
            ViewportClass::Medium => &self.medium,
            ViewportClass::Full => &self.full,
        }
    }

    /// Responsive scale factor for `canvas`, clamped to the class's scale range.
    pub fn screen_scale(&self, canvas: Canvas, class: ViewportClass) -> f64 {
        let raw = (canvas.width / self.reference.width).min(canvas.height / self.reference.height);
        self.profile(class).scale.clamp(raw)
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (k, v) in overrides {
                match base.get_mut(&k) {
                    Some(slot) => merge_json(slot, v),
                    None => {
                        base.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

/// Classifies `canvas` using the default breakpoints.
pub fn classify(canvas: Canvas) -> ViewportClass {
    LayoutConfig::default().classify(canvas)
}
