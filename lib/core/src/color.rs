//! Colors in LCh space (lightness, chroma, hue in degrees)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A color in cylindrical L*C*h* coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ColorLch {
    pub l: f64,
    pub c: f64,
    /// Hue angle in degrees
    pub h: f64,
}

impl ColorLch {
    pub fn new(l: f64, c: f64, h: f64) -> Result<Self> {
        let color = Self { l, c, h };
        color.validate()?;
        Ok(color)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.l.is_finite() && self.c.is_finite() && self.h.is_finite()) {
            return Err(Error::InvalidColor(format!(
                "components must be finite, got L={} C={} h={}",
                self.l, self.c, self.h
            )));
        }
        Ok(())
    }

    /// Euclidean distance over raw (L, C, h).
    ///
    /// Not a perceptual color difference: hue is treated linearly. Scoring
    /// thresholds were tuned against this metric, keep it as is.
    #[inline]
    pub fn delta_e(&self, other: &ColorLch) -> f64 {
        let dl = self.l - other.l;
        let dc = self.c - other.c;
        let dh = self.h - other.h;
        (dl * dl + dc * dc + dh * dh).sqrt()
    }

    /// Circular hue distance in degrees, in [0, 180]. Hues outside
    /// [0, 360) are wrapped first.
    #[inline]
    pub fn hue_distance(&self, other: &ColorLch) -> f64 {
        let diff = (self.h - other.h).rem_euclid(360.0);
        diff.min(360.0 - diff)
    }

    #[inline]
    pub fn lightness_distance(&self, other: &ColorLch) -> f64 {
        (self.l - other.l).abs()
    }
}
