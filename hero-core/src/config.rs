use serde::Deserialize;

use crate::{error::HeroError, render::Palette};

/// Tunables for the particle field.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Particles per generation when animation is allowed.
    pub particle_count: usize,
    /// Particles per generation when reduced motion is requested.
    pub reduced_particle_count: usize,
    /// Pairs closer than this are linked by an edge.
    pub link_distance: f64,
    /// How far a particle may drift past an edge before its velocity flips.
    pub boundary_margin: f64,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_pixel_scale: f64,
    pub max_pixel_scale: f64,
    /// Stroke alpha of an edge at weight 1.
    pub edge_alpha: f64,
    pub line_width: f64,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: 80,
            reduced_particle_count: 30,
            link_distance: 110.0,
            boundary_margin: 10.0,
            max_speed: 0.4,
            min_radius: 1.2,
            max_radius: 2.4,
            min_pixel_scale: 1.0,
            max_pixel_scale: 2.0,
            edge_alpha: 0.25,
            line_width: 1.0,
            palette: Palette::default(),
        }
    }
}

impl Config {
    pub fn particle_count_for(&self, reduced_motion: bool) -> usize {
        if reduced_motion {
            self.reduced_particle_count
        } else {
            self.particle_count
        }
    }

    /// Clamps a host device pixel ratio into the configured scale range.
    ///
    /// Hosts that report nothing useful (zero, negative, NaN) get the
    /// minimum scale.
    pub fn clamp_pixel_scale(&self, ratio: f64) -> f64 {
        if !ratio.is_finite() || ratio <= 0.0 {
            return self.min_pixel_scale;
        }
        ratio.clamp(self.min_pixel_scale, self.max_pixel_scale)
    }

    pub fn validate(&self) -> Result<(), HeroError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(HeroError::InvalidConfig(format!(
                    "{name} must be positive, got {v}"
                )))
            }
        };

        positive("link_distance", self.link_distance)?;
        positive("min_radius", self.min_radius)?;
        positive("min_pixel_scale", self.min_pixel_scale)?;
        positive("line_width", self.line_width)?;

        if !(self.boundary_margin.is_finite() && self.boundary_margin >= 0.0) {
            return Err(HeroError::InvalidConfig(format!(
                "boundary_margin must be non-negative, got {}",
                self.boundary_margin
            )));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(HeroError::InvalidConfig(format!(
                "max_speed must be non-negative, got {}",
                self.max_speed
            )));
        }
        if !(self.max_radius >= self.min_radius) {
            return Err(HeroError::InvalidConfig(format!(
                "radius range is empty: [{}, {}]",
                self.min_radius, self.max_radius
            )));
        }
        if !(self.max_pixel_scale >= self.min_pixel_scale) {
            return Err(HeroError::InvalidConfig(format!(
                "pixel scale range is empty: [{}, {}]",
                self.min_pixel_scale, self.max_pixel_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.edge_alpha) {
            return Err(HeroError::InvalidConfig(format!(
                "edge_alpha must be within [0, 1], got {}",
                self.edge_alpha
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn particle_count_follows_reduced_motion() {
        let cfg = Config::default();
        assert_eq!(cfg.particle_count_for(false), 80);
        assert_eq!(cfg.particle_count_for(true), 30);
    }

    #[test]
    fn pixel_scale_is_clamped_to_one_and_two() {
        let cfg = Config::default();
        assert_eq!(cfg.clamp_pixel_scale(0.5), 1.0);
        assert_eq!(cfg.clamp_pixel_scale(1.5), 1.5);
        assert_eq!(cfg.clamp_pixel_scale(3.0), 2.0);
        assert_eq!(cfg.clamp_pixel_scale(0.0), 1.0);
        assert_eq!(cfg.clamp_pixel_scale(f64::NAN), 1.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.link_distance = 0.0;
        assert!(matches!(cfg.validate(), Err(HeroError::InvalidConfig(_))));

        let mut cfg = Config::default();
        cfg.min_radius = 3.0;
        assert!(matches!(cfg.validate(), Err(HeroError::InvalidConfig(_))));

        let mut cfg = Config::default();
        cfg.max_pixel_scale = 0.5;
        assert!(matches!(cfg.validate(), Err(HeroError::InvalidConfig(_))));

        let mut cfg = Config::default();
        cfg.edge_alpha = 1.5;
        assert!(matches!(cfg.validate(), Err(HeroError::InvalidConfig(_))));
    }
}
