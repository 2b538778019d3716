//! World generation configuration.
//!
//! All grid, noise, and placement constants live in one immutable
//! [`GridConfig`] value constructed at startup and passed to every
//! generation call. Nothing here is mutated per chunk.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Parameters for the fractal noise field.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Number of octaves summed per sample.
    pub octaves: u32,
    /// Per-octave amplitude decay factor.
    pub persistence: f32,
    /// Frequency ladder offset: octave `i` samples at frequency
    /// `2^(i - octave_bias)`. With the default bias of 4 the first octaves
    /// zoom out before detail octaves kick in.
    pub octave_bias: i32,
    /// Multiplier applied to world coordinates before octave sampling.
    pub base_scale: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 2,
            persistence: 0.2,
            octave_bias: 4,
            base_scale: 0.1,
        }
    }
}

/// Parameters gating decorative prop placement.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PropParams {
    /// White-noise sample must exceed this to place a prop.
    pub rarity_threshold: f32,
    /// Normalized terrain height must exceed this to place a prop.
    pub height_threshold: f32,
    /// Shift applied to the sampling domain so prop placement is not
    /// correlated with the terrain height noise.
    pub domain_offset: i32,
    /// Vertical offset of the emitted placement above the terrain vertex.
    pub vertical_offset: f32,
}

impl Default for PropParams {
    fn default() -> Self {
        Self {
            rarity_threshold: 0.994,
            height_threshold: 0.5,
            domain_offset: 1024,
            vertical_offset: 5.5,
        }
    }
}

/// Process-wide terrain grid configuration.
///
/// Fixed at startup; chunk geometry is a pure function of this value and
/// the chunk coordinate.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Vertex-grid cell count per chunk along X.
    pub size_x: u32,
    /// Vertex-grid cell count per chunk along Z.
    pub size_z: u32,
    /// World units per grid cell along X.
    pub scale_x: f32,
    /// World units per grid cell along Z.
    pub scale_z: f32,
    /// Vertical scale applied to normalized noise output.
    pub height_multiplier: f32,
    /// Fractal noise shape parameters.
    pub noise: NoiseParams,
    /// Prop placement gating parameters.
    pub props: PropParams,
    /// Chebyshev radius (in chunks) of the kept-loaded window.
    pub load_distance: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size_x: 64,
            size_z: 64,
            scale_x: 4.0,
            scale_z: 4.0,
            height_multiplier: 128.0,
            noise: NoiseParams::default(),
            props: PropParams::default(),
            load_distance: 3,
        }
    }
}

impl GridConfig {
    /// World-space extent of one chunk along X.
    pub fn chunk_span_x(&self) -> f32 {
        self.size_x as f32 * self.scale_x
    }

    /// World-space extent of one chunk along Z.
    pub fn chunk_span_z(&self) -> f32 {
        self.size_z as f32 * self.scale_z
    }

    /// Number of vertices in one chunk's grid.
    pub fn vertex_count(&self) -> usize {
        (self.size_x as usize + 1) * (self.size_z as usize + 1)
    }

    /// Number of triangle indices in one chunk's index buffer.
    pub fn index_count(&self) -> usize {
        self.size_x as usize * self.size_z as usize * 6
    }

    /// Validate the configuration.
    ///
    /// Misconfiguration is reported once here, at initialization; the
    /// generation and streaming paths assume a validated config.
    pub fn validate(&self) -> Result<()> {
        if self.size_x == 0 || self.size_z == 0 {
            return Err(Error::Config(format!(
                "grid resolution must be positive, got {}x{}",
                self.size_x, self.size_z
            )));
        }
        if self.scale_x <= 0.0 || self.scale_z <= 0.0 {
            return Err(Error::Config(format!(
                "cell scale must be positive, got {}x{}",
                self.scale_x, self.scale_z
            )));
        }
        if self.height_multiplier == 0.0 || !self.height_multiplier.is_finite() {
            return Err(Error::Config(format!(
                "height_multiplier must be finite and non-zero, got {}",
                self.height_multiplier
            )));
        }
        if self.noise.octaves == 0 {
            return Err(Error::Config("noise octave count must be at least 1".into()));
        }
        if self.noise.persistence <= 0.0 {
            return Err(Error::Config(format!(
                "noise persistence must be positive, got {}",
                self.noise.persistence
            )));
        }
        if self.load_distance <= 0 {
            return Err(Error::Config(format!(
                "load_distance must be positive, got {}",
                self.load_distance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_constants() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.size_x, 64);
        assert_eq!(cfg.size_z, 64);
        assert_eq!(cfg.scale_x, 4.0);
        assert_eq!(cfg.height_multiplier, 128.0);
        assert_eq!(cfg.load_distance, 3);
        assert_eq!(cfg.noise.octaves, 2);
        assert_eq!(cfg.noise.persistence, 0.2);
        assert_eq!(cfg.props.rarity_threshold, 0.994);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let cfg = GridConfig { size_x: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_height_multiplier_rejected() {
        let cfg = GridConfig { height_multiplier: 0.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_negative_scale_rejected() {
        let cfg = GridConfig { scale_z: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_non_positive_load_distance_rejected() {
        let cfg = GridConfig { load_distance: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_octaves_rejected() {
        let mut cfg = GridConfig::default();
        cfg.noise.octaves = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_chunk_span() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.chunk_span_x(), 256.0);
        assert_eq!(cfg.chunk_span_z(), 256.0);
    }

    #[test]
    fn test_mesh_sizing_helpers() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.vertex_count(), 65 * 65);
        assert_eq!(cfg.index_count(), 64 * 64 * 6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{"load_distance": 5}"#).unwrap();
        assert_eq!(cfg.load_distance, 5);
        assert_eq!(cfg.size_x, 64);
        assert_eq!(cfg.props.domain_offset, 1024);
    }
}
