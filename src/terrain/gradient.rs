//! Keyframe color gradients for height-banded terrain tinting.
//!
//! A [`Gradient`] carries independent color keys and alpha keys over a
//! clamped [0, 1] parameter. The alpha keys are what blend two adjacent
//! height bands into one continuous ramp: past a band's upper color key the
//! color holds while alpha fades linearly to zero.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
        ]
    }
}

/// RGBA color with f32 channels, laid out for direct vertex-buffer upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Two-channel keyframe gradient over a clamped [0, 1] parameter.
///
/// Color and alpha are keyed independently, matching how the terrain bands
/// are authored: two color stops inside the span, alpha 1.0 at 0.0 fading
/// to 0.0 at 1.0. Sampling clamps the parameter, holds the boundary value
/// outside each key list's span, and lerps between surrounding keys inside.
#[derive(Clone, Debug)]
pub struct Gradient {
    color_keys: Vec<(f32, [f32; 3])>,
    alpha_keys: Vec<(f32, f32)>,
}

impl Gradient {
    /// Create a gradient from unsorted key lists. Keys are sorted by time.
    pub fn new(mut color_keys: Vec<(f32, [f32; 3])>, mut alpha_keys: Vec<(f32, f32)>) -> Self {
        assert!(!color_keys.is_empty(), "Gradient needs at least one color key");
        assert!(!alpha_keys.is_empty(), "Gradient needs at least one alpha key");
        color_keys.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        alpha_keys.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        Self { color_keys, alpha_keys }
    }

    /// The terrain band layout: two color stops at t = 0.35 and t = 0.65,
    /// alpha fading 1.0 -> 0.0 over the full [0, 1] span.
    pub fn band(lower: Rgba, upper: Rgba) -> Self {
        Self::new(
            vec![(0.35, lower.rgb()), (0.65, upper.rgb())],
            vec![(0.0, 1.0), (1.0, 0.0)],
        )
    }

    /// Sample the gradient. `t` is clamped to [0, 1].
    pub fn sample(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let [r, g, b] = sample_keys(&self.color_keys, t);
        let a = sample_keys(&self.alpha_keys, t);
        Rgba { r, g, b, a }
    }
}

/// Evaluate a sorted key list at `t`: hold the boundary value outside the
/// span, lerp between the surrounding keys inside.
fn sample_keys<T: Lerp>(keys: &[(f32, T)], t: f32) -> T {
    let n = keys.len();
    if t <= keys[0].0 {
        return keys[0].1.clone();
    }
    if t >= keys[n - 1].0 {
        return keys[n - 1].1.clone();
    }
    let idx = keys.iter().position(|k| k.0 > t).unwrap_or(n - 1);
    let (t_a, ref v_a) = keys[idx - 1];
    let (t_b, ref v_b) = keys[idx];
    let span = t_b - t_a;
    if span < 1e-6 {
        return v_a.clone();
    }
    v_a.lerp(v_b, (t - t_a) / span)
}
