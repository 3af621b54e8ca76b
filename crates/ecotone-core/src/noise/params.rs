use serde::{Deserialize, Serialize};

/// Fractal parameters for one environmental axis.
/// Fixed at synthesizer construction; immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisParams {
    /// Octave count (≥ 1).
    pub octaves: u32,
    /// Base frequency in cycles per tile (> 0).
    pub frequency: f64,
    /// Per-octave frequency multiplier (> 1).
    pub lacunarity: f64,
    /// Per-octave amplitude multiplier, in (0, 1).
    pub gain: f64,
}

impl AxisParams {
    pub fn new(octaves: u32, frequency: f64, lacunarity: f64, gain: f64) -> Self {
        Self { octaves, frequency, lacunarity, gain }
    }
}

impl Default for AxisParams {
    fn default() -> Self {
        Self { octaves: 4, frequency: 0.01, lacunarity: 2.0, gain: 0.5 }
    }
}

/// One [`AxisParams`] per environmental axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthParams {
    pub elevation: AxisParams,
    pub moisture: AxisParams,
    pub temperature: AxisParams,
    pub roughness: AxisParams,
    pub salinity: AxisParams,
    pub fertility: AxisParams,
    pub fire: AxisParams,
}

impl Default for SynthParams {
    /// Calibrated so landforms span several regions while roughness detail
    /// stays near tile scale.
    fn default() -> Self {
        Self {
            elevation: AxisParams::new(5, 0.008, 2.0, 0.5),
            moisture: AxisParams::new(4, 0.012, 2.0, 0.5),
            temperature: AxisParams::new(3, 0.005, 2.0, 0.55),
            roughness: AxisParams::new(3, 0.05, 2.0, 0.5),
            salinity: AxisParams::new(3, 0.01, 2.0, 0.5),
            fertility: AxisParams::new(3, 0.02, 2.0, 0.5),
            fire: AxisParams::new(2, 0.03, 2.0, 0.5),
        }
    }
}

/// Large-scale gradient modifiers applied on top of the fractal layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientParams {
    /// Latitude half-scale (tiles) of the temperature band.
    pub temp_lat_scale: f64,
    /// Latitude half-scale (tiles) of the salinity band.
    pub sal_lat_scale: f64,
    /// Elevation-driven cooling coefficient.
    pub elevation_cooling: f64,
    /// Elevation-driven salinity reduction coefficient.
    pub salinity_reduction: f64,
    /// Slope-magnitude scale factor feeding roughness.
    pub roughness_slope_scale: f64,
}

impl Default for GradientParams {
    /// Mid-latitude band spans several regions; mountain cores read cold and
    /// fresh.
    fn default() -> Self {
        Self {
            temp_lat_scale: 512.0,
            sal_lat_scale: 384.0,
            elevation_cooling: 0.35,
            salinity_reduction: 0.5,
            roughness_slope_scale: 8.0,
        }
    }
}
