//! Fractal noise synthesis for the seven environmental axes.
//!
//! fBM here is the amplitude-weighted *average* of the octaves, not their sum,
//! so the output stays within a single octave's [0, 1) range regardless of
//! octave count. Large-scale structure comes from latitude ramps and the
//! elevation field feeding back into the other axes.

pub mod params;
pub mod value;

use crate::axes::Axes;
use crate::hash::derive_axis_seed;
use self::params::{AxisParams, GradientParams, SynthParams};
use self::value::value_noise;

// Fixed decorrelation offsets so axes sharing a base seed never sample the
// same lattice neighbourhood.
const MOIST_OFFSET: (f64, f64) = (157.31, -89.97);
const SAL_OFFSET: (f64, f64) = (-233.7, 411.9);
const FERT_OFFSET: (f64, f64) = (991.1, -72.3);
const FIRE_OFFSET: (f64, f64) = (-55.2, 23.7);

// Axis tags under the two base seeds.
const TAG_ELEVATION: u32 = 0;
const TAG_ROUGHNESS: u32 = 1;
const TAG_MOISTURE: u32 = 0;
const TAG_TEMPERATURE: u32 = 1;
const TAG_SALINITY: u32 = 2;
const TAG_FERTILITY: u32 = 3;
const TAG_FIRE: u32 = 4;

/// Amplitude-weighted fBM. Octave `i` samples at `frequency · lacunarity^i`
/// with weight `gain^i`; the weighted sum is divided by the total weight, so
/// the result lies in [0, 1) for any octave count.
pub fn fbm(x: f64, y: f64, seed: u32, params: &AxisParams) -> f64 {
    let octaves = params.octaves.max(1);
    let mut sum = 0.0;
    let mut norm = 0.0;
    let mut amp = 1.0;
    let mut freq = params.frequency;
    for _ in 0..octaves {
        sum += amp * value_noise(x * freq, y * freq, seed);
        norm += amp;
        amp *= params.gain;
        freq *= params.lacunarity;
    }
    sum / norm
}

/// Monotone latitude ramp `0.5·(1 + tanh(y/scale))`: maps y from −∞..+∞ onto
/// 0..1, centred on y = 0. Positive y is the warm/saline south.
pub fn lat_south(y: f64, scale: f64) -> f64 {
    0.5 * (1.0 + (y / scale).tanh())
}

/// Produces the 7-axis vector at any integer tile, deterministically, from
/// two base seeds and the construction-time parameter tables.
pub struct AxesSynthesizer {
    params: SynthParams,
    gradients: GradientParams,
    elevation_seed: u32,
    roughness_seed: u32,
    moisture_seed: u32,
    temperature_seed: u32,
    salinity_seed: u32,
    fertility_seed: u32,
    fire_seed: u32,
}

impl AxesSynthesizer {
    /// Derives all seven axis seeds up front; the synthesizer is immutable
    /// after this point.
    pub fn new(
        elevation_base: u32,
        moisture_base: u32,
        params: SynthParams,
        gradients: GradientParams,
    ) -> Self {
        Self {
            params,
            gradients,
            elevation_seed: derive_axis_seed(elevation_base, TAG_ELEVATION),
            roughness_seed: derive_axis_seed(elevation_base, TAG_ROUGHNESS),
            moisture_seed: derive_axis_seed(moisture_base, TAG_MOISTURE),
            temperature_seed: derive_axis_seed(moisture_base, TAG_TEMPERATURE),
            salinity_seed: derive_axis_seed(moisture_base, TAG_SALINITY),
            fertility_seed: derive_axis_seed(moisture_base, TAG_FERTILITY),
            fire_seed: derive_axis_seed(moisture_base, TAG_FIRE),
        }
    }

    /// Raw elevation field, clamped to [0, 1]. Also evaluated at offset
    /// points for the roughness slope estimate.
    fn elevation_at(&self, x: f64, y: f64) -> f64 {
        fbm(x, y, self.elevation_seed, &self.params.elevation).clamp(0.0, 1.0)
    }

    /// Sample the full axes vector at an integer tile coordinate.
    /// Bit-identical across repeated calls and across reconstructions with
    /// the same seeds and parameters.
    pub fn sample(&self, tx: i32, ty: i32) -> Axes {
        let g = &self.gradients;
        let x = tx as f64;
        let y = ty as f64;

        let elevation = self.elevation_at(x, y);
        let moisture = fbm(
            x + MOIST_OFFSET.0,
            y + MOIST_OFFSET.1,
            self.moisture_seed,
            &self.params.moisture,
        )
        .clamp(0.0, 1.0);

        let temperature = (0.55 * fbm(x, y, self.temperature_seed, &self.params.temperature)
            + 0.35 * lat_south(y, g.temp_lat_scale)
            - g.elevation_cooling * elevation
            + 0.10)
            .clamp(0.0, 1.0);

        // Finite-difference slope of the elevation field at (x,y), (x+1,y),
        // (x,y+1); steep terrain dominates, fractal detail fills the rest.
        let slope = {
            let dx = self.elevation_at(x + 1.0, y) - elevation;
            let dy = self.elevation_at(x, y + 1.0) - elevation;
            (dx * dx + dy * dy).sqrt()
        };
        let roughness = ((slope * g.roughness_slope_scale).min(1.0) * 0.7
            + fbm(x, y, self.roughness_seed, &self.params.roughness) * 0.3)
            .clamp(0.0, 1.0);

        let salinity = (0.5
            * fbm(
                x + SAL_OFFSET.0,
                y + SAL_OFFSET.1,
                self.salinity_seed,
                &self.params.salinity,
            )
            + 0.4 * lat_south(y, g.sal_lat_scale)
            - 0.5 * g.salinity_reduction * elevation)
            .clamp(0.0, 1.0);

        // Fertility peaks in moist lowlands around elevation 0.35.
        let fertility = (0.75 * (0.6 * moisture + 0.3 * (1.0 - 2.0 * (elevation - 0.35).abs()))
            + 0.25
                * fbm(
                    x + FERT_OFFSET.0,
                    y + FERT_OFFSET.1,
                    self.fertility_seed,
                    &self.params.fertility,
                ))
        .clamp(0.0, 1.0);

        let fire = (0.6 * (1.0 - moisture)
            + 0.2 * temperature
            + 0.15 * (1.0 - elevation)
            + 0.05
                * fbm(
                    x + FIRE_OFFSET.0,
                    y + FIRE_OFFSET.1,
                    self.fire_seed,
                    &self.params.fire,
                ))
        .clamp(0.0, 1.0);

        Axes {
            temperature: temperature as f32,
            moisture: moisture as f32,
            elevation: elevation as f32,
            roughness: roughness as f32,
            salinity: salinity as f32,
            fertility: fertility as f32,
            fire: fire as f32,
        }
    }
}
