use serde::{Deserialize, Serialize};

/// Number of environmental axes.
pub const AXIS_COUNT: usize = 7;

/// Clamp a value into [0, 1].
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// One environmental axis. Array order follows [`Axis::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Temperature,
    Moisture,
    Elevation,
    Roughness,
    Salinity,
    Fertility,
    Fire,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::Temperature,
        Axis::Moisture,
        Axis::Elevation,
        Axis::Roughness,
        Axis::Salinity,
        Axis::Fertility,
        Axis::Fire,
    ];

    /// Stable lowercase name, used for view-mode selection and table headers.
    pub fn label(self) -> &'static str {
        match self {
            Axis::Temperature => "temperature",
            Axis::Moisture => "moisture",
            Axis::Elevation => "elevation",
            Axis::Roughness => "roughness",
            Axis::Salinity => "salinity",
            Axis::Fertility => "fertility",
            Axis::Fire => "fire",
        }
    }
}

/// The 7-dimensional normalized environmental vector at one tile.
/// Every field lies in [0, 1]; a value is purely a function of
/// (tile, seeds, parameters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub temperature: f32,
    pub moisture: f32,
    pub elevation: f32,
    pub roughness: f32,
    pub salinity: f32,
    pub fertility: f32,
    pub fire: f32,
}

impl Axes {
    pub const ZERO: Axes = Axes {
        temperature: 0.0,
        moisture: 0.0,
        elevation: 0.0,
        roughness: 0.0,
        salinity: 0.0,
        fertility: 0.0,
        fire: 0.0,
    };

    /// Build from an array in [`Axis::ALL`] order.
    pub fn from_array(a: [f32; AXIS_COUNT]) -> Self {
        Self {
            temperature: a[0],
            moisture: a[1],
            elevation: a[2],
            roughness: a[3],
            salinity: a[4],
            fertility: a[5],
            fire: a[6],
        }
    }

    /// View as an array in [`Axis::ALL`] order.
    #[inline]
    pub fn as_array(&self) -> [f32; AXIS_COUNT] {
        [
            self.temperature,
            self.moisture,
            self.elevation,
            self.roughness,
            self.salinity,
            self.fertility,
            self.fire,
        ]
    }

    /// Value of a single axis.
    #[inline]
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Temperature => self.temperature,
            Axis::Moisture => self.moisture,
            Axis::Elevation => self.elevation,
            Axis::Roughness => self.roughness,
            Axis::Salinity => self.salinity,
            Axis::Fertility => self.fertility,
            Axis::Fire => self.fire,
        }
    }
}

/// Per-axis weights for the weighted squared-Euclidean classification metric.
/// All weights are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisWeights {
    pub temperature: f32,
    pub moisture: f32,
    pub elevation: f32,
    pub roughness: f32,
    pub salinity: f32,
    pub fertility: f32,
    pub fire: f32,
}

impl AxisWeights {
    /// View as an array in [`Axis::ALL`] order.
    #[inline]
    pub fn as_array(&self) -> [f32; AXIS_COUNT] {
        [
            self.temperature,
            self.moisture,
            self.elevation,
            self.roughness,
            self.salinity,
            self.fertility,
            self.fire,
        ]
    }

    /// Uniform weight across every axis.
    pub fn uniform(w: f32) -> Self {
        Self {
            temperature: w,
            moisture: w,
            elevation: w,
            roughness: w,
            salinity: w,
            fertility: w,
            fire: w,
        }
    }
}

impl Default for AxisWeights {
    /// Temperature and moisture carry slightly more weight; they are the two
    /// axes the built-in prototypes are primarily separated along.
    fn default() -> Self {
        Self {
            temperature: 1.1,
            moisture: 1.1,
            ..Self::uniform(1.0)
        }
    }
}
