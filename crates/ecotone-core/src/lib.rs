//! Ecotone: deterministic biome-field generation.
//!
//! Pipeline: lattice hash → per-axis fractal value noise → 7-axis
//! environmental vector → nearest-prototype classification → region raster
//! cache → nearest-match spatial search. Everything downstream of the two
//! base seeds is pure and reproducible.

pub mod axes;
pub mod biome;
pub mod field;
pub mod hash;
pub mod noise;
pub mod raster;
pub mod search;

pub use axes::{Axes, Axis, AxisWeights};
pub use biome::{BiomeClassifier, BiomeId, BiomeMatch, BiomePrototype, ClassifyError, TableError};
pub use field::{census, BiomeField, FieldConfig};
pub use raster::{ModeError, RegionCache, RegionRaster, ViewMode, REGION_SIZE};
pub use search::{BiomeSampler, NearestSearch, SearchHit, SearchOutcome};
