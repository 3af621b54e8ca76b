//! Biome prototypes and nearest-prototype classification.

pub mod classifier;
pub mod table;

pub use classifier::{BiomeClassifier, BiomeMatch, ClassifyError};
pub use table::{load_prototype_table, parse_prototype_table, TableError};

use serde::{Deserialize, Serialize};

use crate::axes::Axes;

/// Prototype identifier. Positive and unique within a prototype set.
pub type BiomeId = u32;

/// A labeled reference point in axes space; one biome class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomePrototype {
    pub id: BiomeId,
    pub label: String,
    /// One-line description of the biome's anchor conditions.
    pub anchor: String,
    pub axes: Axes,
}

/// Display colour for a prototype id. Total: unknown ids map to neutral gray.
pub fn palette_color(id: BiomeId) -> [u8; 3] {
    match id {
        1 => [190, 210, 222],  // tundra — pale ice blue
        2 => [27, 77, 62],     // boreal forest — deep spruce
        3 => [46, 139, 87],    // temperate forest — sea green
        4 => [154, 205, 50],   // temperate grassland — yellow-green
        5 => [189, 183, 107],  // shrubland — dark khaki
        6 => [237, 201, 175],  // desert — sand
        7 => [218, 165, 32],   // savanna — goldenrod
        8 => [0, 100, 0],      // tropical rainforest — dark green
        9 => [95, 158, 160],   // salt marsh — cadet blue
        10 => [200, 200, 215], // alpine — bare rock
        11 => [85, 107, 47],   // bog — dark olive
        12 => [222, 184, 135], // steppe — burlywood
        13 => [245, 245, 240], // salt flat — crust white
        14 => [178, 34, 34],   // badlands — firebrick
        _ => [128, 128, 128],  // unknown — neutral gray
    }
}

fn proto(id: BiomeId, label: &str, anchor: &str, axes: [f32; 7]) -> BiomePrototype {
    BiomePrototype {
        id,
        label: label.to_string(),
        anchor: anchor.to_string(),
        axes: Axes::from_array(axes),
    }
}

/// The built-in prototype set: 14 biomes spanning the 7-axis space.
/// Axis order: temperature, moisture, elevation, roughness, salinity,
/// fertility, fire-proneness.
pub fn default_prototypes() -> Vec<BiomePrototype> {
    vec![
        proto(1, "tundra", "frozen plains above the treeline latitudes",
              [0.05, 0.35, 0.45, 0.30, 0.15, 0.15, 0.05]),
        proto(2, "boreal forest", "cold conifer belt on acidic soils",
              [0.25, 0.55, 0.45, 0.35, 0.10, 0.40, 0.25]),
        proto(3, "temperate forest", "mixed broadleaf on rich lowland soils",
              [0.50, 0.60, 0.40, 0.30, 0.10, 0.65, 0.20]),
        proto(4, "temperate grassland", "open prairie with deep topsoil",
              [0.50, 0.40, 0.35, 0.15, 0.15, 0.60, 0.40]),
        proto(5, "shrubland", "dry scrub on rocky hillsides",
              [0.60, 0.30, 0.40, 0.35, 0.20, 0.35, 0.60]),
        proto(6, "desert", "hot barren dunes and hardpan",
              [0.85, 0.05, 0.40, 0.25, 0.45, 0.05, 0.80]),
        proto(7, "savanna", "seasonal grass with scattered trees",
              [0.80, 0.35, 0.30, 0.15, 0.15, 0.45, 0.70]),
        proto(8, "tropical rainforest", "hot wet evergreen canopy",
              [0.85, 0.90, 0.30, 0.30, 0.10, 0.85, 0.05]),
        proto(9, "salt marsh", "brackish coastal flats",
              [0.55, 0.85, 0.05, 0.05, 0.85, 0.50, 0.05]),
        proto(10, "alpine", "bare rock and scree above the snowline",
              [0.10, 0.45, 0.90, 0.85, 0.05, 0.10, 0.10]),
        proto(11, "bog", "waterlogged peat lowland",
              [0.35, 0.90, 0.25, 0.10, 0.20, 0.30, 0.02]),
        proto(12, "steppe", "semi-arid short-grass upland",
              [0.45, 0.20, 0.50, 0.20, 0.30, 0.40, 0.55]),
        proto(13, "salt flat", "evaporite basin with saline crust",
              [0.70, 0.10, 0.20, 0.05, 0.95, 0.02, 0.30]),
        proto(14, "badlands", "eroded arid ridges and gullies",
              [0.65, 0.10, 0.55, 0.75, 0.40, 0.05, 0.65]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_prototypes_satisfy_set_invariants() {
        let protos = default_prototypes();
        assert!(!protos.is_empty());
        let mut ids = HashSet::new();
        for p in &protos {
            assert!(p.id > 0, "id must be positive: {}", p.label);
            assert!(ids.insert(p.id), "duplicate id {} ({})", p.id, p.label);
            for v in p.axes.as_array() {
                assert!((0.0..=1.0).contains(&v), "{}: axis {v} out of range", p.label);
            }
        }
    }

    #[test]
    fn every_default_prototype_has_a_palette_entry() {
        let gray = palette_color(9999);
        assert_eq!(gray, [128, 128, 128]);
        for p in default_prototypes() {
            assert_ne!(palette_color(p.id), gray, "{} has no palette entry", p.label);
        }
    }
}
