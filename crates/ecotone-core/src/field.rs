//! The biome field: synthesizer + classifier behind every query surface.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::axes::Axes;
use crate::biome::{
    load_prototype_table, BiomeClassifier, BiomeId, BiomeMatch, BiomePrototype, ClassifyError,
    TableError,
};
use crate::hash::mix32;
use crate::noise::params::{GradientParams, SynthParams};
use crate::noise::AxesSynthesizer;
use crate::search::BiomeSampler;

/// Complete construction-time configuration for a biome field.
/// Round-trips through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub elevation_seed: u32,
    pub moisture_seed: u32,
    pub synth: SynthParams,
    pub gradients: GradientParams,
}

impl FieldConfig {
    /// Derive both base seeds from a single world seed.
    pub fn from_world_seed(seed: u32) -> Self {
        Self {
            elevation_seed: seed,
            moisture_seed: mix32(seed ^ 0x5A5A),
            synth: SynthParams::default(),
            gradients: GradientParams::default(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::from_world_seed(42)
    }
}

/// An infinite deterministic biome field over the integer tile lattice.
pub struct BiomeField {
    synthesizer: AxesSynthesizer,
    classifier: BiomeClassifier,
}

impl BiomeField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            synthesizer: AxesSynthesizer::new(
                config.elevation_seed,
                config.moisture_seed,
                config.synth,
                config.gradients,
            ),
            classifier: BiomeClassifier::new(),
        }
    }

    pub fn from_world_seed(seed: u32) -> Self {
        Self::new(FieldConfig::from_world_seed(seed))
    }

    /// The 7-axis environmental vector at a tile. Pure and total.
    pub fn sample_axes(&self, tx: i32, ty: i32) -> Axes {
        self.synthesizer.sample(tx, ty)
    }

    /// Nearest-prototype classification of an axes vector.
    pub fn classify(&self, axes: &Axes) -> Result<BiomeMatch<'_>, ClassifyError> {
        self.classifier.classify(axes)
    }

    /// Sample and classify in one step.
    pub fn classify_tile(&self, tx: i32, ty: i32) -> Result<BiomeMatch<'_>, ClassifyError> {
        self.classifier.classify(&self.synthesizer.sample(tx, ty))
    }

    pub fn classifier(&self) -> &BiomeClassifier {
        &self.classifier
    }

    /// Wholesale prototype replacement. See
    /// [`BiomeClassifier::replace_prototypes`] for the hint-staleness caveat.
    pub fn replace_prototypes(&mut self, prototypes: Vec<BiomePrototype>) {
        self.classifier.replace_prototypes(prototypes);
    }

    /// Best-effort replacement from a tabular file. On any error the active
    /// set is kept unchanged; the error is logged and returned for callers
    /// that want to report it. Returns the new prototype count on success.
    pub fn replace_prototypes_from_path(&mut self, path: &Path) -> Result<usize, TableError> {
        match load_prototype_table(path) {
            Ok(prototypes) => {
                let n = prototypes.len();
                self.classifier.replace_prototypes(prototypes);
                Ok(n)
            }
            Err(err) => {
                log::warn!(
                    "prototype table {} unusable, keeping active set: {err}",
                    path.display()
                );
                Err(err)
            }
        }
    }
}

impl BiomeSampler for BiomeField {
    fn biome_at(&self, tx: i32, ty: i32) -> Result<BiomeId, ClassifyError> {
        Ok(self.classify_tile(tx, ty)?.id)
    }
}

/// Classify every tile in the square window of `half_width` tiles around
/// `center` and count hits per biome id, sorted by descending count (ties by
/// ascending id).
pub fn census(
    field: &BiomeField,
    center: (i32, i32),
    half_width: i32,
) -> Result<Vec<(BiomeId, usize)>, ClassifyError> {
    let mut counts: HashMap<BiomeId, usize> = HashMap::new();
    for dy in -half_width..=half_width {
        for dx in -half_width..=half_width {
            let id = field.classify_tile(center.0 + dx, center.1 + dy)?.id;
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    let mut out: Vec<(BiomeId, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let config = FieldConfig::from_world_seed(777);
        let text = serde_json::to_string(&config).unwrap();
        let back: FieldConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn world_seed_separates_the_base_seeds() {
        let config = FieldConfig::from_world_seed(42);
        assert_ne!(config.elevation_seed, config.moisture_seed);
    }

    #[test]
    fn fields_from_the_same_seed_agree_everywhere_sampled() {
        let a = BiomeField::from_world_seed(99);
        let b = BiomeField::from_world_seed(99);
        for &(tx, ty) in &[(0, 0), (123, -456), (-9000, 31)] {
            assert_eq!(
                a.sample_axes(tx, ty).as_array().map(f32::to_bits),
                b.sample_axes(tx, ty).as_array().map(f32::to_bits),
            );
            assert_eq!(
                a.classify_tile(tx, ty).unwrap().id,
                b.classify_tile(tx, ty).unwrap().id,
            );
        }
    }

    #[test]
    fn sampler_seam_matches_classify_tile() {
        let field = BiomeField::from_world_seed(5);
        for t in -10..10 {
            assert_eq!(
                field.biome_at(t * 17, t * 3).unwrap(),
                field.classify_tile(t * 17, t * 3).unwrap().id,
            );
        }
    }

    #[test]
    fn census_counts_every_window_tile_once() {
        let field = BiomeField::from_world_seed(42);
        let half = 6;
        let counts = census(&field, (100, -40), half).unwrap();
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        let side = (2 * half + 1) as usize;
        assert_eq!(total, side * side);
        for window in counts.windows(2) {
            assert!(window[0].1 >= window[1].1, "census must be sorted by count");
        }
    }

    #[test]
    fn failed_table_load_keeps_active_set() {
        let mut field = BiomeField::from_world_seed(1);
        let before = field.classifier().prototypes().len();
        let err = field.replace_prototypes_from_path(Path::new("/nonexistent/biomes.csv"));
        assert!(err.is_err());
        assert_eq!(field.classifier().prototypes().len(), before);
    }
}
