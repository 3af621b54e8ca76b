//! Nearest-prototype classification in weighted 7-D axes space.

use std::sync::Arc;

use thiserror::Error;

use super::{default_prototypes, palette_color, BiomeId, BiomePrototype};
use crate::axes::{Axes, AxisWeights, AXIS_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("prototype set is empty")]
    EmptyPrototypeSet,
}

/// The winning prototype plus the squared weighted distance to it.
/// Borrows the classifier's current snapshot; never stored long-term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeMatch<'a> {
    pub id: BiomeId,
    pub label: &'a str,
    pub anchor: &'a str,
    pub color: [u8; 3],
    pub dist_sq: f32,
}

/// Maps an axes vector to the nearest prototype under the weighted
/// squared-Euclidean metric `Σ wᵢ·(qᵢ − pᵢ)²`.
///
/// The prototype set is an immutable snapshot behind an `Arc`; replacement is
/// a wholesale swap, so an in-flight reader sees either the fully-old or
/// fully-new set, never a mix.
pub struct BiomeClassifier {
    prototypes: Arc<[BiomePrototype]>,
    weights: AxisWeights,
}

impl BiomeClassifier {
    /// Classifier over the built-in prototype set with default weights.
    pub fn new() -> Self {
        Self::with_prototypes(default_prototypes())
    }

    pub fn with_prototypes(prototypes: Vec<BiomePrototype>) -> Self {
        Self {
            prototypes: prototypes.into(),
            weights: AxisWeights::default(),
        }
    }

    /// The active prototype snapshot.
    pub fn prototypes(&self) -> &[BiomePrototype] {
        &self.prototypes
    }

    /// Swap in a new prototype set wholesale. Stale nearest-search hints may
    /// point at tiles the new set classifies differently; callers that keep a
    /// `NearestSearch` around should clear its hints after swapping.
    pub fn replace_prototypes(&mut self, prototypes: Vec<BiomePrototype>) {
        log::debug!(
            "prototype set swap: {} -> {} prototypes",
            self.prototypes.len(),
            prototypes.len()
        );
        self.prototypes = prototypes.into();
    }

    /// Classify under the default weights.
    pub fn classify(&self, query: &Axes) -> Result<BiomeMatch<'_>, ClassifyError> {
        self.classify_weighted(query, &self.weights)
    }

    /// Classify under caller-supplied weights. Exact ties go to the first
    /// prototype in iteration order (strict `<` on the running minimum).
    pub fn classify_weighted(
        &self,
        query: &Axes,
        weights: &AxisWeights,
    ) -> Result<BiomeMatch<'_>, ClassifyError> {
        let q = query.as_array();
        let w = weights.as_array();

        let mut best: Option<(&BiomePrototype, f32)> = None;
        for prototype in self.prototypes.iter() {
            let p = prototype.axes.as_array();
            let mut dist_sq = 0.0f32;
            for i in 0..AXIS_COUNT {
                let d = q[i] - p[i];
                dist_sq += w[i] * d * d;
            }
            match best {
                Some((_, best_sq)) if dist_sq >= best_sq => {}
                _ => best = Some((prototype, dist_sq)),
            }
        }

        let (prototype, dist_sq) = best.ok_or(ClassifyError::EmptyPrototypeSet)?;
        Ok(BiomeMatch {
            id: prototype.id,
            label: &prototype.label,
            anchor: &prototype.anchor,
            color: palette_color(prototype.id),
            dist_sq,
        })
    }
}

impl Default for BiomeClassifier {
    fn default() -> Self {
        Self::new()
    }
}
