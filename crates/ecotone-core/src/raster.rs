//! Per-region rasterization and the mode-keyed raster cache.
//!
//! A region is a fixed 32×32 block of tiles rendered as one RGB grid. The
//! cache is keyed by region coordinate under a single active view mode;
//! switching modes drops every raster wholesale. No partial invalidation and
//! no eviction: a miss re-renders and must produce the same pixels a hit
//! would have.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

use crate::axes::Axis;
use crate::biome::ClassifyError;
use crate::field::BiomeField;

/// Region side length in tiles.
pub const REGION_SIZE: i32 = 32;

/// What a region raster shows: prototype colours, or one raw axis rendered
/// as grayscale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    Biome,
    RawAxis(Axis),
}

impl ViewMode {
    pub const ALL: [ViewMode; 8] = [
        ViewMode::Biome,
        ViewMode::RawAxis(Axis::Temperature),
        ViewMode::RawAxis(Axis::Moisture),
        ViewMode::RawAxis(Axis::Elevation),
        ViewMode::RawAxis(Axis::Roughness),
        ViewMode::RawAxis(Axis::Salinity),
        ViewMode::RawAxis(Axis::Fertility),
        ViewMode::RawAxis(Axis::Fire),
    ];

    /// Stable name, matching what [`FromStr`] accepts.
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Biome => "biome",
            ViewMode::RawAxis(axis) => axis.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized view mode `{0}`")]
pub struct ModeError(pub String);

impl FromStr for ViewMode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, ModeError> {
        ViewMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| ModeError(s.to_string()))
    }
}

/// One region's rendered RGB grid, row-major, `REGION_SIZE²` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRaster {
    pixels: Vec<[u8; 3]>,
}

impl RegionRaster {
    /// Pixel at region-local coordinates (0..REGION_SIZE each).
    #[inline]
    pub fn pixel(&self, local_x: i32, local_y: i32) -> [u8; 3] {
        self.pixels[(local_y * REGION_SIZE + local_x) as usize]
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }
}

/// Render a region fresh, bypassing any cache.
pub fn render_region(
    field: &BiomeField,
    mode: ViewMode,
    region_x: i32,
    region_y: i32,
) -> Result<RegionRaster, ClassifyError> {
    let base_x = region_x * REGION_SIZE;
    let base_y = region_y * REGION_SIZE;
    let mut pixels = Vec::with_capacity((REGION_SIZE * REGION_SIZE) as usize);
    for dy in 0..REGION_SIZE {
        for dx in 0..REGION_SIZE {
            let axes = field.sample_axes(base_x + dx, base_y + dy);
            let px = match mode {
                ViewMode::Biome => field.classify(&axes)?.color,
                ViewMode::RawAxis(axis) => {
                    let v = (axes.get(axis).clamp(0.0, 1.0) * 255.0) as u8;
                    [v, v, v]
                }
            };
            pixels.push(px);
        }
    }
    Ok(RegionRaster { pixels })
}

/// Memoizes region rasters under the active view mode.
pub struct RegionCache {
    mode: ViewMode,
    rasters: HashMap<(i32, i32), RegionRaster>,
}

impl RegionCache {
    pub fn new() -> Self {
        Self {
            mode: ViewMode::Biome,
            rasters: HashMap::new(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Number of currently cached rasters.
    pub fn cached_regions(&self) -> usize {
        self.rasters.len()
    }

    /// Adopt a new view mode. A no-op when unchanged; otherwise every cached
    /// raster is dropped so the next fetch regenerates under the new mode.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode == self.mode {
            return;
        }
        log::debug!(
            "view mode {} -> {}: dropping {} cached rasters",
            self.mode.name(),
            mode.name(),
            self.rasters.len()
        );
        self.rasters.clear();
        self.mode = mode;
    }

    /// String-facing mode switch. An unrecognized name fails and leaves both
    /// the mode and the cache untouched.
    pub fn set_mode_named(&mut self, name: &str) -> Result<(), ModeError> {
        self.set_mode(name.parse()?);
        Ok(())
    }

    /// The raster for a region, rendering and storing it on first request.
    pub fn raster(
        &mut self,
        field: &BiomeField,
        region_x: i32,
        region_y: i32,
    ) -> Result<&RegionRaster, ClassifyError> {
        match self.rasters.entry((region_x, region_y)) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                let rendered = render_region(field, self.mode, region_x, region_y)?;
                Ok(slot.insert(rendered))
            }
        }
    }
}

impl Default for RegionCache {
    fn default() -> Self {
        Self::new()
    }
}
