//! Diagnostic visualizer — renders every view mode to data/debug/ as PNG,
//! plus a biome legend strip. Exercises the region cache end to end.
//! Not part of the main pipeline; no tests.

use std::fs;
use std::path::Path;

use anyhow::Result;

use ecotone_core::biome::palette_color;
use ecotone_core::field::BiomeField;
use ecotone_core::raster::{RegionCache, ViewMode, REGION_SIZE};

/// Regions per side of the rendered block, centred on the origin.
const BLOCK_REGIONS: i32 = 8;

fn main() -> Result<()> {
    env_logger::init();

    let field = BiomeField::from_world_seed(42);
    let mut cache = RegionCache::new();

    let out_dir = Path::new("data/debug");
    fs::create_dir_all(out_dir)?;

    let side = (BLOCK_REGIONS * REGION_SIZE) as u32;
    let half = BLOCK_REGIONS / 2;

    for mode in ViewMode::ALL {
        println!("Rendering {} ({side}×{side})…", mode.name());
        cache.set_mode(mode);

        let mut img = image::RgbImage::new(side, side);
        for ry in -half..half {
            for rx in -half..half {
                let raster = cache.raster(&field, rx, ry)?;
                let px_base_x = ((rx + half) * REGION_SIZE) as u32;
                let px_base_y = ((ry + half) * REGION_SIZE) as u32;
                for dy in 0..REGION_SIZE {
                    for dx in 0..REGION_SIZE {
                        let [r, g, b] = raster.pixel(dx, dy);
                        img.put_pixel(
                            px_base_x + dx as u32,
                            px_base_y + dy as u32,
                            image::Rgb([r, g, b]),
                        );
                    }
                }
            }
        }
        let path = out_dir.join(format!("{}.png", mode.name()));
        img.save(&path)?;
        println!("Wrote {}", path.display());
    }

    // Legend strip: one square swatch per built-in prototype, in id order.
    {
        let prototypes = field.classifier().prototypes();
        let sw = REGION_SIZE as u32;
        let mut img = image::RgbImage::new(sw * prototypes.len() as u32, sw);
        for (i, proto) in prototypes.iter().enumerate() {
            let [r, g, b] = palette_color(proto.id);
            for y in 0..sw {
                for x in 0..sw {
                    img.put_pixel(i as u32 * sw + x, y, image::Rgb([r, g, b]));
                }
            }
        }
        let path = out_dir.join("legend.png");
        img.save(&path)?;
        println!("Wrote legend for {} biomes to {}", prototypes.len(), path.display());
    }

    println!("Done.");
    Ok(())
}
