/// Field probe: sample axes, classify tiles, run nearest searches, and
/// summarize neighbourhoods from the command line.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;

use ecotone_core::field::{census, BiomeField};
use ecotone_core::hash::{derive_seed, SeedSource};
use ecotone_core::search::{NearestSearch, SearchOutcome};

#[derive(Parser, Debug)]
#[command(name = "probe", about = "Query a seeded biome field from the command line")]
struct Args {
    /// World seed: an integer or a label. Absent = entropy-sourced.
    #[arg(long)]
    seed: Option<String>,

    /// Replace the built-in prototypes from a tabular file before answering.
    #[arg(long)]
    table: Option<PathBuf>,

    /// Print axes and classification at a tile as JSON.
    #[arg(long, value_name = "TX,TY")]
    at: Option<String>,

    /// Target biome id for a nearest search (requires --from).
    #[arg(long)]
    find: Option<u32>,

    /// Start tile for --find.
    #[arg(long, value_name = "TX,TY")]
    from: Option<String>,

    /// Maximum Chebyshev search radius for --find.
    #[arg(long, default_value = "256")]
    radius: i32,

    /// Center tile for a biome census of the surrounding window.
    #[arg(long, value_name = "TX,TY")]
    census: Option<String>,

    /// Census window half-width in tiles.
    #[arg(long, default_value = "32")]
    half: i32,
}

fn parse_tile(s: &str) -> Result<(i32, i32)> {
    let (x, y) = s.split_once(',').context("expected TX,TY")?;
    Ok((
        x.trim().parse().context("bad tile x")?,
        y.trim().parse().context("bad tile y")?,
    ))
}

/// An integer argument wraps to u32; anything else is hashed as a label.
fn resolve_seed(arg: Option<&str>) -> u32 {
    match arg {
        None => derive_seed(SeedSource::Absent),
        Some(s) => match s.parse::<i64>() {
            Ok(v) => derive_seed(SeedSource::Integer(v)),
            Err(_) => derive_seed(SeedSource::Label(s)),
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = resolve_seed(args.seed.as_deref());
    let mut field = BiomeField::from_world_seed(seed);
    eprintln!("world seed: {seed}");

    if let Some(path) = &args.table {
        // Best-effort: an unusable table keeps the built-in set active.
        match field.replace_prototypes_from_path(path) {
            Ok(n) => eprintln!("loaded {n} prototypes from {}", path.display()),
            Err(err) => eprintln!("keeping built-in prototypes: {err}"),
        }
    }

    if let Some(at) = &args.at {
        let (tx, ty) = parse_tile(at)?;
        let axes = field.sample_axes(tx, ty);
        let m = field.classify(&axes)?;
        let out = json!({
            "tile": [tx, ty],
            "axes": axes,
            "biome": {
                "id": m.id,
                "label": m.label,
                "anchor": m.anchor,
                "color": m.color,
                "dist_sq": m.dist_sq,
            },
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    }

    if let Some(target) = args.find {
        let Some(from) = &args.from else {
            bail!("--find requires --from TX,TY");
        };
        let start = parse_tile(from)?;
        let mut search = NearestSearch::new();
        let out = match search.find_nearest(&field, target, start, args.radius)? {
            SearchOutcome::Found(hit) => json!({
                "found": true,
                "tile": [hit.tile.0, hit.tile.1],
                "distance": hit.distance,
                "tiles_examined": hit.tiles_examined,
                "bounded": hit.bounded,
                "exact": hit.exact,
            }),
            SearchOutcome::NotFound {
                radius_searched,
                tiles_examined,
            } => json!({
                "found": false,
                "radius_searched": radius_searched,
                "tiles_examined": tiles_examined,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    }

    if let Some(center) = &args.census {
        let center = parse_tile(center)?;
        let counts = census(&field, center, args.half)?;
        let labels: Vec<_> = counts
            .iter()
            .map(|(id, count)| {
                let label = field
                    .classifier()
                    .prototypes()
                    .iter()
                    .find(|p| p.id == *id)
                    .map(|p| p.label.clone())
                    .unwrap_or_else(|| format!("id {id}"));
                json!({ "id": id, "label": label, "tiles": count })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!(labels))?);
    }

    if args.at.is_none() && args.find.is_none() && args.census.is_none() {
        eprintln!("Nothing to do. Use --at, --find, or --census (see --help).");
    }

    Ok(())
}
