//! Loose tabular prototype source.
//!
//! Format: comma-separated rows `id,label,anchor,temp,moist,elev,rough,sal,
//! fert,fire,...` with an optional header. Parsing is forgiving per row and
//! all-or-nothing per table: damaged rows are skipped, but an unreadable file
//! or a table with zero valid rows is an error and the caller keeps its
//! previous prototype set.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use super::BiomePrototype;
use crate::axes::{clamp01, Axes, AXIS_COUNT};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read prototype table: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("prototype table yielded no valid rows")]
    NoValidRows,
}

/// Load and parse a prototype table from a file.
pub fn load_prototype_table(path: &Path) -> Result<Vec<BiomePrototype>, TableError> {
    let text = std::fs::read_to_string(path)?;
    let prototypes = parse_prototype_table(&text);
    if prototypes.is_empty() {
        return Err(TableError::NoValidRows);
    }
    Ok(prototypes)
}

/// Parse prototype rows out of comma-separated text.
///
/// Row rule: at least 10 fields, a positive integer id, seven finite floats.
/// Axis values are clamped to [0, 1] on ingest. Rows failing the rule and
/// duplicate-id rows are skipped silently; the header row fails the id parse
/// and is skipped by the same rule.
pub fn parse_prototype_table(text: &str) -> Vec<BiomePrototype> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for line in text.lines() {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 10 {
            continue;
        }
        let Ok(id) = fields[0].trim().parse::<u32>() else {
            continue;
        };
        if id == 0 || seen.contains(&id) {
            continue;
        }

        let mut axes = [0.0f32; AXIS_COUNT];
        let mut valid = true;
        for (slot, field) in axes.iter_mut().zip(&fields[3..10]) {
            match field.trim().parse::<f32>() {
                Ok(v) if v.is_finite() => *slot = clamp01(v),
                _ => {
                    valid = false;
                    break;
                }
            }
        }
        if !valid {
            continue;
        }

        seen.insert(id);
        out.push(BiomePrototype {
            id,
            label: fields[1].trim().to_string(),
            anchor: fields[2].trim().to_string(),
            axes: Axes::from_array(axes),
        });
    }
    out
}
