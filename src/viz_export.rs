// src/viz_export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{collections::BTreeMap, fs, path::Path};

use crate::aggregate::items_count;
use crate::filters::{year_label, FilterState};
use crate::models::Aggregate;

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Write the view-adapter feed for one refresh into `out_dir`: choropleth
/// counts, the flat list, both chart series, the highlights panel numbers
/// and a bundle index.
pub fn write_all_viz(
    out_dir: &Path,
    aggregate: &Aggregate,
    state: &FilterState,
    area_catalog: &[String],
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    // 1) Choropleth: ISO-3 -> matching item count, every in-scope country present
    let choropleth: BTreeMap<&str, usize> = aggregate
        .buckets
        .iter()
        .map(|(iso3, records)| (iso3.as_str(), records.len()))
        .collect();
    write_json(out_dir.join("viz.choropleth.json"), &choropleth)?;

    // 2) List view: records in bucket-key order
    write_json(out_dir.join("viz.list.json"), &aggregate.records)?;

    // 3) Charts
    write_json(out_dir.join("viz.areas.json"), &aggregate.policy_areas)?;
    write_json(out_dir.join("viz.years.json"), &aggregate.years)?;

    // 4) Highlights panel
    let highlights = json!({
        "items": items_count(&aggregate.buckets),
        "policy_areas": if state.policy_areas.is_empty() {
            json!("All")
        } else {
            json!(state.policy_areas.len())
        },
        "countries": if state.countries.is_empty() {
            json!("All")
        } else {
            json!(state.countries.len())
        },
        "region": state.region.clone(),
        "period": [year_label(state.years.0), year_label(state.years.1)],
    });
    write_json(out_dir.join("viz.highlights.json"), &highlights)?;

    // 5) Bundle index
    let idx = json!({
        "version": 1,
        "counts": {
            "items": items_count(&aggregate.buckets),
            "countries": aggregate.buckets.len(),
            "policy_area_catalog": area_catalog.len(),
        },
        "files": [
            "viz.choropleth.json",
            "viz.list.json",
            "viz.areas.json",
            "viz.years.json",
            "viz.highlights.json"
        ]
    });
    write_json(out_dir.join("viz.index.json"), &idx)?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .map(|_| ())
        .map_err(|e| e.into())
}
