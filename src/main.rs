use anyhow::{anyhow, Result};
use clap::Parser;
use reqwest::Client;
use tracing::{debug, info, warn};

use aorai_policy_map::config;
use aorai_policy_map::fetch;
use aorai_policy_map::filters::{self, FilterState};
use aorai_policy_map::orchestrator::{self, Session};
use aorai_policy_map::refdata::RegionIndex;
use aorai_policy_map::viz_export::write_all_viz;

/// African AI policy map - filter, fetch and aggregate the policy dataset
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Output directory for the view-adapter feed (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    /// Path to config file (overrides AORAI_CONFIG environment variable)
    #[arg(short, long)]
    config: Option<String>,

    /// Country name to filter on (repeatable)
    #[arg(long = "country")]
    countries: Vec<String>,

    /// Policy area to filter on (repeatable)
    #[arg(long = "policy-area")]
    policy_areas: Vec<String>,

    /// Governance type code: treaty, strategy, report, organisation, unknown (repeatable)
    #[arg(long = "type")]
    types: Vec<String>,

    /// Region shorthand; replaces any --country selection
    #[arg(long)]
    region: Option<String>,

    /// Start of the year range (1999 stands for the PRE 2000 bucket)
    #[arg(long, default_value_t = filters::YEAR_MIN)]
    year_start: u16,

    /// End of the year range
    #[arg(long, default_value_t = filters::YEAR_MAX)]
    year_end: u16,

    /// Only records with a direct AI reference
    #[arg(long)]
    ai_direct: bool,
}

fn initial_state(args: &Args, regions: &RegionIndex, area_catalog: &[String]) -> FilterState {
    let mut state = FilterState::default();

    for name in &args.countries {
        state = state.toggle_country(name, true);
    }
    for area in &args.policy_areas {
        if !area_catalog.iter().any(|known| known == area) {
            warn!("Unknown policy area '{}' - filter may match nothing", area);
        }
        state = state.toggle_policy_area(area, true);
    }
    for code in &args.types {
        if !filters::GOVERNANCE_TYPES.iter().any(|(_, c)| *c == code.as_str()) {
            warn!("Unknown governance type code '{}'", code);
        }
        state = state.toggle_type(code, true);
    }
    if let Some(region) = &args.region {
        if !regions.contains(region) {
            warn!("Unknown region '{}' - selection will be empty", region);
        }
        state = state.select_region(region, regions);
    }
    state = state.set_year_start(args.year_start).set_year_end(args.year_end);
    if args.ai_direct {
        state = state.toggle_ai_direct();
    }

    state
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting aorai_policy_map");

    let args = Args::parse();
    let pipeline_start = std::time::Instant::now();

    let cfg_path = config::resolve_config_path(args.config.as_deref());
    if !cfg_path.exists() {
        return Err(anyhow!(
            "config not found at {}\n\
             Use --config to specify a config file, or set AORAI_CONFIG.\n\
             Example aorai.yaml:\n\
             api_base: \"https://nocodb.example.org/api/v1/db/data/v1/AORAI2\"\napi_token: \"YOUR_TOKEN\"\n",
            cfg_path.display()
        ));
    }
    let cfg = config::load_config(&cfg_path)?;
    debug!("Using config file: {}", cfg_path.display());

    let client = Client::builder().build()?;

    // 1) reference catalogs: policy areas + region membership
    let area_catalog = fetch::fetch_policy_areas(&client, &cfg).await?;
    let regions = RegionIndex::new(fetch::fetch_regions(&client, &cfg).await?);
    info!(
        "Catalogs loaded - policy_areas={}, region_rows={}",
        area_catalog.len(),
        regions.len()
    );

    // 2) initial filter state from the command line
    let state = initial_state(&args, &regions, &area_catalog);
    debug!(
        "Initial filter state - countries={}, policy_areas={}, types={}, years={}-{}, ai_direct={}",
        state.countries.len(),
        state.policy_areas.len(),
        state.types.len(),
        state.years.0,
        state.years.1,
        state.ai_direct
    );

    // 3) fetch + aggregate
    let mut session = Session::new(state);
    orchestrator::refresh(&client, &cfg, &mut session).await?;
    let aggregate = session
        .aggregate()
        .ok_or_else(|| anyhow!("refresh completed without a committed aggregate"))?;

    // 4) view-adapter feed
    let out_dir = std::path::Path::new(&args.output_dir);
    write_all_viz(out_dir, aggregate, session.state(), &area_catalog)?;

    info!(
        "Pipeline completed successfully - total_duration={:.2}s, items={}, countries={}, output={}",
        pipeline_start.elapsed().as_secs_f32(),
        aggregate.records.len(),
        aggregate.buckets.len(),
        out_dir.display()
    );
    Ok(())
}
