use futures::future::join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::api_types::{ApiAreaRef, ApiPolicyRow, ApiRegionRow, TableResponse};
use crate::config::MapConfig;
use crate::models::{CountryRef, PolicyRecord};
use crate::refdata::Region;

pub const PAGE_SIZE: u64 = 150;
const REGION_PAGE_LIMIT: u64 = 250;

const RECORDS_TABLE: &str = "Policy and Governance Map";
const AREAS_TABLE: &str = "Observatory AI policy areas";
const REGION_TABLES: [&str; 2] = ["Regional grouping - geo", "Regional grouping - income"];

const RECORD_FIELDS: &str = "Original title,English title,External URL,Country,Year,\
Analysis status,Observatory AI policy areas - primary,\
Observatory AI policy areas - secondary,Featured policy and governance,\
AI reference,Policy or governance type";
const COUNTRY_SUBFIELDS: &str = "Country name,Country code";

/// Transport failures, non-2xx responses and payload-shape violations are
/// distinct outcomes; none of them is recoverable within one fetch cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("decoding response from {url} failed: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected record shape: {0}")]
    Shape(String),
}

/// Offsets of the pages after the first, for `total_rows` rows in pages of
/// `page_size`.
pub fn page_offsets(total_rows: u64, page_size: u64) -> Vec<u64> {
    let pages = total_rows.div_ceil(page_size);
    (1..pages).map(|page| page * page_size).collect()
}

async fn get_table_page<T: DeserializeOwned>(
    client: &Client,
    cfg: &MapConfig,
    table: &str,
    params: Vec<(&'static str, String)>,
) -> Result<TableResponse<T>, FetchError> {
    let url = format!("{}/{}", cfg.api_base, table);
    let resp = client
        .get(&url)
        .header("xc-token", &cfg.api_token)
        .query(&params)
        .send()
        .await
        .map_err(|e| FetchError::Transport {
            url: url.clone(),
            source: e,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url, status });
    }

    resp.json()
        .await
        .map_err(|e| FetchError::Decode { url, source: e })
}

fn record_params(where_clause: &str, offset: u64) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("limit", PAGE_SIZE.to_string()),
        ("fields", RECORD_FIELDS.to_string()),
        ("nested[Country][fields]", COUNTRY_SUBFIELDS.to_string()),
        ("where", where_clause.to_string()),
    ];
    if offset > 0 {
        params.push(("offset", offset.to_string()));
    }
    params
}

fn to_record(row: ApiPolicyRow) -> Result<PolicyRecord, FetchError> {
    let title = row.original_title.unwrap_or_default();
    if row.country.is_empty() {
        return Err(FetchError::Shape(format!(
            "record '{}' has no linked country",
            title
        )));
    }
    if row.year.is_empty() {
        return Err(FetchError::Shape(format!(
            "record '{}' has no linked year",
            title
        )));
    }

    Ok(PolicyRecord {
        original_title: title,
        english_title: row.english_title,
        external_url: row.external_url,
        years: row.year.into_iter().map(|y| y.year).collect(),
        countries: row
            .country
            .into_iter()
            .map(|c| CountryRef {
                name: c.name,
                iso3: c.code,
            })
            .collect(),
        primary_areas: row.areas_primary.into_iter().map(|a| a.policy_area).collect(),
        secondary_areas: row
            .areas_secondary
            .into_iter()
            .map(|a| a.policy_area)
            .collect(),
        governance_type: row.governance_type,
        featured_url: row.featured,
        ai_reference: row.ai_reference,
    })
}

/// Fetch every record matching `where_clause`: one sizing request, then all
/// remaining pages concurrently with identical parameters plus an offset,
/// concatenated in page order. Any failed page fails the whole fetch.
pub async fn fetch_policies(
    client: &Client,
    cfg: &MapConfig,
    where_clause: &str,
) -> Result<Vec<PolicyRecord>, FetchError> {
    let start = std::time::Instant::now();

    let first: TableResponse<ApiPolicyRow> =
        get_table_page(client, cfg, RECORDS_TABLE, record_params(where_clause, 0)).await?;
    let total_rows = first.page_info.total_rows;
    let offsets = page_offsets(total_rows, PAGE_SIZE);
    debug!(
        "Record fetch - total_rows={}, extra_pages={}",
        total_rows,
        offsets.len()
    );

    let pages = join_all(offsets.iter().map(|&offset| {
        get_table_page::<ApiPolicyRow>(client, cfg, RECORDS_TABLE, record_params(where_clause, offset))
    }))
    .await;

    let mut rows = first.list;
    for page in pages {
        rows.extend(page?.list);
    }

    let records = rows
        .into_iter()
        .map(to_record)
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Record fetch completed - duration={:.2}s, rows={}, pages={}",
        start.elapsed().as_secs_f32(),
        records.len(),
        offsets.len() + 1
    );
    Ok(records)
}

/// The policy-area catalog, sorted case-insensitively by name.
pub async fn fetch_policy_areas(
    client: &Client,
    cfg: &MapConfig,
) -> Result<Vec<String>, FetchError> {
    let resp: TableResponse<ApiAreaRef> =
        get_table_page(client, cfg, AREAS_TABLE, Vec::new()).await?;

    let mut areas: Vec<String> = resp.list.into_iter().map(|a| a.policy_area).collect();
    areas.sort_by_key(|a| a.to_uppercase());
    debug!("Policy area catalog loaded - areas={}", areas.len());
    Ok(areas)
}

/// Region membership rows from both grouping tables (geographic, then
/// income), concatenated into one list.
pub async fn fetch_regions(client: &Client, cfg: &MapConfig) -> Result<Vec<Region>, FetchError> {
    let mut regions = Vec::new();

    for table in REGION_TABLES {
        let params = vec![
            ("limit", REGION_PAGE_LIMIT.to_string()),
            ("where", "(Country,isnot,null)".to_string()),
        ];
        let resp: TableResponse<ApiRegionRow> = get_table_page(client, cfg, table, params).await?;
        debug!("Region table loaded - table={}, rows={}", table, resp.list.len());
        regions.extend(resp.list.into_iter().map(|row| Region {
            name: row.region_name,
            countries: row.country.into_iter().map(|c| c.name).collect(),
        }));
    }

    Ok(regions)
}
