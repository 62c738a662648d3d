use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRef {
    pub name: String, // e.g., "Kenya"
    pub iso3: String, // e.g., "KEN"
}

/// One policy-and-governance item as served by the data API, immutable once
/// fetched. The first linked country is the grouping key for the map buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub original_title: String,
    pub english_title: Option<String>,
    pub external_url: Option<String>,
    pub years: Vec<String>, // publication year labels, e.g. "2019"
    pub countries: Vec<CountryRef>,
    pub primary_areas: Vec<String>,
    pub secondary_areas: Vec<String>,
    pub governance_type: Option<String>,
    pub featured_url: Option<String>,
    pub ai_reference: Option<String>,
}

impl PolicyRecord {
    pub fn first_country(&self) -> Option<&CountryRef> {
        self.countries.first()
    }

    pub fn first_year(&self) -> Option<&str> {
        self.years.first().map(String::as_str)
    }

    /// Primary then secondary policy areas, in linked order.
    pub fn combined_areas(&self) -> impl Iterator<Item = &str> {
        self.primary_areas
            .iter()
            .chain(self.secondary_areas.iter())
            .map(String::as_str)
    }
}

/// ISO-3 code -> records, keys sorted lexicographically. Every in-scope
/// country has an entry even when no record matched.
pub type CountryBuckets = BTreeMap<String, Vec<PolicyRecord>>;

#[derive(Debug, Clone, Serialize)]
pub struct AreaCount {
    pub policy_area: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearCount {
    pub year: String, // "PRE 2000" or a four-digit label
    pub count: u32,
}

/// Everything the view adapter consumes for one filter state: choropleth
/// buckets, the flat list view, and the two chart series.
#[derive(Debug, Clone)]
pub struct Aggregate {
    pub buckets: CountryBuckets,
    pub records: Vec<PolicyRecord>,
    pub policy_areas: Vec<AreaCount>,
    pub years: Vec<YearCount>,
}
