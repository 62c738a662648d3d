use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TableResponse<T> {
    pub list: Vec<T>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "totalRows")]
    pub total_rows: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPolicyRow {
    #[serde(rename = "Original title")]
    pub original_title: Option<String>,
    #[serde(rename = "English title")]
    pub english_title: Option<String>,
    #[serde(rename = "External URL")]
    pub external_url: Option<String>,
    #[serde(default, rename = "Country")]
    pub country: Vec<ApiCountryRef>,
    #[serde(default, rename = "Year")]
    pub year: Vec<ApiYearRef>,
    #[serde(default, rename = "Observatory AI policy areas - primary")]
    pub areas_primary: Vec<ApiAreaRef>,
    #[serde(default, rename = "Observatory AI policy areas - secondary")]
    pub areas_secondary: Vec<ApiAreaRef>,
    #[serde(rename = "Policy or governance type")]
    pub governance_type: Option<String>,
    #[serde(rename = "Featured policy and governance")]
    pub featured: Option<String>,
    #[serde(rename = "AI reference")]
    pub ai_reference: Option<String>,
    #[serde(rename = "Analysis status")]
    pub analysis_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCountryRef {
    #[serde(rename = "Country name")]
    pub name: String,
    #[serde(rename = "Country code")]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiYearRef {
    #[serde(rename = "Year")]
    pub year: String,
}

/// Linked policy-area sub-record; also the row shape of the catalog table.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAreaRef {
    #[serde(rename = "Policy area")]
    pub policy_area: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRegionRow {
    #[serde(rename = "Region name")]
    pub region_name: String,
    #[serde(default, rename = "Country")]
    pub country: Vec<ApiCountryRef>,
}
