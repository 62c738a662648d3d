//! Reference datasets loaded independently of the live record API: the
//! in-scope African country list and the region-membership index.

#[derive(Debug, Clone, Copy)]
pub struct Country {
    pub iso3: &'static str,
    pub name: &'static str,
}

/// Every country in scope for the map. Bucket maps are seeded from this list
/// so each country has an entry even with zero matching records.
pub const AFRICAN_COUNTRIES: [Country; 54] = [
    Country { iso3: "AGO", name: "Angola" },
    Country { iso3: "BDI", name: "Burundi" },
    Country { iso3: "BEN", name: "Benin" },
    Country { iso3: "BFA", name: "Burkina Faso" },
    Country { iso3: "BWA", name: "Botswana" },
    Country { iso3: "CAF", name: "Central African Republic" },
    Country { iso3: "CIV", name: "Ivory Coast" },
    Country { iso3: "CMR", name: "Cameroon" },
    Country { iso3: "COD", name: "Democratic Republic of the Congo" },
    Country { iso3: "COG", name: "Republic of the Congo" },
    Country { iso3: "COM", name: "Comoros" },
    Country { iso3: "CPV", name: "Cape Verde" },
    Country { iso3: "DJI", name: "Djibouti" },
    Country { iso3: "DZA", name: "Algeria" },
    Country { iso3: "EGY", name: "Egypt" },
    Country { iso3: "ERI", name: "Eritrea" },
    Country { iso3: "ETH", name: "Ethiopia" },
    Country { iso3: "GAB", name: "Gabon" },
    Country { iso3: "GHA", name: "Ghana" },
    Country { iso3: "GIN", name: "Guinea" },
    Country { iso3: "GMB", name: "Gambia" },
    Country { iso3: "GNB", name: "Guinea-Bissau" },
    Country { iso3: "GNQ", name: "Equatorial Guinea" },
    Country { iso3: "KEN", name: "Kenya" },
    Country { iso3: "LBR", name: "Liberia" },
    Country { iso3: "LBY", name: "Libya" },
    Country { iso3: "LSO", name: "Lesotho" },
    Country { iso3: "MAR", name: "Morocco" },
    Country { iso3: "MDG", name: "Madagascar" },
    Country { iso3: "MLI", name: "Mali" },
    Country { iso3: "MOZ", name: "Mozambique" },
    Country { iso3: "MRT", name: "Mauritania" },
    Country { iso3: "MUS", name: "Mauritius" },
    Country { iso3: "MWI", name: "Malawi" },
    Country { iso3: "NAM", name: "Namibia" },
    Country { iso3: "NER", name: "Niger" },
    Country { iso3: "NGA", name: "Nigeria" },
    Country { iso3: "RWA", name: "Rwanda" },
    Country { iso3: "SDN", name: "Sudan" },
    Country { iso3: "SEN", name: "Senegal" },
    Country { iso3: "SLE", name: "Sierra Leone" },
    Country { iso3: "SOM", name: "Somalia" },
    Country { iso3: "SSD", name: "South Sudan" },
    Country { iso3: "STP", name: "Sao Tome and Principe" },
    Country { iso3: "SWZ", name: "Eswatini" },
    Country { iso3: "SYC", name: "Seychelles" },
    Country { iso3: "TCD", name: "Chad" },
    Country { iso3: "TGO", name: "Togo" },
    Country { iso3: "TUN", name: "Tunisia" },
    Country { iso3: "TZA", name: "Tanzania" },
    Country { iso3: "UGA", name: "Uganda" },
    Country { iso3: "ZAF", name: "South Africa" },
    Country { iso3: "ZMB", name: "Zambia" },
    Country { iso3: "ZWE", name: "Zimbabwe" },
];

/// One row of a regional grouping table (geographic or income based). A
/// region name may span several rows; membership lookups merge them.
#[derive(Debug, Clone)]
pub struct Region {
    pub name: String,
    pub countries: Vec<String>, // country names as the record API spells them
}

#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    regions: Vec<Region>,
}

impl RegionIndex {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn contains(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r.name == region)
    }

    /// All member country names for `region`, across every matching row.
    pub fn country_names(&self, region: &str) -> Vec<String> {
        self.regions
            .iter()
            .filter(|r| r.name == region)
            .flat_map(|r| r.countries.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> RegionIndex {
        RegionIndex::new(vec![
            Region {
                name: "East Africa".into(),
                countries: vec!["Kenya".into(), "Uganda".into()],
            },
            Region {
                name: "East Africa".into(),
                countries: vec!["Tanzania".into()],
            },
            Region {
                name: "Low income".into(),
                countries: vec!["Burundi".into()],
            },
        ])
    }

    #[test]
    fn membership_merges_rows_with_the_same_name() {
        let index = sample_index();
        assert_eq!(
            index.country_names("East Africa"),
            vec!["Kenya", "Uganda", "Tanzania"]
        );
    }

    #[test]
    fn unknown_region_has_no_members() {
        let index = sample_index();
        assert!(index.country_names("West Africa").is_empty());
        assert!(!index.contains("West Africa"));
    }

    #[test]
    fn reference_list_has_unique_codes() {
        let mut codes: Vec<&str> = AFRICAN_COUNTRIES.iter().map(|c| c.iso3).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), AFRICAN_COUNTRIES.len());
    }
}
