use std::collections::BTreeMap;

use tracing::debug;

use crate::filters::PRE_2000_LABEL;
use crate::models::{Aggregate, AreaCount, CountryBuckets, PolicyRecord, YearCount};
use crate::refdata::Country;

/// Group records under the first linked country's ISO-3 code and seed an
/// entry for every reference country. Multi-country records land in the
/// first country's bucket only. Within a bucket, records are ordered by the
/// upper-cased first year label; labels are four-digit years, so this agrees
/// with numeric order on real data.
pub fn build_buckets(records: Vec<PolicyRecord>, reference: &[Country]) -> CountryBuckets {
    let mut buckets: CountryBuckets = BTreeMap::new();

    for record in records {
        let code = match record.first_country() {
            Some(country) => country.iso3.clone(),
            None => continue,
        };
        buckets.entry(code).or_default().push(record);
    }

    for country in reference {
        buckets.entry(country.iso3.to_string()).or_default();
    }

    for records in buckets.values_mut() {
        records.sort_by(|a, b| {
            let year_a = a.first_year().unwrap_or_default().to_uppercase();
            let year_b = b.first_year().unwrap_or_default().to_uppercase();
            year_a.cmp(&year_b)
        });
    }

    buckets
}

/// Policy-area chart series: one entry per selected area in selection order,
/// counting every primary or secondary occurrence across all buckets. Empty
/// selection means the chart is not shown, so the series is empty.
pub fn area_series(buckets: &CountryBuckets, selected: &[String]) -> Vec<AreaCount> {
    if selected.is_empty() {
        return Vec::new();
    }

    let mut series: Vec<AreaCount> = selected
        .iter()
        .map(|area| AreaCount {
            policy_area: area.clone(),
            count: 0,
        })
        .collect();

    for records in buckets.values() {
        for record in records {
            for area in record.combined_areas() {
                for entry in series.iter_mut() {
                    if entry.policy_area == area {
                        entry.count += 1;
                    }
                }
            }
        }
    }

    series
}

/// Year chart series: one entry per distinct year label, with every year
/// below 2000 merged into a single "PRE 2000" entry. Multi-year records
/// contribute to each of their years. Sorted ascending by label with the
/// merged entry moved to the front; zero-count entries are dropped.
pub fn year_series(buckets: &CountryBuckets) -> Vec<YearCount> {
    let mut series = vec![YearCount {
        year: PRE_2000_LABEL.to_string(),
        count: 0,
    }];

    for records in buckets.values() {
        for record in records {
            for label in &record.years {
                let pre_2000 = label.parse::<i32>().map(|y| y < 2000).unwrap_or(false);
                if pre_2000 {
                    series[0].count += 1;
                } else if let Some(entry) = series.iter_mut().find(|e| e.year == *label) {
                    entry.count += 1;
                } else {
                    series.push(YearCount {
                        year: label.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    series.sort_by(|a, b| a.year.cmp(&b.year));
    if let Some(pos) = series.iter().position(|e| e.year == PRE_2000_LABEL) {
        let pre_2000 = series.remove(pos);
        series.insert(0, pre_2000);
    }
    series.retain(|e| e.count > 0);
    series
}

/// The list view: non-empty buckets flattened in key order.
pub fn flatten_records(buckets: &CountryBuckets) -> Vec<PolicyRecord> {
    buckets
        .values()
        .filter(|records| !records.is_empty())
        .flat_map(|records| records.iter().cloned())
        .collect()
}

pub fn items_count(buckets: &CountryBuckets) -> usize {
    buckets.values().map(Vec::len).sum()
}

pub fn build_aggregate(
    records: Vec<PolicyRecord>,
    reference: &[Country],
    selected_areas: &[String],
) -> Aggregate {
    let buckets = build_buckets(records, reference);
    let records = flatten_records(&buckets);
    let policy_areas = area_series(&buckets, selected_areas);
    let years = year_series(&buckets);
    debug!(
        "Aggregation completed - countries={}, items={}, year_entries={}",
        buckets.len(),
        records.len(),
        years.len()
    );
    Aggregate {
        buckets,
        records,
        policy_areas,
        years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CountryRef;
    use crate::refdata::AFRICAN_COUNTRIES;

    fn record(countries: &[(&str, &str)], years: &[&str], areas: &[&str]) -> PolicyRecord {
        PolicyRecord {
            original_title: "Item".into(),
            english_title: None,
            external_url: None,
            years: years.iter().map(|y| y.to_string()).collect(),
            countries: countries
                .iter()
                .map(|(name, iso3)| CountryRef {
                    name: name.to_string(),
                    iso3: iso3.to_string(),
                })
                .collect(),
            primary_areas: areas.iter().map(|a| a.to_string()).collect(),
            secondary_areas: Vec::new(),
            governance_type: None,
            featured_url: None,
            ai_reference: None,
        }
    }

    #[test]
    fn empty_result_still_seeds_every_reference_country() {
        let buckets = build_buckets(Vec::new(), &AFRICAN_COUNTRIES);
        assert_eq!(buckets.len(), AFRICAN_COUNTRIES.len());
        assert!(buckets.values().all(Vec::is_empty));
    }

    #[test]
    fn grouping_uses_the_first_listed_country_only() {
        let records = vec![
            record(&[("Kenya", "KEN"), ("Uganda", "UGA")], &["2019"], &[]),
            record(&[("Ghana", "GHA"), ("Uganda", "UGA")], &["2020"], &[]),
        ];
        let buckets = build_buckets(records, &AFRICAN_COUNTRIES);
        assert_eq!(buckets["KEN"].len(), 1);
        assert_eq!(buckets["GHA"].len(), 1);
        assert!(buckets["UGA"].is_empty());
    }

    #[test]
    fn bucket_keys_are_sorted_and_records_ordered_by_year() {
        let records = vec![
            record(&[("Kenya", "KEN")], &["2021"], &[]),
            record(&[("Kenya", "KEN")], &["2005"], &[]),
            record(&[("Kenya", "KEN")], &["2013"], &[]),
        ];
        let buckets = build_buckets(records, &AFRICAN_COUNTRIES);
        let years: Vec<&str> = buckets["KEN"]
            .iter()
            .filter_map(|r| r.first_year())
            .collect();
        assert_eq!(years, vec!["2005", "2013", "2021"]);

        let keys: Vec<&String> = buckets.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn year_series_merges_pre_2000_and_drops_zero_counts() {
        let records = vec![record(&[("Kenya", "KEN")], &["1999", "2005"], &[])];
        let series = year_series(&build_buckets(records, &AFRICAN_COUNTRIES));
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].year, PRE_2000_LABEL);
        assert_eq!(series[0].count, 1);
        assert_eq!(series[1].year, "2005");
        assert_eq!(series[1].count, 1);
    }

    #[test]
    fn year_series_counts_multi_year_records_per_year() {
        let records = vec![
            record(&[("Kenya", "KEN")], &["2005", "2006"], &[]),
            record(&[("Ghana", "GHA")], &["2006"], &[]),
        ];
        let series = year_series(&build_buckets(records, &AFRICAN_COUNTRIES));
        let counts: Vec<(&str, u32)> = series.iter().map(|e| (e.year.as_str(), e.count)).collect();
        assert_eq!(counts, vec![("2005", 1), ("2006", 2)]);
    }

    #[test]
    fn year_series_is_empty_when_nothing_matches() {
        let series = year_series(&build_buckets(Vec::new(), &AFRICAN_COUNTRIES));
        assert!(series.is_empty()); // the seeded PRE 2000 entry has count 0
    }

    #[test]
    fn area_series_follows_selection_order_and_counts_occurrences() {
        let records = vec![
            record(&[("Kenya", "KEN")], &["2019"], &["Data protection", "Education"]),
            record(&[("Ghana", "GHA")], &["2020"], &["Data protection"]),
        ];
        let buckets = build_buckets(records, &AFRICAN_COUNTRIES);
        let selected = vec!["Education".to_string(), "Data protection".to_string()];
        let series = area_series(&buckets, &selected);
        assert_eq!(series[0].policy_area, "Education");
        assert_eq!(series[0].count, 1);
        assert_eq!(series[1].policy_area, "Data protection");
        assert_eq!(series[1].count, 2);
    }

    #[test]
    fn area_series_counts_secondary_occurrences_too() {
        let mut rec = record(&[("Kenya", "KEN")], &["2019"], &["Data protection"]);
        rec.secondary_areas = vec!["Data protection".into()];
        let buckets = build_buckets(vec![rec], &AFRICAN_COUNTRIES);
        let series = area_series(&buckets, &["Data protection".to_string()]);
        assert_eq!(series[0].count, 2); // one per occurrence
    }

    #[test]
    fn area_series_is_empty_without_a_selection() {
        let records = vec![record(&[("Kenya", "KEN")], &["2019"], &["Education"])];
        let buckets = build_buckets(records, &AFRICAN_COUNTRIES);
        assert!(area_series(&buckets, &[]).is_empty());
    }

    #[test]
    fn flattened_list_walks_buckets_in_key_order() {
        let records = vec![
            record(&[("Zimbabwe", "ZWE")], &["2019"], &[]),
            record(&[("Algeria", "DZA")], &["2020"], &[]),
        ];
        let buckets = build_buckets(records, &AFRICAN_COUNTRIES);
        let flat = flatten_records(&buckets);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].first_country().unwrap().iso3, "DZA");
        assert_eq!(flat[1].first_country().unwrap().iso3, "ZWE");
        assert_eq!(items_count(&buckets), 2);
    }
}
