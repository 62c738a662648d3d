use crate::refdata::RegionIndex;

pub const YEAR_MIN: u16 = 1960;
pub const YEAR_MAX: u16 = 2023;
/// Selecting this year on the start axis stands for the whole 1960-1999 span.
pub const PRE_2000_CUTOFF: u16 = 1999;
pub const PRE_2000_LABEL: &str = "PRE 2000";

/// Checkbox value that clears a whole selection set.
pub const ALL_SENTINEL: &str = "all";

/// Governance type filter options: (display label, match code). The record
/// field holds free-ish text, so codes are matched by substring.
pub const GOVERNANCE_TYPES: [(&str, &str); 5] = [
    ("Law, standard, code or treaty", "treaty"),
    ("Policy, strategy, plan or guideline", "strategy"),
    ("Report, database or tool", "report"),
    ("Organisation or project", "organisation"),
    ("Unknown/ Not applicable", "unknown"),
];

/// The single source of truth for what is displayed. Empty selection sets
/// mean "all". Transitions are pure: each consumes the previous state and
/// returns the next one; the caller owns triggering the refetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub countries: Vec<String>,
    pub policy_areas: Vec<String>,
    pub types: Vec<String>,
    pub region: Option<String>,
    pub years: (u16, u16), // inclusive, low-to-high
    pub ai_direct: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            countries: Vec::new(),
            policy_areas: Vec::new(),
            types: Vec::new(),
            region: None,
            years: (YEAR_MIN, YEAR_MAX),
            ai_direct: false,
        }
    }
}

impl FilterState {
    /// Check or uncheck one country. Any manual country interaction drops the
    /// region shorthand, which is a macro over this set rather than a tracked
    /// constraint.
    pub fn toggle_country(mut self, name: &str, checked: bool) -> Self {
        if name == ALL_SENTINEL {
            if checked {
                self.countries.clear();
            }
        } else if checked {
            if !self.countries.iter().any(|c| c == name) {
                self.countries.push(name.to_string());
            }
        } else {
            self.countries.retain(|c| c != name);
        }
        self.region = None;
        self
    }

    pub fn toggle_policy_area(mut self, area: &str, checked: bool) -> Self {
        if area == ALL_SENTINEL {
            if checked {
                self.policy_areas.clear();
            }
        } else if checked {
            if !self.policy_areas.iter().any(|a| a == area) {
                self.policy_areas.push(area.to_string());
            }
        } else {
            self.policy_areas.retain(|a| a != area);
        }
        self
    }

    pub fn toggle_type(mut self, code: &str, checked: bool) -> Self {
        if code == ALL_SENTINEL {
            if checked {
                self.types.clear();
            }
        } else if checked {
            if !self.types.iter().any(|t| t == code) {
                self.types.push(code.to_string());
            }
        } else {
            self.types.retain(|t| t != code);
        }
        self
    }

    /// Region selection replaces the country set wholesale with the region's
    /// membership; the empty region ("None") clears both.
    pub fn select_region(mut self, region: &str, index: &RegionIndex) -> Self {
        if region.is_empty() {
            self.region = None;
            self.countries = Vec::new();
        } else {
            self.region = Some(region.to_string());
            self.countries = index.country_names(region);
        }
        self
    }

    pub fn set_year_start(mut self, year: u16) -> Self {
        self.years.0 = year;
        self
    }

    /// Dragging the end bound past the start reorders the pair so the range
    /// stays low-to-high.
    pub fn set_year_end(mut self, year: u16) -> Self {
        if year < self.years.0 {
            self.years = (year, self.years.0);
        } else {
            self.years = (self.years.0, year);
        }
        self
    }

    pub fn toggle_ai_direct(mut self) -> Self {
        self.ai_direct = !self.ai_direct;
        self
    }

    /// The year membership list for the query: a start at or below the
    /// cutoff expands to the full 1960-1999 span, unioned with the individual
    /// years from 2000 up to the end bound. Ascending, no duplicates.
    pub fn expanded_years(&self) -> Vec<u16> {
        let (start, end) = self.years;
        let mut years = Vec::new();
        if start <= PRE_2000_CUTOFF {
            years.extend(YEAR_MIN..=PRE_2000_CUTOFF);
        }
        for year in start.max(PRE_2000_CUTOFF + 1)..=end {
            years.push(year);
        }
        years
    }
}

/// Display label for a year bound ("PRE 2000" for the cutoff year).
pub fn year_label(year: u16) -> String {
    if year == PRE_2000_CUTOFF {
        PRE_2000_LABEL.to_string()
    } else {
        year.to_string()
    }
}
