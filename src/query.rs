use itertools::Itertools;

use crate::filters::FilterState;

// Column names as the record table spells them.
pub const F_YEAR: &str = "Year";
pub const F_COUNTRY: &str = "Country";
pub const F_AREA_PRIMARY: &str = "Observatory AI policy areas - primary";
pub const F_AREA_SECONDARY: &str = "Observatory AI policy areas - secondary";
pub const F_STATUS: &str = "Analysis status";
pub const F_AI_REFERENCE: &str = "AI reference";
pub const F_TYPE: &str = "Policy or governance type";

pub const STATUS_PUBLISHED: &str = "Publish to website";
pub const AI_REFERENCE_DIRECT: &str = "Direct";

/// Build the `where` expression for the record table from the current filter
/// state. Grammar: `(field,op,value)` clauses joined with `~and`/`~or`;
/// `in` takes a comma list, `like` matches `%substring%`.
///
/// The year, country-not-null and publish-status clauses are unconditional,
/// so the expression is never empty; optional clauses are appended with their
/// own `~and` and therefore never leave a dangling connective.
pub fn build_where(state: &FilterState) -> String {
    let years = state.expanded_years().iter().join(",");
    let mut where_ = format!("({F_YEAR},in,{years})~and({F_COUNTRY},isnot,null)");

    if !state.countries.is_empty() {
        where_.push_str(&format!(
            "~and({F_COUNTRY},in,{})",
            state.countries.join(",")
        ));
    }

    if !state.policy_areas.is_empty() {
        let areas = state.policy_areas.join(",");
        where_.push_str(&format!(
            "~and(({F_AREA_PRIMARY},in,{areas})~or({F_AREA_SECONDARY},in,{areas}))"
        ));
    }

    where_.push_str(&format!("~and({F_STATUS},eq,{STATUS_PUBLISHED})"));

    if state.ai_direct {
        where_.push_str(&format!("~and({F_AI_REFERENCE},eq,{AI_REFERENCE_DIRECT})"));
    }

    if !state.types.is_empty() {
        let type_where = state
            .types
            .iter()
            .map(|code| format!("({F_TYPE},like,%{code}%)"))
            .join("~or");
        where_.push_str(&format!("~and({type_where})"));
    }

    where_
}
