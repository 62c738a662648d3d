use reqwest::Client;
use tracing::{debug, info, warn};

use crate::aggregate::{self, items_count};
use crate::config::MapConfig;
use crate::fetch::{self, FetchError};
use crate::filters::FilterState;
use crate::models::Aggregate;
use crate::query;
use crate::refdata::AFRICAN_COUNTRIES;

/// One dashboard session: the current filter state, the last committed
/// aggregate and the bookkeeping that keeps rapid filter changes honest.
/// Every refresh carries a generation number; a completion only commits when
/// it is still the newest issued, so an older fetch resolving late can never
/// overwrite newer results. Loading flags clear on every terminal outcome.
#[derive(Debug, Default)]
pub struct Session {
    state: FilterState,
    aggregate: Option<Aggregate>,
    generation_issued: u64,
    generation_committed: u64,
    years_loading: bool,
    policy_areas_loading: bool,
    last_error: Option<String>,
}

impl Session {
    pub fn new(state: FilterState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Replace the filter state with the result of a pure transition. The
    /// caller follows up with `refresh`; the transition itself has no side
    /// effects.
    pub fn apply<F>(&mut self, transition: F)
    where
        F: FnOnce(FilterState) -> FilterState,
    {
        self.state = transition(self.state.clone());
    }

    pub fn aggregate(&self) -> Option<&Aggregate> {
        self.aggregate.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.years_loading || self.policy_areas_loading
    }

    /// Generation of the currently displayed aggregate (0 before the first
    /// commit).
    pub fn committed_generation(&self) -> u64 {
        self.generation_committed
    }

    fn begin(&mut self) -> u64 {
        self.generation_issued += 1;
        self.years_loading = true;
        self.policy_areas_loading = true;
        self.generation_issued
    }

    /// Commit a completed aggregate. Returns false when a newer refresh was
    /// issued meanwhile; the stale result is discarded and the newer
    /// refresh keeps ownership of the loading flags.
    fn commit(&mut self, generation: u64, aggregate: Aggregate) -> bool {
        if generation != self.generation_issued {
            return false;
        }
        self.aggregate = Some(aggregate);
        self.generation_committed = generation;
        self.years_loading = false;
        self.policy_areas_loading = false;
        self.last_error = None;
        true
    }

    /// Record a failed refresh. The previous aggregate stays displayed; the
    /// loading flags clear so the failure is a terminal state, not a
    /// perpetual spinner.
    fn fail(&mut self, generation: u64, err: &FetchError) {
        if generation != self.generation_issued {
            return;
        }
        self.years_loading = false;
        self.policy_areas_loading = false;
        self.last_error = Some(err.to_string());
    }
}

/// Run one fetch→aggregate cycle for the session's current filter state.
pub async fn refresh(
    client: &Client,
    cfg: &MapConfig,
    session: &mut Session,
) -> Result<(), FetchError> {
    let generation = session.begin();
    let where_clause = query::build_where(session.state());
    debug!(
        "Refresh started - generation={}, where={}",
        generation, where_clause
    );

    match fetch::fetch_policies(client, cfg, &where_clause).await {
        Ok(records) => {
            let selected_areas = session.state().policy_areas.clone();
            let aggregate =
                aggregate::build_aggregate(records, &AFRICAN_COUNTRIES, &selected_areas);
            let items = items_count(&aggregate.buckets);
            if session.commit(generation, aggregate) {
                info!(
                    "Refresh committed - generation={}, items={}",
                    generation, items
                );
            } else {
                debug!("Stale refresh discarded - generation={}", generation);
            }
            Ok(())
        }
        Err(err) => {
            warn!("Refresh failed - generation={}, error={}", generation, err);
            session.fail(generation, &err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_aggregate;

    fn empty_aggregate() -> Aggregate {
        build_aggregate(Vec::new(), &AFRICAN_COUNTRIES, &[])
    }

    #[test]
    fn commit_publishes_and_clears_loading() {
        let mut session = Session::new(FilterState::default());
        let generation = session.begin();
        assert!(session.is_loading());
        assert!(session.commit(generation, empty_aggregate()));
        assert!(!session.is_loading());
        assert!(session.aggregate().is_some());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut session = Session::new(FilterState::default());
        let old = session.begin();
        let new = session.begin();
        assert!(!session.commit(old, empty_aggregate()));
        assert!(session.aggregate().is_none());
        assert!(session.is_loading()); // the newer refresh still owns the flags
        assert!(session.commit(new, empty_aggregate()));
        assert!(!session.is_loading());
        assert_eq!(session.committed_generation(), new);
    }

    #[test]
    fn failure_clears_loading_and_keeps_previous_aggregate() {
        let mut session = Session::new(FilterState::default());
        let generation = session.begin();
        assert!(session.commit(generation, empty_aggregate()));

        let generation = session.begin();
        let err = FetchError::Shape("record 'x' has no linked country".into());
        session.fail(generation, &err);
        assert!(!session.is_loading());
        assert!(session.aggregate().is_some());
        assert!(session.last_error().unwrap().contains("no linked country"));
    }

    #[test]
    fn stale_failure_does_not_disturb_a_newer_refresh() {
        let mut session = Session::new(FilterState::default());
        let old = session.begin();
        let _new = session.begin();
        let err = FetchError::Shape("late".into());
        session.fail(old, &err);
        assert!(session.is_loading());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn successful_commit_resets_the_error_state() {
        let mut session = Session::new(FilterState::default());
        let generation = session.begin();
        session.fail(generation, &FetchError::Shape("boom".into()));
        assert!(session.last_error().is_some());

        let generation = session.begin();
        assert!(session.commit(generation, empty_aggregate()));
        assert!(session.last_error().is_none());
    }

    #[test]
    fn apply_swaps_in_the_transitioned_state() {
        let mut session = Session::new(FilterState::default());
        session.apply(|state| state.toggle_country("Kenya", true));
        assert_eq!(session.state().countries, vec!["Kenya"]);
    }
}
