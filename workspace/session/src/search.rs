//! Location search session: debounced, race-safe autocomplete.
//!
//! The session is a controlled component. Its owner holds the selected
//! location and is told about changes through [`SearchEffect::SelectionChanged`];
//! the session only owns the transient query, suggestions, loading flag and
//! dropdown visibility. Hosts feed it events and execute the returned effects
//! (arm or cancel a timer, send a request, report the selection).

use std::time::Duration;

use common::{ApiResult, DEFAULT_SEARCH_LIMIT, LocationOption, is_searchable};
use tracing::{debug, trace, warn};

use crate::sequence::{RequestSequencer, RequestToken};

/// Input must stay unchanged this long before a search is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub debounce: Duration,
    pub limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Work the host performs on behalf of a [`SearchSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEffect {
    /// Report the new controlled value to the owner.
    SelectionChanged(Option<LocationOption>),
    /// Arm a timer and call [`SearchSession::debounce_elapsed`] with `token` when it fires.
    ScheduleSearch { token: RequestToken, delay: Duration },
    /// Drop any armed timer.
    CancelPendingSearch,
    /// Send the search and report back through [`SearchSession::search_completed`].
    IssueSearch {
        token: RequestToken,
        query: String,
        limit: u32,
    },
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    config: SearchConfig,
    query: String,
    suggestions: Vec<LocationOption>,
    loading: bool,
    open: bool,
    selected: Option<LocationOption>,
    timers: RequestSequencer,
    requests: RequestSequencer,
}

impl SearchSession {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[LocationOption] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&LocationOption> {
        self.selected.as_ref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The input text changed.
    ///
    /// Any selection is dropped and the pending timer is cancelled. A query that
    /// is too short empties the suggestions and retires in-flight searches;
    /// otherwise a new debounce timer is armed.
    pub fn input(&mut self, text: impl Into<String>) -> Vec<SearchEffect> {
        self.query = text.into();
        let mut effects = Vec::new();

        if self.selected.take().is_some() {
            debug!("Input edited, dropping selection");
            effects.push(SearchEffect::SelectionChanged(None));
        }
        effects.push(SearchEffect::CancelPendingSearch);

        if !is_searchable(&self.query) {
            trace!(query = %self.query, "Query too short, suppressing search");
            self.reset_results();
            return effects;
        }

        let token = self.timers.issue();
        trace!(%token, "Arming debounce timer");
        effects.push(SearchEffect::ScheduleSearch {
            token,
            delay: self.config.debounce,
        });
        effects
    }

    /// A debounce timer fired. Timers from older generations are ignored.
    pub fn debounce_elapsed(&mut self, token: RequestToken) -> Vec<SearchEffect> {
        if !self.timers.is_current(token) {
            trace!(%token, "Ignoring stale debounce timer");
            return Vec::new();
        }
        self.timers.invalidate();

        if self.selected.is_some() || !is_searchable(&self.query) {
            return Vec::new();
        }

        let token = self.requests.issue();
        let query = self.query.trim().to_string();
        debug!(%token, %query, "Issuing location search");
        self.loading = true;
        vec![SearchEffect::IssueSearch {
            token,
            query,
            limit: self.config.limit,
        }]
    }

    /// A search response arrived. Returns whether it was applied.
    ///
    /// Failures leave the list silently empty.
    pub fn search_completed(
        &mut self,
        token: RequestToken,
        result: ApiResult<Vec<LocationOption>>,
    ) -> bool {
        if !self.requests.is_current(token) {
            debug!(%token, "Discarding superseded search response");
            return false;
        }
        self.loading = false;

        match result {
            Ok(locations) => {
                debug!(%token, count = locations.len(), "Applying search results");
                self.suggestions = locations;
                self.open = !self.suggestions.is_empty();
            }
            Err(e) => {
                warn!(%token, error = %e, "Location search failed");
                self.suggestions.clear();
                self.open = false;
            }
        }
        true
    }

    /// The user picked a suggestion.
    pub fn select(&mut self, option: LocationOption) -> Vec<SearchEffect> {
        debug!(location = %option.label(), "Location selected");
        self.query = option.label();
        self.selected = Some(option.clone());
        self.reset_results();
        vec![
            SearchEffect::CancelPendingSearch,
            SearchEffect::SelectionChanged(Some(option)),
        ]
    }

    /// The explicit clear control was used.
    pub fn clear(&mut self) -> Vec<SearchEffect> {
        self.query.clear();
        self.selected = None;
        self.reset_results();
        vec![
            SearchEffect::CancelPendingSearch,
            SearchEffect::SelectionChanged(None),
        ]
    }

    /// A click landed outside the widget. Query and selection are kept.
    pub fn click_outside(&mut self) {
        self.open = false;
    }

    pub fn focus(&mut self) {
        if self.selected.is_none() && !self.suggestions.is_empty() {
            self.open = true;
        }
    }

    /// The owner changed the controlled value.
    ///
    /// Adopting a location shows its label; the owner resetting to `None` while
    /// a selection is shown empties the input. No effect is reported back.
    pub fn sync_selection(&mut self, selected: Option<&LocationOption>) {
        if self.selected.as_ref() == selected {
            return;
        }
        match selected {
            Some(option) => {
                self.query = option.label();
                self.selected = Some(option.clone());
                self.reset_results();
            }
            None => {
                if self.selected.take().is_some() {
                    self.query.clear();
                    self.reset_results();
                }
            }
        }
    }

    fn reset_results(&mut self) {
        self.suggestions.clear();
        self.open = false;
        self.loading = false;
        self.timers.invalidate();
        self.requests.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{copenhagen, helsinki, init_test_tracing, location};
    use common::ApiError;

    fn issued(effects: &[SearchEffect]) -> Vec<(RequestToken, String)> {
        effects
            .iter()
            .filter_map(|e| match e {
                SearchEffect::IssueSearch { token, query, .. } => Some((*token, query.clone())),
                _ => None,
            })
            .collect()
    }

    fn scheduled(effects: &[SearchEffect]) -> Option<RequestToken> {
        effects.iter().find_map(|e| match e {
            SearchEffect::ScheduleSearch { token, .. } => Some(*token),
            _ => None,
        })
    }

    /// Types `query`, lets the timer fire and returns the issued request token.
    fn type_and_wait(session: &mut SearchSession, query: &str) -> RequestToken {
        let timer = scheduled(&session.input(query)).expect("timer armed");
        let effects = session.debounce_elapsed(timer);
        issued(&effects)[0].0
    }

    #[test]
    fn test_short_queries_never_search() {
        let _guard = init_test_tracing();
        let mut session = SearchSession::default();

        for query in ["", "C", " C ", "é"] {
            let effects = session.input(query);
            assert!(scheduled(&effects).is_none(), "{query:?} armed a timer");
            assert!(effects.contains(&SearchEffect::CancelPendingSearch));
            assert!(session.suggestions().is_empty());
        }
    }

    #[test]
    fn test_rapid_typing_issues_one_search_for_final_value() {
        let mut session = SearchSession::default();

        let timers: Vec<RequestToken> = ["Co", "Cop", "Cope", "Copen "]
            .iter()
            .map(|q| scheduled(&session.input(*q)).expect("timer armed"))
            .collect();

        // Hosts may fail to cancel timers; every stale one must be inert.
        let mut requests = Vec::new();
        for timer in &timers {
            requests.extend(issued(&session.debounce_elapsed(*timer)));
        }

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, "Copen");
        assert!(session.is_loading());
    }

    #[test]
    fn test_debounce_uses_configured_delay_and_limit() {
        let mut session = SearchSession::new(SearchConfig {
            debounce: Duration::from_millis(50),
            limit: 3,
        });
        let effects = session.input("Helsinki");
        assert!(effects.iter().any(|e| matches!(
            e,
            SearchEffect::ScheduleSearch { delay, .. } if *delay == Duration::from_millis(50)
        )));

        let timer = scheduled(&effects).unwrap();
        assert!(matches!(
            session.debounce_elapsed(timer).as_slice(),
            [SearchEffect::IssueSearch { limit: 3, .. }]
        ));
    }

    #[test]
    fn test_results_replace_list_and_open_dropdown() {
        let mut session = SearchSession::default();
        let token = type_and_wait(&mut session, "Copenhagen");

        assert!(session.search_completed(token, Ok(vec![copenhagen(), helsinki()])));
        assert!(!session.is_loading());
        assert!(session.is_open());
        assert_eq!(session.suggestions().len(), 2);

        let token = type_and_wait(&mut session, "Helsinki");
        assert!(session.search_completed(token, Ok(vec![helsinki()])));
        assert_eq!(session.suggestions(), &[helsinki()]);
    }

    #[test]
    fn test_late_response_never_overwrites_newer_results() {
        let mut session = SearchSession::default();
        let slow = type_and_wait(&mut session, "Copenhagen");
        let fast = type_and_wait(&mut session, "Helsinki");

        assert!(session.search_completed(fast, Ok(vec![helsinki()])));
        assert!(!session.search_completed(slow, Ok(vec![copenhagen()])));
        assert_eq!(session.suggestions(), &[helsinki()]);
    }

    #[test]
    fn test_short_query_retires_in_flight_search() {
        let mut session = SearchSession::default();
        let token = type_and_wait(&mut session, "Copenhagen");
        session.input("C");

        assert!(!session.search_completed(token, Ok(vec![copenhagen()])));
        assert!(session.suggestions().is_empty());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_failure_is_silently_empty() {
        let _guard = init_test_tracing();
        let mut session = SearchSession::default();
        let token = type_and_wait(&mut session, "Copenhagen");
        session.search_completed(token, Ok(vec![copenhagen()]));

        let token = type_and_wait(&mut session, "Copenhagen, D");
        assert!(session.search_completed(token, Err(ApiError::Status(500))));
        assert!(session.suggestions().is_empty());
        assert!(!session.is_open());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_select_sets_controlled_value_and_closes() {
        let mut session = SearchSession::default();
        let token = type_and_wait(&mut session, "Copenhagen");
        session.search_completed(token, Ok(vec![copenhagen(), helsinki()]));

        let picked = session.suggestions()[0].clone();
        let effects = session.select(picked.clone());

        assert!(effects.contains(&SearchEffect::SelectionChanged(Some(copenhagen()))));
        assert_eq!(session.selected(), Some(&picked));
        assert_eq!(session.query(), "Copenhagen, Denmark");
        assert!(!session.is_open());
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn test_select_retires_pending_work() {
        let mut session = SearchSession::default();
        let in_flight = type_and_wait(&mut session, "Copenhagen");
        let timer = scheduled(&session.input("Copenhagen,")).unwrap();

        session.select(copenhagen());

        assert!(session.debounce_elapsed(timer).is_empty());
        assert!(!session.search_completed(in_flight, Ok(vec![helsinki()])));
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn test_editing_drops_selection() {
        let mut session = SearchSession::default();
        session.select(copenhagen());

        let effects = session.input("Copenhagen, Denmar");
        assert_eq!(effects[0], SearchEffect::SelectionChanged(None));
        assert!(session.selected().is_none());
        assert!(scheduled(&effects).is_some());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = SearchSession::default();
        let token = type_and_wait(&mut session, "Copenhagen");
        session.search_completed(token, Ok(vec![copenhagen()]));
        session.select(copenhagen());

        let effects = session.clear();
        assert!(effects.contains(&SearchEffect::SelectionChanged(None)));
        assert_eq!(session.query(), "");
        assert!(session.suggestions().is_empty());
        assert!(!session.is_open());
        assert!(session.selected().is_none());
    }

    #[test]
    fn test_click_outside_and_focus() {
        let mut session = SearchSession::default();
        let token = type_and_wait(&mut session, "Copenhagen");
        session.search_completed(token, Ok(vec![copenhagen()]));

        session.click_outside();
        assert!(!session.is_open());
        assert_eq!(session.query(), "Copenhagen");
        assert_eq!(session.suggestions().len(), 1);

        session.focus();
        assert!(session.is_open());
    }

    #[test]
    fn test_sync_selection_from_owner() {
        let mut session = SearchSession::default();
        let perth = location("Perth", "Australia", -31.95, 115.86);

        session.sync_selection(Some(&perth));
        assert_eq!(session.query(), "Perth, Australia");
        assert_eq!(session.selected(), Some(&perth));

        session.sync_selection(Some(&perth));
        assert_eq!(session.query(), "Perth, Australia");

        session.sync_selection(None);
        assert_eq!(session.query(), "");
        assert!(session.selected().is_none());

        // Owner reporting `None` while the user is typing must not erase the input.
        session.input("Pe");
        session.sync_selection(None);
        assert_eq!(session.query(), "Pe");
    }
}
