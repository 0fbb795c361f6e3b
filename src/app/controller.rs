//! Search controller: the state machine behind submissions and "load more".
//!
//! [`SearchController`] owns the [`SearchSession`] and is the only place it is
//! mutated. Each user trigger runs to its next suspension point and returns the
//! side effects the runtime has to perform:
//!
//! ```text
//!            submit ──► FetchPage(1) ─────────────► page_fetched ──► settle
//!                                                        │             ▲
//!                                   (loader shown < min) └► SetTimeout ┘ timer_fired
//!
//!         load_more ──► FetchPage(n+1) ───────────► page_fetched ──► settle + scroll
//! ```
//!
//! # Decisions
//!
//! - **In-flight guard**: "load more" is ignored while a request or a parked
//!   first-page settlement is outstanding. A new submission always proceeds and
//!   supersedes whatever was in flight; the superseded response is discarded
//!   when it arrives.
//! - **Minimum loader time** applies to every first-page outcome (results, no
//!   results, failure); follow-up pages settle immediately.
//! - **Failed "load more"** keeps the advanced page (advance-and-skip). The
//!   control is shown again if results remain, so the next click asks for the
//!   following page.
//! - **Loader cleanup** is a drop guard, so every settlement path hides it.

use std::ops::{Deref, DerefMut};

use crate::app::policy::SearchPolicy;
use crate::app::Action;
use crate::client::{PageRequest, RequestId, SearchClient};
use crate::domain::{FetchError, SearchResultPage, SearchSession};
use crate::notify::{Notice, Notifier};
use crate::ui::gallery::GalleryView;

/// Which trigger issued a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Page 1 of a fresh submission.
    FirstPage,
    /// A "load more" page.
    NextPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    kind: FetchKind,
    started_at: i64,
}

/// A first-page outcome waiting for the minimum loader time to pass.
#[derive(Debug)]
struct Parked {
    ready_at: i64,
    outcome: Result<SearchResultPage, FetchError>,
}

/// Hides the loader when dropped.
struct LoaderGuard<'a> {
    view: &'a mut dyn GalleryView,
}

impl<'a> LoaderGuard<'a> {
    fn new(view: &'a mut dyn GalleryView) -> Self {
        Self { view }
    }
}

impl<'a> Deref for LoaderGuard<'a> {
    type Target = dyn GalleryView + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.view
    }
}

impl DerefMut for LoaderGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.view
    }
}

impl Drop for LoaderGuard<'_> {
    fn drop(&mut self) {
        self.view.hide_loader();
    }
}

/// Session owner and driver of the search client, gallery and notifier.
#[derive(Debug)]
pub struct SearchController {
    client: SearchClient,
    policy: SearchPolicy,
    session: SearchSession,
    in_flight: Option<InFlight>,
    parked: Option<Parked>,
    next_request_id: RequestId,
}

impl SearchController {
    #[must_use]
    pub fn new(client: SearchClient, policy: SearchPolicy) -> Self {
        Self {
            client,
            policy,
            session: SearchSession::default(),
            in_flight: None,
            parked: None,
            next_request_id: 1,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SearchSession {
        &self.session
    }

    #[must_use]
    pub const fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Returns `true` while a request or a parked settlement is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.parked.is_some()
    }

    /// Kind of the request currently in flight, if any.
    #[must_use]
    pub fn in_flight_kind(&self) -> Option<FetchKind> {
        self.in_flight.map(|f| f.kind)
    }

    /// Handles a form submission with the raw search input.
    pub fn submit(
        &mut self,
        input: &str,
        now: i64,
        view: &mut dyn GalleryView,
        notifier: &mut dyn Notifier,
    ) -> Vec<Action> {
        let _span = tracing::debug_span!("submit", input_len = input.len()).entered();

        let query = match self.policy.validate(input) {
            Ok(query) => query,
            Err(e) => {
                tracing::debug!(error = %e, "search input rejected");
                notifier.notify(Notice::from(&e));
                return vec![];
            }
        };

        if let Some(superseded) = self.in_flight.take() {
            tracing::debug!(request_id = superseded.request_id, "superseding in-flight request");
        }
        self.parked = None;
        self.session.reset(query);

        view.clear_gallery();
        view.hide_load_more_button();
        view.show_loader();

        match self.issue(FetchKind::FirstPage, now) {
            Ok(request) => vec![Action::FetchPage(request)],
            Err(e) => {
                self.settle_first_page(Err(e), view, notifier);
                vec![]
            }
        }
    }

    /// Handles a click on the load-more control.
    pub fn load_more(
        &mut self,
        now: i64,
        view: &mut dyn GalleryView,
        notifier: &mut dyn Notifier,
    ) -> Vec<Action> {
        let _span = tracing::debug_span!("load_more", page = self.session.page()).entered();

        if !self.session.is_active() || !self.session.has_more() {
            tracing::debug!("nothing more to load");
            return vec![];
        }
        if self.is_busy() {
            tracing::debug!("request already outstanding, ignoring load more");
            return vec![];
        }

        self.session.advance_page();
        view.show_loader();
        view.hide_load_more_button();

        match self.issue(FetchKind::NextPage, now) {
            Ok(request) => vec![Action::FetchPage(request)],
            Err(e) => {
                self.settle_next_page(Err(e), view, notifier);
                vec![]
            }
        }
    }

    /// Handles the transport's answer to a page request.
    pub fn page_fetched(
        &mut self,
        request_id: RequestId,
        status: u16,
        body: &[u8],
        now: i64,
        view: &mut dyn GalleryView,
        notifier: &mut dyn Notifier,
    ) -> Vec<Action> {
        let _span = tracing::debug_span!("page_fetched", request_id, status).entered();

        let Some(in_flight) = self.in_flight.filter(|f| f.request_id == request_id) else {
            tracing::debug!("discarding stale response");
            return vec![];
        };
        self.in_flight = None;

        let outcome = self.client.decode_page(status, body);
        if let Err(e) = &outcome {
            tracing::warn!(error = %e, kind = ?in_flight.kind, "page request failed");
        }

        match in_flight.kind {
            FetchKind::FirstPage => {
                let remaining = self.policy.remaining_loader_ms(now - in_flight.started_at);
                if remaining > 0 {
                    tracing::debug!(remaining_ms = remaining, "holding loader for minimum duration");
                    self.parked = Some(Parked {
                        ready_at: now.saturating_add(i64::try_from(remaining).unwrap_or(i64::MAX)),
                        outcome,
                    });
                    return vec![Action::SetTimeout { millis: remaining }];
                }
                self.settle_first_page(outcome, view, notifier);
            }
            FetchKind::NextPage => self.settle_next_page(outcome, view, notifier),
        }
        vec![]
    }

    /// Handles a timer tick; settles a parked first page once it is due.
    pub fn timer_fired(
        &mut self,
        now: i64,
        view: &mut dyn GalleryView,
        notifier: &mut dyn Notifier,
    ) -> Vec<Action> {
        let Some(ready_at) = self.parked.as_ref().map(|p| p.ready_at) else {
            return vec![];
        };

        if now < ready_at {
            let millis = u64::try_from(ready_at - now).unwrap_or(0);
            tracing::debug!(millis, "timer fired early, re-arming");
            return vec![Action::SetTimeout { millis }];
        }

        if let Some(parked) = self.parked.take() {
            self.settle_first_page(parked.outcome, view, notifier);
        }
        vec![]
    }

    fn issue(&mut self, kind: FetchKind, now: i64) -> Result<PageRequest, FetchError> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        let request = self
            .client
            .page_request(request_id, self.session.query(), self.session.page())
            .inspect_err(|e| tracing::warn!(error = %e, "could not build page request"))?;
        self.in_flight = Some(InFlight {
            request_id,
            kind,
            started_at: now,
        });
        tracing::debug!(request_id, ?kind, page = request.page, "page request issued");
        Ok(request)
    }

    fn settle_first_page(
        &mut self,
        outcome: Result<SearchResultPage, FetchError>,
        view: &mut dyn GalleryView,
        notifier: &mut dyn Notifier,
    ) {
        let mut view = LoaderGuard::new(view);

        let page = match outcome {
            Ok(page) => page,
            Err(_) => {
                notifier.notify(Notice::SearchFailed);
                return;
            }
        };

        self.session.record_first_page(page.total_hits, page.hits.len());
        if page.is_empty() {
            notifier.notify(Notice::NoResults);
            return;
        }

        view.create_gallery(&page.hits);
        self.update_pagination(&mut *view, notifier);

        tracing::info!(
            query = %self.session.query(),
            loaded_hits = self.session.loaded_hits(),
            total_hits = self.session.total_hits(),
            "first page rendered"
        );
    }

    fn settle_next_page(
        &mut self,
        outcome: Result<SearchResultPage, FetchError>,
        view: &mut dyn GalleryView,
        notifier: &mut dyn Notifier,
    ) {
        let mut view = LoaderGuard::new(view);

        let page = match outcome {
            Ok(page) => page,
            Err(_) => {
                notifier.notify(Notice::LoadMoreFailed);
                if self.session.has_more() {
                    view.show_load_more_button();
                }
                return;
            }
        };

        view.create_gallery(&page.hits);
        self.session.record_next_page(page.hits.len());
        self.update_pagination(&mut *view, notifier);

        if let Some(card_height) = view.first_card_height() {
            view.scroll_by(card_height * 2);
        }

        tracing::info!(
            page = self.session.page(),
            loaded_hits = self.session.loaded_hits(),
            total_hits = self.session.total_hits(),
            "next page rendered"
        );
    }

    fn update_pagination(&self, view: &mut dyn GalleryView, notifier: &mut dyn Notifier) {
        if self.session.has_more() {
            view.show_load_more_button();
        } else {
            view.hide_load_more_button();
            notifier.notify(Notice::EndOfResults);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageRecord;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Clear,
        Create(usize),
        ShowLoader,
        HideLoader,
        ShowMore,
        HideMore,
        Scroll(usize),
    }

    #[derive(Default)]
    struct RecordingView {
        calls: Vec<Call>,
        cards: usize,
    }

    impl GalleryView for RecordingView {
        fn clear_gallery(&mut self) {
            self.cards = 0;
            self.calls.push(Call::Clear);
        }
        fn create_gallery(&mut self, records: &[ImageRecord]) {
            self.cards += records.len();
            self.calls.push(Call::Create(records.len()));
        }
        fn show_loader(&mut self) {
            self.calls.push(Call::ShowLoader);
        }
        fn hide_loader(&mut self) {
            self.calls.push(Call::HideLoader);
        }
        fn show_load_more_button(&mut self) {
            self.calls.push(Call::ShowMore);
        }
        fn hide_load_more_button(&mut self) {
            self.calls.push(Call::HideMore);
        }
        fn first_card_height(&self) -> Option<usize> {
            (self.cards > 0).then_some(4)
        }
        fn scroll_by(&mut self, rows: usize) {
            self.calls.push(Call::Scroll(rows));
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Vec<Notice>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    fn body(total: u64, hits: usize) -> Vec<u8> {
        let hits: Vec<String> = (0..hits).map(|i| format!(r#"{{"id":{i}}}"#)).collect();
        format!(r#"{{"totalHits":{total},"hits":[{}]}}"#, hits.join(",")).into_bytes()
    }

    fn request_id(actions: &[Action]) -> RequestId {
        match actions {
            [Action::FetchPage(request)] => request.request_id,
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn lenient() -> SearchController {
        SearchController::new(SearchClient::default(), SearchPolicy::lenient())
    }

    #[test]
    fn rejected_input_touches_nothing() {
        let mut controller = SearchController::new(SearchClient::default(), SearchPolicy::default());
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        assert!(controller.submit("   ", 0, &mut view, &mut notifier).is_empty());
        assert!(controller.submit(" ab ", 0, &mut view, &mut notifier).is_empty());

        assert!(view.calls.is_empty());
        assert_eq!(
            notifier.notices,
            vec![Notice::EmptyQuery, Notice::QueryTooShort { min: 3 }]
        );
        assert!(!controller.session().is_active());
    }

    #[test]
    fn submit_prepares_view_before_fetching() {
        let mut controller = lenient();
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        let actions = controller.submit(" cats ", 0, &mut view, &mut notifier);
        let Action::FetchPage(request) = &actions[0] else {
            panic!("expected fetch");
        };
        assert_eq!(request.page, 1);
        assert_eq!(request.query, "cats");
        assert_eq!(view.calls, vec![Call::Clear, Call::HideMore, Call::ShowLoader]);
        assert!(controller.is_busy());
    }

    #[test]
    fn loader_is_hidden_on_every_first_page_outcome() {
        let cases: [(u16, Vec<u8>, Notice); 3] = [
            (200, body(0, 0), Notice::NoResults),
            (200, body(3, 3), Notice::EndOfResults),
            (500, b"boom".to_vec(), Notice::SearchFailed),
        ];

        for (status, payload, expected) in cases {
            let mut controller = lenient();
            let mut view = RecordingView::default();
            let mut notifier = RecordingNotifier::default();

            let id = request_id(&controller.submit("cats", 0, &mut view, &mut notifier));
            controller.page_fetched(id, status, &payload, 10, &mut view, &mut notifier);

            assert_eq!(view.calls.last(), Some(&Call::HideLoader), "status {status}");
            assert_eq!(notifier.notices, vec![expected]);
            assert!(!controller.is_busy());
        }
    }

    #[test]
    fn first_page_with_more_results_shows_control() {
        let mut controller = lenient();
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        let id = request_id(&controller.submit("cats", 0, &mut view, &mut notifier));
        controller.page_fetched(id, 200, &body(45, 15), 10, &mut view, &mut notifier);

        assert!(view.calls.contains(&Call::Create(15)));
        assert!(view.calls.contains(&Call::ShowMore));
        assert!(notifier.notices.is_empty());
        assert_eq!(controller.session().loaded_hits(), 15);
        assert_eq!(controller.session().total_hits(), 45);
    }

    #[test]
    fn fast_response_is_parked_until_minimum_loader_time() {
        let mut controller = SearchController::new(SearchClient::default(), SearchPolicy::default());
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        let id = request_id(&controller.submit("cats", 1_000, &mut view, &mut notifier));
        let actions = controller.page_fetched(id, 200, &body(45, 15), 1_300, &mut view, &mut notifier);

        assert_eq!(actions, vec![Action::SetTimeout { millis: 700 }]);
        assert!(!view.calls.contains(&Call::HideLoader));
        assert!(controller.is_busy());

        let early = controller.timer_fired(1_900, &mut view, &mut notifier);
        assert_eq!(early, vec![Action::SetTimeout { millis: 100 }]);
        assert!(!view.calls.contains(&Call::HideLoader));

        assert!(controller.timer_fired(2_000, &mut view, &mut notifier).is_empty());
        assert!(view.calls.contains(&Call::HideLoader));
        assert!(view.calls.contains(&Call::Create(15)));
        assert!(!controller.is_busy());
    }

    #[test]
    fn slow_response_settles_immediately() {
        let mut controller = SearchController::new(SearchClient::default(), SearchPolicy::default());
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        let id = request_id(&controller.submit("cats", 0, &mut view, &mut notifier));
        let actions = controller.page_fetched(id, 200, &body(45, 15), 2_500, &mut view, &mut notifier);

        assert!(actions.is_empty());
        assert!(view.calls.ends_with(&[Call::ShowMore, Call::HideLoader]));
    }

    #[test]
    fn load_more_scrolls_by_two_cards() {
        let mut controller = lenient();
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        let id = request_id(&controller.submit("cats", 0, &mut view, &mut notifier));
        controller.page_fetched(id, 200, &body(45, 15), 0, &mut view, &mut notifier);
        view.calls.clear();

        let id = request_id(&controller.load_more(0, &mut view, &mut notifier));
        assert_eq!(view.calls, vec![Call::ShowLoader, Call::HideMore]);
        controller.page_fetched(id, 200, &body(45, 15), 0, &mut view, &mut notifier);

        assert_eq!(
            view.calls[2..],
            [Call::Create(15), Call::ShowMore, Call::Scroll(8), Call::HideLoader]
        );
        assert_eq!(controller.session().page(), 2);
    }

    #[test]
    fn load_more_is_ignored_while_in_flight() {
        let mut controller = lenient();
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        let id = request_id(&controller.submit("cats", 0, &mut view, &mut notifier));
        assert!(controller.load_more(0, &mut view, &mut notifier).is_empty());
        controller.page_fetched(id, 200, &body(45, 15), 0, &mut view, &mut notifier);

        request_id(&controller.load_more(0, &mut view, &mut notifier));
        assert!(controller.load_more(0, &mut view, &mut notifier).is_empty());
        assert_eq!(controller.session().page(), 2);
    }

    #[test]
    fn failed_load_more_advances_and_reoffers_control() {
        let mut controller = lenient();
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        let id = request_id(&controller.submit("cats", 0, &mut view, &mut notifier));
        controller.page_fetched(id, 200, &body(45, 15), 0, &mut view, &mut notifier);

        let id = request_id(&controller.load_more(0, &mut view, &mut notifier));
        view.calls.clear();
        controller.page_fetched(id, 503, b"unavailable", 0, &mut view, &mut notifier);

        assert_eq!(notifier.notices, vec![Notice::LoadMoreFailed]);
        assert_eq!(view.calls, vec![Call::ShowMore, Call::HideLoader]);
        assert_eq!(controller.session().page(), 2);
        assert_eq!(controller.session().loaded_hits(), 15);

        let Action::FetchPage(next) = &controller.load_more(0, &mut view, &mut notifier)[0] else {
            panic!("expected fetch");
        };
        assert_eq!(next.page, 3);
    }

    #[test]
    fn superseded_response_is_discarded() {
        let mut controller = lenient();
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        let stale = request_id(&controller.submit("cats", 0, &mut view, &mut notifier));
        let fresh = request_id(&controller.submit("dogs", 0, &mut view, &mut notifier));
        view.calls.clear();

        controller.page_fetched(stale, 200, &body(45, 15), 0, &mut view, &mut notifier);
        assert!(view.calls.is_empty());
        assert!(controller.is_busy());

        controller.page_fetched(fresh, 200, &body(2, 2), 0, &mut view, &mut notifier);
        assert_eq!(controller.session().query(), "dogs");
        assert_eq!(controller.session().loaded_hits(), 2);
    }

    #[test]
    fn load_more_without_query_does_nothing() {
        let mut controller = lenient();
        let mut view = RecordingView::default();
        let mut notifier = RecordingNotifier::default();

        assert!(controller.load_more(0, &mut view, &mut notifier).is_empty());
        assert!(view.calls.is_empty());
        assert!(notifier.notices.is_empty());
    }
}
