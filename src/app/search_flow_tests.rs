//! End-to-end search flows driven through `handle_event`.

use serde_json::json;

use crate::app::{handle_event, Action, AppState, Event, InputMode};
use crate::client::{PageRequest, RequestId};
use crate::notify::Notice;
use crate::ui::GalleryView;
use crate::{initialize, Config};

fn config() -> Config {
    Config {
        api_key: "k".to_string(),
        ..Config::default()
    }
}

fn type_query(state: &mut AppState, query: &str) {
    handle_event(state, &Event::FocusSearch).unwrap();
    while !state.search_input.is_empty() {
        handle_event(state, &Event::Backspace).unwrap();
    }
    for c in query.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
}

fn page_body(total_hits: u64, first_id: u64, hits: u64) -> Vec<u8> {
    let hits: Vec<_> = (first_id..first_id + hits)
        .map(|id| {
            json!({
                "id": id,
                "tags": "cat, kitten, pet",
                "user": "ann",
                "likes": 12,
                "views": 3400,
                "downloads": 210,
                "comments": 4,
                "webformatURL": format!("https://cdn.example/{id}.jpg"),
            })
        })
        .collect();
    serde_json::to_vec(&json!({ "total": total_hits, "totalHits": total_hits, "hits": hits }))
        .unwrap()
}

fn only_fetch(actions: &[Action]) -> PageRequest {
    match actions {
        [Action::FetchPage(request)] => request.clone(),
        other => panic!("expected a single fetch, got {other:?}"),
    }
}

fn respond(state: &mut AppState, request_id: RequestId, body: Vec<u8>, at: i64) -> Vec<Action> {
    let (_, actions) = handle_event(
        state,
        &Event::PageFetched {
            request_id,
            status: 200,
            body,
            at,
        },
    )
    .unwrap();
    actions
}

fn notices(state: &AppState) -> Vec<Notice> {
    state.toasts.newest_first().map(|t| t.notice.clone()).collect()
}

/// Submits `"cats"` at t=0 and settles a 15-of-45 first page at t=1000.
fn scenario_a() -> AppState {
    let mut state = initialize(&config());
    type_query(&mut state, "cats");

    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
    let request = only_fetch(&actions);
    assert_eq!(request.page, 1);

    let actions = respond(&mut state, request.request_id, page_body(45, 0, 15), 200);
    assert_eq!(actions, vec![Action::SetTimeout { millis: 800 }]);
    assert!(state.gallery.is_loader_visible());
    assert!(state.gallery.cards().is_empty());

    let (render, _) = handle_event(&mut state, &Event::Timer { at: 1_000 }).unwrap();
    assert!(render);
    state
}

fn load_next(state: &mut AppState, at: i64, body: Vec<u8>) -> Vec<Action> {
    let (_, actions) = handle_event(state, &Event::LoadMore { at }).unwrap();
    let request = only_fetch(&actions);
    respond(state, request.request_id, body, at + 100)
}

#[test]
fn scenario_a_first_page() {
    let state = scenario_a();

    assert_eq!(state.gallery.cards().len(), 15);
    assert!(state.gallery.is_load_more_visible());
    assert!(!state.gallery.is_loader_visible());
    assert_eq!(state.controller.session().page(), 1);
    assert_eq!(state.controller.session().loaded_hits(), 15);
    assert_eq!(state.controller.session().total_hits(), 45);
    assert_eq!(state.input_mode, InputMode::Browsing);
    assert!(state.toasts.is_empty());
}

#[test]
fn scenarios_b_and_c_load_until_exhausted() {
    let mut state = scenario_a();

    load_next(&mut state, 2_000, page_body(45, 15, 15));
    assert_eq!(state.gallery.cards().len(), 30);
    assert_eq!(state.controller.session().page(), 2);
    assert_eq!(state.controller.session().loaded_hits(), 30);
    assert!(state.gallery.is_load_more_visible());
    assert!(!state.gallery.is_loader_visible());

    let actions = load_next(&mut state, 3_000, page_body(45, 30, 15));
    assert_eq!(state.gallery.cards().len(), 45);
    assert_eq!(state.controller.session().page(), 3);
    assert_eq!(state.controller.session().loaded_hits(), 45);
    assert!(!state.gallery.is_load_more_visible());
    assert_eq!(notices(&state), vec![Notice::EndOfResults]);
    assert!(actions.contains(&Action::SetTimeout { millis: 5_000 }));

    let (_, actions) = handle_event(&mut state, &Event::LoadMore { at: 4_000 }).unwrap();
    assert!(actions.is_empty());
}

#[test]
fn scenario_d_no_results() {
    let mut state = initialize(&config());
    type_query(&mut state, "xyzzynonexistent");

    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
    let request = only_fetch(&actions);
    respond(
        &mut state,
        request.request_id,
        br#"{"total": 0, "totalHits": 0, "hits": []}"#.to_vec(),
        100,
    );
    handle_event(&mut state, &Event::Timer { at: 1_000 }).unwrap();

    assert_eq!(notices(&state), vec![Notice::NoResults]);
    assert!(state.gallery.cards().is_empty());
    assert!(!state.gallery.is_loader_visible());
    assert!(!state.gallery.is_load_more_visible());
}

#[test]
fn blank_input_never_reaches_the_network() {
    for input in ["", " ", "\t  \t"] {
        let mut state = initialize(&config());
        type_query(&mut state, input);

        let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
        assert!(!actions.iter().any(|a| matches!(a, Action::FetchPage(_))));
        assert_eq!(notices(&state), vec![Notice::EmptyQuery]);
        assert!(!state.controller.session().is_active());
    }
}

#[test]
fn short_input_is_rejected_with_threshold() {
    let mut state = initialize(&config());
    type_query(&mut state, " ab ");

    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
    assert_eq!(actions, vec![Action::SetTimeout { millis: 5_000 }]);
    assert_eq!(notices(&state), vec![Notice::QueryTooShort { min: 3 }]);
}

#[test]
fn loaded_hits_is_the_sum_of_fetched_pages() {
    let mut state = scenario_a();
    let pages = [15, 7, 11];

    for (i, hits) in pages.iter().enumerate() {
        let at = 2_000 + 1_000 * i64::try_from(i).unwrap();
        load_next(&mut state, at, page_body(100, 100 * (i as u64 + 1), *hits));
        let session = state.controller.session();
        assert!(session.loaded_hits() <= session.total_hits());
        assert_eq!(
            state.gallery.is_load_more_visible(),
            session.loaded_hits() < session.total_hits()
        );
    }

    // total_hits stays 45 from the first page; the extra hits raise it to loaded
    let expected: u64 = 15 + pages.iter().sum::<u64>();
    assert_eq!(state.controller.session().loaded_hits(), expected);
    assert_eq!(state.gallery.cards().len() as u64, expected);
}

#[test]
fn loader_stays_up_for_the_minimum_duration() {
    let mut state = initialize(&config());
    type_query(&mut state, "lake");

    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 10_000 }).unwrap();
    let request = only_fetch(&actions);
    let actions = respond(&mut state, request.request_id, page_body(3, 0, 3), 10_050);
    assert_eq!(actions, vec![Action::SetTimeout { millis: 950 }]);

    let (_, actions) = handle_event(&mut state, &Event::Timer { at: 10_600 }).unwrap();
    assert_eq!(actions, vec![Action::SetTimeout { millis: 400 }]);
    assert!(state.gallery.is_loader_visible());

    handle_event(&mut state, &Event::Timer { at: 11_000 }).unwrap();
    assert!(!state.gallery.is_loader_visible());
    assert_eq!(state.gallery.cards().len(), 3);
    assert_eq!(notices(&state), vec![Notice::EndOfResults]);
}

#[test]
fn slow_response_settles_immediately() {
    let mut state = initialize(&config());
    type_query(&mut state, "lake");

    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
    let request = only_fetch(&actions);
    let actions = respond(&mut state, request.request_id, page_body(30, 0, 15), 1_500);

    assert!(actions.is_empty());
    assert_eq!(state.gallery.cards().len(), 15);
    assert!(!state.gallery.is_loader_visible());
}

#[test]
fn superseded_responses_are_ignored() {
    let mut state = initialize(&config());
    type_query(&mut state, "cats");
    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
    let cats = only_fetch(&actions);

    type_query(&mut state, "dogs");
    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 10 }).unwrap();
    let dogs = only_fetch(&actions);
    assert_ne!(cats.request_id, dogs.request_id);

    let actions = respond(&mut state, cats.request_id, page_body(45, 0, 15), 2_000);
    assert!(actions.is_empty());
    assert!(state.gallery.cards().is_empty());
    assert!(state.controller.is_busy());

    respond(&mut state, dogs.request_id, page_body(4, 500, 4), 2_010);
    assert_eq!(state.controller.session().query(), "dogs");
    assert_eq!(state.gallery.cards().len(), 4);
    assert_eq!(state.gallery.cards()[0].id, 500);
}

#[test]
fn load_more_is_ignored_while_in_flight() {
    let mut state = scenario_a();

    let (_, first) = handle_event(&mut state, &Event::LoadMore { at: 2_000 }).unwrap();
    only_fetch(&first);
    let (render, second) = handle_event(&mut state, &Event::LoadMore { at: 2_010 }).unwrap();

    assert!(!render);
    assert!(second.is_empty());
    assert_eq!(state.controller.session().page(), 2);
}

#[test]
fn failed_load_more_skips_the_page() {
    let mut state = scenario_a();

    let (_, actions) = handle_event(&mut state, &Event::LoadMore { at: 2_000 }).unwrap();
    let request = only_fetch(&actions);
    handle_event(
        &mut state,
        &Event::PageFetched {
            request_id: request.request_id,
            status: 503,
            body: b"Service Unavailable".to_vec(),
            at: 2_100,
        },
    )
    .unwrap();

    assert_eq!(notices(&state), vec![Notice::LoadMoreFailed]);
    assert_eq!(state.controller.session().page(), 2);
    assert_eq!(state.controller.session().loaded_hits(), 15);
    assert!(state.gallery.is_load_more_visible());
    assert!(!state.gallery.is_loader_visible());

    let (_, actions) = handle_event(&mut state, &Event::LoadMore { at: 3_000 }).unwrap();
    let request = only_fetch(&actions);
    assert_eq!(request.page, 3);
    assert!(request.url.contains("&page=3&"));
}

#[test]
fn failed_first_page_reports_search_failure() {
    let mut state = initialize(&config());
    type_query(&mut state, "cats");

    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
    let request = only_fetch(&actions);
    handle_event(
        &mut state,
        &Event::PageFetched {
            request_id: request.request_id,
            status: 0,
            body: vec![],
            at: 1_200,
        },
    )
    .unwrap();

    assert_eq!(notices(&state), vec![Notice::SearchFailed]);
    assert!(!state.gallery.is_loader_visible());
    assert!(!state.gallery.is_load_more_visible());
}

#[test]
fn request_url_carries_every_parameter() {
    let mut state = initialize(&config());
    type_query(&mut state, "red fox");

    let (_, actions) = handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
    let url = only_fetch(&actions).url;

    assert!(url.starts_with("https://pixabay.com/api/?"));
    for param in [
        "key=k",
        "q=red%20fox",
        "image_type=photo",
        "orientation=horizontal",
        "safesearch=true",
        "page=1",
        "per_page=15",
    ] {
        assert!(url.contains(param), "{param} missing from {url}");
    }
}

#[test]
fn toasts_expire_on_timer() {
    let mut state = initialize(&config());

    handle_event(&mut state, &Event::Submit { at: 0 }).unwrap();
    handle_event(&mut state, &Event::Submit { at: 2_000 }).unwrap();
    assert_eq!(state.toasts.len(), 2);

    let (render, actions) = handle_event(&mut state, &Event::Timer { at: 5_000 }).unwrap();
    assert!(render);
    assert!(actions.is_empty());
    assert_eq!(state.toasts.len(), 1);

    handle_event(&mut state, &Event::Timer { at: 7_000 }).unwrap();
    assert!(state.toasts.is_empty());
}

#[test]
fn empty_create_gallery_leaves_cards_untouched() {
    let mut state = scenario_a();
    let before = state.gallery.cards().to_vec();

    state.gallery.create_gallery(&[]);
    assert_eq!(state.gallery.cards(), before.as_slice());
}

#[test]
fn view_model_reflects_pagination() {
    let state = scenario_a();
    let vm = state.compute_viewmodel(40, 120);

    assert!(vm.loader.is_none());
    assert_eq!(vm.load_more.as_deref(), Some("Load more (m)  15 of 45"));
    assert!(vm.empty_state.is_none());
    assert!(vm.header.title.contains("cats"));
}
