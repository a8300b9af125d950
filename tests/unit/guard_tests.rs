//! Unit tests for the route guard decision table.

use pos_console::models::session::Session;
use pos_console::session::guard::{evaluate, GuardDecision, Route};

const PROTECTED: [Route; 5] = [
    Route::Home,
    Route::Categories,
    Route::Items,
    Route::Stocks,
    Route::Orders,
];

#[test]
fn initializing_shows_placeholder_for_every_protected_route() {
    let session = Session::initial();
    for route in PROTECTED {
        assert_eq!(evaluate(&session, route), GuardDecision::Placeholder);
    }
}

#[test]
fn anonymous_is_redirected_to_login() {
    let session = Session::anonymous();
    for route in PROTECTED {
        assert_eq!(
            evaluate(&session, route),
            GuardDecision::Redirect(Route::Login)
        );
    }
}

#[test]
fn authenticated_renders_target() {
    let session = Session::authenticated("tok".into());
    for route in PROTECTED {
        assert_eq!(evaluate(&session, route), GuardDecision::Render(route));
    }
}

#[test]
fn login_route_is_always_rendered() {
    for session in [
        Session::initial(),
        Session::anonymous(),
        Session::authenticated("tok".into()),
    ] {
        assert_eq!(
            evaluate(&session, Route::Login),
            GuardDecision::Render(Route::Login)
        );
    }
}

#[test]
fn only_login_is_public() {
    assert!(!Route::Login.is_protected());
    assert!(PROTECTED.iter().all(|route| route.is_protected()));
}

#[test]
fn route_paths_match_views() {
    assert_eq!(Route::Login.path(), "/auth/login");
    assert_eq!(Route::Orders.to_string(), "/orders");
    assert_eq!(Route::from_path("/home"), Some(Route::Home));
    assert_eq!(Route::from_path("/auth/login"), Some(Route::Login));
}

#[test]
fn decision_serializes_with_tag() {
    let json = serde_json::to_value(GuardDecision::Redirect(Route::Login)).expect("serialize");
    assert_eq!(json, serde_json::json!({ "decision": "redirect", "route": "login" }));

    let json = serde_json::to_value(GuardDecision::Placeholder).expect("serialize");
    assert_eq!(json, serde_json::json!({ "decision": "placeholder" }));
}

#[test]
fn root_path_is_guarded_like_home() {
    let root = Route::from_path("/").expect("root resolves");
    assert!(root.is_protected());

    assert_eq!(evaluate(&Session::initial(), root), GuardDecision::Placeholder);
    assert_eq!(
        evaluate(&Session::anonymous(), root),
        GuardDecision::Redirect(Route::Login)
    );
    assert_eq!(
        evaluate(&Session::authenticated("tok".into()), root),
        GuardDecision::Render(Route::Home)
    );
}
