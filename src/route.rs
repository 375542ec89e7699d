//! Client-side Routing
//!
//! Two routes, `/` and `/projects/:id`, driven by the History API.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppRoute {
    #[default]
    Dashboard,
    Project(String),
}

impl AppRoute {
    /// Unknown paths fall back to the dashboard
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["projects", id] => decode_segment(id).map(AppRoute::Project).unwrap_or_default(),
            _ => AppRoute::Dashboard,
        }
    }

    pub fn path(&self) -> String {
        match self {
            AppRoute::Dashboard => "/".to_string(),
            AppRoute::Project(id) => format!("/projects/{}", utf8_percent_encode(id, SEGMENT)),
        }
    }
}

fn decode_segment(segment: &str) -> Option<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
        .filter(|s| !s.trim().is_empty())
}

pub fn current_route() -> AppRoute {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| AppRoute::parse(&path))
        .unwrap_or_default()
}

/// Push `route` onto the session history without reloading
pub fn push_route(route: &AppRoute) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(&route.path())) {
        log::warn!("[APP] pushState failed: {:?}", err);
    }
}

/// Call `on_change` with the new route on back/forward navigation
pub fn bind_popstate<F>(on_change: F)
where
    F: Fn(AppRoute) + 'static,
{
    let on_popstate = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_ev: web_sys::PopStateEvent| {
        on_change(current_route());
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
    }
    on_popstate.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(AppRoute::parse("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::parse(""), AppRoute::Dashboard);
        assert_eq!(AppRoute::parse("/projects/42"), AppRoute::Project("42".into()));
        assert_eq!(AppRoute::parse("/projects/42/"), AppRoute::Project("42".into()));
        assert_eq!(AppRoute::parse("/projects/42?tab=board"), AppRoute::Project("42".into()));
    }

    #[test]
    fn test_unknown_paths_fall_back() {
        assert_eq!(AppRoute::parse("/projects"), AppRoute::Dashboard);
        assert_eq!(AppRoute::parse("/projects/1/tasks"), AppRoute::Dashboard);
        assert_eq!(AppRoute::parse("/settings"), AppRoute::Dashboard);
        assert_eq!(AppRoute::parse("/projects/%20"), AppRoute::Dashboard);
    }

    #[test]
    fn test_ids_are_percent_coded() {
        assert_eq!(AppRoute::parse("/projects/a%2Fb"), AppRoute::Project("a/b".into()));
        assert_eq!(AppRoute::Project("a/b".into()).path(), "/projects/a%2Fb");
        assert_eq!(AppRoute::Dashboard.path(), "/");
    }
}
