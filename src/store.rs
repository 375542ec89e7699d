//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use log::info;
use reactive_stores::Store;

use crate::route::{self, AppRoute};

/// Root view state: the selected organization and the current route
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub organization: String,
    pub route: AppRoute,
}

impl AppState {
    pub fn new(organization: &str, route: AppRoute) -> Self {
        Self {
            organization: organization.to_string(),
            route,
        }
    }
}

pub type AppStore = Store<AppState>;

pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Update the route and record it in the session history
pub fn store_navigate(store: &AppStore, target: AppRoute) {
    if store.route().get_untracked() == target {
        return;
    }
    route::push_route(&target);
    store.route().set(target);
}

pub fn store_select_organization(store: &AppStore, slug: String) {
    info!("[APP] Organization changed to {}", slug);
    store.organization().set(slug);
}
