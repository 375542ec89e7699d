//! Taskboard Frontend App
//!
//! Root component: organization selector, routing and shared context.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;
use taskboard_core::config::OrganizationOption;
use taskboard_core::TrackerConfig;

use crate::api::{ApiClient, FetchTransport};
use crate::components::{Dashboard, ProjectDetail};
use crate::context::AppContext;
use crate::route::{self, AppRoute};
use crate::store::{store_navigate, store_select_organization, AppState, AppStateStoreFields};

#[component]
pub fn App(config: TrackerConfig) -> impl IntoView {
    let client = Arc::new(ApiClient::new(FetchTransport::new(config.graphql_endpoint.clone())));
    provide_context(AppContext::new(client));

    let store = Store::new(AppState::new(config.default_organization, route::current_route()));
    provide_context(store);
    route::bind_popstate(move |r| store.route().set(r));

    let organization = Signal::derive(move || store.organization().get());

    view! {
        <div class="app-layout">
            <header class="app-header">
                <a
                    class="app-title"
                    href="/"
                    on:click=move |ev| {
                        ev.prevent_default();
                        store_navigate(&store, AppRoute::Dashboard);
                    }
                >
                    "Project Tracker"
                </a>
                <OrganizationSelect
                    organizations=config.organizations
                    selected=organization
                    on_change=Callback::new(move |slug| store_select_organization(&store, slug))
                />
            </header>

            <main class="main-content">
                {move || match store.route().get() {
                    AppRoute::Dashboard => view! { <Dashboard organization=organization /> }.into_any(),
                    AppRoute::Project(id) => {
                        view! { <ProjectDetail project_id=id organization=organization /> }.into_any()
                    }
                }}
            </main>
        </div>
    }
}

#[component]
fn OrganizationSelect(
    organizations: &'static [OrganizationOption],
    #[prop(into)] selected: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="org-select">
            <span>"Organization"</span>
            <select on:change=move |ev| on_change.run(event_target_value(&ev))>
                {organizations
                    .iter()
                    .map(|org| {
                        view! {
                            <option value=org.slug selected=move || selected.get() == org.slug>
                                {org.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}
