//! Loading and Error Components

use leptos::prelude::*;

use crate::route::AppRoute;
use crate::store::{store_navigate, use_app_store};

/// Placeholder blocks while the first response is outstanding
#[component]
pub fn LoadingSkeleton(#[prop(default = 3)] rows: usize) -> impl IntoView {
    view! {
        <div class="skeleton" aria-busy="true">
            {(0..rows).map(|_| view! { <div class="skeleton-row"></div> }).collect_view()}
        </div>
    }
}

/// Full-page error with an optional way back to the dashboard
#[component]
pub fn ErrorPage(
    #[prop(into)] message: String,
    #[prop(optional)] back_to_dashboard: bool,
) -> impl IntoView {
    let store = use_app_store();
    view! {
        <div class="error-page">
            <p class="error-message">{message}</p>
            {back_to_dashboard
                .then(|| {
                    view! {
                        <button
                            class="btn btn-secondary"
                            on:click=move |_| store_navigate(&store, AppRoute::Dashboard)
                        >
                            "Back to Dashboard"
                        </button>
                    }
                })}
        </div>
    }
}

/// Inline banner; hidden while `message` is `None`
#[component]
pub fn ErrorBanner(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional, into)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|msg| {
            view! {
                <div class="error-banner" role="alert">
                    <span>{msg}</span>
                    {on_dismiss
                        .map(|dismiss| {
                            view! {
                                <button class="banner-close" aria-label="Dismiss" on:click=move |_| dismiss.run(())>
                                    "×"
                                </button>
                            }
                        })}
                </div>
            }
        })
    }
}

#[component]
pub fn ProgressBar(#[prop(into)] width: Signal<String>) -> impl IntoView {
    view! {
        <div class="progress-track">
            <div class="progress-fill" style:width=move || width.get()></div>
        </div>
    }
}
