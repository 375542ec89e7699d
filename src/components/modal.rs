//! Modal Component

use leptos::prelude::*;

/// Dialog over a dimmed backdrop. Clicking the backdrop or × closes it.
#[component]
pub fn Modal(title: &'static str, #[prop(into)] on_close: Callback<()>, children: Children) -> impl IntoView {
    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="modal"
                role="dialog"
                aria-modal="true"
                on:click=|ev| ev.stop_propagation()
            >
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button class="modal-close" aria-label="Close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}
