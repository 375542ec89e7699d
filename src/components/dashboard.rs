//! Dashboard View
//!
//! Organization-wide stats and the project grid.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use taskboard_core::ProjectStats;

use super::{ErrorPage, LoadingSkeleton, ProjectCard, ProjectFormModal};
use crate::context::{use_app_context, FetchState};

#[component]
fn StatCard(title: &'static str, value: String, accent: &'static str) -> impl IntoView {
    view! {
        <div class=format!("stat-card {}", accent)>
            <span class="stat-title">{title}</span>
            <span class="stat-value">{value}</span>
        </div>
    }
}

#[component]
fn StatsRow(stats: ProjectStats) -> impl IntoView {
    view! {
        <div class="stats-row">
            <StatCard title="Total Projects" value=stats.total_projects.to_string() accent="blue" />
            <StatCard title="Active" value=stats.active_projects.to_string() accent="green" />
            <StatCard title="Total Tasks" value=stats.total_tasks.to_string() accent="purple" />
            <StatCard title="Completion Rate" value=stats.completion_label() accent="orange" />
        </div>
    }
}

#[component]
pub fn Dashboard(#[prop(into)] organization: Signal<String>) -> impl IntoView {
    let ctx = use_app_context();
    let (fetch, set_fetch) = signal(FetchState::Loading);
    let (show_create, set_show_create) = signal(false);

    // Load projects and stats when the organization changes
    Effect::new(move |_| {
        let org = organization.get();
        let client = ctx.client();
        set_fetch.set(FetchState::Loading);
        spawn_local(async move {
            let projects = client.projects(&org).await;
            set_fetch.set(FetchState::settled(&projects));
            if let Err(err) = client.project_stats(&org).await {
                warn!("[APP] Stats unavailable for {}: {}", org, err);
            }
        });
    });

    let projects = Memo::new(move |_| {
        ctx.track_cache();
        ctx.client().cached_projects(&organization.get())
    });
    let stats = Memo::new(move |_| {
        ctx.track_cache();
        ctx.client().cached_stats(&organization.get())
    });

    view! {
        <div class="dashboard">
            <div class="page-header">
                <h1>"Projects"</h1>
                <button class="btn btn-primary" on:click=move |_| set_show_create.set(true)>
                    "New Project"
                </button>
            </div>

            {move || stats.get().map(|stats| view! { <StatsRow stats=stats /> })}

            {move || {
                if let Some(msg) = fetch.with(|f| f.error().map(str::to_string)) {
                    return view! { <ErrorPage message=format!("Error loading projects: {}", msg) /> }
                        .into_any();
                }
                match projects.get() {
                    None => view! { <LoadingSkeleton rows=3 /> }.into_any(),
                    Some(list) if list.is_empty() => {
                        view! {
                            <div class="empty-state">
                                <h3>"No projects yet"</h3>
                                <p>"Create your first project to get started."</p>
                            </div>
                        }
                            .into_any()
                    }
                    Some(list) => {
                        view! {
                            <div class="project-grid">
                                {list
                                    .into_iter()
                                    .map(|project| view! { <ProjectCard project=project /> })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                }
            }}

            <Show when=move || show_create.get()>
                <ProjectFormModal
                    organization=organization
                    on_close=Callback::new(move |_| set_show_create.set(false))
                />
            </Show>
        </div>
    }
}
