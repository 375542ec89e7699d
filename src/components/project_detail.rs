//! Project Detail View

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::models::format_due_long;
use taskboard_core::Project;

use super::{ErrorPage, LoadingSkeleton, ProgressBar, ProjectFormModal, StatusBadge, TaskBoard};
use crate::context::{use_app_context, FetchState};
use crate::route::AppRoute;
use crate::store::{store_navigate, use_app_store};

#[component]
pub fn ProjectDetail(project_id: String, #[prop(into)] organization: Signal<String>) -> impl IntoView {
    let ctx = use_app_context();
    let (fetch, set_fetch) = signal(FetchState::Loading);

    {
        let project_id = project_id.clone();
        Effect::new(move |_| {
            let org = organization.get();
            let id = project_id.clone();
            let client = ctx.client();
            set_fetch.set(FetchState::Loading);
            spawn_local(async move {
                let result = client.project(&id, &org).await;
                set_fetch.set(FetchState::settled(&result));
            });
        });
    }

    let project = {
        let project_id = project_id.clone();
        Memo::new(move |_| {
            ctx.track_cache();
            ctx.client().cached_project(&project_id, &organization.get())
        })
    };
    let load_error = Memo::new(move |_| fetch.with(|f| f.error().map(str::to_string)));
    let settled = Memo::new(move |_| fetch.with(|f| *f != FetchState::Loading));
    let has_project = Memo::new(move |_| project.with(Option::is_some));

    view! {
        <div class="project-detail">
            {move || {
                if let Some(msg) = load_error.get() {
                    return view! {
                        <ErrorPage message=format!("Error loading project: {}", msg) back_to_dashboard=true />
                    }
                        .into_any();
                }
                match (has_project.get(), settled.get()) {
                    (true, _) => {
                        view! {
                            <ProjectHeader project=project organization=organization />
                            <TaskBoard project_id=project_id.clone() organization=organization />
                        }
                            .into_any()
                    }
                    (false, true) => {
                        view! { <ErrorPage message="Project not found" back_to_dashboard=true /> }.into_any()
                    }
                    (false, false) => view! { <LoadingSkeleton rows=4 /> }.into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn ProjectHeader(project: Memo<Option<Project>>, organization: Signal<String>) -> impl IntoView {
    let store = use_app_store();
    let (editing, set_editing) = signal(false);
    let field = move |f: fn(&Project) -> String| move || project.with(|p| p.as_ref().map(f).unwrap_or_default());

    view! {
        <div class="detail-header">
            <button class="btn btn-link back-btn" on:click=move |_| store_navigate(&store, AppRoute::Dashboard)>
                "← Back"
            </button>
            <div class="detail-title">
                <h1>{field(|p| p.name.clone())}</h1>
                {move || project.get().map(|p| view! { <StatusBadge status=p.status /> })}
                <button class="btn btn-secondary" on:click=move |_| set_editing.set(true)>
                    "Edit Project"
                </button>
            </div>
            <p class="project-description">{field(|p| p.description.clone())}</p>
            <div class="detail-meta">
                <span class="project-due">
                    {field(|p| {
                        p.due_date
                            .as_deref()
                            .and_then(format_due_long)
                            .map(|d| format!("Due {}", d))
                            .unwrap_or_else(|| "No due date".to_string())
                    })}
                </span>
                <span>{field(|p| format!("{}/{} tasks", p.completed_tasks, p.task_count))}</span>
                <span class="progress-label">{field(|p| format!("{:.0}%", p.progress_percent()))}</span>
            </div>
            <ProgressBar width=Signal::derive(field(Project::progress_width)) />
        </div>
        {move || {
            editing
                .get()
                .then(|| project.get_untracked())
                .flatten()
                .map(|p| {
                    view! {
                        <ProjectFormModal
                            organization=organization
                            project=p
                            on_close=Callback::new(move |_| set_editing.set(false))
                        />
                    }
                })
        }}
    }
}
