//! Project Card Component

use leptos::prelude::*;
use taskboard_core::models::format_due_long;
use taskboard_core::{Project, ProjectStatus};

use super::ProgressBar;
use crate::route::AppRoute;
use crate::store::{store_navigate, use_app_store};

#[component]
pub fn StatusBadge(status: ProjectStatus) -> impl IntoView {
    view! { <span class=format!("status-badge {}", status.css_class())>{status.badge_label()}</span> }
}

/// Dashboard card linking to the project's detail route
#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let store = use_app_store();
    let route = AppRoute::Project(project.id.clone());
    let href = route.path();
    let width = project.progress_width();

    view! {
        <a
            class="project-card"
            href=href
            on:click=move |ev| {
                ev.prevent_default();
                store_navigate(&store, route.clone());
            }
        >
            <div class="project-card-header">
                <h3>{project.name.clone()}</h3>
                <StatusBadge status=project.status />
            </div>
            <p class="project-description">{project.description_or_placeholder().to_string()}</p>
            <div class="project-meta">
                <span>{format!("{}/{} tasks", project.completed_tasks, project.task_count)}</span>
                {project
                    .due_date
                    .as_deref()
                    .and_then(format_due_long)
                    .map(|due| view! { <span class="project-due">{due}</span> })}
            </div>
            <ProgressBar width=width />
        </a>
    }
}
