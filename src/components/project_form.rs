//! Project Form Modal
//!
//! Creates a project, or edits one when `project` is given.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use taskboard_core::forms::{submit_project, FormField, ProjectForm};
use taskboard_core::{Project, ProjectStatus};

use super::{ErrorBanner, Modal, SelectField, TextAreaField, TextField};
use crate::api::ApiClient;
use crate::context::use_app_context;

#[component]
pub fn ProjectFormModal(
    #[prop(into)] organization: Signal<String>,
    #[prop(optional)] project: Option<Project>,
    on_close: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let form = RwSignal::new(project.as_ref().map(ProjectForm::edit).unwrap_or_default());
    let heading = form.with_untracked(ProjectForm::heading);

    let field = move |f: FormField| Callback::new(move |v: String| form.update(|s| s.set_field(f, &v)));
    let error_of = move |f: FormField| Signal::derive(move || form.with(|s| s.errors().get(f).map(str::to_string)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if form.with_untracked(ProjectForm::is_submitting) {
            return;
        }
        let org = organization.get_untracked();
        let Some(submission) = form.try_update(|s| s.prepare(&org)).flatten() else {
            return;
        };
        let client = ctx.client();
        spawn_local(async move {
            match submit_project(&client, &submission).await {
                Ok(saved) => {
                    info!("[APP] Saved project {}", saved.id);
                    refetch_after_save(&client, &org, &saved.id).await;
                    on_close.run(());
                }
                Err(err) => form.update(|s| s.fail(err.to_string())),
            }
        });
    };

    let status_options = ProjectStatus::ALL
        .iter()
        .map(|s| (s.as_str(), s.option_label()))
        .collect::<Vec<_>>();

    view! {
        <Modal title=heading on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <ErrorBanner message=Signal::derive(move || form.with(|s| s.submit_error().map(str::to_string))) />
                <TextField
                    label="Name"
                    required=true
                    placeholder="Project name"
                    value=Signal::derive(move || form.with(|s| s.name.clone()))
                    on_input=field(FormField::Name)
                    error=error_of(FormField::Name)
                />
                <TextAreaField
                    label="Description"
                    placeholder="What is this project about?"
                    value=Signal::derive(move || form.with(|s| s.description.clone()))
                    on_input=field(FormField::Description)
                />
                <SelectField
                    label="Status"
                    options=status_options
                    value=Signal::derive(move || form.with(|s| s.status.as_str().to_string()))
                    on_change=field(FormField::Status)
                />
                <TextField
                    label="Due Date"
                    input_type="date"
                    value=Signal::derive(move || form.with(|s| s.due_date.clone()))
                    on_input=field(FormField::DueDate)
                    error=error_of(FormField::DueDate)
                />
                <div class="form-actions">
                    <button type="button" class="btn btn-secondary" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || form.with(ProjectForm::is_submitting)
                    >
                        {move || form.with(ProjectForm::submit_label)}
                    </button>
                </div>
            </form>
        </Modal>
    }
}

/// Lists, stats and the saved project itself; failures only log
async fn refetch_after_save(client: &ApiClient, organization: &str, project_id: &str) {
    if let Err(err) = client.projects(organization).await {
        warn!("[APP] Project list refetch failed: {}", err);
    }
    if let Err(err) = client.project_stats(organization).await {
        warn!("[APP] Stats refetch failed: {}", err);
    }
    if let Err(err) = client.project(project_id, organization).await {
        warn!("[APP] Project {} refetch failed: {}", project_id, err);
    }
}
