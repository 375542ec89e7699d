//! Task Form Modal

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};
use taskboard_core::forms::{submit_task, FormField, TaskForm};
use taskboard_core::{TaskListKey, TaskStatus};

use super::{ErrorBanner, Modal, SelectField, TextAreaField, TextField};
use crate::context::use_app_context;

/// Create or edit a task; `list` is refetched after a successful save
#[component]
pub fn TaskFormModal(form: TaskForm, list: TaskListKey, on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let heading = form.heading();
    let form = RwSignal::new(form);
    let list = StoredValue::new(list);

    let field = move |f: FormField| Callback::new(move |v: String| form.update(|s| s.set_field(f, &v)));
    let error_of = move |f: FormField| Signal::derive(move || form.with(|s| s.errors().get(f).map(str::to_string)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if form.with_untracked(TaskForm::is_submitting) {
            return;
        }
        let Some(submission) = form.try_update(TaskForm::prepare).flatten() else {
            return;
        };
        let client = ctx.client();
        let list = list.get_value();
        spawn_local(async move {
            match submit_task(&client, &submission).await {
                Ok(saved) => {
                    info!("[APP] Saved task {}", saved.id);
                    if let Err(err) = client.tasks(&list).await {
                        warn!("[APP] Task list refetch failed: {}", err);
                    }
                    on_close.run(());
                }
                Err(err) => form.update(|s| s.fail(err.to_string())),
            }
        });
    };

    let status_options = TaskStatus::ALL
        .iter()
        .map(|s| (s.as_str(), s.title()))
        .collect::<Vec<_>>();

    view! {
        <Modal title=heading on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <ErrorBanner message=Signal::derive(move || form.with(|s| s.submit_error().map(str::to_string))) />
                <TextField
                    label="Title"
                    required=true
                    placeholder="Task title"
                    value=Signal::derive(move || form.with(|s| s.title.clone()))
                    on_input=field(FormField::Title)
                    error=error_of(FormField::Title)
                />
                <TextAreaField
                    label="Description"
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
                    label="Assignee Email"
                    input_type="email"
                    placeholder="name@example.com"
                    value=Signal::derive(move || form.with(|s| s.assignee_email.clone()))
                    on_input=field(FormField::AssigneeEmail)
                    error=error_of(FormField::AssigneeEmail)
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
                        disabled=move || form.with(TaskForm::is_submitting)
                    >
                        {move || form.with(TaskForm::submit_label)}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
