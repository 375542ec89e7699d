//! Task Card Component

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragend, make_on_dragstart};
use taskboard_core::board::arrow_moves;
use taskboard_core::models::format_due_short;
use taskboard_core::{BoardState, DropEffect, Task};

use super::BoardActions;

#[component]
pub fn TaskCard(task: Task, board: RwSignal<BoardState>, actions: BoardActions) -> impl IntoView {
    let id = task.id.clone();
    let is_dragging = {
        let id = id.clone();
        move || board.with(|b| b.is_dragging(&id))
    };
    let on_dragstart = make_on_dragstart(id.clone(), DropEffect::Move.as_str(), actions.drag_start);
    let on_dragend = make_on_dragend(actions.drag_end);

    let arrows = arrow_moves(task.status)
        .into_iter()
        .map(|(label, hint, target)| {
            let id = id.clone();
            view! {
                <button
                    class="arrow-btn"
                    title=hint
                    aria-label=hint
                    on:click=move |ev| {
                        ev.stop_propagation();
                        actions.move_task.run((id.clone(), target));
                    }
                >
                    {label}
                </button>
            }
        })
        .collect_view();

    view! {
        <article
            class=move || if is_dragging() { "task-card dragging" } else { "task-card" }
            draggable="true"
            on:dragstart=on_dragstart
            on:dragend=on_dragend
            on:click=move |_| actions.open_edit.run(id.clone())
        >
            <h4 class="task-title">{task.title.clone()}</h4>
            {(!task.description.is_empty())
                .then(|| view! { <p class="task-description">{task.description.clone()}</p> })}
            <div class="task-meta">
                {(!task.assignee_email.is_empty())
                    .then(|| view! { <span class="task-assignee">{task.assignee_email.clone()}</span> })}
                {task
                    .due_date
                    .as_deref()
                    .and_then(format_due_short)
                    .map(|due| view! { <span class="task-due">{due}</span> })}
            </div>
            <div class="task-actions">{arrows}</div>
        </article>
    }
}
