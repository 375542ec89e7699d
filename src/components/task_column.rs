//! Task Column Component
//!
//! One status column of the board. The whole column is a drop target.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_dragenter, make_on_dragleave, make_on_dragover, make_on_drop};
use taskboard_core::{BoardState, Column, Task, TaskStatus};

use super::{BoardActions, TaskCard};

#[component]
pub fn TaskColumn(status: TaskStatus, board: RwSignal<BoardState>, actions: BoardActions) -> impl IntoView {
    let column = Memo::new(move |_| board.with(|b| b.column(status)));
    let tasks = move || column.with(|c| c.tasks.clone());
    let is_target = move || board.with(|b| b.is_drop_target(status));
    let title = column.with_untracked(Column::title);

    let on_dragenter = make_on_dragenter(Callback::new(move |_| actions.drag_enter.run(status)));
    let on_dragover = make_on_dragover(board.with_untracked(BoardState::drag_over).as_str());
    let on_dragleave = make_on_dragleave(actions.drag_leave);
    let on_drop = make_on_drop(Callback::new(move |payload| actions.drop_on.run((status, payload))));

    view! {
        <section
            class=move || if is_target() { "board-column drop-target" } else { "board-column" }
            data-status=status.as_str()
            on:dragenter=on_dragenter
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <header class="column-header">
                <span class=format!("column-dot {}", status.color())></span>
                <h3>{title}</h3>
                <span class="count-badge">{move || column.with(Column::count)}</span>
                <button
                    class="add-task-btn"
                    aria-label=format!("Add task to {}", title)
                    on:click=move |_| actions.open_create.run(status)
                >
                    "+"
                </button>
            </header>
            <div class="column-body">
                <For
                    each=tasks
                    key=|task: &Task| format!("{}:{}", task.id, task.updated_at)
                    children=move |task: Task| view! { <TaskCard task=task board=board actions=actions /> }
                />
                <Show when=move || column.with(|c| c.count() == 0)>
                    <div class="column-empty">"Drop tasks here"</div>
                </Show>
            </div>
        </section>
    }
}
