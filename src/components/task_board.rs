//! Task Board
//!
//! Three status columns over the project's task list. Drops and arrow
//! buttons run the status transition; a failed move shows a banner for a few
//! seconds.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use taskboard_core::forms::TaskForm;
use taskboard_core::{
    run_transition, BoardModal, BoardState, StatusTransition, TaskListKey, TaskStatus, TransitionError,
};

use super::{ErrorBanner, ErrorPage, LoadingSkeleton, TaskColumn, TaskFormModal};
use crate::context::{use_app_context, FetchState};

const MOVE_ERROR_MS: u32 = 4_000;

/// Gesture and modal callbacks shared by columns and cards
#[derive(Clone, Copy)]
pub struct BoardActions {
    pub drag_start: Callback<String>,
    pub drag_end: Callback<()>,
    pub drag_enter: Callback<TaskStatus>,
    pub drag_leave: Callback<()>,
    pub drop_on: Callback<(TaskStatus, Option<String>)>,
    pub move_task: Callback<(String, TaskStatus)>,
    pub open_create: Callback<TaskStatus>,
    pub open_edit: Callback<String>,
}

#[component]
pub fn TaskBoard(project_id: String, #[prop(into)] organization: Signal<String>) -> impl IntoView {
    let ctx = use_app_context();
    let board = RwSignal::new(BoardState::default());
    let (fetch, set_fetch) = signal(FetchState::Loading);
    // (sequence, message) so a stale timeout never hides a newer error
    let (move_error, set_move_error) = signal(None::<(u64, String)>);
    let error_seq = StoredValue::new(0u64);

    let list_key = {
        let project_id = project_id.clone();
        Memo::new(move |_| TaskListKey::new(project_id.clone(), organization.get()))
    };

    Effect::new(move |_| {
        let key = list_key.get();
        let client = ctx.client();
        set_fetch.set(FetchState::Loading);
        spawn_local(async move {
            let result = client.tasks(&key).await;
            set_fetch.set(FetchState::settled(&result));
        });
    });

    // Cache-first: the board always renders the client's visible state
    let cached = Memo::new(move |_| {
        ctx.track_cache();
        ctx.client().cached_tasks(&list_key.get())
    });
    Effect::new(move |_| {
        if let Some(tasks) = cached.get() {
            board.update(|b| b.set_tasks(tasks));
        }
    });

    let show_move_error = move |message: String| {
        let seq = error_seq.with_value(|s| s + 1);
        error_seq.set_value(seq);
        set_move_error.set(Some((seq, message)));
        spawn_local(async move {
            TimeoutFuture::new(MOVE_ERROR_MS).await;
            set_move_error.update(|current| {
                if current.as_ref().is_some_and(|(s, _)| *s == seq) {
                    *current = None;
                }
            });
        });
    };

    let start_transition = move |transition: StatusTransition| {
        let client = ctx.client();
        let key = list_key.get_untracked();
        spawn_local(async move {
            match run_transition(&client, &key, &transition).await {
                Ok(outcome) => debug!("[BOARD] {} -> {:?}", transition.task_id, outcome),
                Err(TransitionError::Busy(id)) => warn!("[BOARD] Ignored move of {} while saving", id),
                Err(err) => show_move_error(format!("Failed to move task: {}", err)),
            }
        });
    };

    let actions = BoardActions {
        drag_start: Callback::new(move |id: String| board.update(|b| b.drag_start(&id))),
        drag_end: Callback::new(move |_| board.update(BoardState::drag_end)),
        drag_enter: Callback::new(move |status| board.update(|b| b.drag_enter(status))),
        drag_leave: Callback::new(move |_| board.update(BoardState::drag_leave)),
        drop_on: Callback::new(move |(status, payload): (TaskStatus, Option<String>)| {
            let transition = board
                .try_update(|b| {
                    b.drop_on(status)
                        .or_else(|| payload.and_then(|id| b.request_move(&id, status)))
                })
                .flatten();
            if let Some(transition) = transition {
                start_transition(transition);
            }
        }),
        move_task: Callback::new(move |(id, status): (String, TaskStatus)| {
            if let Some(transition) = board.with_untracked(|b| b.request_move(&id, status)) {
                start_transition(transition);
            }
        }),
        open_create: Callback::new(move |status| board.update(|b| b.open_create(status))),
        open_edit: Callback::new(move |id: String| board.update(|b| b.open_edit(&id))),
    };

    // Memos so refetches do not rebuild the columns mid-gesture
    let load_error = Memo::new(move |_| fetch.with(|f| f.error().map(str::to_string)));
    let loaded = Memo::new(move |_| cached.with(Option::is_some));
    let modal = Memo::new(move |_| board.with(|b| b.modal().cloned()));
    let close_modal = Callback::new(move |_| board.update(BoardState::close_modal));

    view! {
        <div class="task-board-wrapper">
            <ErrorBanner
                message=Signal::derive(move || move_error.get().map(|(_, msg)| msg))
                on_dismiss=Callback::new(move |_| set_move_error.set(None))
            />
            {move || {
                if let Some(msg) = load_error.get() {
                    return view! { <ErrorPage message=format!("Error loading tasks: {}", msg) /> }.into_any();
                }
                if !loaded.get() {
                    return view! { <LoadingSkeleton rows=3 /> }.into_any();
                }
                view! {
                    <div class="task-board">
                        {TaskStatus::ALL
                            .into_iter()
                            .map(|status| view! { <TaskColumn status=status board=board actions=actions /> })
                            .collect_view()}
                    </div>
                }
                    .into_any()
            }}
            {move || {
                let key = list_key.get_untracked();
                modal
                    .get()
                    .and_then(|modal| match modal {
                        BoardModal::CreateTask { initial_status } => {
                            Some(TaskForm::create(&key.project_id, initial_status))
                        }
                        BoardModal::EditTask(id) => board.with_untracked(|b| b.task(&id).map(TaskForm::edit)),
                    })
                    .map(|form| view! { <TaskFormModal form=form list=key on_close=close_modal /> })
            }}
        </div>
    }
}
