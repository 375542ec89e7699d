//! Leptos DragDrop Utilities
//!
//! Handler factories for native HTML5 drag-and-drop. A draggable element
//! carries a string payload in its `DataTransfer`; drop targets read it back.
//! Gesture bookkeeping is left to the caller through `Callback`s.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Node};

/// MIME type the payload is stored under
pub const PAYLOAD_FORMAT: &str = "text/plain";

/// Trimmed payload, `None` when blank
pub fn decode_payload(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Payload set by the matching `make_on_dragstart`
pub fn read_drag_payload(ev: &DragEvent) -> Option<String> {
    ev.data_transfer()
        .and_then(|dt| dt.get_data(PAYLOAD_FORMAT).ok())
        .and_then(|raw| decode_payload(&raw))
}

/// Dragstart handler for a draggable element
pub fn make_on_dragstart(
    payload: String,
    effect_allowed: &'static str,
    on_start: Callback<String>,
) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            payload_stored(&payload, dt.set_data(PAYLOAD_FORMAT, &payload));
            dt.set_effect_allowed(effect_allowed);
        }
        on_start.run(payload.clone());
    }
}

/// Dragover handler. Cancelling the event is what makes the element a valid
/// drop target.
pub fn make_on_dragover(drop_effect: &'static str) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect(drop_effect);
        }
    }
}

pub fn make_on_dragenter(on_enter: Callback<()>) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        on_enter.run(());
    }
}

/// Dragleave handler that ignores moves between the element's own children
pub fn make_on_dragleave(on_leave: Callback<()>) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        if left_element(&ev) {
            on_leave.run(());
        }
    }
}

pub fn make_on_drop(on_drop: Callback<Option<String>>) -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        on_drop.run(read_drag_payload(&ev));
    }
}

pub fn make_on_dragend(on_end: Callback<()>) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| on_end.run(())
}

/// Logs a failed `setData`. The gesture continues either way.
fn payload_stored<E: std::fmt::Debug>(payload: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("[DND] could not store drag payload {}: {:?}", payload, err);
            false
        }
    }
}

fn left_element(ev: &DragEvent) -> bool {
    let current = ev.current_target().and_then(|t| t.dyn_into::<Node>().ok());
    let related = ev.related_target().and_then(|t| t.dyn_into::<Node>().ok());
    match (current, related) {
        (Some(current), Some(related)) => !current.contains(Some(&related)),
        _ => true,
    }
}
