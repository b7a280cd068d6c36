//! Single-flight update scheduling for `GridFocus`.
//!
//! Queued grid work runs on the next animation frame. Requests made while a
//! frame is already pending are coalesced into it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::{GridFocus, SharedState};

impl GridFocus {
    pub(crate) fn schedule_update(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(mut s) = state.try_borrow_mut() else {
            return;
        };
        if s.frame_pending || !s.host.take_update_request() {
            return;
        }
        if s.frame_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GridFocus::run_frame(&state);
                }
            }) as Box<dyn FnMut()>);
            s.frame_closure = Some(closure);
        }
        let Some(callback) = s.frame_closure.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(_) => s.frame_pending = true,
            Err(e) => tracing::warn!(error = ?e, "requestAnimationFrame failed"),
        }
    }

    pub(crate) fn run_frame(state: &Rc<RefCell<SharedState>>) {
        {
            let Ok(mut guard) = state.try_borrow_mut() else {
                return;
            };
            let s = &mut *guard;
            s.frame_pending = false;
            s.grid.process_updates(&mut s.host);
        }
        // Work queued while processing goes to the next frame.
        Self::schedule_update(state);
    }
}
