//! Keyboard and focus event handlers for `GridFocus`.
//!
//! Focusing a cell from inside a handler fires `focusin` synchronously while
//! the shared state is still borrowed. Those nested events are dropped with
//! `try_borrow_mut`: the outer call already records the new focus cell.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{FocusEvent, HtmlElement, Node};

use super::{GridFocus, SharedState};
use crate::types::KeyInput;

impl GridFocus {
    pub(crate) fn internal_key_down(
        state: &Rc<RefCell<SharedState>>,
        key: &str,
        ctrl: bool,
    ) -> bool {
        let Some(input) = KeyInput::parse(key, ctrl) else {
            return false;
        };
        let handled = {
            let Ok(mut guard) = state.try_borrow_mut() else {
                return false;
            };
            let s = &mut *guard;
            s.grid.handle_keydown(&mut s.host, input)
        };
        Self::schedule_update(state);
        handled
    }

    /// The grid element itself received focus.
    pub(crate) fn internal_focus(state: &Rc<RefCell<SharedState>>, event: &FocusEvent) {
        {
            let Ok(mut guard) = state.try_borrow_mut() else {
                return;
            };
            let s = &mut *guard;
            let on_grid = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlElement>().ok())
                .is_some_and(|target| &target == s.host.element());
            if !on_grid {
                return;
            }
            s.grid.handle_focus(&mut s.host);
        }
        Self::schedule_update(state);
    }

    /// Focus arrived on something inside the grid, e.g. a clicked cell.
    pub(crate) fn internal_focus_in(state: &Rc<RefCell<SharedState>>, event: &FocusEvent) {
        let Some(node) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return;
        };
        {
            let Ok(mut guard) = state.try_borrow_mut() else {
                return;
            };
            let s = &mut *guard;
            let Some((row, column)) = s.host.locate(&node) else {
                return;
            };
            s.grid.handle_cell_focused(&mut s.host, row, column);
        }
        Self::schedule_update(state);
    }

    pub(crate) fn internal_focus_out(state: &Rc<RefCell<SharedState>>, event: &FocusEvent) {
        let related = event
            .related_target()
            .and_then(|t| t.dyn_into::<Node>().ok());
        let Ok(mut guard) = state.try_borrow_mut() else {
            return;
        };
        let s = &mut *guard;
        let inside = s.host.contains(related.as_ref());
        s.grid.handle_focus_out(&mut s.host, inside);
    }
}
