//! Checklist persistence
//!
//! Every checkbox with an id inside `#checklist` is restored on load and
//! saved on change.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Element, HtmlInputElement};

use crate::checklist::ChecklistState;
use crate::dom;
use crate::error::ShowcaseError;
use crate::storage;

const CHECKBOX_SELECTOR: &str = "input[type=checkbox][id]";

pub fn bind() -> Result<(), ShowcaseError> {
    let root = dom::require_id::<Element>("checklist")?;
    let store = Rc::new(storage::local_storage()?);
    let boxes = dom::query_all::<HtmlInputElement>(Some(&root), CHECKBOX_SELECTOR);

    let state = ChecklistState::load(&*store);
    for input in &boxes {
        input.set_checked(state.is_checked(&input.id()));
    }
    let state = Rc::new(RefCell::new(state));

    for input in &boxes {
        let (state, store, checkbox) = (state.clone(), store.clone(), input.clone());
        dom::listen(input, "change", move |_| {
            let mut state = state.borrow_mut();
            state.set(&checkbox.id(), checkbox.checked());
            if let Err(e) = state.save(&*store) {
                log::warn!("checklist not saved: {}", e);
            }
        });
    }

    log::debug!("checklist bound to {} items", boxes.len());
    Ok(())
}
