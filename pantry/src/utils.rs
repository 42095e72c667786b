use std::{cell::RefCell, cmp::Ordering};

use feruca::{Collator, Locale, Tailoring};
use ratatui::widgets::ListState;

thread_local! {
    // punctuation and spaces are not ignored, ties fall back to the exact bytes
    static COLLATOR: RefCell<Collator> =
        RefCell::new(Collator::new(Tailoring::Cldr(Locale::Root), false, true));
}

/// compares playlist names with the Unicode collation of the root locale:
/// accents and case only break ties between otherwise equal names,
/// lowercase before uppercase
pub fn compare_names(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

/// creates a list state with `id` selected
pub fn new_list_state(id: Option<usize>) -> ListState {
    let mut state = ListState::default();
    state.select(id);
    state
}
