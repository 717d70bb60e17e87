//! Scoped loading state for one in-flight submission.

use std::ops::{Deref, DerefMut};

use crate::page::Page;

/// Shows the loading indicator on creation and hides it exactly once on drop,
/// whichever way the submission ends (including a dropped future or a panic).
pub struct LoadingGuard<'a, P: Page> {
    page: &'a mut P,
    lock_submit: bool,
}

impl<'a, P: Page> LoadingGuard<'a, P> {
    pub fn engage(page: &'a mut P, lock_submit: bool) -> Self {
        page.show_loading();
        if lock_submit {
            page.set_submit_enabled(false);
        }
        Self { page, lock_submit }
    }
}

impl<P: Page> Deref for LoadingGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.page
    }
}

impl<P: Page> DerefMut for LoadingGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.page
    }
}

impl<P: Page> Drop for LoadingGuard<'_, P> {
    fn drop(&mut self) {
        if self.lock_submit {
            self.page.set_submit_enabled(true);
        }
        self.page.hide_loading();
    }
}
