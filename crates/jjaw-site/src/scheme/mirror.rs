//! Mirrors the effective dark-mode value onto the document root's `dark` class.

use std::rc::Rc;

use tracing::trace;

use super::dark_mode::DarkMode;
use super::document::Document;
use super::signal::Subscription;

/// Class toggled on the root element while dark mode is in effect.
pub const DARK_CLASS: &str = "dark";

fn apply(document: &dyn Document, dark: bool) {
    match document.root_element() {
        Some(root) => {
            trace!(dark, "mirroring dark mode onto root element");
            root.toggle_class(DARK_CLASS, dark);
        }
        None => trace!(dark, "no root element, skipping dark mode mirror"),
    }
}

/// Keeps the root element in sync with a [`DarkMode`] while alive.
///
/// Created by [`mirror`]. Dropping it, including during unwinding, applies
/// the latest value one last time and then stops following changes.
#[must_use = "the mirror stops as soon as the guard is dropped"]
pub struct MirrorGuard {
    dark_mode: DarkMode,
    document: Rc<dyn Document>,
    subscription: Option<Subscription>,
}

/// Applies the current value to `document` and follows every later change.
pub fn mirror(dark_mode: &DarkMode, document: Rc<dyn Document>) -> MirrorGuard {
    apply(document.as_ref(), dark_mode.get());

    let target = Rc::clone(&document);
    let subscription = dark_mode.subscribe(move |dark| apply(target.as_ref(), *dark));

    MirrorGuard {
        dark_mode: dark_mode.clone(),
        document,
        subscription: Some(subscription),
    }
}

impl Drop for MirrorGuard {
    fn drop(&mut self) {
        // The view may be torn down between a change and its notification.
        apply(self.document.as_ref(), self.dark_mode.get());
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl std::fmt::Debug for MirrorGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MirrorGuard")
            .field("dark_mode", &self.dark_mode)
            .finish()
    }
}
