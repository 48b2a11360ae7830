//! Explicit provide/inject context for a view tree.
//!
//! A [`Context`] is created once per application instance and passed down to
//! everything that needs shared state. Providers publish values under stable
//! keys; consumers look them up by key and type. Providers may also register
//! mount hooks whose returned resources live exactly as long as the mounted
//! view.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

type MountHook = Box<dyn Fn() -> Box<dyn Any>>;

/// Key-addressed shared values plus view lifecycle hooks.
#[derive(Default)]
pub struct Context {
    provided: HashMap<&'static str, Rc<dyn Any>>,
    mount_hooks: Vec<MountHook>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `value` under `key`, replacing any earlier value.
    pub fn provide<T: 'static>(&mut self, key: &'static str, value: T) {
        debug!(key, "value provided");
        self.provided.insert(key, Rc::new(value));
    }

    /// Looks up the value published under `key`.
    ///
    /// Returns `None` when nothing was provided or it has a different type.
    pub fn inject<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.provided.get(key)?.downcast_ref::<T>().cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.provided.contains_key(key)
    }

    /// Registers a hook run on every [`mount`](Self::mount).
    ///
    /// Whatever the hook returns is held by the [`MountedView`] and dropped
    /// when the view is unmounted.
    pub fn on_mounted<F, R>(&mut self, hook: F)
    where
        F: Fn() -> R + 'static,
        R: 'static,
    {
        self.mount_hooks
            .push(Box::new(move || Box::new(hook()) as Box<dyn Any>));
    }

    /// Activates the view, running mount hooks in registration order.
    pub fn mount(&self) -> MountedView {
        debug!(hooks = self.mount_hooks.len(), "view mounted");
        MountedView {
            resources: self.mount_hooks.iter().map(|hook| hook()).collect(),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&&str> = self.provided.keys().collect();
        keys.sort();
        f.debug_struct("Context")
            .field("provided", &keys)
            .field("mount_hooks", &self.mount_hooks.len())
            .finish()
    }
}

/// A mounted view. Dropping it unmounts the view, releasing mount-hook
/// resources in reverse registration order.
#[must_use = "the view is unmounted as soon as this is dropped"]
pub struct MountedView {
    resources: Vec<Box<dyn Any>>,
}

impl MountedView {
    /// Unmounts the view now.
    pub fn unmount(self) {}
}

impl Drop for MountedView {
    fn drop(&mut self) {
        while let Some(resource) = self.resources.pop() {
            drop(resource);
        }
        debug!("view unmounted");
    }
}

impl fmt::Debug for MountedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedView")
            .field("resources", &self.resources.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_provide_and_inject() {
        let mut ctx = Context::new();
        ctx.provide("answer", 42u32);
        assert_eq!(ctx.inject::<u32>("answer"), Some(42));
        assert!(ctx.contains("answer"));
    }

    #[test]
    fn test_inject_missing_or_wrong_type() {
        let mut ctx = Context::new();
        assert_eq!(ctx.inject::<u32>("answer"), None);
        ctx.provide("answer", "forty-two");
        assert_eq!(ctx.inject::<u32>("answer"), None);
    }

    struct Tracked {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("drop {}", self.name));
        }
    }

    #[test]
    fn test_mount_runs_hooks_and_releases_in_reverse() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = Context::new();
        for name in ["first", "second"] {
            let log = log.clone();
            ctx.on_mounted(move || {
                log.borrow_mut().push(format!("mount {}", name));
                Tracked {
                    name,
                    log: log.clone(),
                }
            });
        }

        let view = ctx.mount();
        view.unmount();

        assert_eq!(
            *log.borrow(),
            vec!["mount first", "mount second", "drop second", "drop first"]
        );
    }

    #[test]
    fn test_mount_twice_runs_hooks_twice() {
        let count = Rc::new(RefCell::new(0));
        let mut ctx = Context::new();
        let counter = count.clone();
        ctx.on_mounted(move || *counter.borrow_mut() += 1);

        let _a = ctx.mount();
        let _b = ctx.mount();
        assert_eq!(*count.borrow(), 2);
    }
}
