//! Installing the dark-mode provider and looking it up from consumers.

use std::rc::Rc;

use tracing::info;

use super::ambient::AmbientPreference;
use super::context::Context;
use super::dark_mode::DarkMode;
use super::document::Document;
use super::error::SchemeError;
use super::mirror::mirror;
use super::storage::{PersistedScheme, Storage};

/// Key the effective dark-mode value is published under.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Storage key of the persisted color-scheme preference.
pub const STORAGE_KEY: &str = "vuepress-color-scheme";

/// The host environment a provider binds to.
#[derive(Clone)]
pub struct Host {
    pub ambient: AmbientPreference,
    pub storage: Rc<dyn Storage>,
    pub document: Rc<dyn Document>,
    pub storage_key: String,
}

impl Host {
    pub fn new<S, D>(ambient: AmbientPreference, storage: S, document: D) -> Self
    where
        S: Storage + 'static,
        D: Document + 'static,
    {
        Self {
            ambient,
            storage: Rc::new(storage),
            document: Rc::new(document),
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    /// Stores the preference under `key` instead of [`STORAGE_KEY`].
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Host")
            .field("ambient", &self.ambient)
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}

/// Installs the dark-mode provider into `ctx`.
///
/// Binds the ambient preference and the persisted slot (materializing it as
/// `auto`), publishes the derived [`DarkMode`] under [`DARK_MODE_KEY`], and
/// registers a mount hook mirroring it onto the document root.
///
/// # Errors
///
/// Returns [`SchemeError::AlreadyInstalled`] if `ctx` already has a provider.
pub fn install(ctx: &mut Context, host: Host) -> Result<(), SchemeError> {
    if ctx.contains(DARK_MODE_KEY) {
        return Err(SchemeError::AlreadyInstalled);
    }

    let Host {
        ambient,
        storage,
        document,
        storage_key,
    } = host;

    let preference = PersistedScheme::bind(storage, storage_key);
    let dark_mode = DarkMode::new(ambient, preference);
    info!(
        dark = dark_mode.get(),
        preference = %dark_mode.preference(),
        "dark mode provider installed"
    );

    ctx.provide(DARK_MODE_KEY, dark_mode.clone());
    ctx.on_mounted(move || mirror(&dark_mode, Rc::clone(&document)));
    Ok(())
}

/// Returns the shared dark-mode value.
///
/// # Panics
///
/// Panics if no provider was installed in `ctx`; see [`try_use_dark_mode`].
pub fn use_dark_mode(ctx: &Context) -> DarkMode {
    match try_use_dark_mode(ctx) {
        Ok(dark_mode) => dark_mode,
        Err(e) => panic!("{e}"),
    }
}

/// Returns the shared dark-mode value, or [`SchemeError::MissingProvider`].
pub fn try_use_dark_mode(ctx: &Context) -> Result<DarkMode, SchemeError> {
    ctx.inject::<DarkMode>(DARK_MODE_KEY)
        .ok_or(SchemeError::MissingProvider)
}
