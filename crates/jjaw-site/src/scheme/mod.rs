//! Dark/light color-scheme preference shared across a view tree.
//!
//! This module provides:
//!
//! - [`ColorScheme`]: the persisted `auto`/`light`/`dark` preference
//! - [`AmbientPreference`]: the system preference, detected with `dark-light`
//! - [`DarkMode`]: the effective boolean derived from the two
//! - [`install`] / [`use_dark_mode`]: provider and consumer over a [`Context`]
//! - [`mirror`]: keeps the document root's `dark` class in sync while mounted
//!
//! # Example
//!
//! ```rust
//! use jjaw_site::scheme::{install, use_dark_mode, AmbientPreference, Context, Host};
//! use jjaw_site::{HtmlDocument, MemoryStorage};
//!
//! let doc = HtmlDocument::new("zh-CN");
//! let host = Host::new(AmbientPreference::fixed(false), MemoryStorage::new(), doc.clone());
//!
//! let mut ctx = Context::new();
//! install(&mut ctx, host).unwrap();
//!
//! let view = ctx.mount();
//! use_dark_mode(&ctx).set(true);
//! assert_eq!(doc.open_tag().unwrap(), r#"<html lang="zh-CN" class="dark">"#);
//! drop(view);
//! ```

mod ambient;
mod context;
mod dark_mode;
mod document;
mod error;
mod mirror;
mod preference;
mod provider;
mod signal;
mod storage;

pub use ambient::{
    detect_color_mode, reset_theme_detector, set_theme_detector, AmbientPreference, ColorMode,
};
pub use context::{Context, MountedView};
pub use dark_mode::DarkMode;
pub use document::{Document, HtmlDocument, HtmlRoot, RootElement};
pub use error::SchemeError;
pub use mirror::{mirror, MirrorGuard, DARK_CLASS};
pub use preference::{ColorScheme, ParseColorSchemeError};
pub use provider::{install, try_use_dark_mode, use_dark_mode, Host, DARK_MODE_KEY, STORAGE_KEY};
pub use signal::{Signal, Subscription};
pub use storage::{FileStorage, MemoryStorage, PersistedScheme, Storage, StorageError};
