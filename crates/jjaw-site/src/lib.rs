//! # jjaw-site
//!
//! Configuration and plugin behaviors of the jjaw.cn static site.
//!
//! ## Modules
//!
//! - [`scheme`]: the dark/light color-scheme manager. A persisted
//!   `auto`/`light`/`dark` preference is resolved against the system
//!   preference into one shared [`DarkMode`] value, published through an
//!   explicit [`Context`] and mirrored onto the document root's `dark` class
//!   while a view is mounted.
//! - [`config`]: the site configuration ([`SiteConfig`]) with its typed plugin
//!   list, loadable from YAML or JSON.
//! - [`blog`]: article metadata derived from front matter and git history,
//!   grouped into flagged lists and tag pages sorted by last update.
//!
//! ## Quick Start
//!
//! ```rust
//! use jjaw_site::{install, use_dark_mode, AmbientPreference, ColorScheme, Context, Host};
//! use jjaw_site::{HtmlDocument, MemoryStorage, Storage, STORAGE_KEY};
//!
//! let storage = MemoryStorage::new();
//! let doc = HtmlDocument::new("zh-CN");
//! let ambient = AmbientPreference::fixed(false);
//!
//! let mut ctx = Context::new();
//! install(&mut ctx, Host::new(ambient.clone(), storage.clone(), doc.clone())).unwrap();
//! let _view = ctx.mount();
//!
//! let dark_mode = use_dark_mode(&ctx);
//! dark_mode.set(true);
//! assert_eq!(storage.get(STORAGE_KEY).as_deref(), Some("dark"));
//! assert!(doc.has_class("dark"));
//!
//! // The system switches to dark: the explicit choice now matches it.
//! ambient.set(true);
//! dark_mode.set(true);
//! assert_eq!(dark_mode.preference(), ColorScheme::Auto);
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.

pub mod blog;
pub mod config;
pub mod scheme;

pub use blog::{BlogError, BlogIndex, Page};
pub use config::{ConfigError, PluginConfig, SiteConfig};
pub use scheme::{
    install, mirror, set_theme_detector, try_use_dark_mode, use_dark_mode, AmbientPreference,
    ColorMode, ColorScheme, Context, DarkMode, Document, FileStorage, Host, HtmlDocument,
    MemoryStorage, PersistedScheme, SchemeError, Signal, Storage, Subscription, DARK_CLASS,
    DARK_MODE_KEY, STORAGE_KEY,
};
