//! The visual root element the dark-mode flag is mirrored onto.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::rc::Rc;

/// A top-level element carrying boolean style classes.
pub trait RootElement {
    /// Adds `class` when `present` is true, removes it otherwise.
    fn toggle_class(&self, class: &str, present: bool);
}

/// Access to the document's root element, which may not exist yet.
pub trait Document {
    fn root_element(&self) -> Option<Rc<dyn RootElement>>;
}

/// An `<html>` element kept in memory.
#[derive(Debug, Default)]
pub struct HtmlRoot {
    lang: Option<String>,
    classes: RefCell<BTreeSet<String>>,
}

impl HtmlRoot {
    pub fn new(lang: Option<String>) -> Self {
        Self {
            lang,
            classes: RefCell::new(BTreeSet::new()),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    /// Renders the opening tag, e.g. `<html lang="zh-CN" class="dark">`.
    pub fn open_tag(&self) -> String {
        let mut tag = String::from("<html");
        if let Some(lang) = &self.lang {
            let _ = write!(tag, " lang=\"{}\"", lang);
        }
        let classes = self.classes.borrow();
        if !classes.is_empty() {
            let joined: Vec<&str> = classes.iter().map(String::as_str).collect();
            let _ = write!(tag, " class=\"{}\"", joined.join(" "));
        }
        tag.push('>');
        tag
    }
}

impl RootElement for HtmlRoot {
    fn toggle_class(&self, class: &str, present: bool) {
        let mut classes = self.classes.borrow_mut();
        if present {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }
}

/// An in-memory HTML document whose root element can be attached later.
///
/// # Example
///
/// ```rust
/// use jjaw_site::{Document, HtmlDocument};
///
/// let doc = HtmlDocument::new("zh-CN");
/// doc.root_element().unwrap().toggle_class("dark", true);
/// assert_eq!(doc.open_tag().unwrap(), r#"<html lang="zh-CN" class="dark">"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    root: Rc<RefCell<Option<Rc<HtmlRoot>>>>,
}

impl HtmlDocument {
    /// A document with an `<html lang="...">` root.
    pub fn new(lang: impl Into<String>) -> Self {
        let doc = Self::detached();
        doc.attach(HtmlRoot::new(Some(lang.into())));
        doc
    }

    /// A document that has no root element yet.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn attach(&self, root: HtmlRoot) -> Rc<HtmlRoot> {
        let root = Rc::new(root);
        *self.root.borrow_mut() = Some(Rc::clone(&root));
        root
    }

    pub fn root(&self) -> Option<Rc<HtmlRoot>> {
        self.root.borrow().clone()
    }

    /// Whether the root exists and carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.root().is_some_and(|root| root.has_class(class))
    }

    pub fn open_tag(&self) -> Option<String> {
        self.root().map(|root| root.open_tag())
    }
}

impl Document for HtmlDocument {
    fn root_element(&self) -> Option<Rc<dyn RootElement>> {
        self.root().map(|root| root as Rc<dyn RootElement>)
    }
}
