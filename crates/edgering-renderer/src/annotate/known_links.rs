//! Known-link table mapping social platforms to link classes.

use std::collections::BTreeMap;
use std::sync::{LazyLock, PoisonError, RwLock};

/// Platforms annotated out of the box, with their class tags.
const DEFAULT_LINKS: [(&str, &str); 4] = [
    ("facebook", "FB"),
    ("instagram", "IG"),
    ("twitter", "TW"),
    ("youtube", "YT"),
];

static GLOBAL: LazyLock<RwLock<KnownLinks>> = LazyLock::new(|| RwLock::new(KnownLinks::new()));

/// Mapping from lowercase platform name (`facebook`) to class tag (`FB`).
///
/// A link to `facebook.com` is annotated with `{.lnkFB}`. Platform names
/// are case-folded on every operation.
///
/// # Example
///
/// ```
/// use edgering_renderer::KnownLinks;
///
/// let mut links = KnownLinks::new();
/// links.add("LinkedIn", "LI");
/// links.remove("twitter");
///
/// assert_eq!(links.class_for("linkedin"), Some("LI"));
/// assert_eq!(links.class_for("twitter"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnownLinks {
    links: BTreeMap<String, String>,
}

impl KnownLinks {
    /// Table with the default platforms (Facebook, Instagram, Twitter, YouTube).
    #[must_use]
    pub fn new() -> Self {
        DEFAULT_LINKS
            .iter()
            .map(|(platform, class)| ((*platform).to_owned(), (*class).to_owned()))
            .collect()
    }

    /// Table without any platforms.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            links: BTreeMap::new(),
        }
    }

    /// Add or replace a platform.
    pub fn add(&mut self, platform: &str, class: impl Into<String>) {
        self.links.insert(platform.to_lowercase(), class.into());
    }

    /// Remove a platform. Returns its class tag if it was present.
    pub fn remove(&mut self, platform: &str) -> Option<String> {
        self.links.remove(&platform.to_lowercase())
    }

    /// Class tag for a platform, if known.
    #[must_use]
    pub fn class_for(&self, platform: &str) -> Option<&str> {
        self.links.get(&platform.to_lowercase()).map(String::as_str)
    }

    /// Copy of the full mapping.
    #[must_use]
    pub fn list(&self) -> BTreeMap<String, String> {
        self.links.clone()
    }

    /// Iterate over `(platform, class)` pairs in platform order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.links.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Platform names in platform order.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Snapshot of the process-wide table.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the process-wide table.
    pub fn set_global(links: Self) {
        *GLOBAL.write().unwrap_or_else(PoisonError::into_inner) = links;
    }
}

impl Default for KnownLinks {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: AsRef<str>, C: Into<String>> FromIterator<(P, C)> for KnownLinks {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut links = Self::empty();
        for (platform, class) in iter {
            links.add(platform.as_ref(), class);
        }
        links
    }
}

/// Add or replace a platform in the process-wide table.
pub fn add_known_link(platform: &str, class: &str) {
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .add(platform, class);
}

/// Remove a platform from the process-wide table.
pub fn remove_known_link(platform: &str) -> Option<String> {
    GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(platform)
}

/// Copy of the process-wide table.
#[must_use]
pub fn known_links() -> BTreeMap<String, String> {
    GLOBAL.read().unwrap_or_else(PoisonError::into_inner).list()
}
