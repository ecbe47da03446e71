//! Icon path resolution for catalog descriptors.
//!
//! Descriptor tables are written with bare icon file names (`"atp.png"`). When a
//! table is loaded, every non-empty icon is joined onto an [`IconDir`] so that the
//! renderer receives paths relative to the asset root (`"images/tech/atp.png"`).
//!
//! Resolution is a pure transform from a raw definition type into a separate
//! resolved type. The raw tables are never touched, and a resolved descriptor has
//! no way back into [`IconSource`], so a path can only ever be prefixed once.

use crate::trace_trace;
use serde::{Deserialize, Serialize};

/// Asset directory the storefront serves technology icons from.
pub const DEFAULT_ICON_DIR: &str = "images/tech/";

/// Directory prefix joined onto every descriptor icon at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconDir(String);

impl Default for IconDir {
    fn default() -> Self {
        Self(DEFAULT_ICON_DIR.to_string())
    }
}

impl IconDir {
    pub fn new(dir: impl Into<String>) -> Self {
        Self(dir.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join `icon` onto this directory.
    ///
    /// An empty icon means "no icon" and resolves to `None`; it is not an error.
    pub fn resolve(&self, icon: &str) -> Option<String> {
        if icon.is_empty() {
            trace_trace!("Descriptor has no icon, nothing to resolve");
            return None;
        }

        let path = format!("{}{}", self.0, icon);
        trace_trace!("Resolved icon {} -> {}", icon, path);
        Some(path)
    }

    /// Whether `path` carries this directory as a prefix exactly once.
    pub fn is_prefixed_once(&self, path: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        match path.strip_prefix(self.0.as_str()) {
            Some(rest) => !rest.starts_with(self.0.as_str()),
            None => false,
        }
    }
}

/// A raw descriptor whose icon still needs to be joined onto an [`IconDir`].
pub trait IconSource {
    type Resolved;

    fn resolve_icon(&self, dir: &IconDir) -> Self::Resolved;
}

/// Resolve the icons of every descriptor in a table, preserving order.
pub fn prefix_icons<'a, S>(
    definitions: impl IntoIterator<Item = &'a S>,
    dir: &IconDir,
) -> Vec<S::Resolved>
where
    S: IconSource + 'a,
{
    definitions
        .into_iter()
        .map(|definition| definition.resolve_icon(dir))
        .collect()
}
