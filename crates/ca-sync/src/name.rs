//! Tagged destination file names
//!
//! A destination file is named `<tag><original name>`: the [`TAG_LEN`]-digit
//! tag is a fixed-width prefix and the original name (base name and
//! extension) follows unchanged. Splitting at a fixed offset means dots,
//! dashes or leading digits in the original name never confuse the parser.

use std::fmt;

use crate::tag::{CopyTag, TAG_LEN, is_tag};
use crate::{Error, Result};

/// Longest file name, in bytes, most filesystems accept for one path component.
pub const MAX_NAME_LEN: usize = 255;

/// A destination file name carrying the tag of the pass that wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaggedName {
    tag: CopyTag,
    original: String,
}

impl TaggedName {
    /// Build the destination name for `original` written under `tag`.
    pub fn new(tag: CopyTag, original: impl Into<String>) -> Result<Self> {
        let original = original.into();
        if !is_valid_original(&original) {
            return Err(Error::InvalidFileName { name: original });
        }
        Ok(Self { tag, original })
    }

    /// Whether a source file called `original` can be written under a tag.
    ///
    /// Names that would exceed [`MAX_NAME_LEN`] once tagged are refused.
    pub fn accepts(original: &str) -> bool {
        is_valid_original(original)
    }

    /// Recover tag and original name from a destination file name.
    ///
    /// Returns `None` for names that were not produced by [`TaggedName::new`].
    pub fn parse(name: &str) -> Option<Self> {
        let prefix = name.get(..TAG_LEN)?;
        if !is_tag(prefix) {
            return None;
        }
        let original = &name[TAG_LEN..];
        if !is_valid_original(original) {
            return None;
        }
        Some(Self {
            tag: CopyTag::parse(prefix).ok()?,
            original: original.to_string(),
        })
    }

    pub fn tag(&self) -> &CopyTag {
        &self.tag
    }

    /// The source file name this copy was made from.
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl fmt::Display for TaggedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag, self.original)
    }
}

fn is_valid_original(name: &str) -> bool {
    !name.is_empty()
        && TAG_LEN + name.len() <= MAX_NAME_LEN
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
