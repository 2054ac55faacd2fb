//! Copy tags
//!
//! A [`CopyTag`] identifies one synchronization pass. It is the UTC time of
//! the pass rendered as exactly [`TAG_LEN`] ASCII digits (`YYYYMMDDHHMMSS`),
//! so string order, numeric order and chronological order all agree.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of characters in every copy tag.
pub const TAG_LEN: usize = 14;

const TAG_FORMAT: &str = "%Y%m%d%H%M%S";

/// Fixed-width, digits-only pass identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CopyTag(String);

impl CopyTag {
    /// Tag for the current wall-clock second.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Tag for the second containing `at`.
    ///
    /// Only years 0 through 9999 fit the fixed width.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        let tag = at.format(TAG_FORMAT).to_string();
        debug_assert_eq!(tag.len(), TAG_LEN, "year out of range for a copy tag");
        Self(tag)
    }

    /// Parse a tag, accepting exactly [`TAG_LEN`] ASCII digits.
    pub fn parse(value: &str) -> Result<Self> {
        if is_tag(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(Error::InvalidTag {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The instant this tag encodes, if the digits form a real calendar time.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.0, TAG_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}

pub(crate) fn is_tag(value: &str) -> bool {
    value.len() == TAG_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for CopyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CopyTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CopyTag {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        if is_tag(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidTag { value })
        }
    }
}

impl From<CopyTag> for String {
    fn from(tag: CopyTag) -> Self {
        tag.0
    }
}

impl std::str::FromStr for CopyTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Issues strictly increasing tags, one per pass.
///
/// When the wall clock has not moved past the last issued tag (two passes in
/// the same second, or the clock stepped back), the next tag is the last one
/// plus one second.
#[derive(Debug, Clone, Default)]
pub struct TagClock {
    last: Option<CopyTag>,
}

impl TagClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that will only issue tags newer than `tag`.
    ///
    /// Tags whose digits are not a calendar time cannot be advanced from and
    /// are ignored.
    pub fn resume_after(tag: CopyTag) -> Self {
        if tag.to_datetime().is_none() {
            tracing::warn!(tag = %tag, "Ignoring copy tag that is not a valid timestamp");
            return Self::default();
        }
        Self { last: Some(tag) }
    }

    /// The most recently issued (or resumed-from) tag.
    pub fn last(&self) -> Option<&CopyTag> {
        self.last.as_ref()
    }

    /// Issue the tag for a pass starting now.
    pub fn next(&mut self) -> CopyTag {
        self.next_at(Utc::now())
    }

    /// Issue the tag for a pass starting at `now`.
    pub fn next_at(&mut self, now: DateTime<Utc>) -> CopyTag {
        let candidate = CopyTag::from_datetime(now);
        let tag = match self.last.as_ref().and_then(|last| {
            let last_at = last.to_datetime()?;
            (candidate <= *last).then_some(last_at)
        }) {
            Some(last_at) => CopyTag::from_datetime(last_at + TimeDelta::seconds(1)),
            None => candidate,
        };
        self.last = Some(tag.clone());
        tag
    }
}
