//! Topic names, topic filters and wildcard matching.
//!
//! Topics are `/` separated levels. A filter may use `+` for exactly one
//! level and a final `#` for any number of trailing levels, including none.
//! Empty levels (from a leading, trailing or doubled `/`) are real levels and
//! are never collapsed. Comparison is byte exact and case sensitive.
//!
//! ```rust
//! use libmqtt::network::application::mqtt::topic::matches;
//!
//! assert!(matches("sport/tennis/player1", "sport/#"));
//! assert!(matches("sport/tennis/player1", "sport/+/player1"));
//! assert!(!matches("sport", "sport/+"));
//! ```

use super::error::Error;
use super::string::MAX_STRING_LEN;

/// Longest topic or filter, in UTF-8 bytes.
pub const MAX_TOPIC_LEN: usize = MAX_STRING_LEN;

const LEVEL_SEPARATOR: char = '/';
const SINGLE_LEVEL: &str = "+";
const MULTI_LEVEL: char = '#';

/// Whether `name` may be published to.
///
/// It must be non-empty, fit a string field, and hold neither NUL nor a
/// wildcard character.
pub fn is_valid_topic_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_TOPIC_LEN
        && !name.bytes().any(|b| matches!(b, 0 | b'+' | b'#'))
}

/// Whether `filter` may be subscribed to.
///
/// Same length and NUL rules as a topic name; `#` may only appear as the whole
/// final level and `+` only as a whole level.
pub fn is_valid_topic_filter(filter: &str) -> bool {
    if filter.is_empty() || filter.len() > MAX_TOPIC_LEN || filter.contains('\0') {
        return false;
    }
    if !hash_is_well_placed(filter) {
        return false;
    }
    filter
        .split(LEVEL_SEPARATOR)
        .all(|level| !level.contains('+') || level == SINGLE_LEVEL)
}

/// [`is_valid_topic_filter`] as a `Result`.
pub fn check_filter(filter: &str) -> Result<(), Error> {
    if is_valid_topic_filter(filter) {
        Ok(())
    } else {
        Err(Error::InvalidFilterSyntax)
    }
}

// `#` must be the last character and either the only one or preceded by `/`.
fn hash_is_well_placed(filter: &str) -> bool {
    match filter.find(MULTI_LEVEL) {
        None => true,
        Some(pos) => {
            pos == filter.len() - 1 && (pos == 0 || filter.as_bytes()[pos - 1] == b'/')
        }
    }
}

/// Whether `topic` is matched by `filter`.
///
/// A structurally invalid `#` in the filter never matches anything. Other
/// filter rules (such as `+` sharing a level) are not checked here; use
/// [`TopicFilter::new`] to validate up front.
pub fn matches(topic: &str, filter: &str) -> bool {
    if filter.is_empty() {
        return topic.is_empty();
    }
    if filter == "#" {
        return true;
    }
    if !hash_is_well_placed(filter) {
        return false;
    }

    let topic_levels = topic.split(LEVEL_SEPARATOR);
    match filter.strip_suffix("/#") {
        Some(prefix) => levels_match(prefix.split(LEVEL_SEPARATOR), topic_levels, true),
        None => levels_match(filter.split(LEVEL_SEPARATOR), topic_levels, false),
    }
}

fn levels_match<'a, 'b>(
    filter: impl Iterator<Item = &'a str>,
    mut topic: impl Iterator<Item = &'b str>,
    allow_extra: bool,
) -> bool {
    for f in filter {
        match topic.next() {
            Some(t) if f == SINGLE_LEVEL || f == t => {}
            _ => return false,
        }
    }
    allow_extra || topic.next().is_none()
}

/// A validated topic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Topic<'a>(&'a str);

impl<'a> Topic<'a> {
    /// Validate `name` with [`is_valid_topic_name`].
    pub fn new(name: &'a str) -> Result<Self, Error> {
        if is_valid_topic_name(name) {
            Ok(Self(name))
        } else {
            Err(Error::InvalidTopicName)
        }
    }

    /// The topic as a string slice.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Levels of the topic, in order, empty ones included.
    pub fn levels(&self) -> core::str::Split<'a, char> {
        self.0.split(LEVEL_SEPARATOR)
    }

    /// Whether `filter` matches this topic.
    pub fn matches(&self, filter: &TopicFilter<'_>) -> bool {
        matches(self.0, filter.0)
    }
}

impl<'a> TryFrom<&'a str> for Topic<'a> {
    type Error = Error;

    fn try_from(name: &'a str) -> Result<Self, Self::Error> {
        Topic::new(name)
    }
}

/// A validated subscription pattern.
///
/// ```rust
/// use libmqtt::network::application::mqtt::{Error, Topic, TopicFilter};
///
/// let filter = TopicFilter::new("home/+/temperature").unwrap();
/// assert!(filter.matches(&Topic::new("home/kitchen/temperature").unwrap()));
/// assert_eq!(TopicFilter::new("home/kitchen#"), Err(Error::InvalidFilterSyntax));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TopicFilter<'a>(&'a str);

impl<'a> TopicFilter<'a> {
    /// Validate `filter` with [`is_valid_topic_filter`].
    pub fn new(filter: &'a str) -> Result<Self, Error> {
        check_filter(filter)?;
        Ok(Self(filter))
    }

    /// The filter as a string slice.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Levels of the filter, wildcards included.
    pub fn levels(&self) -> core::str::Split<'a, char> {
        self.0.split(LEVEL_SEPARATOR)
    }

    /// Whether the filter contains `+` or `#`.
    pub fn has_wildcards(&self) -> bool {
        self.0.bytes().any(|b| b == b'+' || b == b'#')
    }

    /// Whether `topic` is matched by this filter.
    pub fn matches(&self, topic: &Topic<'_>) -> bool {
        matches(topic.0, self.0)
    }
}

impl<'a> TryFrom<&'a str> for TopicFilter<'a> {
    type Error = Error;

    fn try_from(filter: &'a str) -> Result<Self, Self::Error> {
        TopicFilter::new(filter)
    }
}
