//! Slug codec: entity names to URL path segments and back.
//!
//! Encoding uses the same unreserved set as JavaScript's `encodeURIComponent`
//! so generated routes line up with links produced by the upstream site.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Characters escaped in a path segment: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How an entity type turns names into route segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugStyle {
    /// Percent-encode the name (default for every type).
    #[default]
    Encoded,
    /// Use the name as-is; legacy routes that assume no special characters.
    Raw,
}

/// Percent-encode a name into a path segment.
pub fn encode(name: &str) -> Cow<'_, str> {
    utf8_percent_encode(name, COMPONENT).into()
}

/// Percent-decode a path segment.
///
/// Total: plain text is returned unchanged, malformed escapes are kept
/// verbatim and invalid UTF-8 falls back to the input.
pub fn decode(slug: &str) -> Cow<'_, str> {
    match percent_decode_str(slug).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(slug),
    }
}

impl SlugStyle {
    /// Route segment for a name under this style.
    pub fn segment<'a>(self, name: &'a str) -> Cow<'a, str> {
        match self {
            Self::Encoded => encode(name),
            Self::Raw => Cow::Borrowed(name),
        }
    }

    /// Whether `slug` identifies an entity called `name`.
    ///
    /// `Encoded` compares against the canonical encoding of the segment, so
    /// `Acid%20Burrower` and `Acid Burrower` both match "Acid Burrower".
    /// `Raw` compares the decoded segment with the name.
    pub fn matches(self, slug: &str, name: &str) -> bool {
        match self {
            Self::Encoded => encode(name) == encode(&decode(slug)),
            Self::Raw => name == decode(slug),
        }
    }
}
