//! Route paths for generated pages.
//!
//! - Internal representation: route segments as they appear in links
//! - Filesystem boundary: segments are decoded into directory names

use super::slug;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A route segment that can't become a directory name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route `{route}` has unsafe segment `{segment}`")]
pub struct UnsafeSegment {
    pub route: String,
    pub segment: String,
}

/// Absolute route path, e.g. `/adversaries/1/Acid%20Burrower`.
///
/// Invariants:
/// - Always starts with `/`
/// - Never ends with `/` (except the root route)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath(String);

impl RoutePath {
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Join segments that are already in route form.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut path = String::new();
        for segment in segments {
            let segment = segment.as_ref().trim_matches('/');
            if segment.is_empty() {
                continue;
            }
            path.push('/');
            path.push_str(segment);
        }
        if path.is_empty() {
            return Self::root();
        }
        Self(path)
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Route with every segment in canonical percent-encoded form.
    pub fn to_encoded(&self) -> String {
        if self.segments().next().is_none() {
            return "/".to_string();
        }
        self.segments()
            .map(|s| format!("/{}", slug::encode(&slug::decode(s))))
            .collect()
    }

    /// Directory under `root` that holds this route's `index.html`.
    pub fn output_dir(&self, root: &Path) -> Result<PathBuf, UnsafeSegment> {
        let mut dir = root.to_path_buf();
        for segment in self.segments() {
            let decoded = slug::decode(segment);
            if decoded.is_empty()
                || decoded == "."
                || decoded == ".."
                || decoded.contains(['/', '\\', '\0'])
            {
                return Err(UnsafeSegment {
                    route: self.0.clone(),
                    segment: decoded.into_owned(),
                });
            }
            dir.push(decoded.as_ref());
        }
        Ok(dir)
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for RoutePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segments() {
        let route = RoutePath::from_segments(["adversaries", "1", "Acid%20Burrower"]);
        assert_eq!(route.as_str(), "/adversaries/1/Acid%20Burrower");
        assert_eq!(RoutePath::from_segments(["/weapons/", "2"]).as_str(), "/weapons/2");
        assert_eq!(RoutePath::from_segments(Vec::<&str>::new()), RoutePath::root());
    }

    #[test]
    fn test_to_encoded_canonicalizes_raw_segments() {
        let route = RoutePath::from_segments(["ancestries", "Mixed Ancestry"]);
        assert_eq!(route.to_encoded(), "/ancestries/Mixed%20Ancestry");
        assert_eq!(RoutePath::root().to_encoded(), "/");
    }

    #[test]
    fn test_output_dir_decodes_segments() {
        let route = RoutePath::from_segments(["adversaries", "1", "Acid%20Burrower"]);
        let dir = route.output_dir(Path::new("public")).unwrap();
        assert_eq!(dir, Path::new("public/adversaries/1/Acid Burrower"));
    }

    #[test]
    fn test_output_dir_rejects_traversal() {
        for segment in ["..", "%2E%2E", "a%2Fb", "."] {
            let route = RoutePath::from_segments(["loot", segment]);
            assert!(route.output_dir(Path::new("public")).is_err(), "{segment} accepted");
        }
    }
}
