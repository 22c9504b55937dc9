//! Slash-separated document and collection paths

use std::fmt;

use crate::{Error, Result};

/// Path into the document tree.
///
/// Segments alternate collection / document, so an odd number of segments
/// names a collection and an even number names a document:
/// `dormitories` → collection, `dormitories/d1` → document,
/// `dormitories/d1/rooms` → collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Start a path at a root collection
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![root.into()],
        }
    }

    /// Parse a slash-joined path
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<String> = raw.split('/').map(str::to_string).collect();
        let path = Self { segments };
        path.validate()?;
        Ok(path)
    }

    /// Append one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn is_collection(&self) -> bool {
        self.segments.len() % 2 == 1
    }

    pub fn is_document(&self) -> bool {
        !self.is_collection()
    }

    /// Last segment: the document id or collection name
    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The enclosing path, `None` at a root collection
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Reject empty segments and segments that would smuggle in a separator
    pub fn validate(&self) -> Result<()> {
        for segment in &self.segments {
            if segment.trim().is_empty() {
                return Err(Error::Validation(format!("Empty segment in path '{}'", self)));
            }
            if segment.contains('/') {
                return Err(Error::Validation(format!(
                    "Path segment '{}' must not contain '/'",
                    segment
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn expect_document(&self) -> Result<()> {
        self.validate()?;
        if !self.is_document() {
            return Err(Error::Validation(format!("'{}' is not a document path", self)));
        }
        Ok(())
    }

    pub(crate) fn expect_collection(&self) -> Result<()> {
        self.validate()?;
        if !self.is_collection() {
            return Err(Error::Validation(format!("'{}' is not a collection path", self)));
        }
        Ok(())
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_kinds() {
        let dorms = DocumentPath::new("dormitories");
        assert!(dorms.is_collection());

        let dorm = dorms.child("d1");
        assert!(dorm.is_document());
        assert_eq!(dorm.id(), "d1");

        let rooms = dorm.child("rooms");
        assert!(rooms.is_collection());
        assert_eq!(rooms.to_string(), "dormitories/d1/rooms");
        assert_eq!(rooms.parent(), Some(dorm));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(DocumentPath::parse("dormitories//rooms").is_err());
        assert!(DocumentPath::parse("").is_err());
        assert!(DocumentPath::parse("dormitories/d1").is_ok());
    }

    #[test]
    fn test_child_with_separator_is_invalid() {
        let path = DocumentPath::new("dormitories").child("a/b");
        assert!(path.validate().is_err());
    }
}
