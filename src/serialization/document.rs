//! serialization::document
//!
//! In-memory hierarchical document model and its on-disk persistence.
//!
//! # Design
//!
//! The reader and writer operate on an [`Element`] tree: a tag, an attribute
//! map, optional text content, and ordered children. The tree itself persists
//! as JSON via serde, so the reader and writer never see a text format; a
//! different format can be put behind this seam without touching them.
//!
//! # Conventions
//!
//! - a scalar *attribute* is an entry in the element's attribute map
//! - a *property* is a child element whose text is the value
//! - an *object dictionary* is a wrapper child element containing repeated
//!   same-tag elements
//! - an *object-property dictionary* is a wrapper child element whose
//!   children carry heterogeneous tags (the tag is the key)
//!
//! # Example
//!
//! ```
//! use metagen::serialization::Element;
//!
//! let mut group = Element::new("EnumeratedTypeGroup");
//! group.set_attribute("type", "Direction");
//! group.push_child(Element::with_text("includeFile", "ql/direction.hpp"));
//!
//! assert_eq!(group.attribute("type"), Some("Direction"));
//! assert_eq!(
//!     group.child("includeFile").and_then(|c| c.text.as_deref()),
//!     Some("ql/direction.hpp")
//! );
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::serializer::SerializationError;

/// One node of a hierarchical metadata document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Element {
    /// The element's tag.
    pub tag: String,

    /// Scalar attributes, keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// The element's own text content, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Nested elements, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create an element whose payload is a block of text.
    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(tag);
        element.text = Some(text.into());
        element
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// First child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }
}

/// Read a document from disk.
///
/// # Errors
///
/// Returns `SerializationError::Io` if the file cannot be read and
/// `SerializationError::Parse` if it is not a well-formed document.
pub fn load_document(path: &Path) -> Result<Element, SerializationError> {
    let json = fs::read_to_string(path).map_err(|e| SerializationError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&json).map_err(|e| SerializationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a document to disk, pretty-printed.
pub fn save_document(path: &Path, root: &Element) -> Result<(), SerializationError> {
    let json = serde_json::to_string_pretty(root).map_err(|e| SerializationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| SerializationError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Derive a metadata source path from an entity name.
///
/// Names are lower-cased; sources carry the `.json` extension.
///
/// # Example
///
/// ```
/// use metagen::serialization::metadata_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     metadata_path(Path::new("metadata/Rules"), "Excel"),
///     PathBuf::from("metadata/Rules/excel.json")
/// );
/// ```
pub fn metadata_path(root: &Path, name: &str) -> PathBuf {
    root.join(name.to_lowercase()).with_extension("json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_document() -> Element {
        let mut root = Element::new("EnumeratedTypeGroup");
        root.set_attribute("type", "Direction");
        root.push_child(Element::with_text("constructor", "true"));
        let mut members = Element::new("EnumeratedTypes");
        let mut up = Element::new("EnumeratedType");
        up.push_child(Element::with_text("string", "Up"));
        up.push_child(Element::with_text("value", "Up"));
        members.push_child(up);
        root.push_child(members);
        root
    }

    #[test]
    fn attribute_lookup() {
        let doc = sample_document();
        assert_eq!(doc.attribute("type"), Some("Direction"));
        assert_eq!(doc.attribute("missing"), None);
    }

    #[test]
    fn child_lookup_finds_first_match() {
        let doc = sample_document();
        assert!(doc.child("EnumeratedTypes").is_some());
        assert!(doc.child("nope").is_none());
    }

    #[test]
    fn disk_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("direction.json");
        let doc = sample_document();

        save_document(&path, &doc).unwrap();
        let loaded = load_document(&path).unwrap();
        assert_eq!(doc, loaded);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SerializationError::Io { .. }));
    }

    #[test]
    fn load_garbage_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, SerializationError::Parse { .. }));
    }

    #[test]
    fn metadata_path_lowercases_name() {
        assert_eq!(
            metadata_path(Path::new("metadata"), "Enumerations"),
            PathBuf::from("metadata/enumerations.json")
        );
    }

    #[test]
    fn saved_document_shape() {
        let mut root = Element::new("Addin");
        root.set_attribute("name", "Calc");
        root.push_child(Element::with_text("rootDirectory", "Calc"));

        let json = serde_json::to_string_pretty(&root).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "tag": "Addin",
          "attributes": {
            "name": "Calc"
          },
          "children": [
            {
              "tag": "rootDirectory",
              "text": "Calc"
            }
          ]
        }
        "#);
    }
}
