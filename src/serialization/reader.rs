//! serialization::reader
//!
//! Load-pass serializer: populates entities from a document.
//!
//! # Traversal
//!
//! The reader keeps a cursor into the document tree. Scalar operations read
//! from the element under the cursor; dictionary operations descend into the
//! wrapper element, hand each child element to the collection (which
//! constructs, populates, and post-serializes the child), and restore the
//! cursor afterwards. Traversal is synchronous, depth-first, and aborts on
//! the first error.
//!
//! # Example
//!
//! ```
//! use metagen::metadata::EnumeratedTypeGroup;
//! use metagen::serialization::{DocumentReader, Element};
//!
//! let mut doc = Element::new("EnumeratedTypeGroup");
//! doc.set_attribute("type", "Direction");
//! doc.push_child(Element::with_text("includeFile", "ql/direction.hpp"));
//!
//! let mut group = EnumeratedTypeGroup::default();
//! DocumentReader::new(doc).load(&mut group).unwrap();
//! assert_eq!(group.type_name(), "Direction");
//! ```

use std::path::Path;

use tracing::debug;

use super::document::{self, Element};
use super::serializable::{ObjectDict, Serializable};
use super::serializer::{FieldSpec, SerializationError, Serializer};

/// Load-pass serializer bound to one document.
#[derive(Debug)]
pub struct DocumentReader {
    root: Element,
    /// Child-index path from the root to the current element.
    cursor: Vec<usize>,
}

impl DocumentReader {
    /// Bind a reader to an in-memory document.
    pub fn new(root: Element) -> Self {
        Self {
            root,
            cursor: Vec::new(),
        }
    }

    /// Bind a reader to a document on disk.
    ///
    /// # Errors
    ///
    /// Propagates `Io`/`Parse` errors from [`document::load_document`].
    pub fn open(path: &Path) -> Result<Self, SerializationError> {
        Ok(Self::new(document::load_document(path)?))
    }

    /// Populate `target` from the document and run its post-serialization
    /// hook.
    ///
    /// Children of `target` have already been populated and post-serialized
    /// by the time the hook runs, so the hook may propagate derived state
    /// downward.
    pub fn load(&mut self, target: &mut dyn Serializable) -> Result<(), SerializationError> {
        target.serialize(self)?;
        target.post_serialize();
        debug!(entity = %self.identity(), "loaded metadata entity");
        Ok(())
    }

    fn current(&self) -> &Element {
        let mut element = &self.root;
        for &index in &self.cursor {
            element = &element.children[index];
        }
        element
    }

    /// Identity of the entity under the cursor, for error messages.
    fn identity(&self) -> String {
        let element = self.current();
        match element.attribute("name") {
            Some(name) => format!("{} '{}'", element.tag, name),
            None => element.tag.clone(),
        }
    }

    /// Indices of the wrapper element and its relevant children.
    ///
    /// `child_tag` restricts which children participate (object
    /// dictionaries); `None` takes every child (object-property
    /// dictionaries, where the tag is the key).
    fn dictionary_entries(
        &self,
        group_tag: &str,
        child_tag: Option<&str>,
    ) -> Option<(usize, Vec<(usize, String)>)> {
        let current = self.current();
        let group_index = current.children.iter().position(|c| c.tag == group_tag)?;
        let entries = current.children[group_index]
            .children
            .iter()
            .enumerate()
            .filter(|(_, c)| child_tag.is_none_or(|tag| c.tag == tag))
            .map(|(i, c)| (i, c.tag.clone()))
            .collect();
        Some((group_index, entries))
    }

    fn load_dictionary(
        &mut self,
        dict: &mut dyn ObjectDict,
        keyed_by_tag: bool,
    ) -> Result<(), SerializationError> {
        let child_tag = if keyed_by_tag {
            None
        } else {
            Some(dict.child_tag())
        };
        let Some((group_index, entries)) = self.dictionary_entries(dict.group_tag(), child_tag)
        else {
            // An omitted collection loads as empty.
            return Ok(());
        };

        for (child_index, tag) in entries {
            self.cursor.push(group_index);
            self.cursor.push(child_index);
            let key = keyed_by_tag.then_some(tag);
            let result = dict.load_child(key, self);
            self.cursor.pop();
            self.cursor.pop();
            result?;
        }
        Ok(())
    }
}

impl Serializer for DocumentReader {
    fn serialize_attribute(
        &mut self,
        field: &str,
        value: &mut String,
    ) -> Result<(), SerializationError> {
        match self.current().attribute(field) {
            Some(found) => {
                *value = found.to_string();
                Ok(())
            }
            None => Err(SerializationError::MissingField {
                entity: self.identity(),
                field: field.to_string(),
            }),
        }
    }

    fn serialize_property(
        &mut self,
        field: &str,
        value: &mut String,
        spec: FieldSpec,
    ) -> Result<(), SerializationError> {
        match self.current().child(field) {
            Some(child) => {
                *value = child.text.clone().unwrap_or_default();
                Ok(())
            }
            None if spec.required => Err(SerializationError::MissingField {
                entity: self.identity(),
                field: field.to_string(),
            }),
            None => {
                if let Some(default) = spec.default {
                    *value = default.to_string();
                }
                Ok(())
            }
        }
    }

    fn serialize_bool(
        &mut self,
        field: &str,
        value: &mut bool,
        default: bool,
    ) -> Result<(), SerializationError> {
        match self.current().child(field) {
            Some(child) => {
                let text = child.text.as_deref().unwrap_or("").trim();
                *value = match text {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(SerializationError::MalformedValue {
                            entity: self.identity(),
                            field: field.to_string(),
                            value: other.to_string(),
                        })
                    }
                };
                Ok(())
            }
            None => {
                *value = default;
                Ok(())
            }
        }
    }

    fn serialize_value(&mut self, value: &mut String) -> Result<(), SerializationError> {
        *value = self.current().text.clone().unwrap_or_default();
        Ok(())
    }

    fn serialize_object_dict(
        &mut self,
        dict: &mut dyn ObjectDict,
    ) -> Result<(), SerializationError> {
        self.load_dictionary(dict, false)
    }

    fn serialize_object_property_dict(
        &mut self,
        dict: &mut dyn ObjectDict,
    ) -> Result<(), SerializationError> {
        self.load_dictionary(dict, true)
    }
}
