//! serialization::writer
//!
//! Save-pass serializer: records entities back into a document.
//!
//! # Symmetry
//!
//! The writer implements the same protocol as the reader, in the opposite
//! direction: each field declaration appends to the document instead of
//! reading from it. A document produced here loads back field-for-field
//! equal (collections re-key from the same self-declared names or category
//! labels that were written).

use super::document::Element;
use super::serializable::{ObjectDict, Serializable};
use super::serializer::{FieldSpec, SerializationError, Serializer};

/// Save-pass serializer building one document.
#[derive(Debug)]
pub struct DocumentWriter {
    root: Element,
    /// Child-index path from the root to the current element.
    cursor: Vec<usize>,
}

impl DocumentWriter {
    /// Start a document rooted at `root_tag`.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            root: Element::new(root_tag),
            cursor: Vec::new(),
        }
    }

    /// Record `source` into a fresh document rooted at `root_tag`.
    ///
    /// # Example
    ///
    /// ```
    /// use metagen::metadata::EnumeratedTypeGroup;
    /// use metagen::serialization::{DocumentReader, DocumentWriter, Element};
    ///
    /// let mut doc = Element::new("EnumeratedTypeGroup");
    /// doc.set_attribute("type", "Direction");
    /// doc.push_child(Element::with_text("includeFile", "ql/direction.hpp"));
    ///
    /// let mut group = EnumeratedTypeGroup::default();
    /// DocumentReader::new(doc).load(&mut group).unwrap();
    ///
    /// let saved = DocumentWriter::save("EnumeratedTypeGroup", &mut group).unwrap();
    /// assert_eq!(saved.attribute("type"), Some("Direction"));
    /// ```
    pub fn save(
        root_tag: &str,
        source: &mut dyn Serializable,
    ) -> Result<Element, SerializationError> {
        let mut writer = Self::new(root_tag);
        source.serialize(&mut writer)?;
        Ok(writer.root)
    }

    /// Consume the writer, yielding the document built so far.
    pub fn into_document(self) -> Element {
        self.root
    }

    fn current_mut(&mut self) -> &mut Element {
        let mut element = &mut self.root;
        for &index in &self.cursor {
            element = &mut element.children[index];
        }
        element
    }

    fn save_dictionary(
        &mut self,
        dict: &mut dyn ObjectDict,
        keyed_by_tag: bool,
    ) -> Result<(), SerializationError> {
        let group_tag = dict.group_tag();
        let child_tag = dict.child_tag();

        let group_index = {
            let current = self.current_mut();
            current.push_child(Element::new(group_tag));
            current.children.len() - 1
        };

        for (child_index, (key, child)) in dict.entries_mut().into_iter().enumerate() {
            let tag = if keyed_by_tag {
                key
            } else {
                child_tag.to_string()
            };
            self.cursor.push(group_index);
            self.current_mut().push_child(Element::new(tag));
            self.cursor.push(child_index);
            let result = child.serialize(self);
            self.cursor.pop();
            self.cursor.pop();
            result?;
        }
        Ok(())
    }
}

impl Serializer for DocumentWriter {
    fn serialize_attribute(
        &mut self,
        field: &str,
        value: &mut String,
    ) -> Result<(), SerializationError> {
        self.current_mut().set_attribute(field, value.clone());
        Ok(())
    }

    fn serialize_property(
        &mut self,
        field: &str,
        value: &mut String,
        _spec: FieldSpec,
    ) -> Result<(), SerializationError> {
        self.current_mut()
            .push_child(Element::with_text(field, value.clone()));
        Ok(())
    }

    fn serialize_bool(
        &mut self,
        field: &str,
        value: &mut bool,
        _default: bool,
    ) -> Result<(), SerializationError> {
        let text = if *value { "true" } else { "false" };
        self.current_mut()
            .push_child(Element::with_text(field, text));
        Ok(())
    }

    fn serialize_value(&mut self, value: &mut String) -> Result<(), SerializationError> {
        self.current_mut().text = Some(value.clone());
        Ok(())
    }

    fn serialize_object_dict(
        &mut self,
        dict: &mut dyn ObjectDict,
    ) -> Result<(), SerializationError> {
        self.save_dictionary(dict, false)
    }

    fn serialize_object_property_dict(
        &mut self,
        dict: &mut dyn ObjectDict,
    ) -> Result<(), SerializationError> {
        self.save_dictionary(dict, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::reader::DocumentReader;
    use crate::serialization::serializable::{Node, NodeMap};

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Tone {
        pitch: String,
        sharp: bool,
    }

    impl Serializable for Tone {
        fn serialize(
            &mut self,
            serializer: &mut dyn Serializer,
        ) -> Result<(), SerializationError> {
            serializer.serialize_attribute("pitch", &mut self.pitch)?;
            serializer.serialize_bool("sharp", &mut self.sharp, false)?;
            Ok(())
        }

        fn name(&self) -> Option<&str> {
            Some(&self.pitch)
        }
    }

    impl Node for Tone {
        const TAG: &'static str = "Tone";
        const GROUP: &'static str = "Tones";
    }

    #[test]
    fn scalar_fields_are_recorded() {
        let mut tone = Tone {
            pitch: "A".into(),
            sharp: true,
        };
        let doc = DocumentWriter::save("Tone", &mut tone).unwrap();
        assert_eq!(doc.attribute("pitch"), Some("A"));
        assert_eq!(
            doc.child("sharp").and_then(|c| c.text.as_deref()),
            Some("true")
        );
    }

    #[test]
    fn dict_children_written_in_key_order() {
        let mut map: NodeMap<Tone> = NodeMap::new();
        for pitch in ["G", "C", "E"] {
            map.insert(
                pitch,
                Tone {
                    pitch: pitch.into(),
                    sharp: false,
                },
            )
            .unwrap();
        }

        let mut writer = DocumentWriter::new("Chord");
        writer.serialize_object_dict(&mut map).unwrap();
        let doc = writer.into_document();

        let wrapper = doc.child("Tones").unwrap();
        let pitches: Vec<&str> = wrapper
            .children
            .iter()
            .map(|c| c.attribute("pitch").unwrap())
            .collect();
        assert_eq!(pitches, vec!["C", "E", "G"]);
    }

    #[test]
    fn dict_roundtrips_through_writer_and_reader() {
        let mut map: NodeMap<Tone> = NodeMap::new();
        for pitch in ["B", "A"] {
            map.insert(
                pitch,
                Tone {
                    pitch: pitch.into(),
                    sharp: pitch == "B",
                },
            )
            .unwrap();
        }

        let mut writer = DocumentWriter::new("Chord");
        writer.serialize_object_dict(&mut map).unwrap();
        let doc = writer.into_document();

        let mut reader = DocumentReader::new(doc);
        let mut reloaded: NodeMap<Tone> = NodeMap::new();
        reader.serialize_object_dict(&mut reloaded).unwrap();

        assert_eq!(map, reloaded);
    }

    #[test]
    fn empty_dict_writes_empty_wrapper() {
        let mut map: NodeMap<Tone> = NodeMap::new();
        let mut writer = DocumentWriter::new("Chord");
        writer.serialize_object_dict(&mut map).unwrap();
        let doc = writer.into_document();
        assert!(doc.child("Tones").unwrap().children.is_empty());
    }
}
