//! metadata::buffer
//!
//! Named output text buffers owned by a generation unit.

use crate::serialization::{Node, Serializable, SerializationError, Serializer};

/// One output template buffer.
///
/// Buffers live in an object-property dictionary on the generation unit:
/// the buffer's logical name is the category label in the external
/// representation, and its whole payload is the element's text content.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Buffer {
    text: String,
}

impl Buffer {
    /// The buffer's template text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Serializable for Buffer {
    fn serialize(&mut self, serializer: &mut dyn Serializer) -> Result<(), SerializationError> {
        serializer.serialize_value(&mut self.text)
    }
}

impl Node for Buffer {
    const TAG: &'static str = "Buffer";
    const GROUP: &'static str = "Buffers";
}
