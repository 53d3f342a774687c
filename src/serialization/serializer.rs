//! serialization::serializer
//!
//! The serializer protocol: bidirectional field-binding operations that a
//! concrete reader or writer implements.
//!
//! # Design
//!
//! Metadata entities never touch a text format directly. Their
//! [`Serializable::serialize`](super::Serializable::serialize) method declares
//! each field against this protocol, and the bound [`Serializer`] either fills
//! the field in (load pass) or records it (save pass). The same declaration
//! drives both directions, which is what makes round-tripping a structural
//! guarantee rather than a convention.
//!
//! Optional fields carry an explicit [`FieldSpec`] descriptor. There are no
//! implicit defaults: a field is either required, or optional with a stated
//! default, and both the reader and the writer resolve the descriptor the
//! same way.
//!
//! # Error Handling
//!
//! All operations return `Result<(), SerializationError>`. None of these
//! errors are caught inside the core; malformed metadata is a development-time
//! defect and the whole generation pass aborts on the first one.

use std::path::PathBuf;
use thiserror::Error;

use super::serializable::ObjectDict;

/// Errors from serialization operations.
///
/// Each variant names the owning entity so the failing field can be located
/// in the metadata source without a stack trace.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// A required field is absent from the source.
    #[error("missing required field '{field}' on {entity}")]
    MissingField {
        /// Identity of the entity being populated.
        entity: String,
        /// The declared field name.
        field: String,
    },

    /// A field is present but its value cannot be parsed.
    #[error("malformed value '{value}' for field '{field}' on {entity}")]
    MalformedValue {
        /// Identity of the entity being populated.
        entity: String,
        /// The declared field name.
        field: String,
        /// The offending source text.
        value: String,
    },

    /// Two dictionary children resolved to the same key.
    #[error("duplicate key '{key}' under {entity}")]
    DuplicateKey {
        /// The collection the key collided in.
        entity: String,
        /// The colliding key.
        key: String,
    },

    /// A metadata source could not be read or written.
    #[error("failed to access metadata source '{path}': {source}")]
    Io {
        /// The source path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A metadata source was read but is not a well-formed document.
    #[error("failed to parse metadata source '{path}': {message}")]
    Parse {
        /// The source path.
        path: PathBuf,
        /// The parser's message.
        message: String,
    },
}

/// Per-field configuration descriptor.
///
/// Resolved uniformly by every serializer implementation: a missing required
/// field is a [`SerializationError::MissingField`]; a missing optional field
/// takes its default (or leaves the target untouched when no default is
/// declared).
///
/// # Example
///
/// ```
/// use metagen::serialization::FieldSpec;
///
/// let spec = FieldSpec::optional("Repository");
/// assert!(!spec.required);
/// assert_eq!(spec.default, Some("Repository"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Whether absence of the field aborts the load.
    pub required: bool,
    /// Value used when an optional field is absent.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    /// A field that must be present in the source.
    pub const fn required() -> Self {
        Self {
            required: true,
            default: None,
        }
    }

    /// An optional field with an explicit default.
    pub const fn optional(default: &'static str) -> Self {
        Self {
            required: false,
            default: Some(default),
        }
    }
}

/// The serializer protocol.
///
/// A load-pass implementation populates entity fields from an external
/// representation; a save-pass implementation records them back. The core
/// depends only on this trait, never on a concrete format.
///
/// # Conventions
///
/// - *attribute*: a scalar bound to a markup attribute, used for
///   identity-like fields. Always required.
/// - *property*: a scalar bound to a nested element, with a [`FieldSpec`].
/// - *boolean property*: a property parsed strictly as `true`/`false`, with
///   a mandatory default for the absent case.
/// - *value*: the current element's own text content, for leaf entities
///   whose whole payload is one block of text.
/// - *object dictionary*: a keyed collection of homogeneous children, keyed
///   by each child's self-declared name.
/// - *object-property dictionary*: a keyed collection whose children are
///   grouped under per-category labels; the label is the key, injected into
///   the collection rather than self-declared.
pub trait Serializer {
    /// Bind a scalar field to a markup attribute.
    fn serialize_attribute(
        &mut self,
        field: &str,
        value: &mut String,
    ) -> Result<(), SerializationError>;

    /// Bind a scalar field to a nested element.
    fn serialize_property(
        &mut self,
        field: &str,
        value: &mut String,
        spec: FieldSpec,
    ) -> Result<(), SerializationError>;

    /// Bind a boolean field to a nested element, with an explicit default
    /// for the absent case.
    fn serialize_bool(
        &mut self,
        field: &str,
        value: &mut bool,
        default: bool,
    ) -> Result<(), SerializationError>;

    /// Bind a field to the current element's own text content.
    fn serialize_value(&mut self, value: &mut String) -> Result<(), SerializationError>;

    /// Bind a keyed collection of homogeneous child entities.
    fn serialize_object_dict(
        &mut self,
        dict: &mut dyn ObjectDict,
    ) -> Result<(), SerializationError>;

    /// Bind a keyed collection whose children are grouped under category
    /// labels in the external representation.
    fn serialize_object_property_dict(
        &mut self,
        dict: &mut dyn ObjectDict,
    ) -> Result<(), SerializationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_spec_required() {
        let spec = FieldSpec::required();
        assert!(spec.required);
        assert!(spec.default.is_none());
    }

    #[test]
    fn field_spec_optional_carries_default() {
        let spec = FieldSpec::optional("Overwrite");
        assert!(!spec.required);
        assert_eq!(spec.default, Some("Overwrite"));
    }

    #[test]
    fn error_display_names_entity_and_field() {
        let err = SerializationError::MissingField {
            entity: "EnumeratedTypeGroup 'Direction'".into(),
            field: "includeFile".into(),
        };
        assert_eq!(
            err.to_string(),
            "missing required field 'includeFile' on EnumeratedTypeGroup 'Direction'"
        );

        let err = SerializationError::MalformedValue {
            entity: "Addin 'Excel'".into(),
            field: "loadRules".into(),
            value: "yes".into(),
        };
        assert!(err.to_string().contains("'yes'"));
        assert!(err.to_string().contains("loadRules"));

        let err = SerializationError::DuplicateKey {
            entity: "EnumeratedTypes".into(),
            key: "Up".into(),
        };
        assert!(err.to_string().contains("duplicate key 'Up'"));
    }
}
