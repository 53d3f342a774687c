//! metadata::registry
//!
//! Closed-set factory mapping external type tags to metadata node
//! constructors.
//!
//! # Design
//!
//! The set of metadata node types is closed: one [`MetadataNode`] variant
//! per concrete entity type. A driver that holds a document can construct
//! the matching node from the root tag without knowing the concrete type at
//! compile time, then take the typed entity back out through the `into_*`
//! accessors.
//!
//! # Example
//!
//! ```
//! use metagen::metadata::registry::MetadataNode;
//!
//! let node = MetadataNode::create("Addin").unwrap();
//! assert_eq!(node.tag(), "Addin");
//! assert!(MetadataNode::create("Unknown").is_none());
//! ```

use std::path::Path;

use crate::metadata::addin::Addin;
use crate::metadata::buffer::Buffer;
use crate::metadata::enumerations::{EnumeratedType, EnumeratedTypeGroup};
use crate::metadata::rules::{Rule, RuleGroup};
use crate::serialization::{load_document, DocumentReader, Node, Serializable, SerializationError};

/// One metadata node of any concrete type.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataNode {
    /// A generation unit.
    Addin(Addin),
    /// An enumerated type group.
    EnumeratedTypeGroup(EnumeratedTypeGroup),
    /// A single enumeration member.
    EnumeratedType(EnumeratedType),
    /// An output buffer.
    Buffer(Buffer),
    /// A category of rules.
    RuleGroup(RuleGroup),
    /// A single rule.
    Rule(Rule),
}

impl MetadataNode {
    /// Construct an empty node from an external type tag.
    ///
    /// Returns `None` for tags outside the closed set.
    pub fn create(tag: &str) -> Option<Self> {
        match tag {
            Addin::TAG => Some(Self::Addin(Addin::default())),
            EnumeratedTypeGroup::TAG => {
                Some(Self::EnumeratedTypeGroup(EnumeratedTypeGroup::default()))
            }
            EnumeratedType::TAG => Some(Self::EnumeratedType(EnumeratedType::default())),
            Buffer::TAG => Some(Self::Buffer(Buffer::default())),
            RuleGroup::TAG => Some(Self::RuleGroup(RuleGroup::default())),
            Rule::TAG => Some(Self::Rule(Rule::default())),
            _ => None,
        }
    }

    /// The node's external type tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Addin(_) => Addin::TAG,
            Self::EnumeratedTypeGroup(_) => EnumeratedTypeGroup::TAG,
            Self::EnumeratedType(_) => EnumeratedType::TAG,
            Self::Buffer(_) => Buffer::TAG,
            Self::RuleGroup(_) => RuleGroup::TAG,
            Self::Rule(_) => Rule::TAG,
        }
    }

    /// The node as its serialization capability interface.
    pub fn as_serializable_mut(&mut self) -> &mut dyn Serializable {
        match self {
            Self::Addin(node) => node,
            Self::EnumeratedTypeGroup(node) => node,
            Self::EnumeratedType(node) => node,
            Self::Buffer(node) => node,
            Self::RuleGroup(node) => node,
            Self::Rule(node) => node,
        }
    }

    /// Take the generation unit out, if that is what this node is.
    pub fn into_addin(self) -> Option<Addin> {
        match self {
            Self::Addin(node) => Some(node),
            _ => None,
        }
    }

    /// Take the enumerated type group out, if that is what this node is.
    pub fn into_enumerated_type_group(self) -> Option<EnumeratedTypeGroup> {
        match self {
            Self::EnumeratedTypeGroup(node) => Some(node),
            _ => None,
        }
    }
}

/// Load whichever metadata node a document's root tag names.
///
/// # Errors
///
/// Fails with `Parse` for a root tag outside the closed set, and propagates
/// document and population errors otherwise.
pub fn load_node(path: &Path) -> Result<MetadataNode, SerializationError> {
    let document = load_document(path)?;
    let mut node = MetadataNode::create(&document.tag).ok_or_else(|| SerializationError::Parse {
        path: path.to_path_buf(),
        message: format!("unknown metadata node type '{}'", document.tag),
    })?;
    DocumentReader::new(document).load(node.as_serializable_mut())?;
    Ok(node)
}
