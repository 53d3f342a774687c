//! metadata
//!
//! Concrete metadata entities built on the serialization framework.
//!
//! # Modules
//!
//! - [`enumerations`] - enumerated type groups and their members
//! - [`addin`] - the generation unit for one addin platform
//! - [`buffer`] - named output text buffers
//! - [`rules`] - rule tree data entities
//! - [`registry`] - closed-set tag-to-constructor factory
//!
//! # Adding an entity type
//!
//! A new entity implements [`Serializable`](crate::serialization::Serializable)
//! and [`Node`](crate::serialization::Node), and gets a variant in
//! [`registry::MetadataNode`]. The traversal engine itself never changes.

pub mod addin;
pub mod buffer;
pub mod enumerations;
pub mod registry;
pub mod rules;

pub use addin::Addin;
pub use buffer::Buffer;
pub use enumerations::{EnumeratedType, EnumeratedTypeGroup};
pub use registry::{load_node, MetadataNode};
pub use rules::{Rule, RuleGroup};
