//! serialization
//!
//! Object-graph serialization framework for metadata entities.
//!
//! # Architecture
//!
//! Entities implement the [`Serializable`] contract: one `serialize` method
//! declares every field against the [`Serializer`] protocol, and the bound
//! implementation decides whether the declaration reads (load pass) or
//! records (save pass). Nested collections recurse through the same
//! protocol, so arbitrarily deep polymorphic trees load and save without
//! the traversal engine knowing any concrete entity type.
//!
//! # Modules
//!
//! - `serializable` - the `Serializable` contract, `Node` tags, and the
//!   keyed `NodeMap` collection
//! - `serializer` - the `Serializer` protocol, field descriptors, and the
//!   error taxonomy
//! - `document` - the in-memory element tree and its JSON persistence
//! - `reader` - load-pass serializer over a document
//! - `writer` - save-pass serializer producing a document
//!
//! # Guarantees
//!
//! - Population is depth-first; every entity's `post_serialize` hook runs
//!   after its subtree is complete and before its parent's hook
//! - Collections iterate alphabetically by key regardless of source order
//! - A load either completes or aborts on the first error; there is no
//!   partially-populated success

mod document;
mod reader;
mod serializable;
mod serializer;
mod writer;

pub use document::{load_document, metadata_path, save_document, Element};
pub use reader::DocumentReader;
pub use serializable::{Node, NodeMap, ObjectDict, Serializable};
pub use serializer::{FieldSpec, SerializationError, Serializer};
pub use writer::DocumentWriter;
