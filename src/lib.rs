//! Metagen - metadata-driven source code generator for numerical library addins
//!
//! Metagen turns declarative metadata (enumerations, addin descriptors,
//! rules) into the bookkeeping a bindings generator needs: entities that
//! load themselves from a hierarchical external representation, write
//! themselves back, and track what each generation pass created, updated,
//! or left alone.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`serialization`] - Object-graph serialization framework: the
//!   `Serializable` contract, the `Serializer` protocol, and the document
//!   reader/writer pair
//! - [`metadata`] - Concrete metadata entities (enumerations, addins,
//!   buffers, rules) and the node registry
//! - [`generation`] - Per-artifact classification, counters, and output
//!   commit
//! - [`config`] - Generator configuration (metadata and output roots)
//!
//! The concrete text format, the rule-matching engine, and the driver that
//! walks all addins are external collaborators; this crate depends only on
//! their interfaces.
//!
//! # Correctness Invariants
//!
//! Metagen maintains the following invariants:
//!
//! 1. Population is depth-first and bottom-up: an entity's
//!    `post_serialize` hook runs only after its whole subtree is loaded
//! 2. Keyed collections iterate alphabetically regardless of source order
//! 3. A load either completes or aborts on the first error; no partially
//!    populated entity is ever handed back
//! 4. Artifact counters only move forward, one artifact at a time

pub mod config;
pub mod generation;
pub mod metadata;
pub mod serialization;
