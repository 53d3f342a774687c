//! serialization::serializable
//!
//! The contract every metadata node implements, plus the keyed collection
//! type that holds homogeneous child nodes.
//!
//! # Load Ordering
//!
//! Population is depth-first and strictly bottom-up: a child's
//! [`Serializable::post_serialize`] hook runs immediately after its own
//! `serialize` returns, before control comes back to the parent. A parent's
//! hook may therefore assume every child is fully populated, and may revisit
//! children to propagate derived state downward (the enumeration group does
//! exactly this).

use std::collections::BTreeMap;

use super::serializer::{SerializationError, Serializer};

/// Contract for any entity describable by the serialization framework.
///
/// `serialize` declares, in a fixed order, how each field maps to the
/// external representation; the bound [`Serializer`] decides the direction.
/// `name` supplies the entity's key when it lives in an object dictionary.
/// `post_serialize` runs exactly once per entity during a load pass, after
/// the entity's whole subtree has been populated.
pub trait Serializable {
    /// Declare the entity's fields against the serializer protocol.
    fn serialize(&mut self, serializer: &mut dyn Serializer) -> Result<(), SerializationError>;

    /// The entity's unique key within its collection, if it has one.
    ///
    /// Required only for entities placed into an object dictionary.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Hook invoked once the entity (and its whole subtree) has loaded.
    fn post_serialize(&mut self) {}
}

/// A concrete metadata node type with registered element tags.
///
/// `TAG` names one instance in the external representation; `GROUP` names
/// the wrapper element that collects instances in a dictionary.
pub trait Node: Serializable + Default {
    /// Element tag for one instance.
    const TAG: &'static str;
    /// Wrapper element tag for a dictionary of instances.
    const GROUP: &'static str;
}

/// Type-erased view of a keyed node collection.
///
/// This is the seam that lets the object-safe [`Serializer`] protocol drive
/// strongly-typed collections: the dictionary itself constructs, populates,
/// and inserts each child, so no downcasting is needed anywhere.
pub trait ObjectDict {
    /// Wrapper element tag for the collection.
    fn group_tag(&self) -> &'static str;

    /// Element tag for each child in an object dictionary.
    fn child_tag(&self) -> &'static str;

    /// Populate one child from `serializer` (already positioned on the
    /// child's element), run its post-serialization hook, and insert it.
    ///
    /// `key` carries the injected category label for object-property
    /// dictionaries; `None` means the child's self-declared name is the key.
    fn load_child(
        &mut self,
        key: Option<String>,
        serializer: &mut dyn Serializer,
    ) -> Result<(), SerializationError>;

    /// Entries in ascending key order, for the save pass.
    fn entries_mut(&mut self) -> Vec<(String, &mut dyn Serializable)>;
}

/// A keyed, alphabetically-iterable collection of child nodes.
///
/// Backed by a `BTreeMap`, so iteration order is always ascending by key
/// regardless of insertion order. Keys are unique; inserting a duplicate is
/// a [`SerializationError::DuplicateKey`].
///
/// # Example
///
/// ```
/// use metagen::metadata::EnumeratedType;
/// use metagen::serialization::NodeMap;
///
/// let mut map: NodeMap<EnumeratedType> = NodeMap::new();
/// map.insert("Up", EnumeratedType::default()).unwrap();
/// assert!(map.insert("Up", EnumeratedType::default()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMap<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for NodeMap<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Node> NodeMap<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `key`.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError::DuplicateKey` if the key is taken.
    pub fn insert(&mut self, key: impl Into<String>, node: T) -> Result<(), SerializationError> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(SerializationError::DuplicateKey {
                entity: T::GROUP.to_string(),
                key,
            });
        }
        self.entries.insert(key, node);
        Ok(())
    }

    /// Look up a node by key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Nodes in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Mutable nodes in ascending key order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    /// Key/node pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<T: Node> ObjectDict for NodeMap<T> {
    fn group_tag(&self) -> &'static str {
        T::GROUP
    }

    fn child_tag(&self) -> &'static str {
        T::TAG
    }

    fn load_child(
        &mut self,
        key: Option<String>,
        serializer: &mut dyn Serializer,
    ) -> Result<(), SerializationError> {
        let mut child = T::default();
        child.serialize(serializer)?;
        child.post_serialize();
        let key = match key {
            Some(key) => key,
            None => child
                .name()
                .map(str::to_string)
                .ok_or_else(|| SerializationError::MissingField {
                    entity: T::TAG.to_string(),
                    field: "name".to_string(),
                })?,
        };
        self.insert(key, child)
    }

    fn entries_mut(&mut self) -> Vec<(String, &mut dyn Serializable)> {
        self.entries
            .iter_mut()
            .map(|(k, v)| (k.clone(), v as &mut dyn Serializable))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Widget {
        id: String,
    }

    impl Serializable for Widget {
        fn serialize(
            &mut self,
            serializer: &mut dyn Serializer,
        ) -> Result<(), SerializationError> {
            serializer.serialize_attribute("id", &mut self.id)
        }

        fn name(&self) -> Option<&str> {
            Some(&self.id)
        }
    }

    impl Node for Widget {
        const TAG: &'static str = "Widget";
        const GROUP: &'static str = "Widgets";
    }

    #[test]
    fn insert_and_lookup() {
        let mut map = NodeMap::new();
        map.insert("a", Widget { id: "a".into() }).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a").unwrap().id, "a");
        assert!(map.get("b").is_none());
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut map = NodeMap::new();
        map.insert("a", Widget { id: "a".into() }).unwrap();
        let err = map.insert("a", Widget { id: "a".into() }).unwrap_err();
        match err {
            SerializationError::DuplicateKey { entity, key } => {
                assert_eq!(entity, "Widgets");
                assert_eq!(key, "a");
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn iteration_is_alphabetical() {
        let mut map = NodeMap::new();
        for id in ["c", "a", "b"] {
            map.insert(id, Widget { id: id.into() }).unwrap();
        }
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn entries_mut_matches_key_order() {
        let mut map = NodeMap::new();
        for id in ["z", "m", "a"] {
            map.insert(id, Widget { id: id.into() }).unwrap();
        }
        let keys: Vec<String> = map.entries_mut().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }
}
