//! metadata::enumerations
//!
//! Enumerations for a library datatype: a group of string-to-value mappings
//! plus the include file that declares the underlying type.
//!
//! # Propagation
//!
//! A member's `type` and `useConstructor` fields are not self-declared: the
//! owning group injects them once its own load completes. The load pass
//! guarantees members are fully populated before the group's
//! `post_serialize` runs, and the group only exposes members through its
//! iterator, so callers never observe a member with stale type information.

use crate::serialization::{
    FieldSpec, Node, NodeMap, Serializable, SerializationError, Serializer,
};

/// One string-to-value mapping within an enumerated type group.
///
/// The display string is the member's unique key within its group. The
/// `type`/`useConstructor` pair is a propagated copy of group state, not a
/// back-pointer, so a member stays valid if its group is discarded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnumeratedType {
    string: String,
    value: String,
    type_name: String,
    use_constructor: bool,
}

impl EnumeratedType {
    /// The display string.
    pub fn string(&self) -> &str {
        &self.string
    }

    /// The underlying value expression.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The expression that constructs this member in generated code.
    ///
    /// `type(value)` when the group requests constructor syntax, otherwise
    /// the value verbatim. Derived on demand, never persisted.
    ///
    /// # Example
    ///
    /// ```
    /// use metagen::metadata::EnumeratedTypeGroup;
    /// use metagen::serialization::{DocumentReader, Element};
    ///
    /// let mut doc = Element::new("EnumeratedTypeGroup");
    /// doc.set_attribute("type", "Direction");
    /// doc.push_child(Element::with_text("constructor", "true"));
    /// doc.push_child(Element::with_text("includeFile", "ql/direction.hpp"));
    /// let mut members = Element::new("EnumeratedTypes");
    /// let mut up = Element::new("EnumeratedType");
    /// up.push_child(Element::with_text("string", "Up"));
    /// up.push_child(Element::with_text("value", "Up"));
    /// members.push_child(up);
    /// doc.push_child(members);
    ///
    /// let mut group = EnumeratedTypeGroup::default();
    /// DocumentReader::new(doc).load(&mut group).unwrap();
    ///
    /// let member = group.enumerated_types().next().unwrap();
    /// assert_eq!(member.constructor(), "Direction(Up)");
    /// ```
    pub fn constructor(&self) -> String {
        if self.use_constructor {
            format!("{}({})", self.type_name, self.value)
        } else {
            self.value.clone()
        }
    }

    pub(crate) fn set_type(&mut self, type_name: &str) {
        self.type_name = type_name.to_string();
    }

    pub(crate) fn set_use_constructor(&mut self, use_constructor: bool) {
        self.use_constructor = use_constructor;
    }
}

impl Serializable for EnumeratedType {
    fn serialize(&mut self, serializer: &mut dyn Serializer) -> Result<(), SerializationError> {
        serializer.serialize_property("string", &mut self.string, FieldSpec::required())?;
        serializer.serialize_property("value", &mut self.value, FieldSpec::required())?;
        Ok(())
    }

    fn name(&self) -> Option<&str> {
        Some(&self.string)
    }
}

impl Node for EnumeratedType {
    const TAG: &'static str = "EnumeratedType";
    const GROUP: &'static str = "EnumeratedTypes";
}

/// Enumerations for one library datatype.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnumeratedTypeGroup {
    type_name: String,
    use_constructor: bool,
    members: NodeMap<EnumeratedType>,
    include_file: String,
}

impl EnumeratedTypeGroup {
    /// The underlying library type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Path of the include file declaring the underlying type.
    pub fn include_file(&self) -> &str {
        &self.include_file
    }

    /// Members in ascending key order, fully propagated.
    pub fn enumerated_types(&self) -> impl Iterator<Item = &EnumeratedType> {
        self.members.values()
    }

    /// Number of members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

impl Serializable for EnumeratedTypeGroup {
    fn serialize(&mut self, serializer: &mut dyn Serializer) -> Result<(), SerializationError> {
        serializer.serialize_attribute("type", &mut self.type_name)?;
        serializer.serialize_bool("constructor", &mut self.use_constructor, false)?;
        serializer.serialize_object_dict(&mut self.members)?;
        serializer.serialize_property("includeFile", &mut self.include_file, FieldSpec::required())?;
        Ok(())
    }

    fn name(&self) -> Option<&str> {
        Some(&self.type_name)
    }

    fn post_serialize(&mut self) {
        // Members finished loading before this hook runs; push the group's
        // type information down into each of them.
        let type_name = self.type_name.clone();
        let use_constructor = self.use_constructor;
        for member in self.members.values_mut() {
            member.set_type(&type_name);
            member.set_use_constructor(use_constructor);
        }
    }
}

impl Node for EnumeratedTypeGroup {
    const TAG: &'static str = "EnumeratedTypeGroup";
    const GROUP: &'static str = "EnumeratedTypeGroups";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{DocumentReader, DocumentWriter, Element};

    fn member_element(string: &str, value: &str) -> Element {
        let mut el = Element::new("EnumeratedType");
        el.push_child(Element::with_text("string", string));
        el.push_child(Element::with_text("value", value));
        el
    }

    fn group_document(constructor: bool, members: &[(&str, &str)]) -> Element {
        let mut root = Element::new("EnumeratedTypeGroup");
        root.set_attribute("type", "Direction");
        root.push_child(Element::with_text(
            "constructor",
            if constructor { "true" } else { "false" },
        ));
        root.push_child(Element::with_text("includeFile", "ql/direction.hpp"));
        let mut wrapper = Element::new("EnumeratedTypes");
        for (string, value) in members {
            wrapper.push_child(member_element(string, value));
        }
        root.push_child(wrapper);
        root
    }

    fn load_group(doc: Element) -> EnumeratedTypeGroup {
        let mut group = EnumeratedTypeGroup::default();
        DocumentReader::new(doc).load(&mut group).unwrap();
        group
    }

    mod member {
        use super::*;

        #[test]
        fn constructor_with_type_wrapping() {
            let mut member = EnumeratedType::default();
            member.string = "Up".into();
            member.value = "Up".into();
            member.set_type("Direction");
            member.set_use_constructor(true);
            assert_eq!(member.constructor(), "Direction(Up)");
        }

        #[test]
        fn constructor_verbatim() {
            let mut member = EnumeratedType::default();
            member.string = "Up".into();
            member.value = "Up".into();
            member.set_type("Direction");
            member.set_use_constructor(false);
            assert_eq!(member.constructor(), "Up");
        }
    }

    mod group {
        use super::*;

        #[test]
        fn load_populates_members() {
            let group = load_group(group_document(true, &[("Up", "Up"), ("Down", "Down")]));
            assert_eq!(group.type_name(), "Direction");
            assert_eq!(group.include_file(), "ql/direction.hpp");
            assert_eq!(group.member_count(), 2);
        }

        #[test]
        fn members_receive_group_type_after_load() {
            let group = load_group(group_document(true, &[("Up", "Up")]));
            let member = group.enumerated_types().next().unwrap();
            assert_eq!(member.constructor(), "Direction(Up)");
        }

        #[test]
        fn constructor_flag_off_leaves_value_verbatim() {
            let group = load_group(group_document(false, &[("Up", "Up")]));
            let member = group.enumerated_types().next().unwrap();
            assert_eq!(member.constructor(), "Up");
        }

        #[test]
        fn members_iterate_alphabetically_regardless_of_source_order() {
            let group = load_group(group_document(
                false,
                &[("C", "3"), ("A", "1"), ("B", "2")],
            ));
            let strings: Vec<&str> = group.enumerated_types().map(|m| m.string()).collect();
            assert_eq!(strings, vec!["A", "B", "C"]);
        }

        #[test]
        fn duplicate_member_key_fails_the_load() {
            let doc = group_document(false, &[("Up", "1"), ("Up", "2")]);
            let mut group = EnumeratedTypeGroup::default();
            let err = DocumentReader::new(doc).load(&mut group).unwrap_err();
            assert!(matches!(err, SerializationError::DuplicateKey { .. }));
        }

        #[test]
        fn missing_include_file_fails_with_identity() {
            let mut root = Element::new("EnumeratedTypeGroup");
            root.set_attribute("type", "Direction");
            let mut group = EnumeratedTypeGroup::default();
            let err = DocumentReader::new(root).load(&mut group).unwrap_err();
            match err {
                SerializationError::MissingField { entity, field } => {
                    assert_eq!(field, "includeFile");
                    assert!(entity.contains("EnumeratedTypeGroup"));
                }
                other => panic!("expected MissingField, got {other:?}"),
            }
        }

        #[test]
        fn save_then_load_is_field_for_field_equal() {
            let mut group = load_group(group_document(true, &[("Up", "Up"), ("Down", "Down")]));
            let saved = DocumentWriter::save("EnumeratedTypeGroup", &mut group).unwrap();

            let mut reloaded = EnumeratedTypeGroup::default();
            DocumentReader::new(saved).load(&mut reloaded).unwrap();
            assert_eq!(group, reloaded);
        }
    }
}
