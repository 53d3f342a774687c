//! metadata::rules
//!
//! Rule tree data entities.
//!
//! A rule maps a library function or type signature pattern to emitted
//! source text; groups collect rules by category. The matching and
//! text-substitution engine that applies rules is an external collaborator;
//! this module only carries the data the generation unit loads on demand.

use crate::serialization::{Node, NodeMap, Serializable, SerializationError, Serializer};

/// One mapping from a signature pattern to emitted source text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Rule {
    name: String,
    text: String,
}

impl Rule {
    /// The pattern name this rule applies to.
    pub fn rule_name(&self) -> &str {
        &self.name
    }

    /// The source text template the rule emits.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Serializable for Rule {
    fn serialize(&mut self, serializer: &mut dyn Serializer) -> Result<(), SerializationError> {
        serializer.serialize_attribute("name", &mut self.name)?;
        serializer.serialize_value(&mut self.text)?;
        Ok(())
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Node for Rule {
    const TAG: &'static str = "Rule";
    const GROUP: &'static str = "Rules";
}

/// A category of rules, keyed by rule name.
///
/// Groups themselves are keyed by their category label in the rule tree's
/// object-property dictionary, so they carry no name of their own.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RuleGroup {
    rules: NodeMap<Rule>,
}

impl RuleGroup {
    /// Look up a rule by pattern name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Rules in ascending name order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Number of rules in the group.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the group holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Serializable for RuleGroup {
    fn serialize(&mut self, serializer: &mut dyn Serializer) -> Result<(), SerializationError> {
        serializer.serialize_object_dict(&mut self.rules)
    }
}

impl Node for RuleGroup {
    const TAG: &'static str = "RuleGroup";
    const GROUP: &'static str = "RuleGroups";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::{DocumentReader, Element, Serializer as _};

    fn rule_element(name: &str, text: &str) -> Element {
        let mut el = Element::with_text("Rule", text);
        el.set_attribute("name", name);
        el
    }

    fn rules_document() -> Element {
        let mut root = Element::new("Rules");
        let mut groups = Element::new("RuleGroups");

        let mut functions = Element::new("functionSignatures");
        let mut wrapper = Element::new("Rules");
        wrapper.push_child(rule_element("default", "%(type)s %(name)s"));
        wrapper.push_child(rule_element("voidReturn", "void %(name)s"));
        functions.push_child(wrapper);
        groups.push_child(functions);

        root.push_child(groups);
        root
    }

    #[test]
    fn rule_tree_loads_groups_by_label() {
        let mut reader = DocumentReader::new(rules_document());
        let mut groups: NodeMap<RuleGroup> = NodeMap::new();
        reader.serialize_object_property_dict(&mut groups).unwrap();

        let functions = groups.get("functionSignatures").unwrap();
        assert_eq!(functions.len(), 2);
        assert_eq!(
            functions.rule("default").unwrap().text(),
            "%(type)s %(name)s"
        );
    }

    #[test]
    fn rules_iterate_in_name_order() {
        let mut reader = DocumentReader::new(rules_document());
        let mut groups: NodeMap<RuleGroup> = NodeMap::new();
        reader.serialize_object_property_dict(&mut groups).unwrap();

        let names: Vec<&str> = groups
            .get("functionSignatures")
            .unwrap()
            .rules()
            .map(|r| r.rule_name())
            .collect();
        assert_eq!(names, vec!["default", "voidReturn"]);
    }
}
