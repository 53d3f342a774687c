//! metadata::addin
//!
//! The generation unit: data and behavior required to generate addin source
//! code for one target platform.
//!
//! # Lifecycle
//!
//! An addin is constructed empty, populated by deserialization, then
//! *activated* once by the driver. Activation is the only side-effecting
//! step: it loads the unit's rule tree on demand and ensures the output
//! directory exists. Structural load stays pure, so it can be tested
//! without touching the filesystem.
//!
//! After activation the (external) generation driver renders artifacts from
//! the unit's buffers and rule tree, committing each one and recording its
//! disposition on the unit's tally. The counters are read back once the
//! pass completes.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::GeneratorConfig;
use crate::generation::{Disposition, GenerationError, OutputTally};
use crate::metadata::buffer::Buffer;
use crate::metadata::rules::RuleGroup;
use crate::serialization::{
    metadata_path, DocumentReader, FieldSpec, Node, NodeMap, Serializable, SerializationError,
    Serializer,
};

/// One generation unit targeting a single addin platform.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Addin {
    name: String,
    root_directory: String,
    data_directory: String,
    buffers: NodeMap<Buffer>,
    copyright: String,
    load_rules: bool,
    namespace_addin: String,
    relative_path: String,
    object_id_suffix: String,
    repository_class: String,
    overwrite_variable: String,

    // Populated by activate(), not by deserialization.
    rule_groups: NodeMap<RuleGroup>,
    root_path: Option<PathBuf>,
    tally: OutputTally,
}

impl Addin {
    /// The unit's display name.
    pub fn addin_name(&self) -> &str {
        &self.name
    }

    /// Directory name the unit generates into, under the output base.
    pub fn root_directory(&self) -> &str {
        &self.root_directory
    }

    /// Directory of platform-specific data files, if any.
    pub fn data_directory(&self) -> &str {
        &self.data_directory
    }

    /// The copyright text stamped into generated files.
    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    /// The namespace generated code is placed in.
    pub fn namespace_addin(&self) -> &str {
        &self.namespace_addin
    }

    /// Path of this unit's sources relative to the project root.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Suffix appended to generated object identifiers.
    pub fn object_id_suffix(&self) -> &str {
        &self.object_id_suffix
    }

    /// Repository class referenced by generated constructors.
    pub fn repository_class(&self) -> &str {
        &self.repository_class
    }

    /// Overwrite-control variable referenced by generated constructors.
    pub fn overwrite_variable(&self) -> &str {
        &self.overwrite_variable
    }

    /// Look up an output buffer by logical name.
    pub fn buffer(&self, name: &str) -> Option<&Buffer> {
        self.buffers.get(name)
    }

    /// Output buffers, keyed by logical name.
    pub fn buffers(&self) -> &NodeMap<Buffer> {
        &self.buffers
    }

    /// Look up a loaded rule group by category label.
    pub fn rule_group(&self, label: &str) -> Option<&RuleGroup> {
        self.rule_groups.get(label)
    }

    /// Rule groups loaded by activation, keyed by category label.
    pub fn rule_groups(&self) -> &NodeMap<RuleGroup> {
        &self.rule_groups
    }

    /// The unit's output directory, once activation has created it.
    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    /// Artifact counters for this unit's generation pass.
    pub fn tally(&self) -> &OutputTally {
        &self.tally
    }

    /// Record one finalized artifact. Called by the generation driver,
    /// exactly once per artifact.
    pub fn record_output(&mut self, disposition: Disposition) {
        self.tally.record(disposition);
    }

    /// Artifacts created during this pass.
    pub fn created(&self) -> u32 {
        self.tally.created()
    }

    /// Artifacts updated during this pass.
    pub fn updated(&self) -> u32 {
        self.tally.updated()
    }

    /// Artifacts left unchanged during this pass.
    pub fn unchanged(&self) -> u32 {
        self.tally.unchanged()
    }

    /// One-time activation after structural load.
    ///
    /// Loads the rule tree from `<rules root>/<name lower-cased>.json` when
    /// the unit's `loadRules` flag is set, and creates the output directory
    /// `<output root>/<rootDirectory>/`. Both steps are idempotent: an
    /// already-loaded rule tree is kept, and an existing directory is
    /// success, not an error.
    ///
    /// # Errors
    ///
    /// Propagates rule-tree load failures and directory-creation failures.
    pub fn activate(&mut self, config: &GeneratorConfig) -> Result<(), GenerationError> {
        if self.load_rules && self.rule_groups.is_empty() {
            let path = metadata_path(&config.rules_root(), &self.name);
            let mut reader = DocumentReader::open(&path)?;
            reader.serialize_object_property_dict(&mut self.rule_groups)?;
            info!(
                addin = %self.name,
                path = %path.display(),
                groups = self.rule_groups.len(),
                "loaded rule tree"
            );
        }

        if !self.root_directory.is_empty() {
            let root_path = config.output_root().join(&self.root_directory);
            fs::create_dir_all(&root_path).map_err(|e| GenerationError::CreateDir {
                path: root_path.clone(),
                source: e,
            })?;
            info!(addin = %self.name, path = %root_path.display(), "output directory ready");
            self.root_path = Some(root_path);
        }

        Ok(())
    }
}

impl Serializable for Addin {
    fn serialize(&mut self, serializer: &mut dyn Serializer) -> Result<(), SerializationError> {
        serializer.serialize_attribute("name", &mut self.name)?;
        serializer.serialize_property(
            "rootDirectory",
            &mut self.root_directory,
            FieldSpec::optional(""),
        )?;
        serializer.serialize_property(
            "dataDirectory",
            &mut self.data_directory,
            FieldSpec::optional(""),
        )?;
        serializer.serialize_object_property_dict(&mut self.buffers)?;
        serializer.serialize_property("copyright", &mut self.copyright, FieldSpec::optional(""))?;
        serializer.serialize_bool("loadRules", &mut self.load_rules, true)?;
        serializer.serialize_property(
            "namespaceAddin",
            &mut self.namespace_addin,
            FieldSpec::required(),
        )?;
        serializer.serialize_property(
            "relativePath",
            &mut self.relative_path,
            FieldSpec::required(),
        )?;
        serializer.serialize_property(
            "objectIdSuffix",
            &mut self.object_id_suffix,
            FieldSpec::optional(""),
        )?;
        serializer.serialize_property(
            "repositoryClass",
            &mut self.repository_class,
            FieldSpec::optional("Repository"),
        )?;
        serializer.serialize_property(
            "overwriteVariable",
            &mut self.overwrite_variable,
            FieldSpec::optional("Overwrite"),
        )?;
        Ok(())
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Node for Addin {
    const TAG: &'static str = "Addin";
    const GROUP: &'static str = "Addins";
}
