// crates/param-gate-core/src/runtime/validator.rs
// ============================================================================
// Module: Param Gate Schema Validator
// Description: Load-time structural checks for parameter schemas.
// Purpose: Report every schema defect in one pass and compile conditions.
// Dependencies: serde, thiserror, crate::core
// ============================================================================

//! ## Overview
//! The validator walks a schema once, never consulting a value tree, and
//! collects every defect it finds instead of stopping at the first. Display
//! conditions are parsed here so the runtime only ever evaluates typed ASTs.
//! A schema with zero defects compiles into a [`CompiledSchema`].
//!
//! Condition path scope: a `show` / `hide` path is an absolute dotted value
//! path from the schema root. It is valid when it equals the value path of
//! some node in the tree, including fields of any union variant and
//! excluding nodes beneath array items.
//!
//! Names are checked for every addressable node. The schema root and array
//! element schemas are not addressable by name and may leave it empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::FieldPath;
use crate::core::NodeEntry;
use crate::core::NodeKind;
use crate::core::ParameterNode;
use crate::core::QueryError;
use crate::core::QueryExpression;
use crate::core::QueryLimits;
use crate::core::QueryParser;
use crate::core::StringConstraints;
use crate::core::UnionVariant;
use crate::runtime::compiled::CompiledDisplay;
use crate::runtime::compiled::CompiledSchema;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum schema depth.
pub const DEFAULT_MAX_SCHEMA_DEPTH: usize = 32;
/// Default maximum node count.
pub const DEFAULT_MAX_SCHEMA_NODES: usize = 4096;

/// Resource limits applied during schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaLimits {
    /// Maximum node depth below the root.
    pub max_depth: usize,
    /// Maximum number of nodes, root included.
    pub max_nodes: usize,
    /// Limits for display conditions.
    pub query: QueryLimits,
}

impl Default for SchemaLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_SCHEMA_DEPTH,
            max_nodes: DEFAULT_MAX_SCHEMA_NODES,
            query: QueryLimits::default(),
        }
    }
}

// ============================================================================
// SECTION: Defects
// ============================================================================

/// Classification of a schema defect.
///
/// # Invariants
/// - Serialized labels are stable and equal [`DefectKind::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefectKind {
    /// Two siblings share a name.
    DuplicateName,
    /// A name fails the identifier pattern.
    InvalidIdentifier,
    /// A lower bound exceeds its upper bound.
    RangeInversion,
    /// A union variant lacks a pinned discriminator field.
    MissingDiscriminatorConstant,
    /// Two variants of one union pin the same constant.
    DuplicateDiscriminatorConstant,
    /// A condition references a path absent from the schema.
    DanglingConditionPath,
    /// A condition is not a well-formed query object.
    MalformedCondition,
    /// A condition exceeds structural limits.
    ConditionLimitExceeded,
    /// A default value does not fit its node.
    InvalidDefault,
    /// A union declares no variants.
    EmptyUnion,
    /// The schema exceeds depth or size limits.
    SchemaLimitExceeded,
}

impl DefectKind {
    /// Returns the stable defect code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateName => "duplicate_name",
            Self::InvalidIdentifier => "invalid_identifier",
            Self::RangeInversion => "range_inversion",
            Self::MissingDiscriminatorConstant => "missing_discriminator_constant",
            Self::DuplicateDiscriminatorConstant => "duplicate_discriminator_constant",
            Self::DanglingConditionPath => "dangling_condition_path",
            Self::MalformedCondition => "malformed_condition",
            Self::ConditionLimitExceeded => "condition_limit_exceeded",
            Self::InvalidDefault => "invalid_default",
            Self::EmptyUnion => "empty_union",
            Self::SchemaLimitExceeded => "schema_limit_exceeded",
        }
    }
}

/// One structural problem in an authored schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDefect {
    /// Defect classification.
    pub kind: DefectKind,
    /// Address of the offending node (empty for the root).
    pub address: FieldPath,
    /// Human-readable description.
    pub message: String,
}

impl SchemaDefect {
    /// Creates a defect.
    #[must_use]
    pub fn new(kind: DefectKind, address: FieldPath, message: impl Into<String>) -> Self {
        Self {
            kind,
            address,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.address.is_root() {
            write!(f, "[{}] <root>: {}", self.kind.code(), self.message)
        } else {
            write!(f, "[{}] {}: {}", self.kind.code(), self.address, self.message)
        }
    }
}

/// Every defect found in one validation pass, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("schema has {} defect(s)", .defects.len())]
pub struct ValidationResult {
    /// Collected defects.
    pub defects: Vec<SchemaDefect>,
}

impl ValidationResult {
    /// Returns true when no defect was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.defects.is_empty()
    }

    /// Returns the defects of one kind.
    #[must_use]
    pub fn of_kind(&self, kind: DefectKind) -> Vec<&SchemaDefect> {
        self.defects.iter().filter(|defect| defect.kind == kind).collect()
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Load-time schema validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator {
    /// Limits applied to every schema.
    limits: SchemaLimits,
}

impl SchemaValidator {
    /// Creates a validator with the given limits.
    #[must_use]
    pub const fn new(limits: SchemaLimits) -> Self {
        Self {
            limits,
        }
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn limits(&self) -> SchemaLimits {
        self.limits
    }

    /// Validates a schema and returns every defect.
    #[must_use]
    pub fn validate(&self, root: &ParameterNode) -> ValidationResult {
        self.check(root).0
    }

    /// Validates a schema and compiles it when no defect is found.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationResult`] listing every defect otherwise.
    pub fn compile(&self, root: ParameterNode) -> Result<CompiledSchema, ValidationResult> {
        let (result, conditions) = self.check(&root);
        if !result.is_valid() {
            return Err(result);
        }
        Ok(CompiledSchema::new(root, conditions))
    }

    /// Runs every check, returning defects and the parsed conditions.
    fn check(
        &self,
        root: &ParameterNode,
    ) -> (ValidationResult, BTreeMap<FieldPath, CompiledDisplay>) {
        let mut defects = Vec::new();
        let mut entries = Vec::new();
        for entry in root.walk() {
            if entries.len() == self.limits.max_nodes {
                defects.push(SchemaDefect::new(
                    DefectKind::SchemaLimitExceeded,
                    FieldPath::root(),
                    format!("schema exceeds {} nodes", self.limits.max_nodes),
                ));
                return (
                    ValidationResult {
                        defects,
                    },
                    BTreeMap::new(),
                );
            }
            entries.push(entry);
        }

        let value_paths: BTreeSet<String> = entries
            .iter()
            .filter(|entry| !entry.address.is_root())
            .filter_map(|entry| entry.address.value_path())
            .collect();
        let parser = QueryParser::new(self.limits.query);
        let mut conditions = BTreeMap::new();
        let mut depth_reported = false;

        for entry in &entries {
            if entry.depth > self.limits.max_depth && !depth_reported {
                defects.push(SchemaDefect::new(
                    DefectKind::SchemaLimitExceeded,
                    entry.address.clone(),
                    format!("schema exceeds depth {}", self.limits.max_depth),
                ));
                depth_reported = true;
            }
            check_name(entry, &mut defects);
            check_kind(entry, &mut defects);
            if let Some(default) = &entry.node.default
                && let Some(message) = default_mismatch(&entry.node.kind, default)
            {
                defects.push(SchemaDefect::new(
                    DefectKind::InvalidDefault,
                    entry.address.clone(),
                    message,
                ));
            }
            let display = CompiledDisplay {
                show: compile_condition(&parser, entry, "show", &value_paths, &mut defects),
                hide: compile_condition(&parser, entry, "hide", &value_paths, &mut defects),
            };
            if !display.is_empty() {
                conditions.insert(entry.address.clone(), display);
            }
        }
        (
            ValidationResult {
                defects,
            },
            conditions,
        )
    }
}

/// Validates a schema with default limits.
#[must_use]
pub fn validate(root: &ParameterNode) -> ValidationResult {
    SchemaValidator::default().validate(root)
}

/// Validates and compiles a schema with default limits.
///
/// # Errors
///
/// Returns the [`ValidationResult`] listing every defect.
pub fn compile(root: ParameterNode) -> Result<CompiledSchema, ValidationResult> {
    SchemaValidator::default().compile(root)
}

// ============================================================================
// SECTION: Name Checks
// ============================================================================

/// Checks the identifier pattern on addressable nodes.
fn check_name(entry: &NodeEntry<'_>, defects: &mut Vec<SchemaDefect>) {
    if entry.address.is_root() || entry.is_array_items() {
        return;
    }
    if !entry.node.name.is_valid() {
        defects.push(SchemaDefect::new(
            DefectKind::InvalidIdentifier,
            entry.address.clone(),
            format!("name {:?} must match [A-Za-z0-9_]+", entry.node.name.as_str()),
        ));
    }
}

/// Reports the second and later occurrence of each sibling name.
fn check_siblings(base: &FieldPath, children: &[ParameterNode], defects: &mut Vec<SchemaDefect>) {
    let mut seen = BTreeSet::new();
    for child in children {
        if !seen.insert(child.name.as_str()) {
            defects.push(SchemaDefect::new(
                DefectKind::DuplicateName,
                base.child(child.name.as_str()),
                format!("duplicate sibling name {:?}", child.name.as_str()),
            ));
        }
    }
}

// ============================================================================
// SECTION: Kind Checks
// ============================================================================

/// Checks ranges, siblings, and union structure for one node.
fn check_kind(entry: &NodeEntry<'_>, defects: &mut Vec<SchemaDefect>) {
    let address = &entry.address;
    let inverted = |defects: &mut Vec<SchemaDefect>, what: &str| {
        defects.push(SchemaDefect::new(
            DefectKind::RangeInversion,
            address.clone(),
            format!("{what} lower bound exceeds upper bound"),
        ));
    };
    match &entry.node.kind {
        NodeKind::String(constraints) | NodeKind::EncryptedString(constraints) => {
            if let (Some(min), Some(max)) = (constraints.min_length, constraints.max_length)
                && min > max
            {
                inverted(defects, "length");
            }
        }
        NodeKind::Number {
            minimum,
            maximum,
        } => {
            if let (Some(min), Some(max)) = (minimum, maximum)
                && min > max
            {
                inverted(defects, "numeric");
            }
        }
        NodeKind::Integer {
            minimum,
            maximum,
        } => {
            if let (Some(min), Some(max)) = (minimum, maximum)
                && min > max
            {
                inverted(defects, "integer");
            }
        }
        NodeKind::Array {
            min_items,
            max_items,
            ..
        } => {
            if let (Some(min), Some(max)) = (min_items, max_items)
                && min > max
            {
                inverted(defects, "item count");
            }
        }
        NodeKind::Object {
            children,
        } => check_siblings(address, children, defects),
        NodeKind::DiscriminatedUnion {
            discriminator,
            variants,
        } => check_union(address, discriminator.as_str(), variants, defects),
        NodeKind::Boolean
        | NodeKind::CredentialReference {
            ..
        } => {}
    }
}

/// Checks discriminator pinning and uniqueness across variants.
fn check_union(
    address: &FieldPath,
    discriminator: &str,
    variants: &[UnionVariant],
    defects: &mut Vec<SchemaDefect>,
) {
    if variants.is_empty() {
        defects.push(SchemaDefect::new(
            DefectKind::EmptyUnion,
            address.clone(),
            "discriminated union declares no variants",
        ));
    }
    let mut pinned: BTreeMap<&str, usize> = BTreeMap::new();
    for (index, variant) in variants.iter().enumerate() {
        let base = address.variant(index);
        check_siblings(&base, &variant.children, defects);
        let constant = variant
            .children
            .iter()
            .find(|child| child.name.as_str() == discriminator)
            .and_then(|child| match &child.kind {
                NodeKind::String(constraints) => constraints.pinned_constant(),
                _ => None,
            });
        let Some(constant) = constant else {
            defects.push(SchemaDefect::new(
                DefectKind::MissingDiscriminatorConstant,
                base,
                format!("variant needs a string field {discriminator:?} pinned to one constant"),
            ));
            continue;
        };
        if let Some(first) = pinned.get(constant) {
            defects.push(SchemaDefect::new(
                DefectKind::DuplicateDiscriminatorConstant,
                base,
                format!("constant {constant:?} already pinned by variant {first}"),
            ));
        } else {
            pinned.insert(constant, index);
        }
    }
}

// ============================================================================
// SECTION: Default Checks
// ============================================================================

/// Returns a message when a default value does not fit the node kind.
fn default_mismatch(kind: &NodeKind, default: &Value) -> Option<String> {
    match kind {
        NodeKind::String(constraints) | NodeKind::EncryptedString(constraints) => {
            let Value::String(text) = default else {
                return Some("default must be a string".to_string());
            };
            string_default_mismatch(constraints, text)
        }
        NodeKind::Number {
            minimum,
            maximum,
        } => {
            let Some(number) = default.as_f64() else {
                return Some("default must be a number".to_string());
            };
            out_of_range(number, *minimum, *maximum)
        }
        NodeKind::Integer {
            minimum,
            maximum,
        } => {
            let Some(number) = default.as_i64() else {
                return Some("default must be an integer".to_string());
            };
            out_of_range(number, *minimum, *maximum)
        }
        NodeKind::Boolean => {
            (!default.is_boolean()).then(|| "default must be a boolean".to_string())
        }
        NodeKind::Object {
            ..
        }
        | NodeKind::DiscriminatedUnion {
            ..
        } => (!default.is_object()).then(|| "default must be an object".to_string()),
        NodeKind::Array {
            min_items,
            max_items,
            ..
        } => {
            let Value::Array(items) = default else {
                return Some("default must be an array".to_string());
            };
            let count = u64::try_from(items.len()).unwrap_or(u64::MAX);
            out_of_range(count, *min_items, *max_items)
        }
        NodeKind::CredentialReference {
            ..
        } => (!default.is_string()).then(|| "default must be a credential id string".to_string()),
    }
}

/// Checks a string default against enum, const, and length constraints.
fn string_default_mismatch(constraints: &StringConstraints, text: &str) -> Option<String> {
    if let Some(constant) = &constraints.constant
        && constant != text
    {
        return Some(format!("default must equal the constant {constant:?}"));
    }
    if let Some(options) = &constraints.options
        && !options.iter().any(|option| option == text)
    {
        return Some(format!("default {text:?} is not one of the enum values"));
    }
    let length = u64::try_from(text.chars().count()).unwrap_or(u64::MAX);
    out_of_range(length, constraints.min_length, constraints.max_length)
        .map(|message| format!("default length: {message}"))
}

/// Returns a message when `value` falls outside optional inclusive bounds.
fn out_of_range<T>(value: T, minimum: Option<T>, maximum: Option<T>) -> Option<String>
where
    T: PartialOrd + fmt::Display + Copy,
{
    if let Some(min) = minimum
        && value < min
    {
        return Some(format!("{value} is below the minimum {min}"));
    }
    if let Some(max) = maximum
        && value > max
    {
        return Some(format!("{value} is above the maximum {max}"));
    }
    None
}

// ============================================================================
// SECTION: Condition Checks
// ============================================================================

/// Parses one display clause and checks that every path resolves.
fn compile_condition(
    parser: &QueryParser,
    entry: &NodeEntry<'_>,
    clause: &'static str,
    value_paths: &BTreeSet<String>,
    defects: &mut Vec<SchemaDefect>,
) -> Option<QueryExpression> {
    let display = &entry.node.display;
    let raw = if clause == "show" { display.show.as_ref() } else { display.hide.as_ref() }?;
    let expression = match parser.parse(raw) {
        Ok(expression) => expression,
        Err(err) => {
            let kind = match err {
                QueryError::Structure(_) => DefectKind::ConditionLimitExceeded,
                _ => DefectKind::MalformedCondition,
            };
            let message = format!("{clause}: {err}");
            defects.push(SchemaDefect::new(kind, entry.address.clone(), message));
            return None;
        }
    };
    let mut dangling = false;
    expression.for_each_predicate(&mut |condition| {
        if !value_paths.contains(condition.path.as_str()) {
            dangling = true;
            defects.push(SchemaDefect::new(
                DefectKind::DanglingConditionPath,
                entry.address.clone(),
                format!("{clause} references unknown path {:?}", condition.path.as_str()),
            ));
        }
    });
    (!dangling).then_some(expression)
}
