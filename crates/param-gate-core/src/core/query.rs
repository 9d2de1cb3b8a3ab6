// crates/param-gate-core/src/core/query.rs
// ============================================================================
// Module: Param Gate Query Language
// Description: Typed AST, parser, and renderer for display conditions.
// Purpose: Parse MongoDB-style query objects once into a closed operator set.
// Dependencies: param-logic, regex, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Display conditions (`show` / `hide`) are authored as query objects:
//!
//! ```json
//! { "$or": [ { "mode": "advanced" }, { "retries": { "$gte": 3 } } ] }
//! ```
//!
//! [`QueryParser`] turns the raw JSON into a [`QueryExpression`], an
//! [`Expression`] whose leaves are [`FieldCondition`]s. The evaluator only
//! ever sees this AST. [`render_query`] emits the canonical operator form,
//! which parses back to an equal expression.
//!
//! Security posture: query objects come from third-party manifests. Regex
//! patterns are bounded in source length and compiled size, and expression
//! depth is guarded during parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use param_logic::Expression;
use param_logic::ExpressionError;
use param_logic::ExpressionLimits;
use param_logic::ExpressionValidator;
use param_logic::GroupKind;
use regex::Regex;
use regex::RegexBuilder;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::is_valid_identifier;
use crate::core::numeric::truncates_to_zero;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum `$regex` pattern length in bytes.
pub const DEFAULT_MAX_REGEX_BYTES: usize = 1024;

/// Compiled-program size limit for `$regex` patterns.
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Resource limits applied while parsing query expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Structural limits for the boolean tree.
    pub expression: ExpressionLimits,
    /// Maximum `$regex` pattern length in bytes.
    pub max_regex_bytes: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            expression: ExpressionLimits::default(),
            max_regex_bytes: DEFAULT_MAX_REGEX_BYTES,
        }
    }
}

// ============================================================================
// SECTION: AST
// ============================================================================

/// Parsed display condition.
pub type QueryExpression = Expression<FieldCondition>;

/// Dotted value path referenced by a condition.
///
/// # Invariants
/// - Non-empty; every segment matches the identifier pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionPath {
    /// Path as authored.
    raw: String,
    /// Pre-split segments.
    segments: Vec<String>,
}

impl ConditionPath {
    /// Parses a dotted path such as `output.format`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().all(|segment| is_valid_identifier(segment)) {
            Some(Self {
                raw: raw.to_string(),
                segments,
            })
        } else {
            None
        }
    }

    /// Returns the dotted path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ConditionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Compiled `$regex` operand.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    /// Pattern source as authored.
    pattern: String,
    /// Whether `$options: "i"` was given.
    case_insensitive: bool,
    /// Compiled matcher.
    compiled: Regex,
}

impl RegexMatcher {
    /// Returns the pattern source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true when matching ignores case.
    #[must_use]
    pub const fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Tests a string against the pattern.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.compiled.is_match(haystack)
    }
}

impl PartialEq for RegexMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.case_insensitive == other.case_insensitive
    }
}

/// One operator applied to the value at a condition path.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOperator {
    /// `$eq`, also the implicit form `{path: literal}`.
    Eq(Value),
    /// `$ne`.
    Ne(Value),
    /// `$gt`.
    Gt(Value),
    /// `$gte`.
    Gte(Value),
    /// `$lt`.
    Lt(Value),
    /// `$lte`.
    Lte(Value),
    /// `$in`.
    In(Vec<Value>),
    /// `$nin`.
    Nin(Vec<Value>),
    /// `$exists`.
    Exists(bool),
    /// `$regex` with optional `$options`.
    Regex(RegexMatcher),
    /// `$mod: [divisor, remainder]`.
    Mod {
        /// Divisor; truncates to a non-zero integer.
        divisor: Number,
        /// Expected remainder.
        remainder: Number,
    },
    /// `$size`.
    Size(usize),
}

impl FieldOperator {
    /// Returns the surface-syntax operator name.
    #[must_use]
    pub const fn operator(&self) -> &'static str {
        match self {
            Self::Eq(_) => "$eq",
            Self::Ne(_) => "$ne",
            Self::Gt(_) => "$gt",
            Self::Gte(_) => "$gte",
            Self::Lt(_) => "$lt",
            Self::Lte(_) => "$lte",
            Self::In(_) => "$in",
            Self::Nin(_) => "$nin",
            Self::Exists(_) => "$exists",
            Self::Regex(_) => "$regex",
            Self::Mod {
                ..
            } => "$mod",
            Self::Size(_) => "$size",
        }
    }
}

/// Leaf of a query expression: operators applied to one path.
///
/// # Invariants
/// - `operators` is non-empty; all of them must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    /// Path the operators read.
    pub path: ConditionPath,
    /// Operators, all of which must hold.
    pub operators: Vec<FieldOperator>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing a query object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// An expression position held something other than an object.
    #[error("query expression must be an object")]
    NotAnObject,
    /// A `$`-prefixed key is not part of the operator set.
    #[error("unknown query operator: {0}")]
    UnknownOperator(String),
    /// `$and` / `$or` / `$nor` did not receive an array.
    #[error("{0} expects an array of query objects")]
    InvalidCombinator(&'static str),
    /// An operator object mixed `$` keys with field keys.
    #[error("operator object for {0} mixes operators and field keys")]
    MixedOperatorKeys(String),
    /// A field key is not a dotted identifier path.
    #[error("invalid condition path: {0}")]
    InvalidPath(String),
    /// An operator received an operand of the wrong shape.
    #[error("{operator} expects {expected}")]
    InvalidOperand {
        /// Operator name.
        operator: &'static str,
        /// Expected operand description.
        expected: &'static str,
    },
    /// A `$regex` pattern failed to compile.
    #[error("invalid $regex pattern: {0}")]
    InvalidRegex(String),
    /// A `$regex` pattern exceeded the length limit.
    #[error("$regex pattern exceeds {max_bytes} bytes (actual: {actual_bytes})")]
    RegexTooLarge {
        /// Configured limit.
        max_bytes: usize,
        /// Pattern length.
        actual_bytes: usize,
    },
    /// `$options` appeared without `$regex`.
    #[error("$options requires $regex")]
    OptionsWithoutRegex,
    /// `$options` held a flag other than `i`.
    #[error("unsupported $options flags: {0}")]
    UnsupportedRegexOption(String),
    /// Structural limits were exceeded.
    #[error(transparent)]
    Structure(#[from] ExpressionError),
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Parser for query objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParser {
    /// Limits applied to every parse.
    limits: QueryLimits,
}

impl QueryParser {
    /// Creates a parser with the given limits.
    #[must_use]
    pub const fn new(limits: QueryLimits) -> Self {
        Self {
            limits,
        }
    }

    /// Returns the configured limits.
    #[must_use]
    pub const fn limits(&self) -> QueryLimits {
        self.limits
    }

    /// Parses a query object.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] when the object is malformed or exceeds limits.
    pub fn parse(&self, raw: &Value) -> Result<QueryExpression, QueryError> {
        let expression = self.parse_expression(raw, 1)?;
        ExpressionValidator::new(self.limits.expression).validate(&expression)?;
        Ok(expression)
    }

    /// Parses one expression object at the given nesting level.
    fn parse_expression(&self, raw: &Value, depth: usize) -> Result<QueryExpression, QueryError> {
        let max_depth = self.limits.expression.max_depth;
        if depth > max_depth {
            return Err(ExpressionError::TooDeep {
                max_depth,
                actual_depth: depth,
            }
            .into());
        }
        let Value::Object(map) = raw else {
            return Err(QueryError::NotAnObject);
        };
        let mut clauses = Vec::with_capacity(map.len());
        for (key, value) in map {
            clauses.push(self.parse_clause(key, value, depth)?);
        }
        if clauses.len() == 1
            && let Some(single) = clauses.pop()
        {
            return Ok(single);
        }
        Ok(Expression::and(clauses))
    }

    /// Parses one key of an expression object.
    fn parse_clause(
        &self,
        key: &str,
        value: &Value,
        depth: usize,
    ) -> Result<QueryExpression, QueryError> {
        let kind = match key {
            "$and" => GroupKind::And,
            "$or" => GroupKind::Or,
            "$nor" => GroupKind::Nor,
            other if other.starts_with('$') => {
                return Err(QueryError::UnknownOperator(other.to_string()));
            }
            field => {
                let path = ConditionPath::parse(field)
                    .ok_or_else(|| QueryError::InvalidPath(field.to_string()))?;
                let operators = self.parse_operators(field, value)?;
                return Ok(Expression::predicate(FieldCondition {
                    path,
                    operators,
                }));
            }
        };
        let Value::Array(items) = value else {
            return Err(QueryError::InvalidCombinator(kind.operator()));
        };
        let children = items
            .iter()
            .map(|item| self.parse_expression(item, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Expression::group(kind, children))
    }

    /// Parses the value side of a field clause.
    fn parse_operators(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<Vec<FieldOperator>, QueryError> {
        let Value::Object(map) = value else {
            return Ok(vec![FieldOperator::Eq(value.clone())]);
        };
        let operator_keys = map.keys().filter(|key| key.starts_with('$')).count();
        if operator_keys == 0 {
            return Ok(vec![FieldOperator::Eq(value.clone())]);
        }
        if operator_keys != map.len() {
            return Err(QueryError::MixedOperatorKeys(field.to_string()));
        }
        let options = map.get("$options");
        if options.is_some() && !map.contains_key("$regex") {
            return Err(QueryError::OptionsWithoutRegex);
        }
        let mut operators = Vec::with_capacity(map.len());
        for (key, operand) in map {
            match key.as_str() {
                "$options" => {}
                "$regex" => operators.push(self.parse_regex(operand, options)?),
                other => operators.push(parse_operator(other, operand)?),
            }
        }
        Ok(operators)
    }

    /// Parses and compiles a `$regex` operand.
    fn parse_regex(
        &self,
        operand: &Value,
        options: Option<&Value>,
    ) -> Result<FieldOperator, QueryError> {
        let Value::String(pattern) = operand else {
            return Err(QueryError::InvalidOperand {
                operator: "$regex",
                expected: "a string pattern",
            });
        };
        if pattern.len() > self.limits.max_regex_bytes {
            return Err(QueryError::RegexTooLarge {
                max_bytes: self.limits.max_regex_bytes,
                actual_bytes: pattern.len(),
            });
        }
        let case_insensitive = match options {
            None => false,
            Some(Value::String(flags)) => match flags.as_str() {
                "" => false,
                "i" => true,
                other => return Err(QueryError::UnsupportedRegexOption(other.to_string())),
            },
            Some(_) => {
                return Err(QueryError::InvalidOperand {
                    operator: "$options",
                    expected: "a string of flags",
                });
            }
        };
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|err| QueryError::InvalidRegex(err.to_string()))?;
        Ok(FieldOperator::Regex(RegexMatcher {
            pattern: pattern.clone(),
            case_insensitive,
            compiled,
        }))
    }
}

/// Parses every operator except `$regex` / `$options`.
fn parse_operator(key: &str, operand: &Value) -> Result<FieldOperator, QueryError> {
    match key {
        "$eq" => Ok(FieldOperator::Eq(operand.clone())),
        "$ne" => Ok(FieldOperator::Ne(operand.clone())),
        "$gt" => ordered_operand("$gt", operand).map(FieldOperator::Gt),
        "$gte" => ordered_operand("$gte", operand).map(FieldOperator::Gte),
        "$lt" => ordered_operand("$lt", operand).map(FieldOperator::Lt),
        "$lte" => ordered_operand("$lte", operand).map(FieldOperator::Lte),
        "$in" => array_operand("$in", operand).map(FieldOperator::In),
        "$nin" => array_operand("$nin", operand).map(FieldOperator::Nin),
        "$exists" => match operand {
            Value::Bool(flag) => Ok(FieldOperator::Exists(*flag)),
            _ => Err(QueryError::InvalidOperand {
                operator: "$exists",
                expected: "a boolean",
            }),
        },
        "$mod" => parse_mod(operand),
        "$size" => operand
            .as_u64()
            .and_then(|size| usize::try_from(size).ok())
            .map(FieldOperator::Size)
            .ok_or(QueryError::InvalidOperand {
                operator: "$size",
                expected: "a non-negative integer",
            }),
        other => Err(QueryError::UnknownOperator(other.to_string())),
    }
}

/// Validates an ordering operand (number or string).
fn ordered_operand(operator: &'static str, operand: &Value) -> Result<Value, QueryError> {
    match operand {
        Value::Number(_) | Value::String(_) => Ok(operand.clone()),
        _ => Err(QueryError::InvalidOperand {
            operator,
            expected: "a number or string",
        }),
    }
}

/// Validates a membership operand.
fn array_operand(operator: &'static str, operand: &Value) -> Result<Vec<Value>, QueryError> {
    match operand {
        Value::Array(items) => Ok(items.clone()),
        _ => Err(QueryError::InvalidOperand {
            operator,
            expected: "an array",
        }),
    }
}

/// Parses `$mod: [divisor, remainder]`.
fn parse_mod(operand: &Value) -> Result<FieldOperator, QueryError> {
    let invalid = QueryError::InvalidOperand {
        operator: "$mod",
        expected: "[non-zero divisor, remainder]",
    };
    let Value::Array(items) = operand else {
        return Err(invalid);
    };
    let [Value::Number(divisor), Value::Number(remainder)] = items.as_slice() else {
        return Err(invalid);
    };
    if truncates_to_zero(divisor) {
        return Err(invalid);
    }
    Ok(FieldOperator::Mod {
        divisor: divisor.clone(),
        remainder: remainder.clone(),
    })
}

/// Parses a query object with default limits.
///
/// # Errors
///
/// Returns [`QueryError`] when the object is malformed or exceeds limits.
pub fn parse_query(raw: &Value) -> Result<QueryExpression, QueryError> {
    QueryParser::default().parse(raw)
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders an expression in canonical operator form.
///
/// Leaves render as `{path: {$op: operand, ...}}` and groups as
/// `{$and|$or|$nor: [...]}`.
#[must_use]
pub fn render_query(expression: &QueryExpression) -> Value {
    let mut out = Map::new();
    match expression.as_group() {
        Some((kind, children)) => {
            let rendered = children.iter().map(|child| render_query(child)).collect();
            out.insert(kind.operator().to_string(), Value::Array(rendered));
        }
        None => {
            if let Expression::Predicate(condition) = expression {
                let mut operators = Map::new();
                for operator in &condition.operators {
                    render_operator(operator, &mut operators);
                }
                out.insert(condition.path.as_str().to_string(), Value::Object(operators));
            }
        }
    }
    Value::Object(out)
}

/// Writes one operator into an operator object.
fn render_operator(operator: &FieldOperator, out: &mut Map<String, Value>) {
    let key = operator.operator().to_string();
    match operator {
        FieldOperator::Eq(value)
        | FieldOperator::Ne(value)
        | FieldOperator::Gt(value)
        | FieldOperator::Gte(value)
        | FieldOperator::Lt(value)
        | FieldOperator::Lte(value) => {
            out.insert(key, value.clone());
        }
        FieldOperator::In(items) | FieldOperator::Nin(items) => {
            out.insert(key, Value::Array(items.clone()));
        }
        FieldOperator::Exists(flag) => {
            out.insert(key, Value::Bool(*flag));
        }
        FieldOperator::Regex(matcher) => {
            out.insert(key, Value::String(matcher.pattern.clone()));
            if matcher.case_insensitive {
                out.insert("$options".to_string(), Value::String("i".to_string()));
            }
        }
        FieldOperator::Mod {
            divisor,
            remainder,
        } => {
            let operand = vec![Value::Number(divisor.clone()), Value::Number(remainder.clone())];
            out.insert(key, Value::Array(operand));
        }
        FieldOperator::Size(size) => {
            out.insert(key, Value::from(*size));
        }
    }
}
