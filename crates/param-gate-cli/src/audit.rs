// crates/param-gate-cli/src/audit.rs
// ============================================================================
// Module: CLI Audit Logging
// Description: Structured audit events for schema and value-tree commands.
// Purpose: Emit JSON-line audit records without ever logging parameter values.
// Dependencies: param-gate-config, param-gate-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Each CLI command that touches a schema or a value tree records one audit
//! event: `schema_validated`, `values_resolved`, `submission_filtered`, or
//! `query_evaluated`. Events carry fingerprints and counts only; submitted
//! values (secrets included) never reach a sink.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use param_gate_config::AuditConfig;
use param_gate_config::AuditSinkKind;
use param_gate_core::HashDigest;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome label shared by audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    /// The command completed.
    Ok,
    /// The input was refused.
    Rejected,
}

/// Schema validation audit event.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Canonical fingerprint of the authored schema.
    pub schema_hash: HashDigest,
    /// Validation outcome.
    pub outcome: AuditOutcome,
    /// Number of defects found.
    pub defect_count: usize,
}

/// Value resolution audit event.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Canonical fingerprint of the schema.
    pub schema_hash: HashDigest,
    /// Number of visible nodes, root included.
    pub visible_count: usize,
    /// Number of visible unions without a selected variant.
    pub incomplete_unions: usize,
}

/// Submission filtering audit event.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Canonical fingerprint of the schema.
    pub schema_hash: HashDigest,
    /// Number of dropped input values.
    pub dropped_count: usize,
    /// Number of values filled from defaults.
    pub defaulted_count: usize,
    /// Number of kept secret values.
    pub secret_count: usize,
    /// Number of visible unions without a selected variant.
    pub incomplete_unions: usize,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Standalone query evaluation audit event.
#[derive(Debug, Clone, Serialize)]
pub struct QueryAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Canonical hash of the query expression.
    pub expression_hash: HashDigest,
    /// Evaluation result.
    pub result: bool,
    /// Number of leaves recorded when a trace was requested.
    pub traced_leaves: Option<usize>,
}

/// Redaction label for events that never carry values.
const REDACTION_VALUES_OMITTED: &str = "values_omitted";

impl SchemaAuditEvent {
    /// Creates a schema validation event.
    #[must_use]
    pub fn new(schema_hash: HashDigest, defect_count: usize) -> Self {
        let outcome = if defect_count == 0 { AuditOutcome::Ok } else { AuditOutcome::Rejected };
        Self {
            event: "schema_validated",
            timestamp_ms: now_ms(),
            schema_hash,
            outcome,
            defect_count,
        }
    }
}

impl ResolveAuditEvent {
    /// Creates a value resolution event.
    #[must_use]
    pub fn new(schema_hash: HashDigest, visible_count: usize, incomplete_unions: usize) -> Self {
        Self {
            event: "values_resolved",
            timestamp_ms: now_ms(),
            schema_hash,
            visible_count,
            incomplete_unions,
        }
    }
}

/// Counts describing one filtered submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionCounts {
    /// Number of dropped input values.
    pub dropped: usize,
    /// Number of values filled from defaults.
    pub defaulted: usize,
    /// Number of kept secret values.
    pub secrets: usize,
    /// Number of visible unions without a selected variant.
    pub incomplete_unions: usize,
}

impl SubmissionAuditEvent {
    /// Creates a submission filtering event.
    #[must_use]
    pub fn new(schema_hash: HashDigest, counts: SubmissionCounts) -> Self {
        Self {
            event: "submission_filtered",
            timestamp_ms: now_ms(),
            schema_hash,
            dropped_count: counts.dropped,
            defaulted_count: counts.defaulted,
            secret_count: counts.secrets,
            incomplete_unions: counts.incomplete_unions,
            redaction: REDACTION_VALUES_OMITTED,
        }
    }
}

impl QueryAuditEvent {
    /// Creates a query evaluation event.
    #[must_use]
    pub fn new(expression_hash: HashDigest, result: bool, traced_leaves: Option<usize>) -> Self {
        Self {
            event: "query_evaluated",
            timestamp_ms: now_ms(),
            expression_hash,
            result,
            traced_leaves,
        }
    }
}

/// Returns the current time in milliseconds since the epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for CLI events.
pub trait AuditSink: Send + Sync {
    /// Record a schema validation event.
    fn record_schema(&self, event: &SchemaAuditEvent);

    /// Record a value resolution event.
    fn record_resolve(&self, _event: &ResolveAuditEvent) {}

    /// Record a submission filtering event.
    fn record_submission(&self, _event: &SubmissionAuditEvent) {}

    /// Record a query evaluation event.
    fn record_query(&self, _event: &QueryAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl StderrAuditSink {
    /// Writes one event as a JSON line to stderr.
    fn emit<T: Serialize>(event: &T) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

impl AuditSink for StderrAuditSink {
    fn record_schema(&self, event: &SchemaAuditEvent) {
        Self::emit(event);
    }

    fn record_resolve(&self, event: &ResolveAuditEvent) {
        Self::emit(event);
    }

    fn record_submission(&self, event: &SubmissionAuditEvent) {
        Self::emit(event);
    }

    fn record_query(&self, event: &QueryAuditEvent) {
        Self::emit(event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one event as a JSON line.
    fn emit<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record_schema(&self, event: &SchemaAuditEvent) {
        self.emit(event);
    }

    fn record_resolve(&self, event: &ResolveAuditEvent) {
        self.emit(event);
    }

    fn record_submission(&self, event: &SubmissionAuditEvent) {
        self.emit(event);
    }

    fn record_query(&self, event: &QueryAuditEvent) {
        self.emit(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record_schema(&self, _event: &SchemaAuditEvent) {}
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the audit sink selected by configuration.
///
/// # Errors
///
/// Returns an error when the file sink has no path or cannot be opened.
pub fn sink_from_config(config: &AuditConfig) -> io::Result<Box<dyn AuditSink>> {
    match config.sink {
        AuditSinkKind::Stderr => Ok(Box::new(StderrAuditSink)),
        AuditSinkKind::None => Ok(Box::new(NoopAuditSink)),
        AuditSinkKind::File => {
            let path = config.path.as_deref().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "audit file sink requires a path")
            })?;
            Ok(Box::new(FileAuditSink::new(Path::new(path))?))
        }
    }
}
