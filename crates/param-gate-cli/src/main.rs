// crates/param-gate-cli/src/main.rs
// ============================================================================
// Module: Param Gate CLI Entry Point
// Description: Command dispatcher for schema, resolution, and query workflows.
// Purpose: Provide a safe, localized CLI over the Param Gate core.
// Dependencies: clap, param-gate-cli, param-gate-config, param-gate-core, serde
// ============================================================================

//! ## Overview
//! The `param-gate` binary validates and fingerprints authored schemas,
//! resolves visibility and effective fields for a value tree, filters final
//! submissions, and evaluates standalone query expressions. Input files are
//! read with hard size limits from configuration; results are written as
//! canonical JSON to stdout and audit events go to the configured sink.
//! Security posture: inputs are untrusted and must be validated.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use param_gate_cli::audit::AuditSink;
use param_gate_cli::audit::QueryAuditEvent;
use param_gate_cli::audit::ResolveAuditEvent;
use param_gate_cli::audit::SchemaAuditEvent;
use param_gate_cli::audit::SubmissionAuditEvent;
use param_gate_cli::audit::SubmissionCounts;
use param_gate_cli::audit::sink_from_config;
use param_gate_cli::authoring;
use param_gate_cli::authoring::AuthoringFormat;
use param_gate_cli::i18n::Locale;
use param_gate_cli::i18n::set_locale;
use param_gate_cli::t;
use param_gate_config::ParamGateConfig;
use param_gate_core::CompiledSchema;
use param_gate_core::EffectiveField;
use param_gate_core::EffectiveSubmission;
use param_gate_core::FieldPath;
use param_gate_core::HashDigest;
use param_gate_core::LeafOutcome;
use param_gate_core::ParameterNode;
use param_gate_core::QueryParser;
use param_gate_core::SchemaDefect;
use param_gate_core::SchemaValidator;
use param_gate_core::SubmissionOptions;
use param_gate_core::UnionSelection;
use param_gate_core::ValueTree;
use param_gate_core::VisibilityMap;
use param_gate_core::effective_fields;
use param_gate_core::evaluate;
use param_gate_core::evaluate_traced;
use param_gate_core::filter_submission;
use param_gate_core::hashing::DEFAULT_HASH_ALGORITHM;
use param_gate_core::hashing::hash_canonical_json;
use param_gate_core::resolve;
use param_gate_core::schema_fingerprint;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the CLI output language.
const LANG_ENV: &str = "PARAM_GATE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "param-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `PARAM_GATE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Config file path (defaults to param-gate.toml or `PARAM_GATE_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Input format override for schema and value files.
    #[arg(long, value_enum, value_name = "FORMAT", global = true)]
    format: Option<AuthoringFormatArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Schema validation and fingerprinting.
    Schema {
        /// Selected schema subcommand.
        #[command(subcommand)]
        command: SchemaCommand,
    },
    /// Resolve visibility, unions, and effective fields for a value tree.
    Resolve(ResolveCommand),
    /// Filter a final value tree into an effective submission.
    Submit(SubmitCommand),
    /// Standalone query expression utilities.
    Query {
        /// Selected query subcommand.
        #[command(subcommand)]
        command: QueryCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Schema subcommands.
#[derive(Subcommand, Debug)]
enum SchemaCommand {
    /// Report every defect of a schema.
    Validate(SchemaFileArgs),
    /// Print the canonical fingerprint of a schema.
    Fingerprint(SchemaFileArgs),
}

/// Query subcommands.
#[derive(Subcommand, Debug)]
enum QueryCommand {
    /// Evaluate an expression against a value tree.
    Eval(QueryEvalCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate the selected config file.
    Validate,
}

/// Arguments naming one schema file.
#[derive(Args, Debug)]
struct SchemaFileArgs {
    /// Path to the authored schema.
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,
}

/// Arguments for value resolution.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Path to the authored schema.
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,
    /// Path to the value tree.
    #[arg(long, value_name = "PATH")]
    values: PathBuf,
    /// Locale for presentation text (defaults to `render.default_locale`).
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,
}

/// Arguments for submission filtering.
#[derive(Args, Debug)]
struct SubmitCommand {
    /// Path to the authored schema.
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,
    /// Path to the final value tree.
    #[arg(long, value_name = "PATH")]
    values: PathBuf,
    /// Do not fill absent visible fields from defaults.
    #[arg(long, action = ArgAction::SetTrue)]
    no_defaults: bool,
}

/// Arguments for query evaluation.
#[derive(Args, Debug)]
struct QueryEvalCommand {
    /// Query expression as inline JSON.
    #[arg(long, value_name = "JSON")]
    expr: String,
    /// Path to the value tree.
    #[arg(long, value_name = "PATH")]
    values: PathBuf,
    /// Include the result of every consulted leaf.
    #[arg(long, action = ArgAction::SetTrue)]
    explain: bool,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

/// Supported input formats.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum AuthoringFormatArg {
    /// JSON input.
    Json,
    /// YAML input.
    Yaml,
    /// RON input.
    Ron,
}

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = load_config(cli.config.as_deref())?;
    let format = cli.format.map(AuthoringFormat::from);
    match command {
        Commands::Schema {
            command,
        } => command_schema(&CommandContext::new(config, format)?, &command),
        Commands::Resolve(command) => {
            command_resolve(&CommandContext::new(config, format)?, &command)
        }
        Commands::Submit(command) => {
            command_submit(&CommandContext::new(config, format)?, &command)
        }
        Commands::Query {
            command,
        } => command_query(&CommandContext::new(config, format)?, &command),
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Command Context
// ============================================================================

/// Shared state for commands that read schemas or value trees.
struct CommandContext {
    /// Validated configuration.
    config: ParamGateConfig,
    /// Input format override.
    format: Option<AuthoringFormat>,
    /// Audit sink selected by configuration.
    audit: Box<dyn AuditSink>,
}

impl CommandContext {
    /// Builds the context and opens the audit sink.
    fn new(config: ParamGateConfig, format: Option<AuthoringFormat>) -> CliResult<Self> {
        let audit = sink_from_config(&config.audit)
            .map_err(|err| CliError::new(t!("audit.init_failed", error = err)))?;
        Ok(Self {
            config,
            format,
            audit,
        })
    }

    /// Returns the schema validator for the configured limits.
    const fn validator(&self) -> SchemaValidator {
        SchemaValidator::new(self.config.schema_limits())
    }

    /// Reads and parses an authored schema.
    fn read_schema(&self, path: &Path) -> CliResult<ParameterNode> {
        let input = self.read_input(path, &t!("input.kind.schema"))?;
        let format = resolve_authoring_format(path, self.format)?;
        authoring::parse_schema(&input, format).map_err(|err| {
            CliError::new(t!("authoring.load_failed", path = path.display(), error = err))
        })
    }

    /// Reads and parses a value tree.
    fn read_values(&self, path: &Path) -> CliResult<ValueTree> {
        let input = self.read_input(path, &t!("input.kind.values"))?;
        let format = resolve_authoring_format(path, self.format)?;
        authoring::parse_values(&input, format).map_err(|err| {
            CliError::new(t!("authoring.load_failed", path = path.display(), error = err))
        })
    }

    /// Reads a UTF-8 input file within the configured size limit.
    fn read_input(&self, path: &Path, kind: &str) -> CliResult<String> {
        read_text_input(path, kind, self.config.limits.max_input_bytes)
    }

    /// Reads, fingerprints, and compiles a schema, reporting defects on stderr.
    fn compile_schema(&self, path: &Path) -> CliResult<(CompiledSchema, HashDigest)> {
        let root = self.read_schema(path)?;
        let schema_hash = fingerprint(&root)?;
        match self.validator().compile(root) {
            Ok(schema) => Ok((schema, schema_hash)),
            Err(result) => {
                self.audit.record_schema(&SchemaAuditEvent::new(
                    schema_hash,
                    result.defects.len(),
                ));
                let mut lines = vec![t!("schema.invalid", path = path.display())];
                lines.extend(
                    result.defects.iter().map(|defect| t!("schema.defect", defect = defect)),
                );
                Err(CliError::new(lines.join("\n")))
            }
        }
    }
}

// ============================================================================
// SECTION: Schema Commands
// ============================================================================

/// Schema validation report.
#[derive(Debug, Serialize)]
struct SchemaReport<'a> {
    /// Whether the schema has no defects.
    valid: bool,
    /// Canonical fingerprint of the authored schema.
    schema_hash: &'a HashDigest,
    /// Every defect found.
    defects: &'a [SchemaDefect],
}

/// Dispatches schema subcommands.
fn command_schema(context: &CommandContext, command: &SchemaCommand) -> CliResult<ExitCode> {
    match command {
        SchemaCommand::Validate(args) => command_schema_validate(context, args),
        SchemaCommand::Fingerprint(args) => command_schema_fingerprint(context, args),
    }
}

/// Executes the schema validation command.
fn command_schema_validate(context: &CommandContext, args: &SchemaFileArgs) -> CliResult<ExitCode> {
    let root = context.read_schema(&args.schema)?;
    let schema_hash = fingerprint(&root)?;
    let result = context.validator().validate(&root);
    context.audit.record_schema(&SchemaAuditEvent::new(schema_hash.clone(), result.defects.len()));
    write_json(&SchemaReport {
        valid: result.is_valid(),
        schema_hash: &schema_hash,
        defects: &result.defects,
    })?;
    if result.is_valid() {
        return Ok(ExitCode::SUCCESS);
    }
    write_stderr_line(&t!("schema.validate.failed", count = result.defects.len()))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    Ok(ExitCode::FAILURE)
}

/// Executes the schema fingerprint command.
fn command_schema_fingerprint(
    context: &CommandContext,
    args: &SchemaFileArgs,
) -> CliResult<ExitCode> {
    let root = context.read_schema(&args.schema)?;
    let schema_hash = fingerprint(&root)?;
    write_stdout_line(&schema_hash.to_string())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Resolve Command
// ============================================================================

/// Resolution output for a host renderer.
#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    /// Canonical fingerprint of the schema.
    schema_hash: &'a HashDigest,
    /// Per-node visibility.
    visibility: &'a VisibilityMap,
    /// Per-union selected variant.
    unions: &'a UnionSelection,
    /// Visible unions without a selected variant.
    incomplete_unions: Vec<&'a FieldPath>,
    /// Visible fields in document order.
    fields: Vec<EffectiveField>,
}

/// Executes the resolve command.
fn command_resolve(context: &CommandContext, command: &ResolveCommand) -> CliResult<ExitCode> {
    let (schema, schema_hash) = context.compile_schema(&command.schema)?;
    let values = context.read_values(&command.values)?;
    let resolution = resolve(&schema, &values);
    let resolver = context.config.render.resolver(command.locale.as_deref());
    let output = ResolveOutput {
        schema_hash: &schema_hash,
        visibility: &resolution.visibility,
        unions: &resolution.unions,
        incomplete_unions: resolution.incomplete_unions(),
        fields: effective_fields(&schema, &values, &resolver),
    };
    context.audit.record_resolve(&ResolveAuditEvent::new(
        schema_hash.clone(),
        resolution.visibility.visible().len(),
        output.incomplete_unions.len(),
    ));
    write_json(&output)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Submit Command
// ============================================================================

/// Submission output.
#[derive(Debug, Serialize)]
struct SubmitOutput<'a> {
    /// Canonical fingerprint of the schema.
    schema_hash: &'a HashDigest,
    /// Effective submission.
    submission: &'a EffectiveSubmission,
}

/// Executes the submit command.
///
/// Exits with failure when a visible union has no selected variant; the
/// pruned submission is still printed.
fn command_submit(context: &CommandContext, command: &SubmitCommand) -> CliResult<ExitCode> {
    let (schema, schema_hash) = context.compile_schema(&command.schema)?;
    let values = context.read_values(&command.values)?;
    let options = submission_options(&context.config, command.no_defaults);
    let submission = filter_submission(&schema, &values, options);
    context.audit.record_submission(&SubmissionAuditEvent::new(
        schema_hash.clone(),
        SubmissionCounts {
            dropped: submission.dropped.len(),
            defaulted: submission.defaulted.len(),
            secrets: submission.secret_paths.len(),
            incomplete_unions: submission.incomplete_unions.len(),
        },
    ));
    write_json(&SubmitOutput {
        schema_hash: &schema_hash,
        submission: &submission,
    })?;
    if submission.incomplete_unions.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Combines the configured default policy with the command flag.
const fn submission_options(config: &ParamGateConfig, no_defaults: bool) -> SubmissionOptions {
    SubmissionOptions {
        apply_defaults: config.render.apply_defaults && !no_defaults,
    }
}

// ============================================================================
// SECTION: Query Commands
// ============================================================================

/// Query evaluation output.
#[derive(Debug, Serialize)]
struct QueryOutput {
    /// Evaluation result.
    result: bool,
    /// Consulted leaves, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    leaves: Option<Vec<LeafOutcome>>,
}

/// Dispatches query subcommands.
fn command_query(context: &CommandContext, command: &QueryCommand) -> CliResult<ExitCode> {
    match command {
        QueryCommand::Eval(command) => command_query_eval(context, command),
    }
}

/// Executes the query evaluation command.
fn command_query_eval(context: &CommandContext, command: &QueryEvalCommand) -> CliResult<ExitCode> {
    let raw = parse_expression_json(&command.expr, context.config.limits.max_input_bytes)?;
    let expression = QueryParser::new(context.config.query_limits())
        .parse(&raw)
        .map_err(|err| CliError::new(t!("query.invalid", error = err)))?;
    let expression_hash = hash_canonical_json(DEFAULT_HASH_ALGORITHM, &raw)
        .map_err(|err| CliError::new(t!("hash.failed", error = err)))?;
    let values = context.read_values(&command.values)?;
    let output = if command.explain {
        let (result, leaves) = evaluate_traced(&expression, &values);
        QueryOutput {
            result,
            leaves: Some(leaves),
        }
    } else {
        QueryOutput {
            result: evaluate(&expression, &values),
            leaves: None,
        }
    };
    context.audit.record_query(&QueryAuditEvent::new(
        expression_hash,
        output.result,
        output.leaves.as_ref().map(Vec::len),
    ));
    write_json(&output)?;
    Ok(ExitCode::SUCCESS)
}

/// Parses an inline expression as JSON within the input size limit.
fn parse_expression_json(expr: &str, max_bytes: usize) -> CliResult<Value> {
    if expr.len() > max_bytes {
        return Err(CliError::new(t!(
            "input.read_too_large",
            kind = "--expr",
            path = "-",
            size = expr.len(),
            limit = max_bytes
        )));
    }
    serde_json::from_str(expr).map_err(|err| CliError::new(t!("query.json_invalid", error = err)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<ParamGateConfig> {
    ParamGateConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Executes the config validation command after a successful load.
fn command_config_validate() -> CliResult<ExitCode> {
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Reads a bounded UTF-8 text file, labelling errors with `kind`.
fn read_text_input(path: &Path, kind: &str, max_bytes: usize) -> CliResult<String> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(t!("input.read_failed", kind = kind, path = path.display(), error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    String::from_utf8(bytes)
        .map_err(|_| CliError::new(t!("input.not_utf8", kind = kind, path = path.display())))
}

/// Resolves the input format from the override or the file extension.
fn resolve_authoring_format(
    path: &Path,
    format: Option<AuthoringFormat>,
) -> CliResult<AuthoringFormat> {
    if let Some(format) = format {
        return Ok(format);
    }
    authoring::detect_format(path)
        .ok_or_else(|| CliError::new(t!("authoring.format.missing", path = path.display())))
}

/// Fingerprints an authored schema.
fn fingerprint(root: &ParameterNode) -> CliResult<HashDigest> {
    schema_fingerprint(root).map_err(|err| CliError::new(t!("hash.failed", error = err)))
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Converts CLI format selection to authoring formats.
impl From<AuthoringFormatArg> for AuthoringFormat {
    fn from(value: AuthoringFormatArg) -> Self {
        match value {
            AuthoringFormatArg::Json => Self::Json,
            AuthoringFormatArg::Yaml => Self::Yaml,
            AuthoringFormatArg::Ron => Self::Ron,
        }
    }
}

/// Converts CLI language selection to locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a value as canonical JSON to stdout with a trailing newline.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    bytes.push(b'\n');
    std::io::stdout().write_all(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
