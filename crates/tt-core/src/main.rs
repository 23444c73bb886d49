//! Time Triage Core - learning and resampling CLI
//!
//! The main entry point for tt-core, handling:
//! - Splitting an exported time-entry table into train/test/validate
//! - Online learning of per-entry modification probabilities
//! - Bootstrap resampling of per-bundle statistics
//! - Post-hoc analysis of a scored table

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use tt_common::{format_error_human, Error, ErrorCategory, OutputFormat, Result, RunId};
use tt_common::{StructuredError, SCHEMA_VERSION};
use tt_config::{load_model_config, LoadedConfig};
use tt_core::analyse::analyse;
use tt_core::dataset::{
    category_counts, create, files, read_entries_from, read_model_from, split_entries,
    write_datasets, write_entries, write_model, SplitReport,
};
use tt_core::exit_codes::ExitCode;
use tt_core::learn::{learn, summarize_scored, BundleSummary, LearnOptions, LearnOutcome};
use tt_core::log_event;
use tt_core::logging::{event_names, init_logging, LogConfig, LogContext, LogFormat, LogLevel, Stage};
use tt_core::resample::{resample, ResampleOptions, ResampleOutcome};

/// Time Triage Core - classify hand-modified time entries
#[derive(Parser)]
#[command(name = "tt-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to model.json (skips TT_CONFIG and the XDG search)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding data.csv and the derived tables
    #[arg(long, global = true, env = "TT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human or jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Partition data.csv into train/test/validate tables
    Split(SplitArgs),

    /// Learn per-entry probabilities and write model.csv
    Learn(LearnArgs),

    /// Bootstrap bundle statistics from model.csv into datasets.csv
    Resample(ResampleArgs),

    /// Learn and resample in one pass
    Run(RunArgs),

    /// Summarize a scored model table
    Analyse(AnalyseArgs),

    /// Validate configuration
    Check,

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct SplitArgs {
    /// Input table (default: <data-dir>/data.csv)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Shuffle with this seed before splitting (default keeps order)
    #[arg(long, value_name = "SEED")]
    shuffle: Option<u64>,
}

#[derive(Args, Debug)]
struct LearnOverrides {
    /// Calendar-day transitions per bundle (overrides day_span)
    #[arg(long)]
    day_span: Option<u32>,
}

#[derive(Args, Debug)]
struct ResampleOverrides {
    /// Number of bootstrap samples (overrides samples)
    #[arg(long)]
    samples: Option<usize>,

    /// RNG seed (overrides seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Drop bundles containing only one class before sampling
    #[arg(long)]
    exclude_single_class: bool,
}

#[derive(Args, Debug)]
struct LearnArgs {
    /// Input table, most recent entry first (default: <data-dir>/train.csv)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Scored table (default: <data-dir>/model.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    overrides: LearnOverrides,
}

#[derive(Args, Debug)]
struct ResampleArgs {
    /// Scored table (default: <data-dir>/model.csv)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Sample table (default: <data-dir>/datasets.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    overrides: ResampleOverrides,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Input table, most recent entry first (default: <data-dir>/train.csv)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Scored table (default: <data-dir>/model.csv)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Sample table (default: <data-dir>/datasets.csv)
    #[arg(long)]
    datasets: Option<PathBuf>,

    #[command(flatten)]
    learn: LearnOverrides,

    #[command(flatten)]
    resample: ResampleOverrides,
}

#[derive(Args, Debug)]
struct AnalyseArgs {
    /// Scored table (default: <data-dir>/model.csv)
    #[arg(long)]
    model: Option<PathBuf>,
}

/// Rendered result of one command.
struct CommandOutput {
    command: &'static str,
    payload: serde_json::Value,
    summary: String,
    markdown: String,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Clean,
                _ => ExitCode::ArgsError,
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };

    // JSON payloads on stdout pair with JSONL logs on stderr unless told otherwise
    let mut log_config = LogConfig::from_env(cli_level, cli.global.log_format);
    if cli.global.log_format.is_none()
        && std::env::var_os("TT_LOG_FORMAT").is_none()
        && cli.global.format == OutputFormat::Json
    {
        log_config = log_config.with_format(LogFormat::Jsonl);
    }
    init_logging(&log_config);

    let exit_code = match &cli.command {
        Commands::Split(args) => run_split(&cli.global, args),
        Commands::Learn(args) => run_learn(&cli.global, args),
        Commands::Resample(args) => run_resample(&cli.global, args),
        Commands::Run(args) => run_pipeline(&cli.global, args),
        Commands::Analyse(args) => run_analyse(&cli.global, args),
        Commands::Check => run_check(&cli.global),
        Commands::Version => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command drivers
// ============================================================================

fn run_split(global: &GlobalOpts, args: &SplitArgs) -> ExitCode {
    run_command(global, "split", |ctx, loaded| split_command(global, args, ctx, loaded))
}

fn run_learn(global: &GlobalOpts, args: &LearnArgs) -> ExitCode {
    run_command(global, "learn", |ctx, loaded| learn_command(global, args, ctx, loaded))
}

fn run_resample(global: &GlobalOpts, args: &ResampleArgs) -> ExitCode {
    run_command(global, "resample", |ctx, loaded| {
        resample_command(global, args, ctx, loaded)
    })
}

fn run_pipeline(global: &GlobalOpts, args: &RunArgs) -> ExitCode {
    run_command(global, "run", |ctx, loaded| pipeline_command(global, args, ctx, loaded))
}

fn run_analyse(global: &GlobalOpts, args: &AnalyseArgs) -> ExitCode {
    run_command(global, "analyse", |ctx, _| analyse_command(global, args, ctx))
}

/// Load configuration, run `body`, and render either its output or the error.
fn run_command<F>(global: &GlobalOpts, command: &'static str, body: F) -> ExitCode
where
    F: FnOnce(&LogContext, &mut LoadedConfig) -> Result<CommandOutput>,
{
    let run_id = RunId::new();
    let ctx = LogContext::new(run_id.to_string());

    log_event!(
        ctx,
        INFO,
        event_names::RUN_STARTED,
        Stage::Init,
        "run started",
        command = command
    );

    let mut loaded = match load_config(global, &ctx) {
        Ok(loaded) => loaded,
        Err(err) => return output_error(global, &ctx, command, &err),
    };
    let ctx = ctx.with_config_id(loaded.snapshot.short_id());

    // A panic anywhere in the body, rayon workers included, is a bug
    let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| body(&ctx, &mut loaded)));
    let result = match outcome {
        Ok(result) => result,
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            log_event!(
                ctx,
                ERROR,
                event_names::INTERNAL_ERROR,
                Stage::Init,
                "command panicked",
                command = command,
                error = message.as_str()
            );
            return ExitCode::InternalError;
        }
    };

    match result {
        Ok(output) => {
            log_event!(
                ctx,
                INFO,
                event_names::RUN_FINISHED,
                Stage::Export,
                "run finished",
                command = command
            );
            emit(global, &ctx, output);
            ExitCode::Clean
        }
        Err(err) => output_error(global, &ctx, command, &err),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn load_config(global: &GlobalOpts, ctx: &LogContext) -> Result<LoadedConfig> {
    let loaded = load_model_config(global.config.as_deref())?;
    let source = loaded.path.source.to_string();
    match loaded.path.path.as_deref() {
        Some(path) => {
            let path = path.display().to_string();
            log_event!(
                ctx,
                INFO,
                event_names::CONFIG_LOADED,
                Stage::Init,
                "model config loaded",
                path = path.as_str(),
                source = source.as_str()
            );
        }
        None => {
            log_event!(
                ctx,
                INFO,
                event_names::CONFIG_DEFAULT_USED,
                Stage::Init,
                "no model.json found, using defaults"
            );
        }
    }
    Ok(loaded)
}

/// Re-validate after CLI overrides so flags obey the same rules as the file.
fn revalidate(loaded: &LoadedConfig) -> Result<()> {
    tt_config::validate::validate_model_config(&loaded.config)?;
    Ok(())
}

fn apply_learn_overrides(loaded: &mut LoadedConfig, overrides: &LearnOverrides) -> Result<()> {
    if let Some(day_span) = overrides.day_span {
        loaded.config.day_span = day_span;
    }
    revalidate(loaded)
}

fn apply_resample_overrides(loaded: &mut LoadedConfig, overrides: &ResampleOverrides) {
    if let Some(samples) = overrides.samples {
        loaded.config.samples = samples;
    }
    if overrides.seed.is_some() {
        loaded.config.seed = overrides.seed;
    }
    if overrides.exclude_single_class {
        loaded.config.exclude_single_class_bundles = true;
    }
}

fn table_path(global: &GlobalOpts, explicit: Option<&PathBuf>, name: &str) -> PathBuf {
    explicit
        .cloned()
        .unwrap_or_else(|| global.data_dir.join(name))
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// Commands
// ============================================================================

fn split_command(
    global: &GlobalOpts,
    args: &SplitArgs,
    ctx: &LogContext,
    loaded: &mut LoadedConfig,
) -> Result<CommandOutput> {
    let input = table_path(global, args.input.as_ref(), files::DATA);
    let entries = read_entries_from(&input)?;
    log_loaded(ctx, &input, entries.len());

    let categories = category_counts(&entries);
    let partition = split_entries(entries, &loaded.config.split, args.shuffle)?;

    let mut written = Vec::new();
    for (name, part) in [
        (files::TRAIN, &partition.train),
        (files::TEST, &partition.test),
        (files::VALIDATE, &partition.validate),
    ] {
        let path = global.data_dir.join(name);
        write_entries(create(&path)?, part)?;
        log_written(ctx, &path, part.len());
        written.push(display(&path));
    }

    let (train, test, validate) = partition.sizes();
    let report = SplitReport {
        train,
        test,
        validate,
        shuffled: args.shuffle.is_some(),
        categories,
    };
    log_event!(
        ctx,
        INFO,
        event_names::SPLIT_FINISHED,
        Stage::Split,
        "split finished",
        train = train as u64,
        test = test as u64,
        validate = validate as u64
    );

    let mut markdown = String::from("## Split\n\n| partition | entries |\n|---|---|\n");
    markdown.push_str(&format!(
        "| train | {} |\n| test | {} |\n| validate | {} |\n\n",
        train, test, validate
    ));
    markdown.push_str("| feature | distinct values |\n|---|---|\n");
    for (feature, count) in &report.categories {
        markdown.push_str(&format!("| {} | {} |\n", feature, count));
    }

    Ok(CommandOutput {
        command: "split",
        summary: format!(
            "split: train={} test={} validate={}",
            train, test, validate
        ),
        payload: serde_json::json!({
            "input": display(&input),
            "outputs": written,
            "report": report,
        }),
        markdown,
    })
}

/// Read, learn and write the scored table.
fn learn_to_table(
    input: &Path,
    output: &Path,
    loaded: &LoadedConfig,
    ctx: &LogContext,
) -> Result<(LearnOutcome, usize)> {
    let entries = read_entries_from(input)?;
    log_loaded(ctx, input, entries.len());

    let outcome = learn(&entries, &LearnOptions::from(&loaded.config), ctx)?;
    write_model(create(output)?, outcome.scored())?;
    log_written(ctx, output, entries.len());
    Ok((outcome, entries.len()))
}

/// Resample and write the sample table.
fn resample_to_table(
    summaries: &[BundleSummary],
    output: &Path,
    loaded: &LoadedConfig,
    ctx: &LogContext,
) -> Result<ResampleOutcome> {
    let outcome = resample(summaries, &ResampleOptions::from(&loaded.config), ctx)?;
    write_datasets(create(output)?, &outcome.datasets)?;
    log_written(ctx, output, outcome.datasets.len());
    Ok(outcome)
}

fn learn_command(
    global: &GlobalOpts,
    args: &LearnArgs,
    ctx: &LogContext,
    loaded: &mut LoadedConfig,
) -> Result<CommandOutput> {
    apply_learn_overrides(loaded, &args.overrides)?;
    let input = table_path(global, args.input.as_ref(), files::TRAIN);
    let output = table_path(global, args.output.as_ref(), files::MODEL);

    let (outcome, entries) = learn_to_table(&input, &output, loaded, ctx)?;
    let summaries = outcome.summaries();

    Ok(CommandOutput {
        command: "learn",
        summary: format!(
            "learn: {} entries in {} bundles, mean terminal error {:.4}",
            entries,
            summaries.len(),
            mean_error(&summaries)
        ),
        markdown: bundles_markdown(&summaries),
        payload: serde_json::json!({
            "input": display(&input),
            "output": display(&output),
            "entries": entries,
            "day_span": loaded.config.day_span,
            "kappa": outcome.kappa,
            "guard_clamps": outcome.guards(),
            "bundles": summaries,
        }),
    })
}

fn resample_command(
    global: &GlobalOpts,
    args: &ResampleArgs,
    ctx: &LogContext,
    loaded: &mut LoadedConfig,
) -> Result<CommandOutput> {
    apply_resample_overrides(loaded, &args.overrides);
    let model = table_path(global, args.model.as_ref(), files::MODEL);
    let output = table_path(global, args.output.as_ref(), files::DATASETS);

    let scored = read_model_from(&model)?;
    log_loaded(ctx, &model, scored.len());
    let summaries = summarize_scored(&scored);
    let outcome = resample_to_table(&summaries, &output, loaded, ctx)?;

    Ok(CommandOutput {
        command: "resample",
        summary: resample_summary(&outcome, summaries.len()),
        markdown: datasets_markdown(&outcome),
        payload: serde_json::json!({
            "model": display(&model),
            "output": display(&output),
            "bundles": summaries.len(),
            "resample": outcome,
        }),
    })
}

fn pipeline_command(
    global: &GlobalOpts,
    args: &RunArgs,
    ctx: &LogContext,
    loaded: &mut LoadedConfig,
) -> Result<CommandOutput> {
    apply_learn_overrides(loaded, &args.learn)?;
    apply_resample_overrides(loaded, &args.resample);
    let input = table_path(global, args.input.as_ref(), files::TRAIN);
    let model = table_path(global, args.model.as_ref(), files::MODEL);
    let datasets = table_path(global, args.datasets.as_ref(), files::DATASETS);

    let (outcome, entries) = learn_to_table(&input, &model, loaded, ctx)?;
    let summaries = outcome.summaries();
    let resampled = resample_to_table(&summaries, &datasets, loaded, ctx)?;

    let mut markdown = bundles_markdown(&summaries);
    markdown.push('\n');
    markdown.push_str(&datasets_markdown(&resampled));

    Ok(CommandOutput {
        command: "run",
        summary: format!(
            "run: {} entries; {}",
            entries,
            resample_summary(&resampled, summaries.len())
        ),
        markdown,
        payload: serde_json::json!({
            "input": display(&input),
            "model": display(&model),
            "datasets": display(&datasets),
            "entries": entries,
            "kappa": outcome.kappa,
            "guard_clamps": outcome.guards(),
            "bundles": summaries,
            "resample": resampled,
        }),
    })
}

fn analyse_command(
    global: &GlobalOpts,
    args: &AnalyseArgs,
    ctx: &LogContext,
) -> Result<CommandOutput> {
    let model = table_path(global, args.model.as_ref(), files::MODEL);
    let scored = read_model_from(&model)?;
    log_loaded(ctx, &model, scored.len());
    if scored.is_empty() {
        return Err(Error::EmptyDataset(format!(
            "{} has no scored entries",
            display(&model)
        )));
    }

    let analysis = analyse(&scored);
    log_event!(
        ctx,
        INFO,
        event_names::ANALYSE_FINISHED,
        Stage::Analyse,
        "analysis finished",
        entries = analysis.entries as u64,
        misclassification_rate = analysis.misclassification_rate
    );

    Ok(CommandOutput {
        command: "analyse",
        summary: format!(
            "analyse: {} entries, misclassification {:.4}, f1 {:.4}, f2 {:.4}",
            analysis.entries, analysis.misclassification_rate, analysis.f1, analysis.f2
        ),
        markdown: analysis.to_markdown(),
        payload: serde_json::json!({
            "model": display(&model),
            "analysis": analysis,
        }),
    })
}

fn run_check(global: &GlobalOpts) -> ExitCode {
    let run_id = RunId::new();
    let ctx = LogContext::new(run_id.to_string());

    let (status, check) = match load_config(global, &ctx) {
        Ok(loaded) => (
            ExitCode::Clean,
            serde_json::json!({
                "check": "model_config",
                "status": "ok",
                "source": loaded.path.source.to_string(),
                "path": loaded.path.path.as_deref().map(display),
                "using_defaults": loaded.path.path.is_none(),
                "config_id": loaded.snapshot.short_id(),
                "config": loaded.config,
            }),
        ),
        Err(err) => {
            log_failure(&ctx, &err);
            (
                ExitCode::from(&err),
                serde_json::json!({
                    "check": "model_config",
                    "status": "error",
                    "error": StructuredError::from(&err),
                }),
            )
        }
    };

    let ok = status.is_success();
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": ctx.run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "command": "check",
                "status": if ok { "ok" } else { "error" },
                "checks": [check],
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
        }
        OutputFormat::Summary => {
            println!("[{}] check: {}", ctx.run_id, if ok { "ok" } else { "error" });
        }
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            println!("# Configuration Check");
            println!();
            println!(
                "- model_config: {}",
                check["status"].as_str().unwrap_or("unknown")
            );
        }
    }

    status
}

fn print_version(global: &GlobalOpts) {
    let version_info = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "tt_core_version": env!("CARGO_PKG_VERSION"),
        "rust_version": env!("CARGO_PKG_RUST_VERSION"),
    });

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&version_info).unwrap_or_default()
            );
        }
        OutputFormat::Exitcode => {}
        _ => {
            println!("tt-core {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", SCHEMA_VERSION);
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn emit(global: &GlobalOpts, ctx: &LogContext, output: CommandOutput) {
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": ctx.run_id,
                "config_id": ctx.config_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "command": output.command,
                "status": "ok",
                "payload": output.payload,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
        }
        OutputFormat::Md => println!("{}", output.markdown),
        OutputFormat::Summary => println!("[{}] {}", ctx.run_id, output.summary),
        OutputFormat::Exitcode => {}
    }
}

fn output_error(global: &GlobalOpts, ctx: &LogContext, command: &str, err: &Error) -> ExitCode {
    let exit_code = ExitCode::from(err);
    log_failure(ctx, err);

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "run_id": ctx.run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "command": command,
                "status": "error",
                "exit_code": exit_code.code_name(),
                "error": StructuredError::from(err),
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&response).unwrap_or_default()
            );
        }
        OutputFormat::Summary => {
            eprintln!("[{}] {} error: {}", ctx.run_id, command, err);
        }
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            eprintln!("{}", format_error_human(err, std::io::stderr().is_terminal()));
        }
    }

    exit_code
}

fn log_failure(ctx: &LogContext, err: &Error) {
    let code = err.code();
    let message = err.to_string();
    match err.category() {
        ErrorCategory::Config => log_event!(
            ctx,
            ERROR,
            event_names::CONFIG_ERROR,
            Stage::Init,
            "configuration rejected",
            code = code,
            error = message.as_str()
        ),
        _ => log_event!(
            ctx,
            ERROR,
            event_names::RUN_FAILED,
            Stage::Load,
            "run failed",
            code = code,
            error = message.as_str()
        ),
    }
}

fn log_loaded(ctx: &LogContext, path: &Path, rows: usize) {
    let path = display(path);
    log_event!(
        ctx,
        INFO,
        event_names::LOAD_FINISHED,
        Stage::Load,
        "table loaded",
        path = path.as_str(),
        rows = rows as u64
    );
}

fn log_written(ctx: &LogContext, path: &Path, rows: usize) {
    let path = display(path);
    log_event!(
        ctx,
        INFO,
        event_names::EXPORT_WRITTEN,
        Stage::Export,
        "table written",
        path = path.as_str(),
        rows = rows as u64
    );
}

fn mean_error(summaries: &[BundleSummary]) -> f64 {
    let errors: Vec<f64> = summaries.iter().map(|s| s.error_rate).collect();
    tt_math::mean(&errors).unwrap_or(0.0)
}

fn resample_summary(outcome: &ResampleOutcome, bundles: usize) -> String {
    let errors: Vec<f64> = outcome.datasets.iter().map(|d| d.error).collect();
    format!(
        "resample: {} samples over {} bundles ({} excluded), seed {}, mean error {:.4}",
        outcome.datasets.len(),
        bundles,
        outcome.excluded,
        outcome.seed,
        tt_math::mean(&errors).unwrap_or(0.0)
    )
}

fn bundles_markdown(summaries: &[BundleSummary]) -> String {
    let mut out = String::from("## Bundles\n\n");
    out.push_str("| bundle | entries | error | entropy | f1 | f2 | single class |\n");
    out.push_str("|---|---|---|---|---|---|---|\n");
    for s in summaries {
        out.push_str(&format!(
            "| {} | {} | {:.4} | {:.4} | {:.4} | {:.4} | {} |\n",
            s.id, s.entries, s.error_rate, s.entropy_rate, s.f1, s.f2, s.single_class
        ));
    }
    out
}

fn datasets_markdown(outcome: &ResampleOutcome) -> String {
    let mut out = format!(
        "## Resampled datasets\n\nseed `{}`, {} single-class bundles excluded\n\n",
        outcome.seed, outcome.excluded
    );
    out.push_str("| sample | error | entropy | f1 | f2 |\n|---|---|---|---|---|\n");
    for (i, d) in outcome.datasets.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {:.4} | {:.4} | {:.4} | {:.4} |\n",
            i + 1,
            d.error,
            d.entropy,
            d.f1,
            d.f2
        ));
    }
    out
}
