//! # Madaq Signature CLI
//!
//! Parses submissions, renders signatures to disk and mails them to the
//! office. Configuration comes from `madaq-signature.toml` and
//! `MADAQ_SMTP_*` environment variables.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use madaq_signature::{
    AppConfig, DEFAULT_CONFIG_FILE, DeliveryError, DeliveryObserver, GeneratedSignature,
    SignatureGenerator, SmtpDelivery, SmtpSettings, SubmissionFields, ThumbnailRules,
    TransportError, parse_submission, parse_submission_email, validate_submission,
};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generates Madaq HTML e-mail signatures.",
    long_about = "Reads a contact-form submission, renders the Madaq e-mail signature and optionally sends it to the office over SMTP."
)]
struct AppArgs {
    /// Log debug output to stderr.
    #[arg(short, long, global = true, env = "MADAQ_SIGNATURE_VERBOSE")]
    verbose: bool,

    /// Path to a configuration file (TOML format).
    #[arg(long, global = true, env = "MADAQ_SIGNATURE_CONFIG")]
    config: Option<PathBuf>,

    /// Thumbnail rules JSON file. Overrides `thumbnails.rules_file`.
    #[arg(long, global = true, env = "MADAQ_SIGNATURE_RULES")]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a signature from a submission block.
    Render(RenderArgs),
    /// Check a submission block and list every problem.
    Validate(InputArgs),
    /// Validate form values, write the signature and mail it to the office.
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Submission text file; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Treat the input as a raw e-mail message (.eml).
    #[arg(long)]
    eml: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output file or directory. Defaults to `{Name}_signature.html` here.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the HTML instead of writing a file.
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Print the resolved signature data as JSON.
    #[arg(long, conflicts_with = "stdout")]
    json: bool,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    surname: String,

    /// Personal e-mail address, used as Reply-To.
    #[arg(long)]
    email: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    job_title: String,

    #[arg(long)]
    favourite_bonbon: String,

    /// Directory to write the signature file into.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Render and write the file but do not send anything.
    #[arg(long)]
    dry_run: bool,
}

/// Prints delivery progress for the person at the terminal
struct TerminalObserver;

impl DeliveryObserver for TerminalObserver {
    fn attempt_started(&self, attempt: u32, max_attempts: u32) {
        eprintln!("📤 Sending signature (attempt {attempt}/{max_attempts})...");
    }

    fn retrying(&self, attempt: u32, _error: &TransportError) {
        eprintln!("⚠️ Attempt {attempt} failed, retrying...");
    }

    fn delivered(&self, _attempts: u32) {
        eprintln!("✅ Your information has been submitted!");
    }

    fn failed(&self, error: &DeliveryError) {
        eprintln!("❌ {error}");
    }
}

fn main() -> Result<ExitCode> {
    let args = AppArgs::parse();
    init_logging(args.verbose)?;

    let config = load_config(args.config.as_deref(), &args.command)?;
    let rules = load_rules(args.rules.as_deref(), &config)?;
    let generator = SignatureGenerator::new(rules);

    match args.command {
        Command::Render(render) => run_render(&generator, &render),
        Command::Validate(input) => run_validate(&input),
        Command::Submit(submit) => run_submit(&generator, &config, submit),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(verbose)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Setting up tracing subscriber failed")
}

/// Only `submit` needs SMTP settings, so only it reads the environment.
/// Offline commands fall back to defaults when the default file is broken.
fn load_config(path: Option<&Path>, command: &Command) -> Result<AppConfig> {
    if matches!(command, Command::Submit(_)) {
        return AppConfig::load(path).context("Failed to load configuration");
    }

    match AppConfig::read(path) {
        Ok(config) => Ok(config),
        Err(e) if path.is_none() => {
            tracing::warn!("Ignoring {DEFAULT_CONFIG_FILE}: {e}");
            Ok(AppConfig::default())
        }
        Err(e) => Err(e).context("Failed to load configuration"),
    }
}

fn load_rules(explicit: Option<&Path>, config: &AppConfig) -> Result<ThumbnailRules> {
    match explicit {
        Some(path) => ThumbnailRules::from_path(path)
            .with_context(|| format!("Could not load thumbnail rules from {}", path.display())),
        None => Ok(ThumbnailRules::load_or_default(config.rules_file())),
    }
}

fn read_submission(input: &InputArgs) -> Result<SubmissionFields> {
    let raw = match &input.input {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read submission from stdin")?;
            buf
        }
    };

    if input.eml {
        parse_submission_email(&raw).context("Failed to parse submission e-mail")
    } else {
        Ok(parse_submission(&String::from_utf8_lossy(&raw)))
    }
}

fn write_signature(signature: &GeneratedSignature, target: &Path) -> Result<PathBuf> {
    let path = if target.is_dir() {
        target.join(&signature.filename)
    } else {
        target.to_path_buf()
    };

    fs::write(&path, &signature.html)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote signature to {}", path.display());
    Ok(path)
}

fn run_render(generator: &SignatureGenerator, args: &RenderArgs) -> Result<ExitCode> {
    let fields = read_submission(&args.input)?;
    let report = validate_submission(&fields);
    for issue in &report.issues {
        tracing::warn!("{issue}");
    }

    let signature = generator.generate(&fields);

    if args.json {
        let json = serde_json::to_string_pretty(&signature.data)
            .context("Failed to serialize signature data")?;
        println!("{json}");
    }

    if args.stdout {
        io::stdout()
            .write_all(signature.html.as_bytes())
            .context("Failed to write signature to stdout")?;
    } else {
        let target = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&signature.filename));
        let path = write_signature(&signature, &target)?;
        eprintln!("📥 {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn run_validate(input: &InputArgs) -> Result<ExitCode> {
    let fields = read_submission(input)?;
    if fields.is_empty() {
        println!("No submission fields found in the input");
        return Ok(ExitCode::FAILURE);
    }

    let report = validate_submission(&fields);

    if report.is_valid() {
        println!("✅ Submission is valid");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Please fix the following errors:");
        print!("{report}");
        Ok(ExitCode::FAILURE)
    }
}

fn run_submit(
    generator: &SignatureGenerator,
    config: &AppConfig,
    args: SubmitArgs,
) -> Result<ExitCode> {
    let fields = SubmissionFields {
        name: args.name,
        surname: args.surname,
        email: args.email,
        phone: args.phone,
        job_title: args.job_title,
        favourite_bonbon: args.favourite_bonbon,
    };

    let signature = match generator.generate_validated(&fields) {
        Ok(signature) => signature,
        Err(report) => {
            eprintln!("Please fix the following errors:");
            eprint!("{report}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let path = write_signature(&signature, &args.output)?;
    eprintln!("📥 {}", path.display());

    if args.dry_run {
        eprintln!("Dry run: not sending {}", signature.filename);
        return Ok(ExitCode::SUCCESS);
    }

    let settings = SmtpSettings::from_config(config).context("SMTP is not configured")?;
    let delivery = SmtpDelivery::connect(settings).context("Failed to set up SMTP transport")?;

    match delivery.send_signature(&fields, &signature, &TerminalObserver) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(_) => {
            eprintln!(
                "❌ There was an error sending your information. Please try again or contact IT support."
            );
            Ok(ExitCode::FAILURE)
        }
    }
}
