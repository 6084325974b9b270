use crate::flags::{ConvertFlags, Switch};
use crate::sb3::Sb3Project;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zip::ZipArchive;

#[derive(Parser, Debug)]
#[command(
    name = "scratch-ast",
    about = "Convert a scratch project into a language-agnostic program tree, printed as JSON."
)]
pub struct Args {
    /// a `project.json`, or a zipped `.sb3` project
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(long, value_name = "JSON", help = "Conversion flags as a JSON object.")]
    pub flags: Option<String>,

    #[arg(long, help = "Treat unreadable input slots as errors.")]
    pub strict_inputs: bool,

    #[arg(
        long,
        help = "Check custom block calls against the definitions in the same sprite."
    )]
    pub check_procedure_calls: bool,

    #[arg(long, help = "Pretty-print the output.")]
    pub pretty: bool,

    #[arg(long, value_name = "FILTER", help = "Log filter, overriding RUST_LOG.")]
    pub log_level: Option<String>,
}

impl Args {
    /// flags from `--flags`, with any switches given on the command line turned on
    pub fn convert_flags(&self) -> Result<ConvertFlags> {
        let mut flags = match &self.flags {
            Some(json) => ConvertFlags::from_json(json)?,
            None => ConvertFlags::new(),
        };
        if self.strict_inputs {
            flags.strict_inputs = Switch::On;
        }
        if self.check_procedure_calls {
            flags.check_procedure_calls = Switch::On;
        }
        Ok(flags)
    }
}

/// Logs go to stderr, so they never mix with the JSON on stdout.
pub fn init_logger(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
        .try_init();
}

fn read_sb3(input: &Path) -> Result<String> {
    let file =
        fs::File::open(input).with_context(|| format!("Failed to open '{}'.", input.display()))?;
    let mut zip = ZipArchive::new(file)
        .with_context(|| format!("'{}' is not a valid zip/.sb3 file.", input.display()))?;
    let mut entry = zip
        .by_name("project.json")
        .map_err(|_| anyhow!("project.json not found in '{}'.", input.display()))?;
    let mut project_json = String::new();
    entry.read_to_string(&mut project_json)?;
    Ok(project_json)
}

/// The project JSON held in `input`, unzipping it first if it's an `.sb3`.
pub fn read_project_json(input: &Path) -> Result<String> {
    let is_sb3 = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sb3"));
    if is_sb3 {
        read_sb3(input)
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read '{}'.", input.display()))
    }
}

/// Converts the project named by `args` to JSON.
pub fn convert(args: &Args) -> Result<String> {
    let flags = args.convert_flags()?;
    let project_json = read_project_json(&args.input)?;
    let project = Sb3Project::try_from(project_json.as_str())
        .with_context(|| format!("Invalid project.json in '{}'.", args.input.display()))?;
    info!(targets = project.targets.len(), "loaded project");
    let ast = crate::general_ast_from_project(&project, &flags)
        .with_context(|| format!("Couldn't convert '{}'.", args.input.display()))?;
    Ok(if args.pretty {
        serde_json::to_string_pretty(&ast)?
    } else {
        serde_json::to_string(&ast)?
    })
}

pub fn run_cli(args: &Args) -> Result<()> {
    init_logger(args.log_level.as_deref());
    println!("{}", convert(args)?);
    Ok(())
}
