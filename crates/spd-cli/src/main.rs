use clap::{Args, Parser, Subcommand};
use spd::render::{
    HeadlessError, ListLayout, RenderOptions, RenderOverrides, render_svg, render_svg_pretty,
};
use std::io::{Read, Write};
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Io(std::io::Error),
    Spd(HeadlessError),
    Json(serde_json::Error),
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    Panic(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Spd(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
            CliError::Panic(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Spd(value)
    }
}

impl From<spd::Error> for CliError {
    fn from(value: spd::Error) -> Self {
        Self::Spd(HeadlessError::Parse(value))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Render SPD structured program diagrams to SVG.
#[derive(Debug, Parser)]
#[command(name = "spd", version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the parsed node tree as JSON
    Parse(ParseArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Source file (`-` or absent reads standard input)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Default, Args)]
struct RenderArgs {
    /// Source file (`-` or absent reads standard input)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (standard output when absent)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent the SVG instead of minifying it
    #[arg(short, long)]
    prettyprint: bool,

    /// JSON file of render options; explicit flags take precedence
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    #[arg(long)]
    font_size: Option<f64>,

    #[arg(long)]
    font_family: Option<String>,

    #[arg(long)]
    stroke_width: Option<f64>,

    #[arg(long, value_name = "COLOR")]
    stroke_color: Option<String>,

    /// Fill of node shapes
    #[arg(long, value_name = "COLOR")]
    background_color: Option<String>,

    /// Fill of the whole canvas
    #[arg(long, value_name = "COLOR")]
    base_background_color: Option<String>,

    #[arg(long, value_name = "COLOR")]
    text_color: Option<String>,

    #[arg(long)]
    line_height: Option<f64>,

    /// `original` or `TerminalOffset`
    #[arg(long, value_name = "TYPE")]
    list_render_type: Option<ListLayout>,
}

impl RenderArgs {
    fn overrides(&self) -> RenderOverrides {
        RenderOverrides {
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            stroke_width: self.stroke_width,
            stroke_color: self.stroke_color.clone(),
            background_color: self.background_color.clone().map(Some),
            base_background_color: self.base_background_color.clone().map(Some),
            text_color: self.text_color.clone(),
            line_height: self.line_height,
            list_layout: self.list_render_type,
            ..Default::default()
        }
    }
}

fn read_input(input: Option<&Path>) -> Result<String, CliError> {
    match input {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn load_config(path: &Path) -> Result<RenderOverrides, CliError> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.is_empty() && !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

fn run_render(args: &RenderArgs) -> Result<(), CliError> {
    let source = read_input(args.input.as_deref())?;

    let file_overrides = match &args.config {
        Some(path) => load_config(path)?,
        None => RenderOverrides::default(),
    };
    let options = RenderOptions::default().merged(&file_overrides.or(args.overrides()));
    tracing::debug!(?options, "resolved render options");

    let svg = if args.prettyprint {
        render_svg_pretty(&source, &options)?
    } else {
        render_svg(&source, &options)?
    };
    write_output(args.output.as_deref(), &svg)
}

fn run_parse(args: &ParseArgs) -> Result<(), CliError> {
    let source = read_input(args.input.as_deref())?;
    let tree = spd::parse(&source)?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };
    write_output(None, &json)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Every panic ends up as exactly one `Error: ` line: parser panics come back as
/// `WrappedUnexpected`, anything else is caught in `main`. The hook only logs the location.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "panic");
    }));
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    install_panic_hook();

    let run = std::panic::catch_unwind(AssertUnwindSafe(|| match &cli.command {
        Some(Command::Parse(args)) => run_parse(args),
        None => run_render(&cli.render),
    }));
    let result =
        run.unwrap_or_else(|payload| Err(CliError::Panic(panic_message(payload.as_ref()))));
    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
