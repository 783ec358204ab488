use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{ArgGroup, Parser};
use serde::Serialize;
use serde_json::{Map, Value};
use simple_keys::Options;
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(
    name = "simple-keys",
    version,
    about = "Convert JSON between nested values and flat simple keys (a[b][c])"
)]
#[command(group(ArgGroup::new("mode").args(["unflatten", "keys", "get"])))]
struct Args {
    /// Input JSON file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Fold a flat simple-key object into nested objects.
    #[arg(short = 'u', long)]
    unflatten: bool,

    /// Print the simple keys of every scalar as a JSON array.
    #[arg(short = 'k', long)]
    keys: bool,

    /// Print the value stored at a simple key.
    #[arg(short = 'g', long, value_name = "key")]
    get: Option<String>,

    /// Indentation size; 0 prints compact JSON (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Maximum nesting depth accepted while folding keys.
    #[arg(long = "max-depth", value_name = "number")]
    max_depth: Option<usize>,

    /// Log processing details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Mode {
    Flatten,
    Unflatten,
    Keys,
    Get(String),
}

impl Mode {
    fn from_args(args: &Args) -> Self {
        if let Some(key) = &args.get {
            return Mode::Get(key.clone());
        }
        if args.unflatten {
            return Mode::Unflatten;
        }
        if args.keys {
            return Mode::Keys;
        }
        Mode::Flatten
    }

    fn verb(&self) -> &'static str {
        match self {
            Mode::Flatten => "Flattened",
            Mode::Unflatten => "Unflattened",
            Mode::Keys => "Listed keys of",
            Mode::Get(_) => "Resolved",
        }
    }
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (input_text, input_source) = read_input(args.input.as_deref())?;
    let input: Value = serde_json::from_str(&input_text)?;
    let mut options = Options::new();
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }

    let mode = Mode::from_args(&args);
    debug!(?mode, ?input_source, "running");
    let output = match &mode {
        Mode::Flatten => Value::Object(simple_keys::flatten_with_options(&input, &options)?),
        Mode::Unflatten => Value::Object(simple_keys::unflatten_with_options(
            expect_object(&input)?,
            &options,
        )?),
        Mode::Keys => Value::from(simple_keys::keys(expect_object(&input)?)),
        Mode::Get(key) => simple_keys::resolve_with_options(key, &input, &options)?
            .ok_or_else(|| format!("not found: {key}"))?,
    };

    let output_target = OutputTarget::from_arg(args.output.as_deref());
    with_output_writer(output_target.path(), |writer| {
        write_json(writer, &output, args.indent)
    })?;
    if let OutputTarget::File(path) = &output_target {
        report_status(&mode, &input_source, path);
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn expect_object(input: &Value) -> Result<&Map<String, Value>, Box<dyn Error>> {
    input
        .as_object()
        .ok_or_else(|| "input must be a JSON object".into())
}

fn read_input(input: Option<&str>) -> Result<(String, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read_to_string(path)?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) if path != "-" => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_json(writer: &mut dyn Write, value: &Value, indent: usize) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

fn report_status(mode: &Mode, input_source: &InputSource, output_path: &str) {
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    };
    let output_label = display_path(output_path);
    println!("✔ {} {input_label} → {output_label}", mode.verb());
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let rel = diff_paths(&abs, &cwd).unwrap_or(abs);
    rel.to_string_lossy().into_owned()
}

fn diff_paths(path: &Path, base: &Path) -> Option<std::path::PathBuf> {
    let path_components: Vec<_> = path.components().collect();
    let base_components: Vec<_> = base.components().collect();

    if path_components.first()? != base_components.first()? {
        return None;
    }

    let mut common = 0;
    while common < path_components.len()
        && common < base_components.len()
        && path_components[common] == base_components[common]
    {
        common += 1;
    }

    let mut result = std::path::PathBuf::new();
    for _ in common..base_components.len() {
        result.push("..");
    }
    for component in &path_components[common..] {
        result.push(component.as_os_str());
    }

    Some(result)
}
