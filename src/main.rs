use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use routeline::{Compiler, CompilerConfig, OutputFormat, Script};
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Google Maps JavaScript statements
    Js,
    /// JSON array of resolved instructions
    Json,
}

/// Compile route segments (JSON array) into map overlay instructions
#[derive(Debug, Parser)]
#[command(name = "routeline", version)]
struct Args {
    /// Segments file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "js")]
    format: Format,

    /// JSON compiler config; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the map binding the overlays attach to
    #[arg(long)]
    map_variable: Option<String>,

    /// Run the compiled script against a stub map before writing it
    #[arg(long)]
    check: bool,

    /// Print the script's SHA-256 fingerprint to stderr
    #[arg(long)]
    fingerprint: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match &args.config {
        Some(path) => CompilerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CompilerConfig::default(),
    };
    if let Some(map_variable) = &args.map_variable {
        config.map_variable = map_variable.clone();
    }
    let compiler = Compiler::new(config)?;

    let input = read_input(args.input.as_deref())?;
    let segments = routeline::segments_from_json(&input).context("parsing segments")?;

    if args.check {
        check(&compiler, &segments)?;
    }

    let format = match args.format {
        Format::Js => OutputFormat::GoogleMapsJs,
        Format::Json => OutputFormat::Json,
    };
    let script = compiler.compile_with(&segments, routeline::new_emitter(format).as_ref())?;
    log::info!("compiled {} segment(s) into {} byte(s)", segments.len(), script.as_str().len());

    if args.fingerprint {
        eprintln!("{}", script.fingerprint());
    }

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("writing {}", path.display()))?;
            write_script(&mut file, &script).with_context(|| format!("writing {}", path.display()))?;
        }
        None => write_script(&mut io::stdout().lock(), &script)?,
    }
    Ok(())
}

// Same bytes for stdout and files; an empty script writes nothing.
fn write_script(out: &mut impl Write, script: &Script) -> io::Result<()> {
    out.write_all(script.as_str().as_bytes())?;
    out.flush()
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing_subscriber::filter::LevelFilter::WARN,
        1 => tracing_subscriber::filter::LevelFilter::DEBUG,
        _ => tracing_subscriber::filter::LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(feature = "jscheck")]
fn check(compiler: &Compiler, segments: &[routeline::RouteSegment]) -> Result<()> {
    let script = compiler.compile(segments)?;
    let sandbox = routeline::sandbox::MapSandbox::new(compiler.config())?;
    let overlays = sandbox.run(script.as_str())?;
    if overlays.len() != segments.len() {
        bail!("script drew {} overlay(s) for {} segment(s)", overlays.len(), segments.len());
    }
    if let Some(i) = overlays.iter().position(|o| !o.attached) {
        bail!("overlay {} was not attached to {}", i, compiler.config().map_variable);
    }
    log::info!("check passed: {} overlay(s) attached", overlays.len());
    Ok(())
}

#[cfg(not(feature = "jscheck"))]
fn check(_compiler: &Compiler, _segments: &[routeline::RouteSegment]) -> Result<()> {
    bail!("--check needs the `jscheck` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_writes_nothing() {
        let mut buf = Vec::new();
        write_script(&mut buf, &Script::default()).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn script_is_written_verbatim() {
        let script = routeline::compile(&[routeline::RouteSegment::new(vec![], "red")]).unwrap();
        let mut buf = Vec::new();
        write_script(&mut buf, &script).unwrap();
        assert_eq!(buf, script.as_str().as_bytes());
        assert!(buf.ends_with(b"polyline0.setMap(map);"));
    }
}
