use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "festoon", version)]
struct Cli {
    /// Log sequencing decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a show and print its trace.
    Run(RunArgs),
    /// Print the cake fallback deadline for a show.
    Deadline(InArgs),
    /// Validate a show file.
    Validate(InArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input show JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Virtual time to stop at, in ms.
    #[arg(long, default_value_t = 40_000)]
    until: u64,

    /// Scripted input, `<ms>:click:<control>`, `<ms>:key:<name>`, `<ms>:signal:<signal>` or
    /// `<ms>:end:<id>`. Repeatable.
    #[arg(long = "input", value_parser = parse_input)]
    inputs: Vec<festoon::ScriptedInput>,

    /// Trace output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the final snapshot after the trace.
    #[arg(long)]
    snapshot: bool,
}

#[derive(Parser, Debug)]
struct InArgs {
    /// Input show JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_input(s: &str) -> Result<festoon::ScriptedInput, String> {
    s.parse().map_err(|e: festoon::FestoonError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Deadline(args) => cmd_deadline(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_show(path: &Path) -> anyhow::Result<festoon::Show> {
    let show = festoon::Show::from_path(path)
        .with_context(|| format!("load show '{}'", path.display()))?;
    show.validate()
        .with_context(|| format!("validate show '{}'", path.display()))?;
    Ok(show)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let show = read_show(&args.in_path)?;
    let mut p = festoon::Presentation::simulated(show)?;
    p.start()?;
    p.run_script(&args.inputs, festoon::Millis(args.until))
        .context("run presentation")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for e in p.trace().events() {
        match args.format {
            Format::Json => writeln!(out, "{}", serde_json::to_string(e)?)?,
            Format::Text => writeln!(out, "{:>9}  {}", e.at.to_string(), describe(&e.kind)?)?,
        }
    }
    if args.snapshot {
        let snap = p.snapshot();
        match args.format {
            Format::Json => writeln!(out, "{}", serde_json::to_string(&snap)?)?,
            Format::Text => writeln!(out, "{}", serde_json::to_string_pretty(&snap)?)?,
        }
    }
    Ok(())
}

/// `event key=value ...` rendering of a trace entry.
fn describe(kind: &festoon::TraceKind) -> anyhow::Result<String> {
    let v = serde_json::to_value(kind).context("serialize trace event")?;
    let Some(obj) = v.as_object() else {
        return Ok(v.to_string());
    };
    let mut s = obj
        .get("event")
        .and_then(|e| e.as_str())
        .unwrap_or("?")
        .to_owned();
    for (k, v) in obj.iter().filter(|(k, _)| k.as_str() != "event") {
        match v {
            serde_json::Value::String(text) => s.push_str(&format!(" {k}={text}")),
            other => s.push_str(&format!(" {k}={other}")),
        }
    }
    Ok(s)
}

fn cmd_deadline(args: InArgs) -> anyhow::Result<()> {
    let show = read_show(&args.in_path)?;
    let stage = festoon::Stage::from_def(&show.def().stage)?;
    let deadline = festoon::fallback_deadline(stage.chain(), stage.animations());
    match args.format {
        Format::Json => println!("{}", serde_json::to_string(&deadline)?),
        Format::Text => {
            let basis = match deadline.basis {
                festoon::FallbackBasis::ChainSum { declared } => {
                    format!("chain sum {declared} + buffer")
                }
                festoon::FallbackBasis::NoDurations => "no declared durations".to_owned(),
                festoon::FallbackBasis::MissingFinal => "final element missing".to_owned(),
            };
            println!("fallback after {} ({basis})", deadline.delay);
            for id in stage.chain().ids() {
                match stage.animation(id) {
                    Some(el) => match el.dur_attr() {
                        Some(dur) => println!("  {id} dur={dur}"),
                        None => println!("  {id} no dur"),
                    },
                    None => println!("  {id} missing"),
                }
            }
        }
    }
    Ok(())
}

fn cmd_validate(args: InArgs) -> anyhow::Result<()> {
    let show = read_show(&args.in_path)?;
    let def = show.def();
    match args.format {
        Format::Json => println!("{}", serde_json::json!({ "ok": true, "version": def.version })),
        Format::Text => println!(
            "ok: {} scenes, {} controls, {} cake elements",
            def.stage.scenes.len(),
            def.stage.controls.len(),
            def.stage.cake.elements.len()
        ),
    }
    Ok(())
}
