//! Pipelined CPU simulator CLI.
//!
//! This binary is the single entry point for running programs on the simulator. It performs:
//! 1. **Run:** Load a program image, run it to the halt, and report statistics.
//! 2. **Disassemble:** List a program image as mnemonics without simulating it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use pipesim_core::common::error::SimError;
use pipesim_core::config::Config;
use pipesim_core::isa::disasm::disassemble;
use pipesim_core::sim::loader::{self, ImageFormat};
use pipesim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate five-stage pipeline simulator",
    long_about = "Run a program image on a five-stage pipelined CPU with split direct-mapped caches \
                  and a single arbitrated memory port.\n\nExamples:\n  pipesim run -f sum.hex\n  \
                  pipesim run -f sum.hex --config small-caches.json --json\n  pipesim disasm -f sum.hex"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image until it halts.
    Run {
        /// Program image (hex text, or raw little-endian words with `.bin`).
        #[arg(short, long)]
        file: PathBuf,

        /// Override the image format detected from the extension.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// JSON configuration file; built-in defaults when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Word address the image is loaded at.
        #[arg(long, default_value_t = 0)]
        base: u32,

        /// Override `general.max_cycles`.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Emit one pipeline snapshot per cycle.
        #[arg(short, long)]
        trace: bool,

        /// Print statistics as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Print the non-zero registers after the run.
        #[arg(long)]
        regs: bool,

        /// Limit text statistics to these sections (summary, core, memory).
        #[arg(long, value_delimiter = ',')]
        sections: Vec<String>,
    },

    /// Disassemble a program image.
    Disasm {
        /// Program image.
        #[arg(short, long)]
        file: PathBuf,

        /// Override the image format detected from the extension.
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    /// One hex word per line.
    Hex,
    /// Raw little-endian words.
    Bin,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Hex => Self::Hex,
            FormatArg::Bin => Self::Binary,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            format,
            config,
            base,
            max_cycles,
            trace,
            json,
            regs,
            sections,
        } => {
            init_tracing(trace);
            let opts = RunOptions {
                base,
                max_cycles,
                trace,
                json,
                regs,
                sections,
            };
            cmd_run(&file, format, config.as_deref(), &opts)
        }
        Commands::Disasm { file, format } => {
            init_tracing(false);
            cmd_disasm(&file, format)
        }
    }
}

/// Installs the stderr subscriber; `RUST_LOG` wins over the defaults.
fn init_tracing(trace: bool) {
    let default = if trace { "pipesim_core=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        eprintln!("warning: a tracing subscriber is already installed");
    }
}

fn read_image(file: &Path, format: Option<FormatArg>) -> Result<Vec<u32>> {
    let image = match format {
        Some(f) => loader::load_image_as(file, f.into()),
        None => loader::load_image(file),
    };
    image.with_context(|| format!("loading program image {}", file.display()))
}

struct RunOptions {
    base: u32,
    max_cycles: Option<u64>,
    trace: bool,
    json: bool,
    regs: bool,
    sections: Vec<String>,
}

fn cmd_run(
    file: &Path,
    format: Option<FormatArg>,
    config_path: Option<&Path>,
    opts: &RunOptions,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(limit) = opts.max_cycles {
        config.general.max_cycles = limit;
    }
    config.general.trace_pipeline |= opts.trace;

    let image = read_image(file, format)?;
    let mut sim = Simulator::from_config(&config)?;
    sim.load_program(opts.base, &image)?;

    tracing::info!(
        image = %file.display(),
        words = image.len(),
        memory = config.memory.size_words,
        icache = config.cache.icache.size_words,
        dcache = config.cache.dcache.size_words,
        "starting simulation"
    );

    let outcome = sim.run();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(sim.stats())?);
    } else {
        sim.stats().print_sections(&opts.sections);
    }
    if opts.regs {
        for (idx, val) in sim.cpu.regs.snapshot().iter().enumerate() {
            if *val != 0 {
                println!("r{idx:<2} = {val:#010x} ({})", *val as i32);
            }
        }
    }

    match outcome {
        Ok(_) => Ok(()),
        Err(e @ SimError::CycleLimit { .. }) => {
            Err(anyhow::Error::new(e).context("program did not halt"))
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_disasm(file: &Path, format: Option<FormatArg>) -> Result<()> {
    let image = read_image(file, format)?;
    for (addr, inst) in image.iter().enumerate() {
        println!("{addr:>6}: {inst:08x}  {}", disassemble(*inst));
    }
    Ok(())
}
