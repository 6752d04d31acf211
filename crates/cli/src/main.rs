//! LDmicro interpretable-program runner.
//!
//! This binary loads a `.int` program and scans it forever. It performs:
//! 1. **Load:** Parse and validate the program file; any defect is fatal before execution.
//! 2. **Report:** Print the symbol table, the GPIO pin map, and optionally a disassembly.
//! 3. **Run:** Read inputs, interpret one cycle, write outputs, once per cycle period.

use std::fmt::Display;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ldvm_core::config::Config;
use ldvm_core::isa::disasm::listing;
use ldvm_core::sim::{CycleDriver, GpioMap, SimulatedPins, loader};

#[derive(Parser, Debug)]
#[command(
    name = "ldvm",
    author,
    version,
    about = "Interpreter for LDmicro interpretable ladder-logic programs",
    long_about = "Load a program compiled by LDmicro for the interpretable target and run it.\n\nContacts and coils named GPI0..GPI7 and GPO0..GPO7 are bound to simulated GPIO pins.\n\nExamples:\n  ldvm blink.int\n  ldvm blink.int --disassemble --cycles 100 --dump\n  RUST_LOG=ldvm::exec=trace ldvm blink.int --config trace.json"
)]
struct Cli {
    /// Program file produced by the compiler.
    program: PathBuf,

    /// JSON configuration file (defaults are used when absent).
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,

    /// Print a disassembly listing before running.
    #[arg(long)]
    disassemble: bool,

    /// Stop after this many cycles instead of running forever.
    #[arg(long, value_name = "N")]
    cycles: Option<u64>,

    /// Print both memory banks on exit.
    #[arg(long)]
    dump: bool,
}

/// Prints `err` to stderr and exits with status 1.
fn die(context: &str, err: impl Display) -> ! {
    eprintln!("[!] {context}: {err}");
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_json_file(path).unwrap_or_else(|e| die("config", e)),
        None => Config::default(),
    };
    if let Err(e) = config.validate() {
        die("config", e);
    }

    println!("Loading program...");
    let image = loader::load_file(&cli.program, &config).unwrap_or_else(|e| die("load", e));

    println!("Symbols:");
    for sym in image.symbols() {
        println!("  {sym}");
    }
    let map = GpioMap::from_symbols(image.symbols());
    println!("GPIO pins:");
    for line in map.to_string().lines() {
        println!("  {line}");
    }

    if cli.disassemble || config.general.disassemble_on_load {
        println!();
        print!("{}", listing(image.program().instructions()));
    }

    println!("Running ladder...");
    let mut driver = CycleDriver::new(image, &config, SimulatedPins::new(map));
    let result = match cli.cycles {
        Some(n) => driver.run_cycles(n),
        None => driver.run_forever().map(|never| match never {}),
    };

    info!(cycles = driver.stats().cycles, "ladder stopped");

    if cli.dump {
        println!();
        print!("{}", driver.machine().relays.dump());
        print!("{}", driver.machine().integers.dump());
    }
    driver.stats().print();

    if let Err(e) = result {
        die("fatal", e);
    }
}
