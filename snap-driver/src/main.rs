//! Snap Compiler Driver
//!
//! Command-line front end for the register allocation backend. Programs are
//! read as JSON (see `snap_backend::Program`); each subcommand runs one
//! stage of the pipeline and prints what it produced.

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use snap_backend::{
    allocate_program_with_options, AllocatorOptions, BasicBlockPartitioner, LiveInterval,
    LiveIntervalCalculator, Program,
};
use snap_codegen::emit_listing;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snapc")]
#[command(about = "Snap Compiler - Turtle16 register allocation")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the basic blocks of every compilation unit
    Blocks {
        /// Input program (JSON)
        input: PathBuf,
    },

    /// Print the live intervals of every compilation unit
    Intervals {
        /// Input program (JSON)
        input: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Allocate registers and write the rewritten program
    Allocate {
        /// Input program (JSON)
        input: PathBuf,

        /// Number of allocatable registers, overrides the config file
        #[arg(short = 'r', long)]
        registers: Option<usize>,

        /// Allocator options (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file, stdout if absent
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the program as JSON instead of an assembly listing
        #[arg(long)]
        json: bool,
    },
}

/// Live intervals of one compilation unit, as printed by `intervals --json`
#[derive(Serialize)]
struct UnitIntervals<'a> {
    unit: &'a str,
    intervals: Vec<LiveInterval>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Blocks { input } => read_program(&input).map(|program| render_blocks(&program)),
        Commands::Intervals { input, json } => {
            read_program(&input).and_then(|program| render_intervals(&program, json))
        }
        Commands::Allocate {
            input,
            registers,
            config,
            output,
            json,
        } => allocate_command(&input, registers, config.as_deref(), output.as_deref(), json),
    };

    match result {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_program(path: &Path) -> Result<Program, Box<dyn std::error::Error>> {
    let source = fs::read_to_string(path)?;
    let program = serde_json::from_str(&source)?;
    Ok(program)
}

/// Allocator options from an optional config file, with `-r` applied on top
fn load_options(
    config: Option<&Path>,
    registers: Option<usize>,
) -> Result<AllocatorOptions, Box<dyn std::error::Error>> {
    let mut options = match config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => AllocatorOptions::default(),
    };
    if let Some(registers) = registers {
        options.num_registers = registers;
    }
    Ok(options)
}

fn render_blocks(program: &Program) -> String {
    let partitioner = BasicBlockPartitioner::new();
    let mut out = String::new();

    for (name, instructions) in program.units() {
        out.push_str(&format!("{}:\n", name));
        for (i, block) in partitioner.partition(instructions).iter().enumerate() {
            out.push_str(&format!("  block {} [{}, {})\n", i, block.start, block.end()));
            for line in emit_listing(&block.instructions).lines() {
                out.push_str(&format!("  {}\n", line));
            }
        }
    }

    out
}

fn render_intervals(program: &Program, json: bool) -> Result<String, Box<dyn std::error::Error>> {
    let calculator = LiveIntervalCalculator::new();
    let units: Vec<UnitIntervals> = program
        .units()
        .map(|(unit, instructions)| UnitIntervals {
            unit,
            intervals: calculator.determine_live_intervals(instructions),
        })
        .collect();

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&units)?));
    }

    let mut out = String::new();
    for unit in &units {
        out.push_str(&format!("{}:\n", unit.unit));
        for interval in &unit.intervals {
            out.push_str(&format!("  {}\n", interval));
        }
    }
    Ok(out)
}

/// Run the allocator. Returns the text for stdout; when an output file is
/// given the program is written there instead.
fn allocate_command(
    input: &Path,
    registers: Option<usize>,
    config: Option<&Path>,
    output: Option<&Path>,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let program = read_program(input)?;
    let options = load_options(config, registers)?;
    info!("allocating {} with {} registers", input.display(), options.num_registers);

    let allocated = allocate_program_with_options(&program, options)?;
    let text = if json {
        format!("{}\n", serde_json::to_string_pretty(&allocated)?)
    } else {
        allocated.listing()
    };

    match output {
        Some(path) => {
            fs::write(path, &text)?;
            Ok(format!("Assembly written to: {}\n", path.display()))
        }
        None => Ok(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use snap_backend::Subroutine;
    use snap_codegen::{AsmInst, Opcode, Operand};

    fn sample_program() -> Program {
        Program {
            top_level: vec![
                AsmInst::op(Opcode::Li, vec![Operand::reg("vr0"), Operand::num(1)]),
                AsmInst::op(Opcode::Call, vec![Operand::label("foo")]),
                AsmInst::bare(Opcode::Hlt),
            ],
            subroutines: vec![Subroutine {
                name: "foo".to_string(),
                instructions: vec![
                    AsmInst::op(
                        Opcode::Add,
                        vec![Operand::reg("vr1"), Operand::reg("fp"), Operand::reg("vr0")],
                    ),
                    AsmInst::bare(Opcode::Ret),
                ],
            }],
        }
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("snapc-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_render_blocks() {
        assert_eq!(
            render_blocks(&sample_program()),
            "<top level>:\n  block 0 [0, 2)\n      LI vr0, 1\n      CALL foo\n\
             \x20 block 1 [2, 3)\n      HLT\n\
             foo:\n  block 0 [0, 2)\n      ADD vr1, fp, vr0\n      RET\n"
        );
    }

    #[test]
    fn test_render_intervals() {
        assert_eq!(
            render_intervals(&sample_program(), false).unwrap(),
            "<top level>:\n  vr0 [0, 1)\nfoo:\n  vr0 [0, 1)\n  fp [0, 1) -> fp\n  vr1 [0, 1)\n"
        );

        let json = render_intervals(&sample_program(), true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1]["unit"], "foo");
        assert_eq!(parsed[1]["intervals"][1]["physical"], "fp");
    }

    #[test]
    fn test_load_options() {
        assert_eq!(load_options(None, None).unwrap(), AllocatorOptions::default());
        assert_eq!(load_options(None, Some(3)).unwrap().num_registers, 3);

        let config = temp_file("options.json", r#"{"num_registers": 2, "validate_labels": false}"#);
        let options = load_options(Some(config.as_path()), None).unwrap();
        assert_eq!(options.num_registers, 2);
        assert!(!options.validate_labels);
        assert_eq!(load_options(Some(config.as_path()), Some(4)).unwrap().num_registers, 4);
        fs::remove_file(config).unwrap();
    }

    #[test]
    fn test_allocate_command() {
        let input = temp_file("program.json", &serde_json::to_string(&sample_program()).unwrap());
        let listing = allocate_command(&input, None, None, None, false).unwrap();
        assert_eq!(
            listing,
            "    LI r0, 1\n    CALL foo\n    HLT\nfoo:\n    ADD r1, fp, r0\n    RET\n"
        );

        let json = allocate_command(&input, Some(5), None, None, true).unwrap();
        let program: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(program.subroutines[0].name, "foo");
        fs::remove_file(input).unwrap();
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let missing = std::env::temp_dir().join("snapc-does-not-exist.json");
        assert!(read_program(&missing).is_err());
    }
}
