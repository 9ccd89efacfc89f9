use std::fs;
use std::io::{self, Write};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use bfnum::{DEFAULT_TAPE_LEN, Program, StepControl, Tape, tokenize};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bfnum",
    version,
    about = "Run a tape-language program with numeric I/O"
)]
struct Cli {
    /// Read program source from PATH instead of positional CODE
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<String>,

    /// Number of cells on the data tape
    #[arg(long = "tape-len", value_name = "N", default_value_t = DEFAULT_TAPE_LEN)]
    tape_len: usize,

    /// Abort after N executed instructions
    #[arg(long = "max-steps", value_name = "N")]
    max_steps: Option<usize>,

    /// Concatenated program source parts
    #[arg(value_name = "CODE", trailing_var_arg = true, allow_hyphen_values = true)]
    code: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    if cli.file.is_none() && cli.code.is_empty() {
        eprintln!("bfnum: no program given (pass CODE or --file <PATH>)");
        return 2;
    }
    if cli.file.is_some() && !cli.code.is_empty() {
        eprintln!("bfnum: cannot use positional CODE together with --file");
        return 2;
    }

    let source = match cli.file {
        Some(path) => match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("bfnum: failed to read {path}: {e}");
                return 1;
            }
        },
        None => cli.code.join(""),
    };

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("bfnum: {e}");
            return 1;
        }
    };

    let cancel_flag = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&cancel_flag);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
            eprintln!("bfnum: failed to install Ctrl+C handler: {e}");
        }
    }

    let mut program = Program::new(tokens, Tape::with_len(cli.tape_len));
    let control = StepControl::new(cli.max_steps, cancel_flag);
    match program.run_with_control(&control) {
        Ok(()) => {
            let _ = io::stdout().flush();
            0
        }
        Err(e) => {
            eprintln!("bfnum: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}
