use bf_engine::cli_util::{
    exit_code_for, print_interpreter_error, EXIT_IO_ERROR, EXIT_SUCCESS, EXIT_USAGE,
};
use bf_engine::{Interpreter, Settings};
use clap::Parser;
use std::env;
use std::fs;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "bf", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Print a step-by-step table of operations to stderr while executing
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Tape length in cells (fallback BF_MEMORY_SIZE, then bf.toml; default 4096)
    #[arg(short = 'm', long = "memory-size", value_name = "N")]
    memory_size: Option<usize>,

    /// Run CODE instead of loading a program file
    #[arg(short = 'e', long = "eval", value_name = "CODE", allow_hyphen_values = true)]
    eval: Option<String>,

    /// Brainfuck program file
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [--debug|-d] [--memory-size|-m N] <FILE>    # Run a Brainfuck program file
  {0} [--debug|-d] [--memory-size|-m N] -e "<code>" # Run Brainfuck code given inline

Options:
  --eval,        -e <CODE>  Run CODE instead of loading FILE
  --memory-size, -m <N>     Tape length in cells (default 4096)
  --debug,       -d         Print a step-by-step table of operations to stderr
  --help,        -h         Show this help

Notes:
- Input (`,`) reads a single byte from stdin; on EOF the current cell is set to 0.
- Output (`.`) writes raw bytes to stdout; no trailing newline is added.
- Characters outside of Brainfuck's ><+-.,[] are comments.
- The tape wraps at both ends and cells wrap between 0 and 255.
- Tape size falls back to BF_MEMORY_SIZE, then `memory_size` under
  [interpreter] in bf.toml in the XDG config home.

Exit status:
  0  success
  1  syntax error (unmatched bracket)
  2  usage error
  3  I/O error
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

fn run(program: &str, cli: Cli) -> i32 {
    if cli.help {
        usage_and_exit(program, EXIT_SUCCESS);
    }

    let Cli { debug, memory_size, eval, file, .. } = cli;

    let code_str = match (eval, file) {
        (Some(_), Some(_)) => {
            eprintln!("{program}: cannot use --eval together with FILE");
            usage_and_exit(program, EXIT_USAGE);
        }
        (None, None) => usage_and_exit(program, EXIT_USAGE),
        (Some(code), None) => code,
        (None, Some(path)) => match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read program file {path}: {e}");
                let _ = io::stderr().flush();
                return EXIT_IO_ERROR;
            }
        },
    };

    let settings = Settings::resolve(memory_size);

    // Construction resolves brackets; nothing runs if that fails.
    let mut bf = match Interpreter::new_with_memory(&code_str, settings.memory_size) {
        Ok(bf) => bf,
        Err(err) => {
            print_interpreter_error(Some(program), &code_str, &err);
            return exit_code_for(&err);
        }
    };

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let result = if debug {
        bf.run_traced(&mut input, &mut output, &mut io::stderr().lock())
    } else {
        bf.run(&mut input, &mut output)
    };

    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            print_interpreter_error(Some(program), &code_str, &err);
            exit_code_for(&err)
        }
    }
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            usage_and_exit(&program, EXIT_USAGE);
        }
    };

    let code = run(&program, cli);
    std::process::exit(code);
}
