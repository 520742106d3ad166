use std::io::{self, Write};
use crate::InterpreterError;

/// Process exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit status for an unmatched `[` or `]`.
pub const EXIT_SYNTAX_ERROR: i32 = 1;
/// Process exit status for bad or missing arguments.
pub const EXIT_USAGE: i32 = 2;
/// Process exit status for unreadable programs and failed streams.
pub const EXIT_IO_ERROR: i32 = 3;

/// Exit status the `bf` binary reports for `err`.
pub fn exit_code_for(err: &InterpreterError) -> i32 {
    match err {
        InterpreterError::UnmatchedBrackets { .. } => EXIT_SYNTAX_ERROR,
        InterpreterError::InvalidMemorySize | InterpreterError::TapeTooLarge { .. } => EXIT_USAGE,
        InterpreterError::Io { .. } => EXIT_IO_ERROR,
    }
}

/// Pretty-print structured InterpreterError with caret positioning.
/// If `program` is `Some("bf")`, prefix messages with "bf: ..."
pub fn print_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) {
    eprint!("{}", format_interpreter_error(program, code, err));
    let _ = io::stderr().flush();
}

/// Render the diagnostic that [`print_interpreter_error`] prints.
pub fn format_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) -> String {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    match err {
        InterpreterError::UnmatchedBrackets { ip, kind } => {
            let msg = prefix_program(&format!("Parse error: unmatched bracket {kind}"));
            format_error_with_context(&msg, code, *ip)
        }
        InterpreterError::Io { ip, source } => {
            let msg = prefix_program(&format!("I/O error: {source}"));
            format_error_with_context(&msg, code, *ip)
        }
        InterpreterError::InvalidMemorySize => {
            format!("{}\n", prefix_program("memory size must be at least 1 cell"))
        }
        InterpreterError::TapeTooLarge { memory_size } => {
            format!("{}\n", prefix_program(&format!("memory size {memory_size} is too large to allocate")))
        }
    }
}

/// Format a concise error with instruction index and a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn format_error_with_context(prefix: &str, code: &str, pos: usize) -> String {
    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS).min(total_chars);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(code, start_char);
    let end_byte = char_to_byte_index(code, end_char);
    // Newlines in the window would break the caret alignment
    let slice: String = code[start_byte..end_byte]
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    // Caret under the exact position
    let caret_offset_chars = pos.saturating_sub(start_char);
    let underline = format!("{}^", " ".repeat(caret_offset_chars));

    format!("{prefix} at instruction {pos}\n  {slice}\n  {underline}\n")
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(s.len())
}
