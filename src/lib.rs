//! A Brainfuck interpreter over a circular memory tape.
//!
//! This crate provides a Brainfuck interpreter that operates on a memory
//! tape (default 4096 cells) with a single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0.
//! - The data pointer wraps: moving left from cell 0 lands on the last cell,
//!   moving right from the last cell lands on cell 0.
//! - Cells are bytes and wrap: `+` on 255 gives 0, `-` on 0 gives 255.
//! - Input `,` reads a single byte from the injected reader; on EOF the current cell is set to 0.
//! - Output `.` writes the byte at the current cell unchanged (no newline, no encoding).
//! - Loops `[]` are matched before execution; unmatched brackets are reported as errors
//!   and no instruction runs.
//! - Any non-Brainfuck character is a comment and is skipped.
//!
//! Quick start:
//!
//! ```no_run
//! use bf_engine::Interpreter;
//! use std::io;
//!
//! let code = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
//! let mut bf = Interpreter::new(code).expect("brackets should match");
//! bf.run(&mut io::stdin().lock(), &mut io::stdout().lock()).expect("program should run");
//! ```

pub mod brackets;
pub mod cli_util;
pub mod config;
pub mod interpreter;

pub use brackets::{BracketMap, UnmatchedBracket, UnmatchedBracketKind};
pub use config::Settings;
pub use interpreter::{Interpreter, InterpreterError, DEFAULT_MEMORY_SIZE};
