//! The execution engine.
//!
//! An [`Interpreter`] owns the program, its resolved [`BracketMap`], the
//! memory tape and both pointers. Streams are injected per run so the same
//! engine drives stdin/stdout in the `bf` binary and byte buffers in tests.

use std::io::{self, Read, Write};

use crate::brackets::{BracketMap, UnmatchedBracket, UnmatchedBracketKind};

/// Tape length used when no size is requested.
pub const DEFAULT_MEMORY_SIZE: usize = 4096;

/// Errors that can occur while building or running an interpreter.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// Loops were not balanced; a matching `[` or `]` was not found.
    #[error("Unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBrackets { ip: usize, kind: UnmatchedBracketKind },

    /// The tape must hold at least one cell.
    #[error("Invalid memory size: the tape needs at least one cell")]
    InvalidMemorySize,

    /// The tape could not be allocated.
    #[error("Tape of {memory_size} cells could not be allocated")]
    TapeTooLarge { memory_size: usize },

    /// The injected input or output stream failed.
    #[error("I/O error at instruction {ip}: {source}")]
    Io { ip: usize, #[source] source: io::Error },
}

impl From<UnmatchedBracket> for InterpreterError {
    fn from(err: UnmatchedBracket) -> Self {
        InterpreterError::UnmatchedBrackets { ip: err.ip, kind: err.kind }
    }
}

/// A Brainfuck interpreter over a circular tape of wrapping byte cells.
///
/// The interpreter maintains:
/// - the program as a sequence of chars, with its bracket jump table,
/// - a memory tape of `memory_size` zeroed cells (4096 by default),
/// - a data pointer and an instruction pointer, both starting at 0.
///
/// Moving off either end of the tape wraps to the other end, and cell
/// arithmetic wraps modulo 256, so a program that resolves cannot fail
/// except through its streams.
#[derive(Debug, Clone)]
pub struct Interpreter {
    code: Vec<char>,
    jump_map: BracketMap,
    memory: Vec<u8>,
    pointer: usize,
    code_ptr: usize,
}

impl Interpreter {
    /// Create a new interpreter from Brainfuck `code` with a 4096-cell tape.
    pub fn new(code: &str) -> Result<Self, InterpreterError> {
        Self::new_with_memory(code, DEFAULT_MEMORY_SIZE)
    }

    /// Create a new interpreter from Brainfuck `code` with a custom tape size.
    ///
    /// Brackets are resolved here; an unbalanced program never gets an
    /// interpreter.
    pub fn new_with_memory(code: &str, memory_size: usize) -> Result<Self, InterpreterError> {
        if memory_size == 0 {
            return Err(InterpreterError::InvalidMemorySize);
        }

        let code: Vec<char> = code.chars().collect();
        let jump_map = BracketMap::resolve(&code)?;

        let mut memory: Vec<u8> = Vec::new();
        memory
            .try_reserve_exact(memory_size)
            .map_err(|_| InterpreterError::TapeTooLarge { memory_size })?;
        memory.resize(memory_size, 0);

        Ok(Self {
            code,
            jump_map,
            memory,
            pointer: 0,
            code_ptr: 0,
        })
    }

    /// The program text as given at construction.
    pub fn source(&self) -> String {
        self.code.iter().collect()
    }

    /// Snapshot of the tape.
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Number of cells on the tape.
    pub fn memory_size(&self) -> usize {
        self.memory.len()
    }

    /// Current data pointer.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Current instruction pointer, as a char index into the program.
    pub fn instruction_pointer(&self) -> usize {
        self.code_ptr
    }

    /// True once the instruction pointer has run off the end of the program.
    pub fn is_finished(&self) -> bool {
        self.code_ptr >= self.code.len()
    }

    /// The program's resolved jump table.
    pub fn brackets(&self) -> &BracketMap {
        &self.jump_map
    }

    /// Execute the program until completion.
    ///
    /// `,` reads one byte from `input`; at end of input the current cell is
    /// set to 0. `.` writes the current cell to `output` as one raw byte.
    pub fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<(), InterpreterError>
    where
        R: Read,
        W: Write,
    {
        self.execute(input, output, None)
    }

    /// Like [`Interpreter::run`], but also writes a step-by-step table of every
    /// executed operator to `trace`. Program I/O is still performed.
    pub fn run_traced<R, W, T>(
        &mut self,
        input: &mut R,
        output: &mut W,
        trace: &mut T,
    ) -> Result<(), InterpreterError>
    where
        R: Read,
        W: Write,
        T: Write,
    {
        self.execute(input, output, Some(trace as &mut dyn Write))
    }

    /// Internal executor shared by run and run_traced.
    fn execute(
        &mut self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        mut trace: Option<&mut dyn Write>,
    ) -> Result<(), InterpreterError> {
        let code_len = self.code.len();
        let memory_size = self.memory.len();
        let mut step: usize = 0;

        if let Some(t) = trace.as_mut() {
            let ip = self.code_ptr;
            writeln!(t, "STEP | IP  | PTR | CELL | INSTR | ACTION")
                .and_then(|_| writeln!(t, "-----+-----+-----+------+-------+------------------------------------------------"))
                .map_err(|source| InterpreterError::Io { ip, source })?;
        }

        while self.code_ptr < code_len {
            let instr = self.code[self.code_ptr];
            let (ip_before, ptr_before, cell_before) =
                (self.code_ptr, self.pointer, self.memory[self.pointer]);
            let mut action: Option<String> = if trace.is_some() { Some(String::new()) } else { None };

            match instr {
                '>' => {
                    self.pointer = (self.pointer + 1) % memory_size;
                    if let Some(a) = action.as_mut() { *a = format!("Moved pointer head to index {}", self.pointer); }
                }
                '<' => {
                    self.pointer = (self.pointer + memory_size - 1) % memory_size;
                    if let Some(a) = action.as_mut() { *a = format!("Moved pointer head to index {}", self.pointer); }
                }
                '+' => {
                    let after = cell_before.wrapping_add(1);
                    self.memory[self.pointer] = after;
                    if let Some(a) = action.as_mut() { *a = format!("Increment cell[{}] from {} to {}", ptr_before, cell_before, after); }
                }
                '-' => {
                    let after = cell_before.wrapping_sub(1);
                    self.memory[self.pointer] = after;
                    if let Some(a) = action.as_mut() { *a = format!("Decrement cell[{}] from {} to {}", ptr_before, cell_before, after); }
                }
                '.' => {
                    output
                        .write_all(&[cell_before])
                        .map_err(|source| InterpreterError::Io { ip: ip_before, source })?;
                    if let Some(a) = action.as_mut() { *a = format!("Output byte {}", cell_before); }
                }
                ',' => {
                    // Make pending output (e.g. a prompt) visible before blocking.
                    output
                        .flush()
                        .map_err(|source| InterpreterError::Io { ip: ip_before, source })?;
                    let byte = read_byte(input)
                        .map_err(|source| InterpreterError::Io { ip: ip_before, source })?;
                    self.memory[self.pointer] = byte.unwrap_or(0);
                    if let Some(a) = action.as_mut() {
                        *a = match byte {
                            Some(b) => format!("Read byte from input -> {}", b),
                            None => "Read byte from input -> EOF (set cell to 0)".to_string(),
                        };
                    }
                }
                '[' => {
                    if cell_before == 0 {
                        let j = self.jump_map.target(self.code_ptr).expect("validated bracket");
                        if let Some(a) = action.as_mut() { *a = format!("Cell is 0; jump forward to matching ']' at IP {}", j); }
                        self.code_ptr = j;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Enter loop (cell != 0)".to_string();
                    }
                }
                ']' => {
                    if cell_before != 0 {
                        let j = self.jump_map.target(self.code_ptr).expect("validated bracket");
                        if let Some(a) = action.as_mut() { *a = format!("Cell != 0; jump back to matching '[' at IP {}", j); }
                        self.code_ptr = j;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Exit loop (cell is 0)".to_string();
                    }
                }
                _ => {
                    // Commentary: skip without tracing.
                    self.code_ptr += 1;
                    continue;
                }
            }

            if let (Some(t), Some(a)) = (trace.as_mut(), action) {
                writeln!(
                    t,
                    "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                    step, ip_before, ptr_before, cell_before, instr, a
                )
                .map_err(|source| InterpreterError::Io { ip: ip_before, source })?;
            }

            step += 1;
            // Jump then advance: a taken jump resumes just past its partner.
            self.code_ptr += 1;
        }

        output
            .flush()
            .map_err(|source| InterpreterError::Io { ip: self.code_ptr, source })?;
        if let Some(t) = trace.as_mut() {
            let ip = self.code_ptr;
            t.flush().map_err(|source| InterpreterError::Io { ip, source })?;
        }

        Ok(())
    }
}

/// Read exactly one byte, retrying on interruption. `None` means end of input.
fn read_byte(input: &mut dyn Read) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
