//! A tiny interpreter for a numeric-I/O dialect of the Brainfuck tape
//! language.
//!
//! The engine executes the usual eight commands over a memory tape of `u8`
//! cells, with two deliberate departures from convention:
//! - Output (`.`) prints the current cell's *decimal value* as a line, not a
//!   character conversion of the byte.
//! - Input (`,`) prompts for a whole line and parses it as an integer; an
//!   unparseable line prints "Could not format to integer" and leaves the
//!   cell unchanged.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0 (30,000 cells by default).
//! - Strict pointer bounds: moving left from cell 0 or right past the end
//!   returns an error.
//! - Branch matching rescans the token sequence linearly for the nearest
//!   counterpart on every taken branch; there is no precomputed jump table
//!   and no nesting awareness. A scan that runs off the sequence is reported
//!   as an unmatched branch.
//! - Any non-command, non-whitespace character is a lex error.
//!
//! Quick start:
//!
//! ```
//! use bfnum::{Program, Tape, tokenize};
//!
//! let tokens = tokenize("+++.").expect("valid source");
//! let mut program = Program::new(tokens, Tape::new());
//! program.run().expect("program should run"); // prints "3"
//! ```

pub mod lexer;
pub mod program;
pub mod tape;
pub mod token;

pub use lexer::tokenize;
pub use program::{Program, State, StepControl};
pub use tape::{Cell, DEFAULT_TAPE_LEN, Tape};
pub use token::Token;

use std::fmt;

/// Errors that can occur while lexing or executing a program.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The data pointer attempted to move left of cell 0 or past the last
    /// cell.
    #[error("data pointer out of bounds at instruction {ip} (ptr={ptr})")]
    OutOfBounds { ip: usize, ptr: usize },

    /// The instruction pointer left the token sequence during a fetch.
    #[error("instruction pointer out of range ({ip} >= {len})")]
    PointerOutOfRange { ip: usize, len: usize },

    /// A branch scan ran off the sequence without finding its counterpart;
    /// the program's loop structure is malformed.
    #[error("unmatched {kind} branch at instruction {ip}")]
    UnmatchedBranch { ip: usize, kind: BranchKind },

    /// The source contained a character outside the command set.
    #[error("invalid character '{ch}' at offset {pos}")]
    InvalidCharacter { ch: char, pos: usize },

    /// The input channel failed while serving an Input instruction.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },

    /// Execution aborted due to step limit.
    #[error("execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },

    /// Execution aborted due to cooperative cancellation (e.g. Ctrl+C).
    #[error("execution aborted: cancelled")]
    Canceled,
}

/// Which direction a failed branch scan was headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    Forward,
    Backward,
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchKind::Forward => write!(f, "forward"),
            BranchKind::Backward => write!(f, "backward"),
        }
    }
}
