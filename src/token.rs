/// One primitive operation of the tape language.
///
/// Produced by [`tokenize`](crate::tokenize), consumed by
/// [`Program`](crate::Program). A token sequence handed to the engine always
/// ends with [`Token::EndOfProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `+` — increment the current cell (wrapping).
    IncCell,
    /// `-` — decrement the current cell (wrapping).
    DecCell,
    /// `>` — move the data pointer one cell right.
    PtrRight,
    /// `<` — move the data pointer one cell left.
    PtrLeft,
    /// `.` — emit the current cell's decimal value as a line.
    Output,
    /// `,` — read one line of input and store it as an integer.
    Input,
    /// `[` — skip past the loop when the current cell is zero.
    BranchForward,
    /// `]` — repeat the loop while the current cell is non-zero.
    BranchBackward,
    /// End of the instruction sequence; halts the engine when fetched.
    EndOfProgram,
}
