use crate::EngineError;

/// Width of a single memory cell.
///
/// Increment and decrement wrap within `0..=255`; input lines must parse
/// into this range or they are rejected as unparseable.
pub type Cell = u8;

/// Number of cells a [`Tape`] allocates by default.
pub const DEFAULT_TAPE_LEN: usize = 30_000;

/// The single source of truth for mutable execution state: cell memory, the
/// data pointer, and the instruction pointer.
///
/// The data pointer selects the active cell. The instruction pointer indexes
/// the token sequence owned by [`Program`](crate::Program); it lives here
/// rather than on the program because both cursors are mutated while a
/// branch is evaluated.
pub struct Tape {
    cells: Vec<Cell>,
    data_ptr: usize,
    inst_ptr: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Create a tape with [`DEFAULT_TAPE_LEN`] zeroed cells.
    pub fn new() -> Self {
        Self::with_len(DEFAULT_TAPE_LEN)
    }

    /// Create a tape with `len` zeroed cells. A tape always holds at least
    /// one cell, so a zero-length request is clamped to one.
    pub fn with_len(len: usize) -> Self {
        Self {
            cells: vec![0; len.max(1)],
            data_ptr: 0,
            inst_ptr: 0,
        }
    }

    /// The value at the data pointer. No side effects.
    pub fn current_cell_value(&self) -> Cell {
        self.cells[self.data_ptr]
    }

    /// Overwrite the value at the data pointer.
    pub fn set_current_cell_value(&mut self, value: Cell) {
        self.cells[self.data_ptr] = value;
    }

    pub fn increment_current_cell(&mut self) {
        self.cells[self.data_ptr] = self.cells[self.data_ptr].wrapping_add(1);
    }

    pub fn decrement_current_cell(&mut self) {
        self.cells[self.data_ptr] = self.cells[self.data_ptr].wrapping_sub(1);
    }

    /// Move the data pointer one cell right. Moving past the last cell is
    /// fatal; the index is never wrapped or clamped.
    pub fn move_data_pointer_right(&mut self) -> Result<(), EngineError> {
        if self.data_ptr + 1 >= self.cells.len() {
            return Err(EngineError::OutOfBounds {
                ip: self.inst_ptr,
                ptr: self.data_ptr,
            });
        }
        self.data_ptr += 1;
        Ok(())
    }

    /// Move the data pointer one cell left. Moving left of cell 0 is fatal.
    pub fn move_data_pointer_left(&mut self) -> Result<(), EngineError> {
        if self.data_ptr == 0 {
            return Err(EngineError::OutOfBounds {
                ip: self.inst_ptr,
                ptr: self.data_ptr,
            });
        }
        self.data_ptr -= 1;
        Ok(())
    }

    /// Instruction-pointer moves carry no bounds check of their own; the
    /// branch scans in [`Program`](crate::Program) guarantee the cursor
    /// never leaves the token sequence.
    pub fn move_instruction_pointer_right(&mut self) {
        self.inst_ptr += 1;
    }

    pub fn move_instruction_pointer_left(&mut self) {
        self.inst_ptr -= 1;
    }

    /// The instruction pointer, for the program's fetch step.
    pub fn current_instruction_index(&self) -> usize {
        self.inst_ptr
    }

    pub fn data_pointer(&self) -> usize {
        self.data_ptr
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The printable form of the current cell: its decimal value, not a
    /// character conversion of the byte.
    pub fn emit_current_cell(&self) -> String {
        self.cells[self.data_ptr].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_reads_are_idempotent() {
        let mut tape = Tape::with_len(4);
        tape.set_current_cell_value(9);
        assert_eq!(tape.current_cell_value(), 9);
        assert_eq!(tape.current_cell_value(), 9);
    }

    #[test]
    fn increment_and_decrement_wrap() {
        let mut tape = Tape::with_len(1);
        tape.decrement_current_cell();
        assert_eq!(tape.current_cell_value(), 255);
        tape.increment_current_cell();
        assert_eq!(tape.current_cell_value(), 0);
        for _ in 0..256 {
            tape.increment_current_cell();
        }
        assert_eq!(tape.current_cell_value(), 0);
    }

    #[test]
    fn left_move_from_cell_zero_is_out_of_bounds() {
        let mut tape = Tape::with_len(4);
        let result = tape.move_data_pointer_left();
        assert!(matches!(result, Err(EngineError::OutOfBounds { ptr: 0, .. })));
        assert_eq!(tape.data_pointer(), 0);
    }

    #[test]
    fn right_move_past_last_cell_is_out_of_bounds() {
        let mut tape = Tape::with_len(2);
        tape.move_data_pointer_right().unwrap();
        let result = tape.move_data_pointer_right();
        assert!(matches!(result, Err(EngineError::OutOfBounds { ptr: 1, .. })));
        assert_eq!(tape.data_pointer(), 1);
    }

    #[test]
    fn zero_length_request_still_allocates_one_cell() {
        let tape = Tape::with_len(0);
        assert_eq!(tape.cell_count(), 1);
        assert_eq!(tape.current_cell_value(), 0);
    }

    #[test]
    fn emit_produces_decimal_text() {
        let mut tape = Tape::with_len(1);
        assert_eq!(tape.emit_current_cell(), "0");
        tape.set_current_cell_value(255);
        assert_eq!(tape.emit_current_cell(), "255");
    }

    #[test]
    fn instruction_pointer_moves_both_ways() {
        let mut tape = Tape::with_len(1);
        tape.move_instruction_pointer_right();
        tape.move_instruction_pointer_right();
        tape.move_instruction_pointer_left();
        assert_eq!(tape.current_instruction_index(), 1);
    }
}
