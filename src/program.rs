use std::io::BufRead;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::tape::Tape;
use crate::token::Token;
use crate::{BranchKind, EngineError};

/// Execution state of a [`Program`].
///
/// `Halted` is terminal: it is entered exactly once, when
/// [`Token::EndOfProgram`] is fetched, and never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

/// Controls for cooperative cancellation and step limiting.
#[derive(Clone)]
pub struct StepControl {
    pub max_steps: Option<usize>,
    pub cancel_flag: Arc<AtomicBool>,
}

impl StepControl {
    pub fn new(max_steps: Option<usize>, cancel_flag: Arc<AtomicBool>) -> Self {
        Self {
            max_steps,
            cancel_flag,
        }
    }
}

type OutputSink = Box<dyn FnMut(&str)>;
type InputProvider = Box<dyn FnMut() -> Option<String>>;

/// The fetch–dispatch engine.
///
/// Owns the immutable token sequence and the [`Tape`] holding all mutable
/// runtime state. Each [`step`](Program::step) call is one atomic
/// fetch–dispatch tick; the only blocking point is the Input instruction,
/// which waits for a line on the input channel.
///
/// Branch matching deliberately rescans the token sequence linearly on every
/// taken branch and stops at the *nearest* counterpart, without tracking
/// nesting depth. That nearest-match contract is only correct for flat,
/// well-formed loop structures.
pub struct Program {
    tokens: Vec<Token>,
    tape: Tape,
    state: State,
    // When unset, Output/Input fall back to stdout/stdin.
    output_sink: Option<OutputSink>,
    input_provider: Option<InputProvider>,
}

impl Program {
    pub fn new(tokens: Vec<Token>, tape: Tape) -> Self {
        Self {
            tokens,
            tape,
            state: State::Running,
            output_sink: None,
            input_provider: None,
        }
    }

    /// Route output lines (cell values, the Input prompt, and the
    /// malformed-input message) to `sink` instead of stdout. The sink
    /// receives one line per call, without a trailing newline.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    /// Serve Input lines from `provider` instead of stdin. Returning `None`
    /// means the channel is exhausted; it is treated like an unparseable
    /// line (message emitted, cell retained).
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: FnMut() -> Option<String> + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The token under the instruction pointer.
    pub fn current_instruction(&self) -> Result<Token, EngineError> {
        let ip = self.tape.current_instruction_index();
        self.tokens
            .get(ip)
            .copied()
            .ok_or(EngineError::PointerOutOfRange {
                ip,
                len: self.tokens.len(),
            })
    }

    /// One fetch–dispatch tick. Once the program has halted this is a no-op.
    pub fn step(&mut self) -> Result<(), EngineError> {
        if self.state == State::Halted {
            return Ok(());
        }
        let token = self.current_instruction()?;
        self.evaluate(token)
    }

    /// Drive the engine until it halts.
    pub fn run(&mut self) -> Result<(), EngineError> {
        while self.state == State::Running {
            self.step()?;
        }
        Ok(())
    }

    /// Drive the engine until it halts, the step limit trips, or the cancel
    /// flag is raised.
    pub fn run_with_control(&mut self, control: &StepControl) -> Result<(), EngineError> {
        let mut steps: usize = 0;
        while self.state == State::Running {
            if control.cancel_flag.load(Ordering::Relaxed) {
                return Err(EngineError::Canceled);
            }
            if let Some(max) = control.max_steps {
                if steps >= max {
                    return Err(EngineError::StepLimitExceeded { limit: max });
                }
            }
            self.step()?;
            steps += 1;
        }
        Ok(())
    }

    fn evaluate(&mut self, token: Token) -> Result<(), EngineError> {
        // Branches do not follow the uniform mutate-then-advance rule, and
        // EndOfProgram halts in place.
        match token {
            Token::BranchForward => return self.branch_forward(),
            Token::BranchBackward => return self.branch_backward(),
            Token::EndOfProgram => {
                self.state = State::Halted;
                return Ok(());
            }
            Token::IncCell => self.tape.increment_current_cell(),
            Token::DecCell => self.tape.decrement_current_cell(),
            Token::PtrRight => self.tape.move_data_pointer_right()?,
            Token::PtrLeft => self.tape.move_data_pointer_left()?,
            Token::Output => {
                let line = self.tape.emit_current_cell();
                self.write_line(&line);
            }
            Token::Input => self.read_input()?,
        }
        self.tape.move_instruction_pointer_right();
        Ok(())
    }

    /// Forward branch: with the current cell at zero, scan right one token
    /// at a time and rest on the nearest `BranchBackward`; otherwise fall
    /// into the loop body.
    fn branch_forward(&mut self) -> Result<(), EngineError> {
        if self.tape.current_cell_value() != 0 {
            self.tape.move_instruction_pointer_right();
            return Ok(());
        }
        let branch_ip = self.tape.current_instruction_index();
        loop {
            if self.tape.current_instruction_index() + 1 >= self.tokens.len() {
                return Err(EngineError::UnmatchedBranch {
                    ip: branch_ip,
                    kind: BranchKind::Forward,
                });
            }
            self.tape.move_instruction_pointer_right();
            if self.current_instruction()? == Token::BranchBackward {
                return Ok(());
            }
        }
    }

    /// Backward branch: with the current cell non-zero, scan left and rest
    /// on the nearest `BranchForward`; otherwise fall through past the loop.
    fn branch_backward(&mut self) -> Result<(), EngineError> {
        if self.tape.current_cell_value() == 0 {
            self.tape.move_instruction_pointer_right();
            return Ok(());
        }
        let branch_ip = self.tape.current_instruction_index();
        loop {
            if self.tape.current_instruction_index() == 0 {
                return Err(EngineError::UnmatchedBranch {
                    ip: branch_ip,
                    kind: BranchKind::Backward,
                });
            }
            self.tape.move_instruction_pointer_left();
            if self.current_instruction()? == Token::BranchForward {
                return Ok(());
            }
        }
    }

    /// Prompt for one line and parse it as a cell value. An unparseable or
    /// exhausted line is recoverable: the message goes to the output
    /// channel, the cell keeps its prior value, and execution continues.
    fn read_input(&mut self) -> Result<(), EngineError> {
        self.write_line("Please input an integer");
        let line = match self.input_provider.as_mut() {
            Some(provider) => provider(),
            None => {
                let mut buf = String::new();
                let n = std::io::stdin().lock().read_line(&mut buf).map_err(|source| {
                    EngineError::Io {
                        ip: self.tape.current_instruction_index(),
                        source,
                    }
                })?;
                (n > 0).then_some(buf)
            }
        };
        match line {
            Some(line) => match line.trim().parse() {
                Ok(value) => self.tape.set_current_cell_value(value),
                Err(_) => self.write_line("Could not format to integer"),
            },
            None => self.write_line("Could not format to integer"),
        }
        Ok(())
    }

    fn write_line(&mut self, line: &str) {
        match self.output_sink.as_mut() {
            Some(sink) => sink(line),
            None => println!("{line}"),
        }
    }
}
