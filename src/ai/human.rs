use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::ai::Player;
use crate::game::{Board, Color, COLS};

/// A player taking column choices from the console.
///
/// Prints its color and the board before each move and re-prompts until the
/// input parses as a column number. Generic over the I/O handles so tests
/// can drive it with in-memory buffers.
pub struct HumanPlayer<R = BufReader<Stdin>, W = Stdout> {
    input: R,
    output: W,
    color: Option<Color>,
}

impl HumanPlayer {
    pub fn new() -> Self {
        HumanPlayer {
            input: BufReader::new(io::stdin()),
            output: io::stdout(),
            color: None,
        }
    }
}

impl Default for HumanPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, W> HumanPlayer<R, W> {
    pub fn with_io(input: R, output: W) -> Self {
        HumanPlayer {
            input,
            output,
            color: None,
        }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn propose_move(&mut self, board: &Board) -> usize {
        let color = self.color.expect("set_color must be called before play");

        writeln!(self.output, "You are playing {}", color.name()).expect("console write");
        writeln!(self.output, "{}", board).expect("console write");
        writeln!(
            self.output,
            "Choose column (0 (left) to {} (right)):",
            COLS - 1
        )
        .expect("console write");
        self.output.flush().expect("console flush");

        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line).expect("console read") == 0 {
                panic!("console input closed");
            }
            if let Ok(col) = line.trim().parse::<usize>() {
                return col;
            }
        }
    }

    fn receive_reward(&mut self, _reward: f64) {}
}
