//! The interactive shell behind the `jet-repl` binary.
//!
//! [`Repl`] is generic over its input and output so sessions can be driven from
//! memory in tests. The binary wires it to stdin and stdout.

use std::io::{BufRead, Write};

use colored::Colorize;
use tracing::debug;

use crate::errors::{EvalError, ReplError};
use crate::evaluator::{Evaluation, Evaluator};
use crate::function::{JetFunction, Seed};

pub const BANNER: &str = "Dual Numbers 1.0";

/// Example inputs, printed with the banner and preloaded into the history.
pub const EXAMPLES: [&str; 4] = [
    "Sqrt(2*2)",
    "t => Sin(t)",
    "t => Vec(1, 2, t)",
    "p => p^Vec(0, 0, 1)",
];

const PROMPT: &str = "(prompt)> ";
const SEED_PROMPT: &str = "Enter expr or 'q': ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
}

/// A read-eval-print loop over any line source.
pub struct Repl<R, W> {
    input: R,
    output: W,
    evaluator: Evaluator,
    history: Vec<String>,
    color: bool,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            evaluator: Evaluator::new(),
            history: EXAMPLES.iter().map(|s| s.to_string()).collect(),
            color: true,
        }
    }

    /// Enables or disables colored error messages.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn print_banner(&mut self) -> Result<(), ReplError> {
        writeln!(self.output, "{BANNER}")?;
        writeln!(self.output, "1D function must start with 't =>'")?;
        writeln!(self.output, "3D function must start with 'p =>'")?;
        writeln!(self.output, "Examples:")?;
        for example in EXAMPLES {
            writeln!(self.output, "{example}")?;
        }
        Ok(())
    }

    /// Runs until `:quit` or the end of the input.
    pub fn run(&mut self) -> Result<(), ReplError> {
        while let Some(line) = self.read_line(PROMPT)? {
            if self.handle(&line)? == Control::Quit {
                break;
            }
        }
        Ok(())
    }

    fn handle(&mut self, line: &str) -> Result<Control, ReplError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Control::Continue);
        }

        match line {
            ":quit" | ":q" => return Ok(Control::Quit),
            ":help" => {
                self.print_banner()?;
                return Ok(Control::Continue);
            }
            ":history" => {
                for (i, entry) in self.history.iter().enumerate() {
                    writeln!(self.output, "{:>4}  {entry}", i + 1)?;
                }
                return Ok(Control::Continue);
            }
            _ => {}
        }

        if let Some(index) = line.strip_prefix('!') {
            return self.recall(index.trim());
        }

        self.history.push(line.to_string());
        match self.evaluator.evaluate(line) {
            Ok(Evaluation::Value(value)) => {
                writeln!(self.output, "{value}")?;
                Ok(Control::Continue)
            }
            Ok(Evaluation::Function(function)) => self.function_loop(&function),
            Err(err) => {
                self.report(&err)?;
                Ok(Control::Continue)
            }
        }
    }

    /// Re-runs history entry `index` (1-based, as listed by `:history`).
    fn recall(&mut self, index: &str) -> Result<Control, ReplError> {
        let entry = index
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|n| self.history.get(n))
            .cloned();
        match entry {
            Some(entry) => {
                writeln!(self.output, "{entry}")?;
                self.handle(&entry)
            }
            None => {
                self.warn(&format!("No history entry: {index}"))?;
                Ok(Control::Continue)
            }
        }
    }

    /// Reads seeds and prints the function value at each, until `q`.
    fn function_loop(&mut self, function: &JetFunction) -> Result<Control, ReplError> {
        debug!(function = %function, "entering function loop");
        loop {
            let Some(line) = self.read_line(SEED_PROMPT)? else {
                return Ok(Control::Quit);
            };
            let line = line.trim();
            if line == "q" {
                return Ok(Control::Continue);
            }

            let result = self
                .evaluator
                .eval_value(line)
                .and_then(Seed::try_from)
                .and_then(|seed| function.call(seed));
            match result {
                Ok(value) => writeln!(self.output, "{value}")?,
                Err(err) => self.report(&err)?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ReplError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn report(&mut self, err: &EvalError) -> Result<(), ReplError> {
        self.warn(&err.to_string())
    }

    fn warn(&mut self, message: &str) -> Result<(), ReplError> {
        if self.color {
            writeln!(self.output, "{}", message.yellow())?;
        } else {
            writeln!(self.output, "{message}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> (String, Vec<String>) {
        let mut repl = Repl::new(input.as_bytes(), Vec::new()).with_color(false);
        repl.run().unwrap();
        let history = repl.history().to_vec();
        let output = String::from_utf8(repl.into_output()).unwrap();
        (output, history)
    }

    #[test]
    fn test_bare_expression() {
        let (output, _) = session("Sqrt(2*2)\n");
        assert_eq!(output, "(prompt)> 2\n(prompt)> ");
    }

    #[test]
    fn test_function_loop() {
        let (output, _) = session("t => Vec(1, 2, t)\n2\nq\n:quit\n");
        assert_eq!(
            output,
            "(prompt)> Enter expr or 'q': f(t) = [1, 2, 2], f'(t) = [0, 0, 1], f\"(t) = [0, 0, 0]\n\
             Enter expr or 'q': (prompt)> "
        );
    }

    #[test]
    fn test_field_function_loop() {
        let (output, _) = session("p => p^Vec(0, 0, 1)\nVec(1, 2, 3)\n");
        assert!(output.contains("f(p) = [2, -1, 0], div f(p) = 0, curl f(p) = [0, 0, -2]\n"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (output, _) = session("Foo(1)\nt => t\nVec(1, 2, 3)\nq\n1 + 1\n");
        assert!(output.contains("Unknown function: Foo\n"));
        assert!(output.contains("Invalid seed for parameter 't': expected real, got vector\n"));
        assert!(output.ends_with("2\n(prompt)> "));
    }

    #[test]
    fn test_history() {
        let (output, history) = session("1 + 2\n:history\n");
        assert_eq!(history.len(), EXAMPLES.len() + 1);
        assert_eq!(history.last().map(String::as_str), Some("1 + 2"));
        assert!(output.contains("   1  Sqrt(2*2)\n"));
        assert!(output.contains("   5  1 + 2\n"));
    }

    #[test]
    fn test_history_recall() {
        let (output, history) = session("!1\n!4\nVec(1, 2, 3)\nq\n");
        assert!(output.starts_with("(prompt)> Sqrt(2*2)\n2\n(prompt)> p => p^Vec(0, 0, 1)\n"));
        assert!(output.contains("curl f(p) = [0, 0, -2]\n"));
        assert_eq!(history.len(), EXAMPLES.len() + 2);
        assert_eq!(history.last().map(String::as_str), Some("p => p^Vec(0, 0, 1)"));
    }

    #[test]
    fn test_history_recall_out_of_range() {
        let (output, history) = session("!0\n!99\n!x\n");
        assert!(output.contains("No history entry: 0\n"));
        assert!(output.contains("No history entry: 99\n"));
        assert!(output.contains("No history entry: x\n"));
        assert_eq!(history.len(), EXAMPLES.len());
    }

    #[test]
    fn test_help_prints_banner() {
        let (output, history) = session(":help\n");
        assert!(output.contains(BANNER));
        assert!(output.contains("p => p^Vec(0, 0, 1)\n"));
        assert_eq!(history.len(), EXAMPLES.len());
    }
}
