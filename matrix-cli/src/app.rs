//! Interactive menu session

use crate::config::Config;
use crate::render::Renderer;
use matrix_core::split_row;
use matrix_registry::{BinaryOp, Matrix, MatrixError, MatrixRegistry, Operation, OperationResult};
use serde_json::json;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

const MENU: &str = "\
MAIN MENU:
1. Create/Input Matrix
2. Display Matrix
3. Matrix Addition
4. Matrix Subtraction
5. Matrix Multiplication
6. Matrix Transpose
7. Matrix Determinant
8. Matrix Inverse
9. Matrix Eigenvalues and Eigenvectors
10. List All Matrices
11. View Operation History
12. Clear All Matrices
0. Exit
----------------------------------------";

/// Whether the menu loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Reads a line or leaves the handler with `Flow::Exit` on end of input
macro_rules! ask {
    ($self:ident, $msg:expr) => {
        match $self.prompt($msg)? {
            Some(line) => line,
            None => return Ok(Flow::Exit),
        }
    };
}

/// One interactive session over arbitrary input and output streams
pub struct Session<R, W> {
    registry: MatrixRegistry,
    renderer: Renderer,
    json: bool,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: Config, input: R, output: W) -> Self {
        Self {
            registry: MatrixRegistry::with_options(config.registry),
            renderer: Renderer::new(config.precision),
            json: config.json,
            input,
            output,
        }
    }

    pub fn registry(&self) -> &MatrixRegistry {
        &self.registry
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", "=".repeat(60))?;
        writeln!(self.output, "{:^60}", "MATRIX OPERATIONS TOOL")?;
        writeln!(self.output, "{}", "=".repeat(60))?;

        loop {
            writeln!(self.output, "\n{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice (0-12): ")? else {
                break;
            };
            debug!(choice = choice.as_str(), "menu selection");
            if self.dispatch(&choice)? == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "\nGoodbye!")?;
        self.output.flush()
    }

    fn dispatch(&mut self, choice: &str) -> io::Result<Flow> {
        match choice {
            "0" => Ok(Flow::Exit),
            "1" => self.create_matrix(),
            "2" => self.display_matrix(),
            "3" => self.binary(BinaryOp::Add),
            "4" => self.binary(BinaryOp::Subtract),
            "5" => self.binary(BinaryOp::Multiply),
            "6" => self.unary(|name| Operation::Transpose { name, save_as: None }),
            "7" => self.unary(|name| Operation::Determinant { name }),
            "8" => self.unary(|name| Operation::Inverse { name, save_as: None }),
            "9" => self.unary(|name| Operation::Eigen { name }),
            "10" => self.list_matrices(),
            "11" => self.view_history(),
            "12" => self.clear_matrices(),
            _ => {
                writeln!(self.output, "Invalid choice! Please try again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    // ========== Menu actions ==========

    fn create_matrix(&mut self) -> io::Result<Flow> {
        let name = loop {
            let name = ask!(self, "Enter matrix name (e.g., A, B, M1): ");
            if name.is_empty() {
                writeln!(self.output, "Please enter a valid matrix name!")?;
                continue;
            }
            if !self.registry.contains(&name) {
                break name;
            }
            let answer = ask!(self, &format!("Matrix '{}' already exists. Overwrite? (y/n): ", name));
            if is_yes(&answer) {
                break name;
            }
        };

        let (rows, cols) = loop {
            let rows = ask!(self, "Enter number of rows: ");
            let cols = ask!(self, "Enter number of columns: ");
            match (rows.parse::<i64>(), cols.parse::<i64>()) {
                (Ok(r), Ok(c)) if r > 0 && c > 0 => break (r, c),
                (Ok(r), Ok(c)) => {
                    let err = MatrixError::InvalidDimension { rows: r, cols: c };
                    self.report(&err)?;
                }
                _ => writeln!(self.output, "Please enter valid integers!")?,
            }
        };

        writeln!(self.output, "Enter matrix elements ({}x{}), row by row, separated by spaces", rows, cols)?;
        let mut grid: Vec<Vec<String>> = Vec::new();
        while grid.len() < rows as usize {
            let line = ask!(self, &format!("Row {}: ", grid.len() + 1));
            let row: Vec<String> = split_row(&line).into_iter().map(str::to_string).collect();
            // Validate one row at a time so a typo only costs that row
            match Matrix::parse_grid(&name, 1, cols, std::slice::from_ref(&row)) {
                Ok(_) => grid.push(row),
                Err(err) => self.report(&err)?,
            }
        }

        match self.registry.create(&name, rows, cols, &grid) {
            Ok(matrix) => {
                let text = self.renderer.matrix(&name, matrix);
                info!(name = name.as_str(), "matrix created");
                writeln!(self.output, "Matrix '{}' created successfully!\n{}", name, text)?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn display_matrix(&mut self) -> io::Result<Flow> {
        if !self.require_matrices(1)? {
            return Ok(Flow::Continue);
        }
        let name = ask!(self, "Enter matrix name to display: ");
        match self.registry.get(&name) {
            Ok(m) => {
                let text = self.renderer.matrix(&name, m);
                write!(self.output, "{}", text)?;
            }
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn binary(&mut self, kind: BinaryOp) -> io::Result<Flow> {
        if !self.require_matrices(1)? {
            return Ok(Flow::Continue);
        }
        let left = ask!(self, "Enter first matrix name: ");
        let right = ask!(self, "Enter second matrix name: ");
        let label = format!("{}{}{}", left, kind.symbol(), right);
        self.perform(Operation::Binary { kind, left, right, save_as: None }, &label)
    }

    fn unary(&mut self, make: impl FnOnce(String) -> Operation) -> io::Result<Flow> {
        if !self.require_matrices(1)? {
            return Ok(Flow::Continue);
        }
        let name = ask!(self, "Enter matrix name: ");
        let op = make(name.clone());
        let label = match &op {
            Operation::Transpose { .. } => format!("{}^T", name),
            Operation::Inverse { .. } => format!("{}^(-1)", name),
            _ => name,
        };
        self.perform(op, &label)
    }

    fn list_matrices(&mut self) -> io::Result<Flow> {
        if !self.require_matrices(1)? {
            return Ok(Flow::Continue);
        }
        if self.json {
            let entries: Vec<_> = self
                .registry
                .entries()
                .map(|(name, shape)| json!({ "name": name, "shape": shape }))
                .collect();
            let text = to_json(&entries)?;
            writeln!(self.output, "{}", text)?;
            return Ok(Flow::Continue);
        }
        let mut text = String::new();
        for (name, shape) in self.registry.entries() {
            text.push_str(&format!("Matrix '{}': {}\n", name, shape));
        }
        writeln!(self.output, "{}Total matrices: {}", text, self.registry.len())?;
        Ok(Flow::Continue)
    }

    fn view_history(&mut self) -> io::Result<Flow> {
        let text = if self.json {
            to_json(&self.registry.history().collect::<Vec<_>>())? + "\n"
        } else {
            self.renderer.history(self.registry.history())
        };
        write!(self.output, "{}", text)?;
        Ok(Flow::Continue)
    }

    fn clear_matrices(&mut self) -> io::Result<Flow> {
        if self.registry.is_empty() {
            writeln!(self.output, "No matrices to clear!")?;
            return Ok(Flow::Continue);
        }
        let answer = ask!(self, "Are you sure you want to clear all matrices? (y/n): ");
        if is_yes(&answer) {
            self.registry.clear_all();
            writeln!(self.output, "All matrices cleared!")?;
        }
        Ok(Flow::Continue)
    }

    // ========== Helpers ==========

    /// Execute `op`, render its result and offer to save matrix results
    fn perform(&mut self, op: Operation, label: &str) -> io::Result<Flow> {
        let result = match self.registry.execute(&op) {
            Ok(result) => result,
            Err(err) => {
                self.report(&err)?;
                return Ok(Flow::Continue);
            }
        };

        let text = if self.json {
            to_json(&result)? + "\n"
        } else {
            match &result {
                OperationResult::Matrix(m) => self.renderer.matrix(label, m),
                OperationResult::Determinant(d) => self.renderer.determinant(label, d),
                OperationResult::Eigen(e) => self.renderer.eigen(label, e),
            }
        };
        write!(self.output, "{}", text)?;

        if result.as_matrix().is_some() {
            let answer = ask!(self, "Save result as new matrix? (y/n): ");
            if is_yes(&answer) {
                let name = ask!(self, "Enter name for result matrix: ");
                match self.registry.save(&name, result) {
                    Ok(_) => writeln!(self.output, "Result saved as '{}'", name)?,
                    Err(err) => self.report(&err)?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn require_matrices(&mut self, n: usize) -> io::Result<bool> {
        if self.registry.len() < n {
            writeln!(self.output, "No matrices available. Create one first!")?;
            return Ok(false);
        }
        let names: Vec<&str> = self.registry.names().collect();
        writeln!(self.output, "Available matrices: {}", names.join(", "))?;
        Ok(true)
    }

    fn report(&mut self, err: &MatrixError) -> io::Result<()> {
        debug!(code = err.code(), "operation failed");
        if self.json {
            let body = json!({ "error": err, "code": err.code(), "message": err.to_string() });
            writeln!(self.output, "{}", to_json(&body)?)
        } else {
            write!(self.output, "{}", self.renderer.error(err))
        }
    }

    /// Print `msg` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", msg)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_registry::ErrorKind;
    use std::io::Cursor;

    fn run_script(script: &str, config: Config) -> (MatrixRegistry, String) {
        let mut output = Vec::new();
        let mut session = Session::new(config, Cursor::new(script.as_bytes()), &mut output);
        session.run().unwrap();
        let registry = session.registry().clone();
        drop(session);
        (registry, String::from_utf8(output).unwrap())
    }

    const CREATE_A: &str = "1\nA\n2\n2\n1 2\n3 4\n";

    #[test]
    fn test_create_and_display() {
        let script = format!("{}2\nA\n0\n", CREATE_A);
        let (registry, out) = run_script(&script, Config::default());

        assert_eq!(registry.get("A").unwrap().to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(out.contains("Matrix 'A' created successfully!"));
        assert!(out.contains("[ 1.000  2.000 ]"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_bad_row_is_retried() {
        let script = "1\nA\n1\n2\n1\n1 x\n1 2\n0\n";
        let (registry, out) = run_script(script, Config::default());

        assert!(out.contains("row 1 has 1 entries"));
        assert!(out.contains("Invalid number 'x'"));
        assert_eq!(registry.get("A").unwrap().to_rows(), vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn test_invalid_dimensions_are_reprompted() {
        let script = "1\nA\n0\n2\n1\n1\n7\n0\n";
        let (registry, out) = run_script(script, Config::default());
        assert!(out.contains("dimensions must be positive"));
        assert_eq!(registry.get("A").unwrap().get(0, 0), Some(7.0));
    }

    #[test]
    fn test_add_and_save() {
        let script = format!("{}3\nA\nA\ny\nC\n11\n0\n", CREATE_A);
        let (registry, out) = run_script(&script, Config::default());

        assert_eq!(registry.get("C").unwrap().to_rows(), vec![vec![2.0, 4.0], vec![6.0, 8.0]]);
        assert!(out.contains("Matrix 'A+A' (2x2)"));
        assert!(out.contains("2. Addition: A + A = A+A"));
        assert!(out.contains("3. Saved result as matrix 'C' (2x2)"));
    }

    #[test]
    fn test_singular_inverse_reports_error() {
        let script = "1\nS\n2\n2\n2 4\n1 2\n7\nS\n8\nS\n0\n";
        let (registry, out) = run_script(script, Config::default());

        assert!(out.contains("det(S) = 0.000"));
        assert!(out.contains("Matrix is singular"));
        assert!(out.contains("Error: Matrix 'S' is singular and cannot be inverted"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let script = format!("{}12\nn\n12\ny\n2\n0\n", CREATE_A);
        let (registry, out) = run_script(&script, Config::default());

        assert!(registry.is_empty());
        assert_eq!(registry.history().last(), Some("All matrices cleared"));
        assert!(out.contains("No matrices available"));
    }

    #[test]
    fn test_json_output() {
        let config = Config { json: true, ..Config::default() };
        let script = format!("{}7\nA\n2\nB\n0\n", CREATE_A);
        let (registry, out) = run_script(&script, config);

        assert!(out.contains("\"type\": \"determinant\""));
        assert!(out.contains("\"code\": \"NOT_FOUND\""));
        assert_eq!(registry.get("B").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_huge_row_count_waits_for_rows() {
        let (registry, out) = run_script("1\nA\n1000000000000000000\n1\n", Config::default());
        assert!(registry.is_empty());
        assert!(out.contains("Row 1: "));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_eof_ends_session() {
        let (registry, out) = run_script("1\nA\n", Config::default());
        assert!(registry.is_empty());
        assert!(out.contains("Goodbye!"));
    }
}
