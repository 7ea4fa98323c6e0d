//! Named matrix registry

use crate::decompose;
use crate::helpers::save_target;
use crate::history::{History, HistoryIter};
use crate::ops::{self, BinaryOp};
use crate::options::RegistryOptions;
use crate::props;
use crate::result::{Determinant, EigenDecomposition, Operation, OperationResult};
use indexmap::IndexMap;
use matrix_core::{Matrix, MatrixError, Shape};
use tracing::debug;

/// Insertion-ordered store of named matrices plus the history of every
/// action performed against it
///
/// All operations are synchronous. Hosts that share a registry between
/// threads must wrap it in a single mutex held for each whole operation.
#[derive(Debug, Clone, Default)]
pub struct MatrixRegistry {
    matrices: IndexMap<String, Matrix>,
    history: History,
    options: RegistryOptions,
}

impl MatrixRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    // ========== Storage ==========

    /// Parse `grid` into a `rows × cols` matrix and store it under `name`
    ///
    /// An existing matrix with the same name is replaced; confirming that
    /// with the user is up to the caller.
    pub fn create<S: AsRef<str>>(
        &mut self,
        name: &str,
        rows: i64,
        cols: i64,
        grid: &[Vec<S>],
    ) -> Result<&Matrix, MatrixError> {
        let name = valid_name(name)?;
        let matrix = Matrix::parse_grid(name, rows, cols, grid)?;
        self.insert(name, matrix)
    }

    /// Store an already-built matrix under `name`
    pub fn insert(&mut self, name: &str, matrix: Matrix) -> Result<&Matrix, MatrixError> {
        let name = valid_name(name)?;
        let shape = matrix.shape();
        self.history
            .push(format!("Created matrix '{}' ({})", name, shape));
        Ok(self.store(name, matrix))
    }

    /// Look up a matrix by name
    pub fn get(&self, name: &str) -> Result<&Matrix, MatrixError> {
        self.matrices
            .get(name.trim())
            .ok_or_else(|| MatrixError::not_found(name.trim()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matrices.contains_key(name.trim())
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Names in insertion order
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + Clone + '_ {
        self.matrices.keys().map(String::as_str)
    }

    /// `(name, shape)` pairs in insertion order
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&str, Shape)> + Clone + '_ {
        self.matrices.iter().map(|(name, m)| (name.as_str(), m.shape()))
    }

    /// Persist a matrix result under `name`
    pub fn save(&mut self, name: &str, result: OperationResult) -> Result<&Matrix, MatrixError> {
        let name = valid_name(name)?;
        let found = result.type_name();
        let matrix = result
            .into_matrix()
            .ok_or(MatrixError::NotAMatrix { found })?;
        self.history
            .push(format!("Saved result as matrix '{}' ({})", name, matrix.shape()));
        Ok(self.store(name, matrix))
    }

    /// Remove every matrix. The history is kept and records the clear.
    pub fn clear_all(&mut self) {
        debug!(count = self.matrices.len(), "clearing all matrices");
        self.matrices.clear();
        self.history.push("All matrices cleared");
    }

    // ========== Operations ==========

    /// Add, subtract or multiply two stored matrices
    pub fn binary_op(
        &mut self,
        kind: BinaryOp,
        left: &str,
        right: &str,
        save_as: Option<&str>,
    ) -> Result<Matrix, MatrixError> {
        let a = self.get(left)?;
        let b = self.get(right)?;
        debug!(op = kind.label(), left, right, "binary operation");
        let result = kind.apply(a, b)?;

        let (left, right) = (left.trim(), right.trim());
        let entry = format!(
            "{}: {} {} {} = {}{}{}",
            kind.label(),
            left,
            kind.symbol(),
            right,
            left,
            kind.symbol(),
            right
        );
        self.record(entry, save_as, &result);
        Ok(result)
    }

    pub fn add(&mut self, left: &str, right: &str, save_as: Option<&str>) -> Result<Matrix, MatrixError> {
        self.binary_op(BinaryOp::Add, left, right, save_as)
    }

    pub fn subtract(&mut self, left: &str, right: &str, save_as: Option<&str>) -> Result<Matrix, MatrixError> {
        self.binary_op(BinaryOp::Subtract, left, right, save_as)
    }

    pub fn multiply(&mut self, left: &str, right: &str, save_as: Option<&str>) -> Result<Matrix, MatrixError> {
        self.binary_op(BinaryOp::Multiply, left, right, save_as)
    }

    pub fn transpose(&mut self, name: &str, save_as: Option<&str>) -> Result<Matrix, MatrixError> {
        let result = ops::transpose(self.get(name)?)?;
        let name = name.trim();
        debug!(name, "transpose");
        self.record(format!("Transpose: {}^T = {}^T", name, name), save_as, &result);
        Ok(result)
    }

    pub fn determinant(&mut self, name: &str) -> Result<Determinant, MatrixError> {
        let name = name.trim();
        let det = props::determinant(self.get(name)?, name, self.options.singular_tolerance)?;
        debug!(name, value = det.value, singular = det.is_singular, "determinant");
        self.history
            .push(format!("Determinant: det({}) = {:.6}", name, det.value));
        Ok(det)
    }

    pub fn inverse(&mut self, name: &str, save_as: Option<&str>) -> Result<Matrix, MatrixError> {
        let name = name.trim();
        let result = ops::inverse(self.get(name)?, name, self.options.singular_tolerance)?;
        debug!(name, "inverse");
        self.record(format!("Inverse: {}^(-1) = {}^(-1)", name, name), save_as, &result);
        Ok(result)
    }

    /// Eigenvalues and eigenvectors; see [`crate::decompose`] for ordering
    pub fn eigen(&mut self, name: &str) -> Result<EigenDecomposition, MatrixError> {
        let name = name.trim();
        let eig = decompose::eigen(self.get(name)?, name, self.options.symmetry_tolerance)?;
        debug!(name, count = eig.values.len(), "eigen decomposition");
        self.history
            .push(format!("Eigenvalues calculated for matrix '{}'", name));
        Ok(eig)
    }

    /// Dispatch a typed request to the matching operation
    pub fn execute(&mut self, op: &Operation) -> Result<OperationResult, MatrixError> {
        match op {
            Operation::Binary { kind, left, right, save_as } => self
                .binary_op(*kind, left, right, save_as.as_deref())
                .map(OperationResult::from),
            Operation::Transpose { name, save_as } => self
                .transpose(name, save_as.as_deref())
                .map(OperationResult::from),
            Operation::Determinant { name } => self.determinant(name).map(OperationResult::from),
            Operation::Inverse { name, save_as } => self
                .inverse(name, save_as.as_deref())
                .map(OperationResult::from),
            Operation::Eigen { name } => self.eigen(name).map(OperationResult::from),
        }
    }

    // ========== History ==========

    /// Iterate the history in insertion order; each call starts from the beginning
    pub fn history(&self) -> HistoryIter<'_> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    // ========== Internal ==========

    fn store(&mut self, name: &str, matrix: Matrix) -> &Matrix {
        debug!(name, shape = %matrix.shape(), "storing matrix");
        // IndexMap keeps the original position of an overwritten key
        let (index, _) = self.matrices.insert_full(name.to_string(), matrix);
        &self.matrices[index]
    }

    /// Append the history entry for a matrix-valued operation and save the
    /// result when a target name is given
    fn record(&mut self, entry: String, save_as: Option<&str>, result: &Matrix) {
        match save_target(save_as) {
            Some(target) => {
                self.history.push(format!("{} (saved as '{}')", entry, target));
                self.store(target, result.clone());
            }
            None => self.history.push(entry),
        }
    }
}

fn valid_name(name: &str) -> Result<&str, MatrixError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MatrixError::InvalidName);
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_core::ErrorKind;

    fn registry_with(entries: &[(&str, Vec<Vec<&str>>)]) -> MatrixRegistry {
        let mut reg = MatrixRegistry::new();
        for (name, grid) in entries {
            let rows = grid.len() as i64;
            let cols = grid.first().map_or(0, |r| r.len()) as i64;
            reg.create(name, rows, cols, grid).unwrap();
        }
        reg
    }

    #[test]
    fn test_create_and_get() {
        let reg = registry_with(&[("A", vec![vec!["1", "2"], vec!["3", "4"]])]);
        let a = reg.get("A").unwrap();
        assert_eq!(a.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(reg.history().collect::<Vec<_>>(), vec!["Created matrix 'A' (2x2)"]);
    }

    #[test]
    fn test_create_errors_leave_registry_untouched() {
        let mut reg = MatrixRegistry::new();
        let err = reg.create("A", 0, 2, &[vec!["1", "2"]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDimension);

        let err = reg.create("A", 1, 2, &[vec!["1", "two"]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);

        let err = reg.create("A", 1, 2, &[vec!["1"]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);

        let err = reg.create("  ", 1, 1, &[vec!["1"]]).unwrap_err();
        assert_eq!(err, MatrixError::InvalidName);

        assert!(reg.is_empty());
        assert_eq!(reg.history_len(), 0);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut reg = registry_with(&[
            ("A", vec![vec!["1"]]),
            ("B", vec![vec!["2"]]),
        ]);
        reg.create("A", 1, 2, &[vec!["5", "6"]]).unwrap();

        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(reg.get("A").unwrap().shape(), Shape::new(1, 2));
        assert_eq!(reg.history_len(), 3);
    }

    #[test]
    fn test_binary_op_history_and_save() {
        let mut reg = registry_with(&[("A", vec![vec!["1", "2"], vec!["3", "4"]])]);

        let sum = reg.add("A", "A", None).unwrap();
        assert_eq!(sum.to_rows(), vec![vec![2.0, 4.0], vec![6.0, 8.0]]);
        assert!(!reg.contains("A+A"));

        reg.multiply("A", "A", Some("C")).unwrap();
        assert_eq!(
            reg.get("C").unwrap().to_rows(),
            vec![vec![7.0, 10.0], vec![15.0, 22.0]]
        );

        let history: Vec<_> = reg.history().collect();
        assert_eq!(history[1], "Addition: A + A = A+A");
        assert_eq!(history[2], "Multiplication: A × A = A×A (saved as 'C')");
    }

    #[test]
    fn test_blank_save_name_is_ignored() {
        let mut reg = registry_with(&[("A", vec![vec!["1"]])]);
        reg.transpose("A", Some("   ")).unwrap();
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.history().last(), Some("Transpose: A^T = A^T"));
    }

    #[test]
    fn test_missing_operand() {
        let mut reg = registry_with(&[("A", vec![vec!["1"]])]);
        let err = reg.subtract("A", "B", None).unwrap_err();
        assert_eq!(err, MatrixError::not_found("B"));
        assert_eq!(reg.history_len(), 1);
    }

    #[test]
    fn test_failed_operation_does_not_save() {
        let mut reg = registry_with(&[
            ("A", vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]),
            ("B", vec![vec!["1", "2"], vec!["3", "4"]]),
        ]);
        let err = reg.multiply("A", "B", Some("C")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert!(!reg.contains("C"));
    }

    #[test]
    fn test_determinant_and_inverse() {
        let mut reg = registry_with(&[
            ("S", vec![vec!["2", "4"], vec!["1", "2"]]),
            ("M", vec![vec!["4", "7"], vec!["2", "6"]]),
        ]);

        let det = reg.determinant("S").unwrap();
        assert!(det.is_singular);
        assert_eq!(reg.history().last(), Some("Determinant: det(S) = 0.000000"));

        let err = reg.inverse("S", Some("X")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Singular);
        assert!(!reg.contains("X"));

        let inv = reg.inverse("M", Some("Minv")).unwrap();
        assert!(inv.approx_eq(reg.get("Minv").unwrap(), 0.0));
        assert_eq!(
            reg.history().last(),
            Some("Inverse: M^(-1) = M^(-1) (saved as 'Minv')")
        );
    }

    #[test]
    fn test_tolerance_option() {
        let mut reg = MatrixRegistry::with_options(
            RegistryOptions::new().with_singular_tolerance(1e-3),
        );
        reg.create("T", 1, 1, &[vec!["0.0001"]]).unwrap();
        assert!(reg.determinant("T").unwrap().is_singular);
        assert_eq!(reg.inverse("T", None).unwrap_err().kind(), ErrorKind::Singular);
    }

    #[test]
    fn test_execute_dispatch() {
        let mut reg = registry_with(&[("A", vec![vec!["2", "0"], vec!["0", "3"]])]);

        let r = reg.execute(&Operation::Determinant { name: "A".to_string() }).unwrap();
        assert!((r.as_determinant().unwrap().value - 6.0).abs() < 1e-10);

        let r = reg.execute(&Operation::Eigen { name: "A".to_string() }).unwrap();
        assert_eq!(r.as_eigen().unwrap().values.len(), 2);

        let r = reg
            .execute(&Operation::Transpose { name: "A".to_string(), save_as: Some("AT".to_string()) })
            .unwrap();
        assert!(r.as_matrix().is_some());
        assert!(reg.contains("AT"));
    }

    #[test]
    fn test_save_result() {
        let mut reg = registry_with(&[("A", vec![vec!["1", "2"], vec!["3", "4"]])]);
        let det = reg.execute(&Operation::Determinant { name: "A".to_string() }).unwrap();
        let err = reg.save("D", det).unwrap_err();
        assert_eq!(err, MatrixError::NotAMatrix { found: "Determinant" });

        let t = reg.execute(&Operation::Transpose { name: "A".to_string(), save_as: None }).unwrap();
        reg.save("AT", t).unwrap();
        assert_eq!(reg.get("AT").unwrap().get(0, 1), Some(3.0));
        assert_eq!(reg.history().last(), Some("Saved result as matrix 'AT' (2x2)"));
    }

    #[test]
    fn test_clear_all() {
        let mut reg = registry_with(&[("A", vec![vec!["1"]]), ("B", vec![vec!["2"]])]);
        let before = reg.history_len();

        reg.clear_all();

        assert!(reg.is_empty());
        assert_eq!(reg.get("A").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(reg.history_len(), before + 1);
        assert_eq!(reg.history().last(), Some("All matrices cleared"));
    }

    #[test]
    fn test_entries() {
        let reg = registry_with(&[
            ("X", vec![vec!["1", "2", "3"]]),
            ("Y", vec![vec!["1"], vec!["2"]]),
        ]);
        let entries: Vec<_> = reg.entries().collect();
        assert_eq!(entries, vec![("X", Shape::new(1, 3)), ("Y", Shape::new(2, 1))]);
    }
}
