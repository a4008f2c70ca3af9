use anyhow::Context;
use arithkernel::prelude::ElementKind;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Kernel operation exercised by a workflow.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Subtract,
    Scale,
    Divide,
    Dot,
    Cross,
    Outer,
    MatrixMultiply,
    MatrixVector,
    VectorMatrix,
}

impl OperationKind {
    pub const ALL: [OperationKind; 10] = [
        OperationKind::Add,
        OperationKind::Subtract,
        OperationKind::Scale,
        OperationKind::Divide,
        OperationKind::Dot,
        OperationKind::Cross,
        OperationKind::Outer,
        OperationKind::MatrixMultiply,
        OperationKind::MatrixVector,
        OperationKind::VectorMatrix,
    ];
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Add => "add",
            OperationKind::Subtract => "subtract",
            OperationKind::Scale => "scale",
            OperationKind::Divide => "divide",
            OperationKind::Dot => "dot",
            OperationKind::Cross => "cross",
            OperationKind::Outer => "outer",
            OperationKind::MatrixMultiply => "matrix_multiply",
            OperationKind::MatrixVector => "matrix_vector",
            OperationKind::VectorMatrix => "vector_matrix",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub seed: u64,
    pub trials: usize,
    /// Vector length and square matrix order for generated operands.
    pub size: usize,
    pub element_kind: ElementKind,
    pub operations: Vec<OperationKind>,
    pub concurrent: bool,
    /// Largest accepted relative residual for floating-point checks.
    pub tolerance: f64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            trials: 8,
            size: 16,
            element_kind: ElementKind::Float,
            operations: OperationKind::ALL.to_vec(),
            concurrent: false,
            tolerance: 1e-9,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_args(
        seed: u64,
        trials: usize,
        size: usize,
        element_kind: ElementKind,
        operations: Vec<OperationKind>,
    ) -> Self {
        let operations = if operations.is_empty() {
            OperationKind::ALL.to_vec()
        } else {
            operations
        };
        Self {
            seed,
            trials,
            size,
            element_kind,
            operations,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.trials > 0, "workflow needs at least one trial");
        anyhow::ensure!(self.size > 0, "operand size must be positive");
        anyhow::ensure!(
            self.tolerance.is_finite() && self.tolerance >= 0.0,
            "tolerance must be a finite non-negative number"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_defaults_to_every_operation() {
        let cfg = WorkflowConfig::from_args(1, 2, 8, ElementKind::Integer, Vec::new());
        assert_eq!(cfg.operations.len(), OperationKind::ALL.len());
        assert_eq!(cfg.element_kind, ElementKind::Integer);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"seed: 3\ntrials: 4\nsize: 12\nelement_kind: integer\n\
              operations: [dot, matrix_multiply]\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.size, 12);
        assert_eq!(
            cfg.operations,
            vec![OperationKind::Dot, OperationKind::MatrixMultiply]
        );
        assert!(!cfg.concurrent);
    }

    #[test]
    fn config_load_rejects_zero_trials() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"trials: 0\n").unwrap();
        let path = temp.into_temp_path();
        assert!(WorkflowConfig::load(&path).is_err());
    }
}
