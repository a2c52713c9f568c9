//! Label-indexed confusion matrix

use std::collections::BTreeSet;
use std::fmt;

/// Counts of (true label, predicted label) pairs.
///
/// Labels are the sorted union of true and predicted labels.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    /// `matrix[t][p]`: rows with truth `t` predicted as `p`
    matrix: Vec<Vec<usize>>,
    /// Class labels, index-aligned with the matrix
    labels: Vec<String>,
}

impl ConfusionMatrix {
    /// Create an empty matrix over the given labels
    pub fn new(labels: Vec<String>) -> Self {
        let n = labels.len();
        Self { matrix: vec![vec![0; n]; n], labels }
    }

    /// Create from predictions and ground truth.
    ///
    /// Slices must have equal length; extra elements of the longer one are ignored.
    pub fn from_predictions<S: AsRef<str>>(y_pred: &[S], y_true: &[S]) -> Self {
        let labels: BTreeSet<&str> =
            y_pred.iter().chain(y_true.iter()).map(AsRef::as_ref).collect();
        let labels: Vec<String> = labels.into_iter().map(ToString::to_string).collect();
        let mut cm = Self::new(labels);

        for (pred, truth) in y_pred.iter().zip(y_true.iter()) {
            if let (Some(p), Some(t)) = (cm.index_of(pred.as_ref()), cm.index_of(truth.as_ref())) {
                cm.matrix[t][p] += 1;
            }
        }

        cm
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }

    /// Get the raw matrix
    pub fn matrix(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Get the class labels
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Get number of classes
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Count for (true label, predicted label), zero for unknown labels
    pub fn get(&self, true_label: &str, predicted_label: &str) -> usize {
        match (self.index_of(true_label), self.index_of(predicted_label)) {
            (Some(t), Some(p)) => self.matrix[t][p],
            _ => 0,
        }
    }

    /// Diagonal entry for `class`
    pub fn true_positives(&self, class: usize) -> usize {
        self.matrix[class][class]
    }

    /// Column sum minus the diagonal
    pub fn false_positives(&self, class: usize) -> usize {
        (0..self.n_classes()).filter(|&i| i != class).map(|i| self.matrix[i][class]).sum()
    }

    /// Row sum minus the diagonal
    pub fn false_negatives(&self, class: usize) -> usize {
        (0..self.n_classes()).filter(|&j| j != class).map(|j| self.matrix[class][j]).sum()
    }

    /// Rows whose truth is `class`
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Share of rows on the diagonal, 0.0 when empty
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => (0..self.n_classes()).map(|i| self.matrix[i][i]).sum::<usize>() as f64 / total as f64,
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.labels.iter().map(String::len).max().unwrap_or(0).max(6);
        writeln!(f, "Confusion Matrix (rows = true, cols = predicted):")?;

        write!(f, "{:>width$} ", "")?;
        for label in &self.labels {
            write!(f, "{label:>width$} ")?;
        }
        writeln!(f)?;

        for (label, row) in self.labels.iter().zip(&self.matrix) {
            write!(f, "{label:>width$} ")?;
            for count in row {
                write!(f, "{count:>width$} ")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
