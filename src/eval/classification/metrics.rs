//! Per-label scores and their averages

use super::average::Average;
use super::confusion::ConfusionMatrix;

/// Precision, recall and F1 for one label
#[derive(Clone, Debug, PartialEq)]
pub struct ClassScore {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Rows whose true label is this one
    pub support: usize,
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Scores for every label seen in either predictions or truth.
///
/// Labels that never occur as ground truth have zero support, so they do not
/// count towards the weighted averages.
#[derive(Clone, Debug)]
pub struct MultiClassMetrics {
    classes: Vec<ClassScore>,
    /// Global TP / (TP + (FP + FN) / 2); equals accuracy for single-label data
    micro: f64,
}

impl MultiClassMetrics {
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let mut hits = 0usize;
        let mut misses = 0usize;
        let classes = cm
            .labels()
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let tp = cm.true_positives(idx);
                let (fp, fn_) = (cm.false_positives(idx), cm.false_negatives(idx));
                hits += tp;
                misses += fp + fn_;

                let precision = ratio(tp as f64, (tp + fp) as f64);
                let recall = ratio(tp as f64, (tp + fn_) as f64);
                ClassScore {
                    label: label.clone(),
                    precision,
                    recall,
                    f1: ratio(2.0 * precision * recall, precision + recall),
                    support: cm.support(idx),
                }
            })
            .collect();

        let micro = ratio(2.0 * hits as f64, (2 * hits + misses) as f64);
        Self { classes, micro }
    }

    pub fn from_predictions<S: AsRef<str>>(y_pred: &[S], y_true: &[S]) -> Self {
        Self::from_confusion_matrix(&ConfusionMatrix::from_predictions(y_pred, y_true))
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn classes(&self) -> &[ClassScore] {
        &self.classes
    }

    /// Scores for one label, if it was seen
    pub fn class(&self, label: &str) -> Option<&ClassScore> {
        self.classes.iter().find(|c| c.label == label)
    }

    /// Support per label, in label order
    pub fn support(&self) -> Vec<usize> {
        self.classes.iter().map(|c| c.support).collect()
    }

    pub fn f1_avg(&self, average: Average) -> f64 {
        self.averaged(average, |c| c.f1)
    }

    /// Micro precision equals micro F1 for single-label data
    pub fn precision_avg(&self, average: Average) -> f64 {
        self.averaged(average, |c| c.precision)
    }

    /// Micro recall equals micro F1 for single-label data
    pub fn recall_avg(&self, average: Average) -> f64 {
        self.averaged(average, |c| c.recall)
    }

    fn averaged(&self, average: Average, score: impl Fn(&ClassScore) -> f64) -> f64 {
        match average {
            Average::Micro => self.micro,
            Average::Macro => {
                ratio(self.classes.iter().map(&score).sum(), self.classes.len() as f64)
            }
            Average::Weighted => {
                let total: usize = self.classes.iter().map(|c| c.support).sum();
                let weighted: f64 = self.classes.iter().map(|c| score(c) * c.support as f64).sum();
                ratio(weighted, total as f64)
            }
        }
    }
}
