use serde::Serialize;

/// One supervised-learning sample: `(month, lag_price) -> target_price`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRow {
    pub month: u32,
    pub lag_price: f64,
    pub target_price: f64,
}

impl FeatureRow {
    /// Feature vector in the column order the model is trained on.
    pub fn features(&self) -> Vec<f64> {
        vec![self.month as f64, self.lag_price]
    }
}
