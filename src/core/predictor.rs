use crate::core::model::PriceModel;
use crate::core::trainer::ModelSource;
use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub month: u32,
    pub lag_price: f64,
    pub value: f64,
    pub source: ModelSource,
}

/// Predict the modal price for `month` given the last known price.
///
/// No range check on `month`: values outside 1-12 reach the model unchanged
/// and produce an estimate with no meaning.
pub fn predict(model: &PriceModel, month: u32, lag_price: f64) -> AppResult<f64> {
    model.predict_one(month, lag_price)
}
