pub mod features;
pub mod log;
pub mod model;
pub mod pipeline;
pub mod predictor;
pub mod trainer;
pub mod visualize;
