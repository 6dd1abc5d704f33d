use crate::cli::commands::require_login;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::core::trainer::ModelSource;
use crate::errors::AppResult;
use crate::ui::messages::{header, highlight, info, warning};
use crate::utils::{format_price, month_name};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Predict { month, lag } = cmd {
        require_login(cfg)?;

        if !(1..=12).contains(month) {
            warning(format!(
                "Month {} is outside 1-12: the model was never trained on it and the estimate is meaningless.",
                month
            ));
        }

        let mut pipeline = Pipeline::open(cfg)?;
        let prediction = pipeline.predict(*month, *lag)?;

        header("🧠 Predict Arecanut Price");
        match prediction.source {
            ModelSource::Trained => info("No saved model found: trained a new one."),
            ModelSource::Artifact => info("Using saved model."),
            ModelSource::Memory => {}
        }
        println!("Month           : {}", month_name(prediction.month));
        println!("Last known price: ₹ {}", format_price(prediction.lag_price));
        highlight(
            "Predicted Arecanut Price",
            format!("₹ {}", format_price(prediction.value)),
        );
    }
    Ok(())
}
