use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::formatting::bold;

pub fn handle(cfg: &Config) -> AppResult<()> {
    header("🌾 Arecanut Price Predictor");
    println!("Welcome to the {} 👋\n", bold("Arecanut Price Prediction CLI"));
    println!("  - 📁 Upload historical price data   (arecanut upload <FILE>)");
    println!("  - 📈 Visualize seasonal trends      (arecanut visualize)");
    println!("  - 🤖 Predict upcoming market prices (arecanut predict --month <M>)");

    header("📘 Project Info");
    println!("  - Version  : {}", env!("CARGO_PKG_VERSION"));
    println!("  - Database : SQLite ({})", cfg.database);
    println!("  - Model    : Random Forest Regressor ({})", cfg.model_path);
    println!("  - Features : month of year, previous modal price");
    Ok(())
}
