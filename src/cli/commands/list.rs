use crate::cli::commands::require_login;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::errors::AppResult;
use crate::models::price_record::PriceRecord;
use crate::utils::colors::{RESET, color_for_change};
use crate::utils::format_price;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { limit } = cmd {
        require_login(cfg)?;

        let pipeline = Pipeline::open(cfg)?;
        let records = pipeline.records()?;

        if records.is_empty() {
            println!("No price records stored yet.");
            return Ok(());
        }

        let skip = limit.map_or(0, |n| records.len().saturating_sub(n));
        print_records(&records, skip);
    }
    Ok(())
}

fn print_records(records: &[PriceRecord], skip: usize) {
    let mut table = Table::new(vec![
        Column::right("ID", 6),
        Column::left("DATE", 10),
        Column::right("MODAL PRICE", 14),
        Column::right("CHANGE", 12),
    ]);

    for (i, r) in records.iter().enumerate().skip(skip) {
        let change = match i.checked_sub(1).and_then(|p| records.get(p)) {
            Some(prev) => {
                let delta = r.modal_price - prev.modal_price;
                format!("{:+.2}", delta)
            }
            None => "--".to_string(),
        };
        table.add_row(vec![
            r.id.to_string(),
            r.date.to_string(),
            format_price(r.modal_price),
            change,
        ]);
    }

    // colour after rendering so the padding stays aligned
    let rendered = table.render();
    for line in rendered.lines() {
        let delta = line
            .split_whitespace()
            .last()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0);
        println!("{}{}{}", color_for_change(delta), line, RESET);
    }
    println!("{} record(s)", records.len() - skip);
}
