use crate::cli::commands::require_login;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::core::visualize::{MonthlyAverage, monthly_average, price_trend};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::formatting::bar;
use crate::utils::table::{Column, Table};
use crate::utils::{format_price, month_name};
use chrono::NaiveDate;

const BAR_WIDTH: usize = 40;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Visualize { trend, monthly } = cmd {
        require_login(cfg)?;

        let pipeline = Pipeline::open(cfg)?;
        let records = pipeline.records()?;

        if records.is_empty() {
            println!("No price records stored yet. Upload a CSV first.");
            return Ok(());
        }

        // neither flag → both charts
        let show_all = !*trend && !*monthly;

        if *trend || show_all {
            header("📊 Price Trend Over Time");
            print_trend(&price_trend(&records));
        }

        if *monthly || show_all {
            header("📅 Average Price by Month");
            print_monthly(&monthly_average(&records));
        }
    }
    Ok(())
}

fn print_trend(series: &[(NaiveDate, f64)]) {
    let max = series.iter().map(|(_, p)| *p).fold(0.0, f64::max);

    let mut table = Table::new(vec![
        Column::left("DATE", 10),
        Column::right("PRICE", 14),
        Column::left("", BAR_WIDTH),
    ]);
    for (date, price) in series {
        table.add_row(vec![
            date.to_string(),
            format_price(*price),
            bar(*price, max, BAR_WIDTH),
        ]);
    }
    print!("{}", table.render());
}

fn print_monthly(averages: &[MonthlyAverage]) {
    let max = averages.iter().map(|m| m.average).fold(0.0, f64::max);

    let mut table = Table::new(vec![
        Column::left("MONTH", 10),
        Column::right("AVERAGE", 14),
        Column::right("N", 4),
        Column::left("", BAR_WIDTH),
    ]);
    for m in averages {
        table.add_row(vec![
            month_name(m.month),
            format_price(m.average),
            m.samples.to_string(),
            bar(m.average, max, BAR_WIDTH),
        ]);
    }
    print!("{}", table.render());
}
