use crate::db::pool::DbPool;
use crate::db::queries::{count_records, date_range, load_all};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;
use std::path::Path;

pub fn print_db_info(pool: &DbPool, db_path: &str, model_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTAL RECORDS
    //
    let count = count_records(pool)?;
    println!(
        "{}• Total records:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    //
    // 3) DATE RANGE
    //
    let range = date_range(pool)?;
    let (fmt_first, fmt_last) = match range {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (format!("{GREY}--{RESET}"), format!("{GREY}--{RESET}")),
    };

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) PRICE SPREAD
    //
    let records = load_all(pool)?;
    if !records.is_empty() {
        let min = records
            .iter()
            .map(|r| r.modal_price)
            .fold(f64::INFINITY, f64::min);
        let max = records
            .iter()
            .map(|r| r.modal_price)
            .fold(f64::NEG_INFINITY, f64::max);
        let avg = records.iter().map(|r| r.modal_price).sum::<f64>() / records.len() as f64;
        println!(
            "{}• Modal price:{} min {:.2} | avg {:.2} | max {:.2}",
            CYAN, RESET, min, avg, max
        );
    }

    //
    // 5) MODEL ARTIFACT
    //
    let model_state = if Path::new(model_path).exists() {
        format!("{GREEN}{model_path}{RESET}")
    } else {
        format!("{GREY}{model_path} (not trained yet){RESET}")
    };
    println!("{}• Model:{} {}", CYAN, RESET, model_state);

    println!();
    Ok(())
}
