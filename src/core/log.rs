use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// ANSI colour for an audited operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "upload" => Colour::Green,
        "train" => Colour::Purple,
        "predict" => Colour::Cyan,
        "login" => Colour::Blue,
        "logout" => Colour::Yellow,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

const MAX_OP_WIDTH: usize = 60;

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let raw_date: String = row.get(1)?;
            let operation: String = row.get(2)?;
            let target: Option<String> = row.get(3)?;
            let message: String = row.get(4)?;

            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok((id, date, operation, target.unwrap_or_default(), message))
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let visible_op = |op: &str, target: &str| -> String {
            let full = if target.is_empty() {
                op.to_string()
            } else {
                format!("{op} ({target})")
            };
            if full.chars().count() > MAX_OP_WIDTH {
                let mut s: String = full.chars().take(MAX_OP_WIDTH - 3).collect();
                s.push_str("...");
                s
            } else {
                full
            }
        };

        let op_w = entries
            .iter()
            .map(|(_, _, op, target, _)| visible_op(op.as_str(), target.as_str()).chars().count())
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|(id, _, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, target, message) in &entries {
            let plain = visible_op(operation.as_str(), target.as_str());
            let padding = " ".repeat(op_w.saturating_sub(plain.chars().count()));

            // only the operation word is coloured
            let color = color_for_operation(operation);
            let colored = match plain.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(plain.as_str()).to_string(),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
