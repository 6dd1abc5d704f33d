mod common;
use arecanut::core::visualize::{monthly_average, price_trend};
use arecanut::models::price_record::PriceRecord;
use arecanut::utils::{format_price, month_name};
use common::ymd;

fn rec(id: i64, date: (i32, u32, u32), price: f64) -> PriceRecord {
    PriceRecord {
        id,
        date: ymd(date.0, date.1, date.2),
        modal_price: price,
    }
}

#[test]
fn test_trend_is_sorted_by_date() {
    let records = vec![
        rec(1, (2024, 3, 1), 27000.0),
        rec(2, (2023, 1, 1), 25000.0),
        rec(3, (2024, 1, 1), 28000.0),
    ];

    let trend = price_trend(&records);

    assert_eq!(
        trend,
        vec![
            (ymd(2023, 1, 1), 25000.0),
            (ymd(2024, 1, 1), 28000.0),
            (ymd(2024, 3, 1), 27000.0),
        ]
    );
}

#[test]
fn test_monthly_average_groups_across_years() {
    let records = vec![
        rec(1, (2023, 1, 10), 25000.0),
        rec(2, (2024, 1, 5), 29000.0),
        rec(3, (2024, 3, 1), 27000.0),
    ];

    let averages = monthly_average(&records);

    assert_eq!(averages.len(), 2);
    assert_eq!(averages[0].month, 1);
    assert_eq!(averages[0].average, 27000.0);
    assert_eq!(averages[0].samples, 2);
    assert_eq!(averages[1].month, 3);
    assert_eq!(averages[1].samples, 1);
}

#[test]
fn test_monthly_average_of_nothing_is_empty() {
    assert!(monthly_average(&[]).is_empty());
}

#[test]
fn test_labels() {
    assert_eq!(month_name(4), "April");
    assert_eq!(month_name(13), "Month 13");
    assert_eq!(format_price(28000.0), "28,000.00");
    assert_eq!(format_price(1234567.891), "1,234,567.89");
    assert_eq!(format_price(950.5), "950.50");
}
