use std::collections::{BTreeMap, BTreeSet};

use jiff::civil::Date;
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::db::lta::coe_results_archive::RawAuctionRow;
use crate::error::TransformationError;

/// The categories kept in the warehouse: (category_id, category_code, description)
pub const CATEGORIES: [(i32, &str, &str); 3] = [
    (1, "Category A", "Cars <= 1600cc & <= 130bhp"),
    (2, "Category B", "Cars > 1600cc or > 130bhp"),
    (3, "Category E", "Open Category (any car)"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDim {
    pub category_id: i32,
    pub category_code: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DateDim {
    /// `YYYYMM` as an integer, e.g. 202401
    pub date_id: i32,
    pub year: i32,
    pub month: i32,
    pub quarter: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactCoeMonthly {
    pub fact_id: i32,
    pub date_id: i32,
    pub category_id: i32,
    pub monthly_quota: i64,
    pub bids_success_monthly: i64,
    pub bids_received_monthly: i64,
    pub average_premium_monthly: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoeTables {
    pub fact: Vec<FactCoeMonthly>,
    pub date_dim: Vec<DateDim>,
    pub category_dim: Vec<CategoryDim>,
}

/// A raw row with its measures coerced to numbers.
#[derive(Debug, Clone, PartialEq)]
struct AuctionRow {
    month: String,
    vehicle_class: String,
    quota: Option<f64>,
    bids_success: Option<f64>,
    bids_received: Option<f64>,
    premium: f64,
}

#[derive(Debug, Default)]
struct Totals {
    quota: f64,
    bids_success: f64,
    bids_received: f64,
    premium: f64,
    count: usize,
}

/// The fixed category dimension.
pub fn category_dim() -> Vec<CategoryDim> {
    CATEGORIES
        .iter()
        .map(|(id, code, description)| CategoryDim {
            category_id: *id,
            category_code: code.to_string(),
            description: description.to_string(),
        })
        .collect()
}

pub fn category_id(vehicle_class: &str) -> Option<i32> {
    CATEGORIES
        .iter()
        .find(|(_, code, _)| *code == vehicle_class)
        .map(|(id, _, _)| *id)
}

/// Coerce a json value to a number.  Numbers and numeric strings succeed,
/// everything else is `None`.
pub fn to_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|x| x.is_finite()),
        _ => None,
    }
}

impl DateDim {
    /// Decode a `YYYY-MM` month string.
    pub fn from_month(month: &str) -> Option<DateDim> {
        if month.len() != 7 || month.as_bytes()[4] != b'-' {
            return None;
        }
        let date: Date = format!("{}-01", month).parse().ok()?;
        let (year, month) = (date.year() as i32, date.month() as i32);
        Some(DateDim {
            date_id: year * 100 + month,
            year,
            month,
            quarter: (month - 1) / 3 + 1,
        })
    }
}

/// Reshape the raw auction results into the monthly fact table and its
/// date and category dimensions.
///
/// Only categories A, B and E are kept.  Rows without a valid premium are
/// dropped.  Missing quotas or bid counts count as zero in the sums.  The
/// fact rows are sorted by `(date_id, category_id)` and numbered from 1.
pub fn transform_coe_data(rows: Vec<RawAuctionRow>) -> Result<CoeTables, TransformationError> {
    let rows: Vec<AuctionRow> = rows
        .into_iter()
        .filter(|r| category_id(&r.vehicle_class).is_some())
        .filter_map(|r| {
            let premium = to_numeric(&r.premium)?;
            Some(AuctionRow {
                quota: to_numeric(&r.quota),
                bids_success: to_numeric(&r.bids_success),
                bids_received: to_numeric(&r.bids_received),
                premium,
                month: r.month,
                vehicle_class: r.vehicle_class,
            })
        })
        .collect();

    let months: BTreeSet<&str> = rows.iter().map(|r| r.month.as_str()).collect();
    let date_dim = months
        .into_iter()
        .map(|m| DateDim::from_month(m).ok_or_else(|| TransformationError::UnmappedMonth(m.to_string())))
        .collect::<Result<Vec<DateDim>, _>>()?;

    let mut groups: BTreeMap<(i32, i32), Totals> = BTreeMap::new();
    for row in &rows {
        let category_id = category_id(&row.vehicle_class)
            .ok_or_else(|| TransformationError::UnknownVehicleClass(row.vehicle_class.clone()))?;
        let date_id = DateDim::from_month(&row.month)
            .ok_or_else(|| TransformationError::UnmappedMonth(row.month.clone()))?
            .date_id;
        let totals = groups.entry((date_id, category_id)).or_default();
        totals.quota += row.quota.unwrap_or(0.0);
        totals.bids_success += row.bids_success.unwrap_or(0.0);
        totals.bids_received += row.bids_received.unwrap_or(0.0);
        totals.premium += row.premium;
        totals.count += 1;
    }

    let fact: Vec<FactCoeMonthly> = groups
        .into_iter()
        .enumerate()
        .map(|(i, ((date_id, category_id), totals))| FactCoeMonthly {
            fact_id: i as i32 + 1,
            date_id,
            category_id,
            monthly_quota: totals.quota as i64,
            bids_success_monthly: totals.bids_success as i64,
            bids_received_monthly: totals.bids_received as i64,
            average_premium_monthly: totals.premium / totals.count as f64,
        })
        .collect();

    if fact.is_empty() {
        warn!("No COE rows left after filtering");
    }
    info!(
        "COE data transformation successful, {} fact rows over {} months",
        fact.len(),
        date_dim.len()
    );
    Ok(CoeTables {
        fact,
        date_dim,
        category_dim: category_dim(),
    })
}
