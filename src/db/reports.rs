use duckdb::{Connection, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, PartialEq, Serialize)]
pub struct PremiumByCategory {
    pub category_code: String,
    pub average_monthly_premium: f64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CarRecommendation {
    pub band: String,
    pub car_model: String,
    pub category_code: String,
}

/// Average of the monthly premiums for each category, cheapest first.
pub fn average_premium_by_category(conn: &Connection) -> Result<Vec<PremiumByCategory>> {
    let query = r#"
SELECT
    c.category_code,
    ROUND(AVG(f.average_premium_monthly), 2) AS average_monthly_premium
FROM fact_coe_monthly f
JOIN category_dim c ON f.category_id = c.category_id
GROUP BY c.category_code
ORDER BY AVG(f.average_premium_monthly);
    "#;
    let mut stmt = conn.prepare(query)?;
    let res_iter = stmt.query_map([], |row| {
        Ok(PremiumByCategory {
            category_code: row.get(0)?,
            average_monthly_premium: row.get(1)?,
        })
    })?;
    let res: Result<Vec<PremiumByCategory>> = res_iter.collect();
    res
}

/// Car models in Category A with the lowest emission bands A1 and A2.
pub fn recommended_car_models(conn: &Connection) -> Result<Vec<CarRecommendation>> {
    let query = r#"
SELECT
    cr.band::VARCHAR AS band,
    cr.car_model,
    cd.category_code
FROM car_reference cr
JOIN category_dim cd ON cr.category_id = cd.category_id
WHERE cd.category_code = 'Category A'
AND cr.band IN ('A1', 'A2');
    "#;
    let mut stmt = conn.prepare(query)?;
    let res_iter = stmt.query_map([], |row| {
        Ok(CarRecommendation {
            band: row.get(0)?,
            car_model: row.get(1)?,
            category_code: row.get(2)?,
        })
    })?;
    let res: Result<Vec<CarRecommendation>> = res_iter.collect();
    res
}

pub fn premium_table(data: &[PremiumByCategory]) -> tabled::Table {
    let mut builder = Builder::new();
    builder.push_record(vec!["Category", "Average Monthly Premium"]);
    for row in data {
        builder.push_record(vec![
            row.category_code.clone(),
            format!("{:.2}", row.average_monthly_premium),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    table
}

pub fn recommendation_table(data: &[CarRecommendation]) -> tabled::Table {
    let mut builder = Builder::new();
    builder.push_record(vec!["Band", "Car Model", "Category"]);
    for row in data {
        builder.push_record(vec![
            row.band.clone(),
            row.car_model.clone(),
            row.category_code.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    table
}

#[cfg(test)]
mod tests {
    use duckdb::{params, Connection, Result};

    use super::*;

    fn setup() -> Result<Connection> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(include_str!("../../sql/schema.sql"))?;
        conn.execute_batch(
            r#"
INSERT INTO category_dim VALUES
    (1, 'Category A', 'Cars <= 1600cc & <= 130bhp'),
    (2, 'Category B', 'Cars > 1600cc or > 130bhp'),
    (3, 'Category E', 'Open Category (any car)');
INSERT INTO fact_coe_monthly VALUES
    (1, 202401, 1, 100, 90, 150, 50000.0),
    (2, 202401, 2, 100, 90, 150, 90000.0),
    (3, 202402, 1, 100, 90, 150, 60001.0),
    (4, 202402, 3, 100, 90, 150, 95000.5);
"#,
        )?;
        let cars = [
            (1, Some("A1"), "Honda Jazz e:HEV", 1),
            (2, Some("A2"), "Toyota Yaris Cross", 1),
            (3, Some("B"), "Mazda 3", 1),
            (4, Some("A1"), "BYD Seal", 2),
            (5, None, "Unknown", 1),
        ];
        for (id, band, model, category) in cars {
            conn.execute(
                "INSERT INTO car_reference VALUES (?, ?, ?, ?);",
                params![id, band, model, category],
            )?;
        }
        Ok(conn)
    }

    #[test]
    fn premium_by_category() -> Result<()> {
        let conn = setup()?;
        let data = average_premium_by_category(&conn)?;
        assert_eq!(
            data,
            vec![
                PremiumByCategory {
                    category_code: "Category A".to_string(),
                    average_monthly_premium: 55000.5,
                },
                PremiumByCategory {
                    category_code: "Category B".to_string(),
                    average_monthly_premium: 90000.0,
                },
                PremiumByCategory {
                    category_code: "Category E".to_string(),
                    average_monthly_premium: 95000.5,
                },
            ]
        );
        let table = premium_table(&data).to_string();
        assert!(table.contains("55000.50"));
        Ok(())
    }

    #[test]
    fn recommendations() -> Result<()> {
        let conn = setup()?;
        let mut data = recommended_car_models(&conn)?;
        data.sort_by(|a, b| a.car_model.cmp(&b.car_model));
        let models: Vec<&str> = data.iter().map(|r| r.car_model.as_str()).collect();
        assert_eq!(models, vec!["Honda Jazz e:HEV", "Toyota Yaris Cross"]);
        assert!(data.iter().all(|r| r.category_code == "Category A"));
        let table = recommendation_table(&data).to_string();
        assert!(table.contains("Toyota Yaris Cross"));
        Ok(())
    }
}
