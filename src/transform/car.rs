use std::{fmt::Display, str::FromStr};

use log::info;
use serde::Serialize;

use crate::error::TransformationError;
use crate::parse::records::CarRecord;

/// CEVS emission bands, in increasing order of emissions.
#[derive(Debug, PartialEq, Clone, Copy, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Band {
    A1,
    A2,
    A3,
    A4,
    B,
    C1,
    C2,
    C3,
    C4,
}

impl Band {
    pub const ALL: [Band; 9] = [
        Band::A1,
        Band::A2,
        Band::A3,
        Band::A4,
        Band::B,
        Band::C1,
        Band::C2,
        Band::C3,
        Band::C4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::A1 => "A1",
            Band::A2 => "A2",
            Band::A3 => "A3",
            Band::A4 => "A4",
            Band::B => "B",
            Band::C1 => "C1",
            Band::C2 => "C2",
            Band::C3 => "C3",
            Band::C4 => "C4",
        }
    }
}

impl FromStr for Band {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Band::ALL
            .iter()
            .find(|b| b.as_str() == s)
            .copied()
            .ok_or(format!("Failed to parse {s} as Band"))
    }
}

impl Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CarReference {
    pub car_id: i64,
    /// `None` if the document had a band code outside the known bands
    pub band: Option<Band>,
    pub category_id: i32,
    pub car_model: String,
}

/// Only categories A and B are mentioned in the bands document.
pub fn car_category_id(category: &str) -> Option<i32> {
    match category {
        "A" => Some(1),
        "B" => Some(2),
        _ => None,
    }
}

/// Keep the car models with a known category and decode their band.
/// Rows come out in extraction order.
pub fn transform_car_data(
    records: Option<Vec<CarRecord>>,
) -> Result<Vec<CarReference>, TransformationError> {
    let records = records.ok_or(TransformationError::MissingCarReference)?;
    let cars: Vec<CarReference> = records
        .into_iter()
        .filter_map(|r| {
            let category_id = r.category.as_deref().and_then(car_category_id)?;
            Some(CarReference {
                car_id: r.car_id,
                band: r.band.parse::<Band>().ok(),
                category_id,
                car_model: r.car_model,
            })
        })
        .collect();
    info!("Car data transformation successful, {} car models", cars.len());
    Ok(cars)
}

/// Sort on the band scale.  Unknown bands go last, ties keep their order.
pub fn sort_by_band(cars: &mut [CarReference]) {
    cars.sort_by_key(|c| (c.band.is_none(), c.band));
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    fn record(car_id: i64, band: &str, model: &str, category: Option<&str>) -> CarRecord {
        CarRecord {
            car_id,
            band: band.to_string(),
            car_model: model.to_string(),
            category: category.map(|c| c.to_string()),
        }
    }

    #[test]
    fn uncategorized_cars_are_dropped() -> Result<(), Box<dyn Error>> {
        let records = vec![
            record(1, "A1", "Hyundai Kona Electric", Some("A")),
            record(2, "A2", "Honda Vezel", None),
            record(3, "C4", "Porsche Cayenne", Some("B")),
            record(4, "C1", "Subaru Forester", Some("E")),
        ];
        let cars = transform_car_data(Some(records))?;
        assert_eq!(
            cars,
            vec![
                CarReference {
                    car_id: 1,
                    band: Some(Band::A1),
                    category_id: 1,
                    car_model: "Hyundai Kona Electric".to_string(),
                },
                CarReference {
                    car_id: 3,
                    band: Some(Band::C4),
                    category_id: 2,
                    car_model: "Porsche Cayenne".to_string(),
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn unknown_band_is_kept_as_invalid() -> Result<(), Box<dyn Error>> {
        let records = vec![record(7, "T", "Toyota Prius", Some("A"))];
        let cars = transform_car_data(Some(records))?;
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].band, None);
        Ok(())
    }

    #[test]
    fn absent_input() {
        assert!(matches!(
            transform_car_data(None),
            Err(TransformationError::MissingCarReference)
        ));
    }

    #[test]
    fn band_order() -> Result<(), Box<dyn Error>> {
        let records = vec![
            record(1, "C2", "Audi Q5", Some("B")),
            record(2, "X", "Mystery", Some("A")),
            record(3, "A3", "Toyota Corolla Altis", Some("A")),
            record(4, "B", "Mazda 3", Some("A")),
            record(5, "A3", "Kia Cerato", Some("A")),
        ];
        let mut cars = transform_car_data(Some(records))?;
        sort_by_band(&mut cars);
        let ids: Vec<i64> = cars.iter().map(|c| c.car_id).collect();
        assert_eq!(ids, vec![3, 5, 4, 1, 2]);
        assert!(Band::A4 < Band::B && Band::B < Band::C1);
        Ok(())
    }

    #[test]
    fn parse_band() {
        assert_eq!("C3".parse::<Band>(), Ok(Band::C3));
        assert!("A5".parse::<Band>().is_err());
        assert_eq!(Band::B.to_string(), "B");
    }
}
