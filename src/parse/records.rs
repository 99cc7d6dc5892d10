use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::segment::{split_entries, split_sections, Section};

lazy_static! {
    static ref CATEGORY_TAG: Regex = Regex::new(r"\(Cat\s*(A|B)").unwrap();
    static ref PARENTHESIZED: Regex = Regex::new(r"\(.*?\)").unwrap();
}

/// One car model listed in the CEVS bands document.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CarRecord {
    pub car_id: i64,
    pub band: String,
    pub car_model: String,
    /// Single letter COE category, `A` or `B` if the document says so
    pub category: Option<String>,
}

/// Return the letter of the first `(Cat A` or `(Cat B` tag in the text.
pub fn category_tag(text: &str) -> Option<String> {
    CATEGORY_TAG
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Remove every parenthesized annotation and trim.
pub fn model_name(text: &str) -> String {
    PARENTHESIZED.replace_all(text, "").trim().to_string()
}

/// Turn band sections into car records with sequential ids starting at 1.
///
/// An entry takes its own category tag if it has one, otherwise the first
/// tag of its section.  Entries whose name is empty once the annotations
/// are removed are skipped and don't use up an id.
pub fn build_records(sections: &[Section]) -> Vec<CarRecord> {
    let mut records: Vec<CarRecord> = Vec::new();
    let mut car_id: i64 = 1;
    for section in sections {
        let section_category = category_tag(&section.content);
        for entry in split_entries(&section.content) {
            let car_model = model_name(&entry);
            if car_model.is_empty() {
                continue;
            }
            let category = category_tag(&entry).or_else(|| section_category.clone());
            records.push(CarRecord {
                car_id,
                band: section.band.clone(),
                car_model,
                category,
            });
            car_id += 1;
        }
    }
    records
}

/// Segment the document text and build the car records in one go.
pub fn parse_document(text: &str) -> Vec<CarRecord> {
    build_records(&split_sections(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(band: &str, content: &str) -> Section {
        Section {
            band: band.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn parse_two_bands() {
        let records = parse_document(") A1 Model One, Model Two (Cat A) B Model Three (Cat B)");
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            CarRecord {
                car_id: 1,
                band: "A1".to_string(),
                car_model: "Model One".to_string(),
                category: Some("A".to_string()),
            }
        );
        assert_eq!(records[1].car_model, "Model Two");
        assert_eq!(records[1].category, Some("A".to_string()));
        assert_eq!(records[2].car_id, 3);
        assert_eq!(records[2].band, "B");
        assert_eq!(records[2].car_model, "Model Three");
        assert_eq!(records[2].category, Some("B".to_string()));
    }

    #[test]
    fn category_tags() {
        assert_eq!(category_tag("Kia Niro (Cat A, HEV)"), Some("A".to_string()));
        assert_eq!(category_tag("BMW X5 (Cat  B)"), Some("B".to_string()));
        assert_eq!(category_tag("Tesla (cat A)"), None);
        assert_eq!(category_tag("Tesla (Cat E)"), None);
        // only the first tag counts
        assert_eq!(category_tag("X (Cat B) (Cat A)"), Some("B".to_string()));
    }

    #[test]
    fn strip_annotations() {
        assert_eq!(model_name("Toyota Corolla (Cat A) (Hybrid) "), "Toyota Corolla");
        assert_eq!(model_name("Audi (Cat B)A6"), "Audi A6");
        assert_eq!(model_name("(Cat A)"), "");
    }

    #[test]
    fn empty_names_keep_ids_sequential() {
        let sections = vec![
            section("A1", "(Cat A), Honda Jazz (Cat A)"),
            section("C2", "(note), Volvo XC60"),
        ];
        let records = build_records(&sections);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].car_id, 1);
        assert_eq!(records[0].car_model, "Honda Jazz");
        assert_eq!(records[1].car_id, 2);
        assert_eq!(records[1].band, "C2");
        assert_eq!(records[1].category, None);
    }

    #[test]
    fn own_tag_wins_over_section_tag() {
        let sections = vec![section("B", "Mazda CX-5 (Cat B), Mazda 2 (Cat A), Mazda 3")];
        let records = build_records(&sections);
        let categories: Vec<_> = records.iter().map(|r| r.category.as_deref()).collect();
        assert_eq!(categories, vec![Some("B"), Some("A"), Some("B")]);
    }
}
