// Example car models for the revised CEVS bands, published by the NCCS as a pdf.
// https://www.nccs.gov.sg/

use log::info;
use lopdf::Document;
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExtractionError;
use crate::parse::records::{parse_document, CarRecord};

pub struct CevsBandsArchive {
    pub base_dir: String,
    pub url: String,
    pub filename: String,
}

impl CevsBandsArchive {
    /// Path of the downloaded pdf.  Does not check if the file exists.
    pub fn path(&self) -> PathBuf {
        Path::new(&self.base_dir).join(&self.filename)
    }

    pub fn download_file(&self) -> Result<(), ExtractionError> {
        let response = Client::new().get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(ExtractionError::Status(response.status().as_u16()));
        }
        let bytes = response.bytes()?;
        let path = self.path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, &bytes)?;
        info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Extract the text of the pdf, page by page.
    pub fn read_text(&self, path: &Path) -> Result<String, ExtractionError> {
        let doc = Document::load(path)?;
        let mut pages: Vec<String> = Vec::new();
        for page_number in doc.get_pages().keys() {
            pages.push(doc.extract_text(&[*page_number])?);
        }
        Ok(join_pages(pages))
    }

    /// Download the document and parse the car models out of it.
    pub fn get_car_records(&self) -> Result<Vec<CarRecord>, ExtractionError> {
        self.download_file()?;
        let text = self.read_text(&self.path())?;
        let records = parse_document(&text);
        info!("PDF data extraction successful, {} car models", records.len());
        Ok(records)
    }
}

/// Each page is followed by a newline.
pub fn join_pages<I: IntoIterator<Item = String>>(pages: I) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;
    use crate::{config::EtlConfig, db::prod_db::ProdDb};

    #[test]
    fn join() {
        let text = join_pages(vec![") A1 Kia EV6 (Cat B)".to_string(), "".to_string()]);
        assert_eq!(text, ") A1 Kia EV6 (Cat B)\n\n");
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }

    #[test]
    fn not_a_pdf() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let archive = ProdDb::cevs_bands(&EtlConfig::new("", dir.path().to_str().unwrap()));
        fs::write(archive.path(), b"<html>Not found</html>")?;
        assert!(matches!(
            archive.read_text(&archive.path()),
            Err(ExtractionError::Pdf(_))
        ));
        Ok(())
    }

    #[ignore]
    #[test]
    fn get_car_records() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let archive = ProdDb::cevs_bands(&EtlConfig::new("", dir.path().to_str().unwrap()));
        let records = archive.get_car_records()?;
        assert!(archive.path().exists());
        assert!(records.iter().any(|r| r.category.is_some()));
        Ok(())
    }
}
