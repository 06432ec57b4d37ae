use crate::models::LogoMap;
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

pub struct CsvLoader;

impl CsvLoader {
    pub fn new() -> Self {
        CsvLoader
    }

    pub fn load_file(&self, path: &Path) -> Result<LogoMap> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open logo CSV: {}", path.display()))?;

        let map = self
            .load_reader(BufReader::new(file))
            .with_context(|| format!("Failed to load logo CSV: {}", path.display()))?;

        info!(
            "Loaded {} logo entries from {} ({} with URLs, {} empty)",
            map.len(),
            path.display(),
            map.valid_count(),
            map.empty_count()
        );

        Ok(map)
    }

    pub fn load_reader<R: Read>(&self, reader: R) -> Result<LogoMap> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let idx_id = column_index(&headers, "company_id")?;
        let idx_logo = column_index(&headers, "logo_url")?;

        let mut map = LogoMap::new();
        let mut record = StringRecord::new();
        while rdr.read_record(&mut record)? {
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let raw_id = record.get(idx_id).unwrap_or("");
            let company_id: i64 = raw_id
                .trim()
                .parse()
                .with_context(|| format!("Invalid company_id {:?} on line {}", raw_id, line))?;

            let logo_url = record
                .get(idx_logo)
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string);

            if map.get(company_id).is_some() {
                debug!(
                    "company_id {} repeated on line {}, keeping the later row",
                    company_id, line
                );
            }
            map.insert(company_id, logo_url);
        }

        Ok(map)
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| anyhow!("{} column missing from CSV header", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<LogoMap> {
        CsvLoader::new().load_reader(csv.as_bytes())
    }

    #[test]
    fn test_basic_load() {
        let map = load("company_id,logo_url\n42,https://x/logo.png\n7,\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(42), Some(Some("https://x/logo.png")));
        assert_eq!(map.get(7), Some(None));
    }

    #[test]
    fn test_logo_url_whitespace_is_trimmed() {
        let map = load("company_id,logo_url\n1,  https://a/logo.png \n2,   \n").unwrap();
        assert_eq!(map.get(1), Some(Some("https://a/logo.png")));
        assert_eq!(map.get(2), Some(None));
        assert_eq!(map.valid_count(), 1);
        assert_eq!(map.empty_count(), 1);
    }

    #[test]
    fn test_duplicate_ids_last_row_wins() {
        let map = load("company_id,logo_url\n5,first.png\n5,second.png\n6,kept.png\n6,\n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(5), Some(Some("second.png")));
        assert_eq!(map.get(6), Some(None));
    }

    #[test]
    fn test_columns_found_by_name() {
        let err = load("name,logo_url,company_id\nAcme,acme.png,3\nShort\n").unwrap_err();
        // short row has no company_id cell
        assert!(format!("{:#}", err).contains("Invalid company_id"));

        let map = load("name,logo_url,company_id\nAcme,acme.png, 3 \n").unwrap();
        assert_eq!(map.get(3), Some(Some("acme.png")));
    }

    #[test]
    fn test_short_row_has_empty_logo() {
        let map = load("company_id,logo_url\n9\n").unwrap();
        assert_eq!(map.get(9), Some(None));
    }

    #[test]
    fn test_non_numeric_id_is_fatal() {
        let err = load("company_id,logo_url\nabc,x.png\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("\"abc\""));
        assert!(message.contains("line 2"));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = load("id,logo_url\n1,x.png\n").unwrap_err();
        assert!(err.to_string().contains("company_id column missing"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvLoader::new()
            .load_file(&dir.path().join("logo.csv"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open logo CSV"));
    }
}
