//! JSON item catalog loader.
//!
//! Loads the immutable item catalog once at startup, indexes it by id and
//! validates it for common authoring issues.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::model::{AgeBand, Item, ItemFormat, MAX_CATEGORY};

/// On-disk catalog document: `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Item>,
}

/// The read-only set of assessment items.
///
/// Items keep their load order so that selection over a seeded random
/// source is reproducible.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from items, rejecting duplicate ids.
    pub fn from_items(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items, index })
    }

    pub fn lookup_by_id(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn all(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items matching an optional age band and an optional domain.
    ///
    /// The domain comparison ignores ASCII case.
    pub fn filter(&self, age_band: Option<AgeBand>, domain: Option<&str>) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|it| age_band.map_or(true, |band| it.age_band == band))
            .filter(|it| domain.map_or(true, |d| it.domain.eq_ignore_ascii_case(d)))
            .collect()
    }
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog_str(&content, path)?;
    tracing::info!(
        "loaded {} items from catalog {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Parse a catalog from a JSON string (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog, CatalogError> {
    let parsed: CatalogFile =
        serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            path: source_path.to_path_buf(),
            source,
        })?;
    Catalog::from_items(parsed.items)
}

/// A non-fatal issue found in a catalog.
#[derive(Debug, Clone)]
pub struct CatalogWarning {
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for common issues.
///
/// `max_items` is the per-session cap; bands with fewer items than that end
/// sessions by exhaustion rather than by reaching the cap.
pub fn validate_catalog(catalog: &Catalog, max_items: usize) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();

    for item in catalog.all() {
        if item.stem.trim().is_empty() {
            warnings.push(CatalogWarning {
                item_id: Some(item.id.clone()),
                message: "stem is empty".into(),
            });
        }
        if item.options.is_empty() {
            warnings.push(CatalogWarning {
                item_id: Some(item.id.clone()),
                message: "item has no options".into(),
            });
        } else if item.format == ItemFormat::Likert
            && item.options.len() != usize::from(MAX_CATEGORY) + 1
        {
            warnings.push(CatalogWarning {
                item_id: Some(item.id.clone()),
                message: format!(
                    "likert item has {} options, expected {}",
                    item.options.len(),
                    MAX_CATEGORY + 1
                ),
            });
        }
    }

    for band in AgeBand::ALL {
        let count = catalog.all().iter().filter(|it| it.age_band == band).count();
        if count == 0 {
            warnings.push(CatalogWarning {
                item_id: None,
                message: format!("age band {band} has no items"),
            });
        } else if count < max_items {
            warnings.push(CatalogWarning {
                item_id: None,
                message: format!(
                    "age band {band} has {count} items; sessions will end before {max_items} responses"
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_JSON: &str = r#"{
  "items": [
    {
      "id": "c-01",
      "age_band": "7-10",
      "domain": "Resilience",
      "format": "likert",
      "stem": "I keep trying when things are hard.",
      "options": ["Never", "Rarely", "Sometimes", "Often", "Always"]
    },
    {
      "id": "c-02",
      "age_band": "7-10",
      "domain": "Social",
      "format": "pictorial",
      "stem": "How do you feel when you meet new kids?",
      "options": ["very sad", "sad", "okay", "happy", "very happy"]
    },
    {
      "id": "t-01",
      "age_band": "14-19",
      "domain": "resilience",
      "format": "likert",
      "stem": "Setbacks make me more determined.",
      "options": ["Never", "Rarely", "Sometimes", "Often", "Always"]
    }
  ]
}"#;

    fn parse(json: &str) -> Result<Catalog, CatalogError> {
        parse_catalog_str(json, &PathBuf::from("items.json"))
    }

    #[test]
    fn parse_valid_json() {
        let catalog = parse(VALID_JSON).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.all()[0].id, "c-01");
        let item = catalog.lookup_by_id("t-01").unwrap();
        assert_eq!(item.age_band, AgeBand::Teen);
        assert!(catalog.lookup_by_id("missing").is_none());
    }

    #[test]
    fn filter_by_band_and_domain() {
        let catalog = parse(VALID_JSON).unwrap();
        assert_eq!(catalog.filter(None, None).len(), 3);
        assert_eq!(catalog.filter(Some(AgeBand::Child), None).len(), 2);
        assert_eq!(catalog.filter(Some(AgeBand::EarlyTeen), None).len(), 0);

        let resilience = catalog.filter(None, Some("RESILIENCE"));
        let ids: Vec<_> = resilience.iter().map(|it| it.id.as_str()).collect();
        assert_eq!(ids, vec!["c-01", "t-01"]);

        let both = catalog.filter(Some(AgeBand::Teen), Some("Resilience"));
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn duplicate_ids_are_fatal() {
        let json = r#"{"items": [
            {"id": "x", "age_band": "7-10", "domain": "d", "format": "likert", "stem": "s", "options": []},
            {"id": "x", "age_band": "11-13", "domain": "d", "format": "likert", "stem": "s", "options": []}
        ]}"#;
        let err = parse(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "x"));
    }

    #[test]
    fn unknown_enum_value_is_fatal() {
        let json = r#"{"items": [
            {"id": "x", "age_band": "5-6", "domain": "d", "format": "likert", "stem": "s", "options": []}
        ]}"#;
        assert!(matches!(parse(json), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn parse_malformed_json() {
        assert!(parse("{ not json").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_catalog(Path::new("/nonexistent/items.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, VALID_JSON).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn validate_reports_small_and_empty_bands() {
        let catalog = parse(VALID_JSON).unwrap();
        let warnings = validate_catalog(&catalog, 8);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("11-13 has no items")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("7-10 has 2 items")));
    }

    #[test]
    fn validate_reports_item_issues() {
        let json = r#"{"items": [
            {"id": "a", "age_band": "7-10", "domain": "d", "format": "likert", "stem": " ", "options": ["1", "2", "3"]},
            {"id": "b", "age_band": "7-10", "domain": "d", "format": "pictorial", "stem": "ok", "options": []}
        ]}"#;
        let catalog = parse(json).unwrap();
        let warnings = validate_catalog(&catalog, 1);
        let for_item = |id: &str| {
            warnings
                .iter()
                .filter(|w| w.item_id.as_deref() == Some(id))
                .map(|w| w.message.clone())
                .collect::<Vec<_>>()
        };
        assert!(for_item("a").iter().any(|m| m.contains("stem is empty")));
        assert!(for_item("a").iter().any(|m| m.contains("3 options")));
        assert!(for_item("b").iter().any(|m| m.contains("no options")));
    }
}
