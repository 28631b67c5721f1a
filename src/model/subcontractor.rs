//! Subcontractor rows as rendered in the invitation list.

use std::path::Path;

use serde::Deserialize;

use crate::error::{FormError, Result};

/// One subcontractor row of the static list.
///
/// `id` is the value shared by the row's display checkbox and the matching
/// submission checkbox.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubcontractorRow {
    /// Checkbox value; the backend's subcontractor primary key.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Company name.
    pub company: String,
    /// Trade name (e.g. "Electrical", "Plumbing").
    pub trade: String,
    /// Head office location.
    #[serde(default, alias = "head_office")]
    pub office_location: String,
}

impl SubcontractorRow {
    pub fn new(
        id: impl Into<String>,
        company: impl Into<String>,
        trade: impl Into<String>,
        office_location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            company: company.into(),
            trade: trade.into(),
            office_location: office_location.into(),
        }
    }
}

/// Row files carry ids either as strings or as the backend's integer keys.
fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Load rows from a JSON array file.
pub fn load_rows(path: &Path) -> Result<Vec<SubcontractorRow>> {
    let contents = std::fs::read_to_string(path).map_err(|e| FormError::io(path, e))?;
    let rows: Vec<SubcontractorRow> = serde_json::from_str(&contents)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded subcontractor rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_rows_accepts_head_office_alias() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "7", "company": "ElectriCo", "trade": "Electrical", "head_office": "Leeds"}},
                {{"id": "9", "company": "Acme", "trade": "Plumbing"}}
            ]"#
        )
        .unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].office_location, "Leeds");
        assert_eq!(rows[1].office_location, "");
    }

    #[test]
    fn test_load_rows_accepts_numeric_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 7, "company": "ElectriCo", "trade": "Electrical"}}, {{"id": "8", "company": "Acme", "trade": "Plumbing"}}]"#
        )
        .unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows[0].id, "7");
        assert_eq!(rows[1].id, "8");
    }

    #[test]
    fn test_load_rows_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            load_rows(file.path()),
            Err(FormError::InvalidRows(_))
        ));
    }

    #[test]
    fn test_load_rows_missing_file() {
        let err = load_rows(Path::new("/nonexistent/rows.json")).unwrap_err();
        assert!(matches!(err, FormError::Io { .. }));
    }
}
