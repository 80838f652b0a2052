//! Interim CSV rendering: one row per document, one column per top-level
//! field.

use std::collections::BTreeSet;

use beast_model::CleanDocument;
use serde_json::Value;

use crate::error::{OutputError, Result};

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Render `documents` as CSV. Columns are the union of every document's
/// top-level keys, sorted; nested values are written as compact JSON.
pub fn render_csv(name: &str, documents: &[CleanDocument]) -> Result<Vec<u8>> {
    let columns: BTreeSet<&str> = documents
        .iter()
        .filter_map(|document| document.body.as_object())
        .flat_map(|map| map.keys().map(String::as_str))
        .collect();

    let csv_error = |source| OutputError::Csv {
        name: name.to_string(),
        source,
    };
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns).map_err(csv_error)?;
    for document in documents {
        let row = columns
            .iter()
            .map(|column| render_cell(document.body.get(*column)));
        writer.write_record(row).map_err(csv_error)?;
    }
    writer.into_inner().map_err(|e| OutputError::Csv {
        name: name.to_string(),
        source: e.into_error().into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(slug: &str, body: Value) -> CleanDocument {
        CleanDocument {
            slug: slug.to_string(),
            body,
        }
    }

    #[test]
    fn columns_are_the_sorted_union_of_keys() {
        let documents = [
            document("f1", json!({"id": "F1", "type": "Film", "genre": ["Comedy"]})),
            document("d1", json!({"id": "D1", "type": "Biography", "birthYear": 1970})),
        ];
        let bytes = render_csv("corpus", &documents).unwrap();

        insta::assert_snapshot!(String::from_utf8(bytes).unwrap(), @r#"
        birthYear,genre,id,type
        ,"[""Comedy""]",F1,Film
        1970,,D1,Biography
        "#);
    }
}
