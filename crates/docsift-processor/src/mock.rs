//! Deterministic offline extractor

use docsift_domain::traits::ValueExtractor;
use docsift_domain::{CellValue, Document, ExtractedValue, ExtractionResult, Variable, VariableType};
use std::convert::Infallible;

/// Extractor that fabricates plausible values without reading the file
///
/// Values depend only on the document id, the variable id and the variable
/// type, so repeated runs produce identical results:
///
/// | Type | Value |
/// |------|-------|
/// | text | `"<variable> <n>"` |
/// | number | amount with two decimals |
/// | date | a 2024 date, `YYYY-MM-DD` |
/// | category | first classification rule (null without rules) |
/// | boolean | `true` or `false` |
///
/// Confidence lies in 60..=99. Every value carries a short source snippet.
#[derive(Debug, Clone, Default)]
pub struct MockExtractor;

impl MockExtractor {
    /// Create the extractor
    pub fn new() -> Self {
        Self
    }
}

/// FNV-1a, stable across platforms and releases
fn stable_hash(parts: &[&str]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    for part in parts {
        for byte in part.bytes().chain(std::iter::once(0)) {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(PRIME);
        }
    }
    hash
}

fn mock_value(variable: &Variable, hash: u64) -> CellValue {
    match variable.var_type {
        VariableType::Text => CellValue::Text(format!("{} {}", variable.name, hash % 1000)),
        VariableType::Number => CellValue::Number((hash % 1_000_000) as f64 / 100.0),
        VariableType::Date => {
            let month = hash % 12 + 1;
            let day = (hash / 12) % 28 + 1;
            CellValue::Text(format!("2024-{:02}-{:02}", month, day))
        }
        VariableType::Category => variable
            .classification_rules
            .as_ref()
            .and_then(|rules| rules.first())
            .map(|rule| CellValue::Text(rule.clone()))
            .unwrap_or(CellValue::Null),
        VariableType::Boolean => CellValue::Bool(hash % 2 == 0),
    }
}

impl ValueExtractor for MockExtractor {
    type Error = Infallible;

    fn extract(
        &self,
        document: &Document,
        variables: &[Variable],
    ) -> Result<ExtractionResult, Self::Error> {
        let values = variables
            .iter()
            .map(|variable| {
                let hash = stable_hash(&[document.id.as_str(), variable.id.as_str()]);
                let value = mock_value(variable, hash);
                let confidence = 60.0 + ((hash >> 16) % 40) as f64;
                let snippet = format!("... {}: {} ...", variable.name, value);

                ExtractedValue::new(variable.id.clone(), value)
                    .with_confidence(confidence)
                    .with_source_text(snippet)
            })
            .collect();

        Ok(ExtractionResult::new(document.id.clone(), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_domain::{DocumentId, DocumentStatus, NewVariable, VariableId};

    fn document(id: &str) -> Document {
        Document {
            id: DocumentId::from(id),
            name: format!("{}.pdf", id),
            mime_type: "application/pdf".to_string(),
            size_bytes: 1,
            uploaded_at: 0,
            status: DocumentStatus::Uploaded,
        }
    }

    fn variable(id: &str, new: NewVariable) -> Variable {
        Variable::from_new(VariableId::from(id), new, 0)
    }

    fn all_types() -> Vec<Variable> {
        vec![
            variable("t", NewVariable::new("Vendor", VariableType::Text)),
            variable("n", NewVariable::new("Total", VariableType::Number)),
            variable("d", NewVariable::new("Date", VariableType::Date)),
            variable(
                "c",
                NewVariable::new("Kind", VariableType::Category).with_rules(["Invoice", "Receipt"]),
            ),
            variable("b", NewVariable::new("Paid", VariableType::Boolean)),
        ]
    }

    #[test]
    fn test_values_match_types() {
        let result = MockExtractor::new()
            .extract(&document("d1"), &all_types())
            .unwrap();

        assert_eq!(result.values.len(), 5);
        assert!(matches!(&result.values[0].value, CellValue::Text(s) if s.starts_with("Vendor ")));
        assert!(matches!(result.values[1].value, CellValue::Number(_)));
        assert!(matches!(&result.values[2].value, CellValue::Text(s) if s.len() == 10 && s.starts_with("2024-")));
        assert_eq!(result.values[3].value, CellValue::Text("Invoice".to_string()));
        assert!(matches!(result.values[4].value, CellValue::Bool(_)));
    }

    #[test]
    fn test_deterministic() {
        let extractor = MockExtractor::new();
        let a = extractor.extract(&document("d1"), &all_types()).unwrap();
        let b = extractor.extract(&document("d1"), &all_types()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_confidence_range_and_source() {
        let extractor = MockExtractor::new();
        for id in ["a", "b", "c", "d", "e", "f"] {
            let result = extractor.extract(&document(id), &all_types()).unwrap();
            for value in &result.values {
                let confidence = value.confidence.unwrap();
                assert!((60.0..=99.0).contains(&confidence));
                assert!(value.source_text.is_some());
                assert!(!value.flagged);
            }
        }
    }

    #[test]
    fn test_category_without_rules_is_null() {
        let vars = vec![variable("c", NewVariable::new("Kind", VariableType::Category))];
        let result = MockExtractor::new().extract(&document("d1"), &vars).unwrap();
        assert!(result.values[0].value.is_null());
    }

    #[test]
    fn test_stable_hash_separates_parts() {
        assert_ne!(stable_hash(&["ab", "c"]), stable_hash(&["a", "bc"]));
    }
}
