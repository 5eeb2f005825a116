//! Flagging extracted values for human review

use docsift_domain::{DocumentId, ExtractedValue, ExtractionResult, VariableId};

/// Set the `flagged` marker on one value
///
/// Returns `false` when no value exists for the pair.
pub fn flag(
    results: &mut [ExtractionResult],
    document_id: &DocumentId,
    variable_id: &VariableId,
    flagged: bool,
) -> bool {
    let value = results
        .iter_mut()
        .find(|r| &r.document_id == document_id)
        .and_then(|r| r.value_for_mut(variable_id));

    match value {
        Some(value) => {
            value.flagged = flagged;
            true
        }
        None => false,
    }
}

/// Set the `flagged` marker on every selected value; returns how many were found
pub fn bulk_flag(
    results: &mut [ExtractionResult],
    selections: &[(DocumentId, VariableId)],
    flagged: bool,
) -> usize {
    selections
        .iter()
        .filter(|(doc, var)| flag(results, doc, var, flagged))
        .count()
}

/// Every (document, variable) pair that has a value for `variable_id`
pub fn selections_for_variable(
    results: &[ExtractionResult],
    variable_id: &VariableId,
) -> Vec<(DocumentId, VariableId)> {
    results
        .iter()
        .filter(|r| r.value_for(variable_id).is_some())
        .map(|r| (r.document_id.clone(), variable_id.clone()))
        .collect()
}

/// Flagged values with their document ids
pub fn flagged_values(
    results: &[ExtractionResult],
) -> impl Iterator<Item = (&DocumentId, &ExtractedValue)> {
    results.iter().flat_map(|r| {
        r.values
            .iter()
            .filter(|v| v.flagged)
            .map(move |v| (&r.document_id, v))
    })
}

/// Number of flagged values
pub fn flagged_count(results: &[ExtractionResult]) -> usize {
    flagged_values(results).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<ExtractionResult> {
        ["d1", "d2"]
            .into_iter()
            .map(|d| {
                ExtractionResult::new(
                    DocumentId::from(d),
                    vec![
                        ExtractedValue::new(VariableId::from("v1"), "a"),
                        ExtractedValue::new(VariableId::from("v2"), 1.0),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn test_flag_and_unflag() {
        let mut results = results();
        let (d, v) = (DocumentId::from("d1"), VariableId::from("v2"));

        assert!(flag(&mut results, &d, &v, true));
        assert!(results[0].values[1].flagged);
        assert_eq!(flagged_count(&results), 1);

        assert!(flag(&mut results, &d, &v, false));
        assert_eq!(flagged_count(&results), 0);
    }

    #[test]
    fn test_flag_missing_pair() {
        let mut results = results();
        assert!(!flag(&mut results, &DocumentId::from("d9"), &VariableId::from("v1"), true));
        assert!(!flag(&mut results, &DocumentId::from("d1"), &VariableId::from("v9"), true));
    }

    #[test]
    fn test_bulk_flag_variable() {
        let mut results = results();
        let selections = selections_for_variable(&results, &VariableId::from("v1"));
        assert_eq!(selections.len(), 2);

        let mut with_missing = selections.clone();
        with_missing.push((DocumentId::from("nope"), VariableId::from("v1")));
        assert_eq!(bulk_flag(&mut results, &with_missing, true), 2);

        let flagged: Vec<_> = flagged_values(&results).map(|(d, _)| d.as_str()).collect();
        assert_eq!(flagged, vec!["d1", "d2"]);
    }
}
