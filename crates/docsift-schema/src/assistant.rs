//! Schema assistants: turn chat messages into variable suggestions

use crate::error::DraftError;
use docsift_domain::traits::SchemaAssistant;
use docsift_domain::{AssistantReply, NewVariable, Variable, VariableType};
use serde_json::Value;
use tracing::warn;

/// Keyword table: (trigger words, suggested variable)
struct KeywordRule {
    triggers: &'static [&'static str],
    name: &'static str,
    var_type: VariableType,
    instructions: &'static str,
    rules: &'static [&'static str],
}

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        triggers: &["date", "dated", "when"],
        name: "Document Date",
        var_type: VariableType::Date,
        instructions: "The primary date of the document, formatted YYYY-MM-DD",
        rules: &[],
    },
    KeywordRule {
        triggers: &["amount", "total", "price", "cost", "sum"],
        name: "Total Amount",
        var_type: VariableType::Number,
        instructions: "The total monetary amount, without currency symbols",
        rules: &[],
    },
    KeywordRule {
        triggers: &["vendor", "supplier", "company", "party", "parties"],
        name: "Counterparty",
        var_type: VariableType::Text,
        instructions: "Name of the other organization named in the document",
        rules: &[],
    },
    KeywordRule {
        triggers: &["type", "kind", "category", "classify"],
        name: "Document Type",
        var_type: VariableType::Category,
        instructions: "Classify the document",
        rules: &["Invoice", "Contract", "Receipt", "Other"],
    },
    KeywordRule {
        triggers: &["signed", "signature"],
        name: "Is Signed",
        var_type: VariableType::Boolean,
        instructions: "Whether the document carries a signature",
        rules: &[],
    },
    KeywordRule {
        triggers: &["paid", "payment"],
        name: "Is Paid",
        var_type: VariableType::Boolean,
        instructions: "Whether the document states that payment was made",
        rules: &[],
    },
    KeywordRule {
        triggers: &["number", "reference", "id"],
        name: "Reference Number",
        var_type: VariableType::Text,
        instructions: "The document's reference or identification number",
        rules: &[],
    },
];

/// Offline assistant that suggests variables from keywords
///
/// Two kinds of input are understood:
/// - explicit definitions, one per line: `Invoice Number: text`
/// - free text, matched against a keyword table
///
/// Suggestions whose names already exist in the draft are left out.
#[derive(Debug, Clone, Default)]
pub struct KeywordAssistant;

impl KeywordAssistant {
    /// Create the assistant
    pub fn new() -> Self {
        Self
    }

    fn explicit_definitions(message: &str) -> Vec<NewVariable> {
        message
            .lines()
            .filter_map(|line| {
                let (name, kind) = line.split_once(':')?;
                let name = name.trim().trim_start_matches(['-', '*']).trim();
                let var_type = kind.trim().parse::<VariableType>().ok()?;
                if name.is_empty() {
                    return None;
                }
                Some(NewVariable::new(name, var_type))
            })
            .collect()
    }

    fn keyword_suggestions(message: &str) -> Vec<NewVariable> {
        let words: Vec<String> = message
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        KEYWORD_RULES
            .iter()
            .filter(|rule| rule.triggers.iter().any(|t| words.iter().any(|w| w == t)))
            .map(|rule| {
                let suggestion = NewVariable::new(rule.name, rule.var_type)
                    .with_instructions(rule.instructions);
                if rule.rules.is_empty() {
                    suggestion
                } else {
                    suggestion.with_rules(rule.rules.iter().copied())
                }
            })
            .collect()
    }
}

impl SchemaAssistant for KeywordAssistant {
    type Error = DraftError;

    fn respond(&self, message: &str, current: &[Variable]) -> Result<AssistantReply, Self::Error> {
        let mut suggestions = Self::explicit_definitions(message);
        if suggestions.is_empty() {
            suggestions = Self::keyword_suggestions(message);
        }

        suggestions.retain(|s| !current.iter().any(|v| v.name.eq_ignore_ascii_case(&s.name)));
        let mut seen = Vec::new();
        suggestions.retain(|s| {
            let key = s.name.to_lowercase();
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        });

        let message = if suggestions.is_empty() {
            "I couldn't find new fields in that. Try naming them, e.g. \"Invoice Number: text\".".to_string()
        } else {
            let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
            format!("I suggest extracting: {}.", names.join(", "))
        };

        Ok(AssistantReply { message, suggestions })
    }
}

/// Parse a JSON reply into variable suggestions
///
/// Accepts a bare JSON array or one wrapped in a markdown code block. Each
/// element needs `name` and `type`; `instructions` and `classificationRules`
/// are optional. Elements that do not parse are skipped with a warning.
pub fn parse_suggestions(response: &str) -> Result<Vec<NewVariable>, DraftError> {
    let json_str = strip_code_fence(response);

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| DraftError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let items = json
        .as_array()
        .ok_or_else(|| DraftError::InvalidFormat("Expected JSON array".to_string()))?;

    let mut suggestions = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match serde_json::from_value::<NewVariable>(item.clone()) {
            Ok(s) if !s.name.trim().is_empty() => suggestions.push(s),
            Ok(_) => warn!("Suggestion {} has an empty name", idx),
            Err(e) => warn!("Failed to parse suggestion {}: {}", idx, e),
        }
    }
    Ok(suggestions)
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let body = trimmed.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    body.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_domain::VariableId;

    #[test]
    fn test_explicit_definitions() {
        let reply = KeywordAssistant::new()
            .respond("- Invoice Number: text\n- Due Date: date\nnot a field", &[])
            .unwrap();

        assert_eq!(reply.suggestions.len(), 2);
        assert_eq!(reply.suggestions[0].name, "Invoice Number");
        assert_eq!(reply.suggestions[1].var_type, VariableType::Date);
    }

    #[test]
    fn test_keyword_suggestions() {
        let reply = KeywordAssistant::new()
            .respond("I need the total and whether it was signed", &[])
            .unwrap();

        let names: Vec<&str> = reply.suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Total Amount", "Is Signed"]);
        assert!(reply.message.contains("Total Amount"));
    }

    #[test]
    fn test_category_suggestion_has_rules() {
        let reply = KeywordAssistant::new()
            .respond("classify each file", &[])
            .unwrap();
        let rules = reply.suggestions[0].classification_rules.as_ref().unwrap();
        assert_eq!(rules[0], "Invoice");
    }

    #[test]
    fn test_existing_names_skipped() {
        let current = vec![Variable::from_new(
            VariableId::from("v1"),
            NewVariable::new("total amount", VariableType::Number),
            0,
        )];
        let reply = KeywordAssistant::new().respond("the total please", &current).unwrap();
        assert!(reply.suggestions.is_empty());
    }

    #[test]
    fn test_parse_suggestions_code_block() {
        let response = "```json\n[{\"name\": \"Total\", \"type\": \"number\"}, {\"name\": \"x\"}]\n```";
        let suggestions = parse_suggestions(response).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].var_type, VariableType::Number);
    }

    #[test]
    fn test_parse_suggestions_rejects_non_array() {
        assert!(parse_suggestions("{\"name\": \"x\"}").is_err());
        assert!(parse_suggestions("not json").is_err());
    }
}
