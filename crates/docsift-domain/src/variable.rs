//! Schema variables - the fields extracted from every document

use crate::VariableId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared data type of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// Free text
    Text,
    /// Numeric value
    Number,
    /// Calendar date
    Date,
    /// One of a fixed list of categories (see `classification_rules`)
    Category,
    /// Yes/no
    Boolean,
}

impl VariableType {
    /// All variable types, in display order
    pub const ALL: [VariableType; 5] = [
        VariableType::Text,
        VariableType::Number,
        VariableType::Date,
        VariableType::Category,
        VariableType::Boolean,
    ];

    /// Lowercase name as used in persisted state
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::Text => "text",
            VariableType::Number => "number",
            VariableType::Date => "date",
            VariableType::Category => "category",
            VariableType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(VariableType::Text),
            "number" => Ok(VariableType::Number),
            "date" => Ok(VariableType::Date),
            "category" => Ok(VariableType::Category),
            "boolean" | "bool" => Ok(VariableType::Boolean),
            other => Err(format!("Unknown variable type: {}", other)),
        }
    }
}

/// A named field to extract from documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Unique identifier
    pub id: VariableId,

    /// Column name used in results and exports
    pub name: String,

    /// Declared data type
    #[serde(rename = "type")]
    pub var_type: VariableType,

    /// Free-form extraction guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Ordered category labels (meaningful for `Category` variables)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_rules: Option<Vec<String>>,

    /// Position in display and export sequence
    pub order: usize,
}

impl Variable {
    /// Build a variable from its id-less form
    pub fn from_new(id: VariableId, new: NewVariable, order: usize) -> Self {
        Self {
            id,
            name: new.name,
            var_type: new.var_type,
            instructions: new.instructions,
            classification_rules: new.classification_rules,
            order,
        }
    }

    /// Merge every `Some` field of the patch into this variable
    pub fn apply(&mut self, patch: VariablePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(var_type) = patch.var_type {
            self.var_type = var_type;
        }
        if let Some(instructions) = patch.instructions {
            self.instructions = instructions;
        }
        if let Some(rules) = patch.classification_rules {
            self.classification_rules = rules;
        }
    }
}

/// A variable definition before it has been given an id and position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVariable {
    /// Column name
    pub name: String,

    /// Declared data type
    #[serde(rename = "type")]
    pub var_type: VariableType,

    /// Free-form extraction guidance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Ordered category labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_rules: Option<Vec<String>>,
}

impl NewVariable {
    /// Create a definition with only a name and type
    pub fn new(name: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            name: name.into(),
            var_type,
            instructions: None,
            classification_rules: None,
        }
    }

    /// Attach extraction instructions
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Attach category labels
    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classification_rules = Some(rules.into_iter().map(Into::into).collect());
        self
    }
}

impl From<&Variable> for NewVariable {
    fn from(v: &Variable) -> Self {
        Self {
            name: v.name.clone(),
            var_type: v.var_type,
            instructions: v.instructions.clone(),
            classification_rules: v.classification_rules.clone(),
        }
    }
}

/// Partial update of a variable
///
/// `id` and `order` are owned by the draft and cannot be patched. The nested
/// `Option`s distinguish "leave unchanged" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariablePatch {
    /// New name
    pub name: Option<String>,
    /// New type
    pub var_type: Option<VariableType>,
    /// New or cleared instructions
    pub instructions: Option<Option<String>>,
    /// New or cleared category labels
    pub classification_rules: Option<Option<Vec<String>>>,
}

impl VariablePatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.var_type.is_none()
            && self.instructions.is_none()
            && self.classification_rules.is_none()
    }
}

/// Clone the variables sorted by their `order` field
pub fn sorted_by_order(variables: &[Variable]) -> Vec<Variable> {
    let mut sorted = variables.to_vec();
    sorted.sort_by_key(|v| v.order);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Variable {
        Variable::from_new(
            VariableId::from("v1"),
            NewVariable::new("Amount", VariableType::Number).with_instructions("Total due"),
            0,
        )
    }

    #[test]
    fn test_variable_type_parse() {
        assert_eq!("Number".parse::<VariableType>().unwrap(), VariableType::Number);
        assert_eq!("bool".parse::<VariableType>().unwrap(), VariableType::Boolean);
        assert!("currency".parse::<VariableType>().is_err());
    }

    #[test]
    fn test_apply_patch() {
        let mut v = sample();
        v.apply(VariablePatch {
            name: Some("Total".to_string()),
            instructions: Some(None),
            ..Default::default()
        });

        assert_eq!(v.name, "Total");
        assert_eq!(v.var_type, VariableType::Number);
        assert!(v.instructions.is_none());
        assert_eq!(v.order, 0);
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut v = sample();
        let before = v.clone();
        let patch = VariablePatch::default();
        assert!(patch.is_empty());
        v.apply(patch);
        assert_eq!(v, before);
    }

    #[test]
    fn test_serialized_shape() {
        let v = sample();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["id"], "v1");
        assert!(json.get("classificationRules").is_none());
    }

    #[test]
    fn test_sorted_by_order() {
        let mut a = sample();
        a.order = 2;
        let mut b = sample();
        b.id = VariableId::from("v2");
        b.order = 0;

        let sorted = sorted_by_order(&[a, b]);
        assert_eq!(sorted[0].id.as_str(), "v2");
        assert_eq!(sorted[1].id.as_str(), "v1");
    }
}
