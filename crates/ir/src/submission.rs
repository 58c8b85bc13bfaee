//! Submission records
//!
//! What a rendered form hands to its submit callback: the form type and one
//! value per field id. Value shapes follow the field type.

use quickcrm_core::{FieldId, FormType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// FieldValue
// ============================================================================

/// A submitted value
///
/// Serialized untagged, so the JSON is a plain string, array, boolean,
/// number or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// checkbox and toggle fields
    Bool(bool),
    /// rating fields (1-5)
    Number(u8),
    /// text-like fields and single select
    Text(String),
    /// multiselect and checkbox groups
    List(Vec<String>),
    /// a control that contributed nothing
    Null,
}

impl FieldValue {
    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List content, if this is a list value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric content, if this is a number value
    pub fn as_number(&self) -> Option<u8> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Whether the value carries no user input
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Bool(b) => !b,
            FieldValue::Number(_) => false,
            FieldValue::Null => true,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

// ============================================================================
// SubmissionRecord
// ============================================================================

/// `{ formType, fields }` as passed to a submit callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub form_type: FormType,
    pub fields: BTreeMap<FieldId, FieldValue>,
}

impl SubmissionRecord {
    /// Create an empty record
    pub fn new(form_type: FormType) -> Self {
        Self {
            form_type,
            fields: BTreeMap::new(),
        }
    }

    /// Set the value for a field id, returning the value it replaced
    ///
    /// Last write wins: a second field sharing an id overwrites the first.
    pub fn insert(&mut self, id: impl Into<FieldId>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(id.into(), value)
    }

    /// Get the value for a field id
    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.fields.get(id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no entries
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize to the JSON wire shape
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
