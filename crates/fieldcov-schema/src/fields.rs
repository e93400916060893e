//! # Field Schema Loading
//!
//! Loads `fields.yaml`, the document that declares which fields a research
//! result is expected to contain:
//!
//! ```yaml
//! field_categories:
//!   - category: basic_info
//!     fields:
//!       - name: name
//!         required: true
//!       - name: release_date
//!   - category: technical_features
//!     fields:
//!       - name: architecture
//! ```
//!
//! Loading flattens every `(category, field)` pair once and derives the
//! three lookups the coverage analysis needs: the set of declared names,
//! the required subset, and the owning category of each name.
//!
//! ## Duplicate names
//!
//! Field names are expected to be unique across the whole schema. A name
//! declared under more than one category is accepted: the last declaration
//! decides its category, and it counts as required if any declaration marks
//! it required. Each duplicate is logged at `warn` level.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;
use serde_yaml::Value;

use fieldcov_core::{SchemaError, UNKNOWN_CATEGORY};

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Field name, matched case-sensitively against document keys.
    pub name: String,
    /// Whether a document missing this field fails validation.
    pub required: bool,
    /// Name of the category this field was declared under.
    pub category: String,
}

/// One category record with its fields, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDefinition {
    /// Category label as written in the schema.
    pub name: String,
    /// Fields declared under this category.
    pub fields: Vec<FieldDefinition>,
}

/// The loaded field schema and its derived lookups.
///
/// Read-only after construction; a single instance is shared by reference
/// across every document analyzed in a run.
#[derive(Debug, Clone, Default)]
pub struct FieldSchema {
    categories: Vec<CategoryDefinition>,
    all_fields: BTreeSet<String>,
    required_fields: BTreeSet<String>,
    field_categories: BTreeMap<String, String>,
}

impl FieldSchema {
    /// Load a schema from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] if `path` does not exist,
    /// [`SchemaError::Io`] if it cannot be read, and any error of
    /// [`FieldSchema::from_yaml_str`] for its contents.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        if !path.exists() {
            return Err(SchemaError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            fields = schema.len(),
            required = schema.required_count(),
            "loaded field schema"
        );
        Ok(schema)
    }

    /// Parse a schema from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(&value)
    }

    /// Build a schema from an already-parsed YAML document.
    ///
    /// A document without `field_categories` (including an empty document)
    /// yields an empty schema. A category without `fields` contributes no
    /// fields.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MissingCategoryName`] if a category record has no
    ///   `category` label, [`SchemaError::InvalidCategoryName`] if the label
    ///   is a list or mapping.
    /// - [`SchemaError::MissingFieldName`] if a field record has no `name`,
    ///   [`SchemaError::InvalidFieldName`] if the name is a list or mapping.
    /// - [`SchemaError::InvalidShape`] if `field_categories` or `fields` is
    ///   not a list, or a record is not a mapping.
    ///
    /// Numeric and boolean labels are used as text. `required` accepts the
    /// YAML 1.1 boolean spellings (`yes`, `no`, `on`, `off`) and numbers;
    /// any other value counts by its truthiness and is logged at `warn`.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let mut schema = FieldSchema::default();

        let records = match value.get("field_categories") {
            None | Some(Value::Null) => return Ok(schema),
            Some(Value::Sequence(seq)) => seq,
            Some(_) => {
                return Err(SchemaError::InvalidShape {
                    location: "field_categories".to_string(),
                    expected: "a list of category records",
                })
            }
        };

        for (index, record) in records.iter().enumerate() {
            let category = parse_category(index, record)?;
            for field in &category.fields {
                schema.register(field);
            }
            schema.categories.push(category);
        }

        Ok(schema)
    }

    fn register(&mut self, field: &FieldDefinition) {
        if !self.all_fields.insert(field.name.clone()) {
            tracing::warn!(
                field = %field.name,
                category = %field.category,
                previous = self.category_of(&field.name),
                "field declared more than once; last category wins"
            );
        }
        if field.required {
            self.required_fields.insert(field.name.clone());
        }
        self.field_categories
            .insert(field.name.clone(), field.category.clone());
    }

    /// Category records in declaration order.
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Every declared field name.
    pub fn all_fields(&self) -> &BTreeSet<String> {
        &self.all_fields
    }

    /// Names of required fields. Always a subset of [`all_fields`](Self::all_fields).
    pub fn required_fields(&self) -> &BTreeSet<String> {
        &self.required_fields
    }

    /// Mapping from field name to the category it was (last) declared under.
    pub fn field_categories(&self) -> &BTreeMap<String, String> {
        &self.field_categories
    }

    /// Category of a field, or `"Unknown"` if the name is not declared.
    pub fn category_of(&self, field: &str) -> &str {
        self.field_categories
            .get(field)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Returns true if `field` is required.
    pub fn is_required(&self, field: &str) -> bool {
        self.required_fields.contains(field)
    }

    /// Number of distinct declared fields.
    pub fn len(&self) -> usize {
        self.all_fields.len()
    }

    /// Returns true if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.all_fields.is_empty()
    }

    /// Number of required fields.
    pub fn required_count(&self) -> usize {
        self.required_fields.len()
    }

    /// Number of optional fields.
    pub fn optional_count(&self) -> usize {
        self.all_fields.len() - self.required_fields.len()
    }
}

fn parse_category(index: usize, record: &Value) -> Result<CategoryDefinition, SchemaError> {
    if !record.is_mapping() {
        return Err(SchemaError::InvalidShape {
            location: format!("field_categories[{index}]"),
            expected: "a mapping with 'category' and 'fields'",
        });
    }

    let name = match record.get("category") {
        None | Some(Value::Null) => return Err(SchemaError::MissingCategoryName { index }),
        Some(label) => scalar_text(label).ok_or(SchemaError::InvalidCategoryName { index })?,
    };

    let entries = match record.get("fields") {
        None | Some(Value::Null) => return Ok(CategoryDefinition { name, fields: Vec::new() }),
        Some(Value::Sequence(seq)) => seq,
        Some(_) => {
            return Err(SchemaError::InvalidShape {
                location: format!("field_categories[{index}].fields"),
                expected: "a list of field records",
            })
        }
    };

    let fields = entries
        .iter()
        .enumerate()
        .map(|(field_index, entry)| parse_field(&name, field_index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CategoryDefinition { name, fields })
}

fn parse_field(category: &str, index: usize, entry: &Value) -> Result<FieldDefinition, SchemaError> {
    let name = match entry.get("name") {
        None | Some(Value::Null) => {
            return Err(SchemaError::MissingFieldName {
                category: category.to_string(),
                index,
            })
        }
        Some(name) => scalar_text(name).ok_or_else(|| SchemaError::InvalidFieldName {
            category: category.to_string(),
            index,
        })?,
    };

    let required = match entry.get("required") {
        None => false,
        Some(flag) => required_flag(flag).unwrap_or_else(|| {
            let truthy = is_truthy(flag);
            tracing::warn!(
                category,
                field = %name,
                required = truthy,
                "'required' is not a boolean; using its truthiness"
            );
            truthy
        }),
    };

    Ok(FieldDefinition {
        name,
        required,
        category: category.to_string(),
    })
}

/// Text of a scalar label. Numbers and booleans are written out the way
/// they appear in YAML.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Interpret a `required` flag, accepting the YAML 1.1 boolean spellings
/// (`yes`/`no`, `on`/`off`, `y`/`n`) and numbers.
fn required_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Null => Some(false),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().map_or(true, |f| f != 0.0)),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "on" => Some(true),
            "false" | "no" | "n" | "off" => Some(false),
            _ => None,
        },
        Value::Tagged(tagged) => required_flag(&tagged.value),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
        other => required_flag(other).unwrap_or(false),
    }
}
