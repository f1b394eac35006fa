//! Benchmark name grammar.
//!
//! A [`NameGrammar`] describes how an encoded benchmark name such as
//!
//! ```text
//! BM_HashMap_Get_No_Collisions/1024
//! ```
//!
//! splits into fields. The text after the last size separator (`/`) is the
//! size parameter; the prefix is split on the field separator (`_`) and each
//! [`DimensionSpec`] reads one or more of the resulting positions:
//!
//! ```text
//! position:  0    1       2   3  4
//!            BM _ HashMap _ Get _ No _ Collisions
//!                 family    op  scenario (compound: 3 + 4)
//! ```
//!
//! The grammar also owns the [`LabelTable`] that turns raw codes into display
//! labels, so tests and callers can inject synthetic grammars freely.

use alloc::string::String;
use alloc::vec::Vec;

use crate::IndexMap;
use crate::errors::GrammarError;

/// One field position read by a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Zero-based position in the `_`-split prefix.
    pub position: usize,
    /// Whether the name may end before this position.
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: bool,
}

impl Field {
    /// A position every name must provide.
    #[must_use]
    pub const fn required(position: usize) -> Self {
        Self {
            position,
            optional: false,
        }
    }

    /// A trailing position names may omit.
    #[must_use]
    pub const fn optional(position: usize) -> Self {
        Self {
            position,
            optional: true,
        }
    }
}

/// A named dimension reading one field, or several fields joined into a
/// compound code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DimensionSpec {
    /// Dimension name, e.g. `"operation"`.
    pub name: String,
    /// Fields joined (in this order) into the raw code.
    pub fields: Vec<Field>,
}

/// Per-dimension translation of raw codes into display labels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LabelTable {
    entries: IndexMap<String, IndexMap<String, String>>,
}

impl LabelTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a translation for `raw` in `dimension`, replacing any previous one.
    pub fn insert(
        &mut self,
        dimension: impl Into<String>,
        raw: impl Into<String>,
        label: impl Into<String>,
    ) {
        self.entries
            .entry(dimension.into())
            .or_default()
            .insert(raw.into(), label.into());
    }

    /// Looks up the display label of `raw` in `dimension`.
    #[must_use]
    pub fn translate(&self, dimension: &str, raw: &str) -> Option<&str> {
        self.entries
            .get(dimension)
            .and_then(|codes| codes.get(raw))
            .map(String::as_str)
    }

    /// Iterates over the dimensions the table has entries for.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(IndexMap::is_empty)
    }
}

/// An explicit, versioned description of a benchmark naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameGrammar {
    /// Name of the convention, e.g. `"hashmap"`.
    pub name: String,
    /// Version of the convention, bumped when benchmark names change shape.
    pub version: String,
    /// Separator before the trailing size parameter.
    pub size_separator: char,
    /// Separator between prefix fields; also joins compound codes.
    pub field_separator: char,
    /// Dimensions in declaration order.
    pub dimensions: Vec<DimensionSpec>,
    /// Display labels for raw codes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub labels: LabelTable,
}

impl NameGrammar {
    /// Creates a grammar with the `/` size separator and `_` field separator.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            size_separator: '/',
            field_separator: '_',
            dimensions: Vec::new(),
            labels: LabelTable::new(),
        }
    }

    /// Declares a dimension reading a single required position.
    #[must_use]
    pub fn dimension(self, name: impl Into<String>, position: usize) -> Self {
        self.compound(name, &[Field::required(position)])
    }

    /// Declares a dimension joining several fields into one compound code.
    #[must_use]
    pub fn compound(mut self, name: impl Into<String>, fields: &[Field]) -> Self {
        self.dimensions.push(DimensionSpec {
            name: name.into(),
            fields: fields.to_vec(),
        });
        self
    }

    /// Adds a display label for `raw` in `dimension`.
    #[must_use]
    pub fn label(
        mut self,
        dimension: impl Into<String>,
        raw: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.labels.insert(dimension, raw, label);
        self
    }

    /// Returns the dimension called `name`, if declared.
    #[must_use]
    pub fn dimension_spec(&self, name: &str) -> Option<&DimensionSpec> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    /// Minimum number of prefix fields a name needs to decode.
    #[must_use]
    pub fn min_fields(&self) -> usize {
        self.dimensions
            .iter()
            .flat_map(|d| d.fields.iter())
            .filter(|f| !f.optional)
            .map(|f| f.position + 1)
            .max()
            .unwrap_or(0)
    }

    /// Checks the grammar once before any name is decoded.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] describing the first inconsistency found.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if self.dimensions.is_empty() {
            return Err(GrammarError::NoDimensions(self.name.clone()));
        }
        if self.size_separator == self.field_separator {
            return Err(GrammarError::AmbiguousSeparators(self.size_separator));
        }

        let mut owners: IndexMap<usize, &str> = IndexMap::default();
        for (index, dimension) in self.dimensions.iter().enumerate() {
            if dimension.name.is_empty() {
                return Err(GrammarError::EmptyDimensionName(index));
            }
            if self.dimensions[..index]
                .iter()
                .any(|d| d.name == dimension.name)
            {
                return Err(GrammarError::DuplicateDimension(dimension.name.clone()));
            }
            if dimension.fields.is_empty() {
                return Err(GrammarError::NoPositions(dimension.name.clone()));
            }
            for field in &dimension.fields {
                if let Some(first) = owners.insert(field.position, dimension.name.as_str()) {
                    return Err(GrammarError::SharedPosition {
                        position: field.position,
                        first: first.into(),
                        second: dimension.name.clone(),
                    });
                }
            }
        }

        let first_optional = self
            .dimensions
            .iter()
            .flat_map(|d| d.fields.iter())
            .filter(|f| f.optional)
            .map(|f| f.position)
            .min();
        if let Some(optional) = first_optional {
            for dimension in &self.dimensions {
                if let Some(field) = dimension
                    .fields
                    .iter()
                    .find(|f| !f.optional && f.position > optional)
                {
                    return Err(GrammarError::RequiredAfterOptional {
                        dimension: dimension.name.clone(),
                        position: field.position,
                        optional,
                    });
                }
            }
        }

        if let Some(unknown) = self
            .labels
            .dimensions()
            .find(|name| self.dimension_spec(name).is_none())
        {
            return Err(GrammarError::UnknownLabelDimension(unknown.into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashmap_grammar() -> NameGrammar {
        NameGrammar::new("hashmap", "1")
            .dimension("family", 1)
            .dimension("operation", 2)
            .compound("scenario", &[Field::required(3), Field::optional(4)])
            .label("operation", "Set", "Insert")
    }

    #[test]
    fn test_valid_grammar() {
        let grammar = hashmap_grammar();
        assert_eq!(grammar.validate(), Ok(()));
        assert_eq!(grammar.min_fields(), 4);
        assert_eq!(grammar.size_separator, '/');
        assert_eq!(grammar.field_separator, '_');
    }

    #[test]
    fn test_label_lookup() {
        let grammar = hashmap_grammar();
        assert_eq!(grammar.labels.translate("operation", "Set"), Some("Insert"));
        assert_eq!(grammar.labels.translate("operation", "Get"), None);
        assert_eq!(grammar.labels.translate("scenario", "Set"), None);
        assert!(!grammar.labels.is_empty());
        assert!(LabelTable::new().is_empty());
    }

    #[test]
    fn test_no_dimensions() {
        let grammar = NameGrammar::new("empty", "1");
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::NoDimensions("empty".into()))
        );
    }

    #[test]
    fn test_duplicate_dimension() {
        let grammar = NameGrammar::new("g", "1")
            .dimension("op", 1)
            .dimension("op", 2);
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::DuplicateDimension("op".into()))
        );
    }

    #[test]
    fn test_empty_dimension_name() {
        let grammar = NameGrammar::new("g", "1").dimension("", 1);
        assert_eq!(grammar.validate(), Err(GrammarError::EmptyDimensionName(0)));
    }

    #[test]
    fn test_dimension_without_positions() {
        let grammar = NameGrammar::new("g", "1").compound("op", &[]);
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::NoPositions("op".into()))
        );
    }

    #[test]
    fn test_shared_position() {
        let grammar = NameGrammar::new("g", "1")
            .dimension("op", 2)
            .compound("scenario", &[Field::required(2), Field::required(3)]);
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::SharedPosition {
                position: 2,
                first: "op".into(),
                second: "scenario".into(),
            })
        );
    }

    #[test]
    fn test_required_after_optional() {
        let grammar = NameGrammar::new("g", "1")
            .compound("detail", &[Field::optional(2)])
            .dimension("op", 3);
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::RequiredAfterOptional {
                dimension: "op".into(),
                position: 3,
                optional: 2,
            })
        );
    }

    #[test]
    fn test_ambiguous_separators() {
        let mut grammar = NameGrammar::new("g", "1").dimension("op", 1);
        grammar.size_separator = '_';
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::AmbiguousSeparators('_'))
        );
    }

    #[test]
    fn test_labels_for_unknown_dimension() {
        let grammar = NameGrammar::new("g", "1")
            .dimension("op", 1)
            .label("method", "Naive", "Naive");
        assert_eq!(
            grammar.validate(),
            Err(GrammarError::UnknownLabelDimension("method".into()))
        );
    }
}
