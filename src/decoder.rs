//! Decoding of benchmark names into structured dimensions.
//!
//! # Example
//!
//! ```
//! use bench_charts::{Field, Label, NameDecoder, NameGrammar};
//!
//! let grammar = NameGrammar::new("hashmap", "1")
//!     .dimension("operation", 2)
//!     .compound("scenario", &[Field::required(3), Field::optional(4)])
//!     .label("operation", "Set", "Insert")
//!     .label("scenario", "No_Collisions", "NoCollisions");
//! let decoder = NameDecoder::new(&grammar).unwrap();
//!
//! let record = decoder.decode("Bench_X_Set_No_Collisions/1000", 50.0).unwrap();
//! assert_eq!(record.size, 1000);
//! assert_eq!(record.dimension("operation"), Some(&Label::from("Insert")));
//! assert_eq!(record.dimension("scenario"), Some(&Label::from("NoCollisions")));
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

use crate::IndexMap;
use crate::errors::{DecodeError, Diagnostic, GrammarError};
use crate::grammar::NameGrammar;
use crate::record::BenchmarkRecord;

/// Display label of one dimension.
///
/// Optional fields a name does not provide decode to [`Label::Empty`] rather
/// than an empty string, so "absent" is never confused with a real code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    /// A (translated or passed-through) display label.
    Text(String),
    /// The name did not provide this dimension.
    Empty,
}

impl Label {
    /// The label text; empty for [`Label::Empty`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Empty => "",
        }
    }

    /// Returns `true` for [`Label::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.into())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A benchmark record with its name decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    /// The original encoded name.
    pub name: String,
    /// The size parameter.
    pub size: u64,
    /// Every grammar dimension, in declaration order.
    pub dimensions: IndexMap<String, Label>,
    /// Measured time per iteration, in nanoseconds.
    pub real_time: f64,
    /// `(dimension, raw code)` pairs that had no display label.
    pub untranslated: Vec<(String, String)>,
}

impl DecodedRecord {
    /// Returns the label of `dimension`, if the grammar declares it.
    #[must_use]
    pub fn dimension(&self, dimension: &str) -> Option<&Label> {
        self.dimensions.get(dimension)
    }
}

/// A record that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// The benchmark name.
    pub name: String,
    /// Why it was skipped.
    pub error: DecodeError,
}

/// Result of decoding a whole report document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decoded {
    /// Successfully decoded records, in document order.
    pub records: Vec<DecodedRecord>,
    /// Records excluded from every downstream series.
    pub skipped: Vec<SkippedRecord>,
    /// Untranslated codes, once per `(dimension, raw)` pair, first seen first.
    pub diagnostics: Vec<Diagnostic>,
}

/// Decodes benchmark names according to a validated [`NameGrammar`].
#[derive(Debug, Clone, Copy)]
pub struct NameDecoder<'g> {
    grammar: &'g NameGrammar,
    min_fields: usize,
}

impl<'g> NameDecoder<'g> {
    /// Validates `grammar` and creates a decoder for it.
    ///
    /// # Errors
    ///
    /// Returns the grammar's [`GrammarError`] if it is inconsistent.
    pub fn new(grammar: &'g NameGrammar) -> Result<Self, GrammarError> {
        grammar.validate()?;
        Ok(Self {
            grammar,
            min_fields: grammar.min_fields(),
        })
    }

    /// The grammar this decoder reads names with.
    #[must_use]
    pub fn grammar(&self) -> &'g NameGrammar {
        self.grammar
    }

    /// Decodes one benchmark name. `real_time` is stored unchanged.
    ///
    /// # Errors
    ///
    /// * [`DecodeError::MalformedSize`] if the name has no size separator or
    ///   the trailing segment is not a non-negative integer.
    /// * [`DecodeError::MalformedDimensions`] if the prefix has fewer fields
    ///   than the grammar requires.
    /// * [`DecodeError::EmptyField`] if a required field is empty, as in
    ///   `BM_HashMap__No_Collisions/16`. Empty optional fields are skipped.
    pub fn decode(&self, name: &str, real_time: f64) -> Result<DecodedRecord, DecodeError> {
        let grammar = self.grammar;
        let (prefix, size) = name
            .rsplit_once(grammar.size_separator)
            .and_then(|(prefix, size)| parse_size(size).map(|size| (prefix, size)))
            .ok_or_else(|| DecodeError::MalformedSize(name.into()))?;

        let fields: Vec<&str> = prefix.split(grammar.field_separator).collect();
        if fields.len() < self.min_fields {
            return Err(DecodeError::MalformedDimensions {
                name: name.into(),
                found: fields.len(),
                required: self.min_fields,
            });
        }

        let mut dimensions = IndexMap::default();
        let mut untranslated = Vec::new();
        for spec in &grammar.dimensions {
            let mut raw = String::new();
            for field in &spec.fields {
                let code = fields.get(field.position).copied().unwrap_or_default();
                if code.is_empty() {
                    if field.optional {
                        continue;
                    }
                    return Err(DecodeError::EmptyField {
                        name: name.into(),
                        dimension: spec.name.clone(),
                        position: field.position,
                    });
                }
                if !raw.is_empty() {
                    raw.push(grammar.field_separator);
                }
                raw.push_str(code);
            }

            let label = if raw.is_empty() {
                Label::Empty
            } else if let Some(label) = grammar.labels.translate(&spec.name, &raw) {
                Label::from(label)
            } else {
                untranslated.push((spec.name.clone(), raw.clone()));
                Label::Text(raw)
            };
            dimensions.insert(spec.name.clone(), label);
        }

        Ok(DecodedRecord {
            name: name.into(),
            size,
            dimensions,
            real_time,
            untranslated,
        })
    }

    /// Decodes every record of a document, collecting failures instead of
    /// stopping at the first one. Times are normalized to nanoseconds.
    #[must_use]
    pub fn decode_all(&self, records: &[BenchmarkRecord]) -> Decoded {
        let mut decoded = Decoded::default();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for record in records {
            match self.decode(&record.name, record.real_time_ns()) {
                Ok(record) => {
                    for pair in &record.untranslated {
                        if seen.insert(pair.clone()) {
                            decoded.diagnostics.push(Diagnostic::UntranslatedDimension {
                                dimension: pair.0.clone(),
                                raw: pair.1.clone(),
                            });
                        }
                    }
                    decoded.records.push(record);
                }
                Err(error) => decoded.skipped.push(SkippedRecord {
                    name: record.name.clone(),
                    error,
                }),
            }
        }
        decoded
    }
}

/// Parses a size segment; only plain ASCII digits are accepted.
fn parse_size(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
