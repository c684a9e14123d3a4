use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::{Result, SiftError};
use crate::ingest::classify::DocKind;

/// How a field's content is located within a document body.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Content starts after the first match of `start` and runs until the next
    /// recognized boundary (or `end`, when given and earlier).
    Marker { start: Regex, end: Option<Regex> },
    /// Content is a fixed character range of the document.
    Fixed { offset: usize, len: Option<usize> },
    /// Content is the first match of a regex; capture group 1 wins if present.
    Pattern(Regex),
}

/// One named extraction target.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub rule: Rule,
}

impl FieldDefinition {
    /// Field delimited by its own name used as a section label.
    pub fn marker(name: &str) -> Result<Self> {
        Self::marker_between(name, name, None)
    }

    /// Field delimited by an explicit start label and optional end label.
    pub fn marker_between(name: &str, start: &str, end: Option<&str>) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            rule: Rule::Marker {
                start: label_regex(start)?,
                end: end.map(label_regex).transpose()?,
            },
        })
    }

    /// Field captured by a user-supplied regex.
    pub fn pattern(name: &str, pattern: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            rule: Rule::Pattern(user_regex(pattern)?),
        })
    }

    /// Field at a fixed character offset.
    #[must_use]
    pub fn fixed(name: &str, offset: usize, len: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            rule: Rule::Fixed { offset, len },
        }
    }
}

/// Ordered list of fields for one document kind. Field names are unique and
/// fix the output column order. Immutable once built.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<FieldDefinition>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SiftError::Schema(format!(
                    "duplicate field name: {}",
                    field.name
                )));
            }
        }
        Ok(Self { fields })
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Column names, in schema order.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }
}

/// Section labels are matched case-insensitively at the start of a line, with
/// an optional trailing colon (covers both "Owner\nAlice" and "Owner: Alice").
/// The word boundary keeps a label from matching a longer word's prefix
/// ("Summary" must not anchor inside "Summaries").
fn label_regex(label: &str) -> Result<Regex> {
    let pattern = format!(r"^[ \t]*{}\b[ \t]*:?", regex::escape(label));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .multi_line(true)
        .build()
        .map_err(|e| SiftError::Pattern {
            pattern,
            source: e,
        })
}

fn user_regex(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .multi_line(true)
        .build()
        .map_err(|e| SiftError::Pattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

/// Built-in charter schema.
pub fn charter() -> Result<FieldSchema> {
    FieldSchema::new(vec![
        FieldDefinition::marker("Mission")?,
        FieldDefinition::marker("Scope")?,
        FieldDefinition::marker("Goals")?,
        FieldDefinition::marker("Non-Goals")?,
        FieldDefinition::marker("Team")?,
        FieldDefinition::marker("Status")?,
    ])
}

/// Built-in postmortem schema.
pub fn postmortem() -> Result<FieldSchema> {
    FieldSchema::new(vec![
        FieldDefinition::marker("Summary")?,
        FieldDefinition::marker("Impact")?,
        FieldDefinition::marker("Root Causes")?,
        FieldDefinition::marker("Trigger")?,
        FieldDefinition::marker("Resolution")?,
        FieldDefinition::marker("Detection")?,
        FieldDefinition::marker("Action Items")?,
        FieldDefinition::marker("Lessons Learned")?,
    ])
}

/// Raw schema file: `[[field]]` tables with one locating strategy each.
#[derive(Debug, Deserialize)]
struct SchemaFileRaw {
    #[serde(rename = "field")]
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    name: String,
    start: Option<String>,
    end: Option<String>,
    pattern: Option<String>,
    offset: Option<usize>,
    length: Option<usize>,
}

impl RawField {
    fn compile(&self) -> Result<FieldDefinition> {
        let strategies =
            usize::from(self.pattern.is_some()) + usize::from(self.offset.is_some());
        if strategies > 1 || ((self.start.is_some() || self.end.is_some()) && strategies > 0) {
            return Err(SiftError::Schema(format!(
                "field {}: use only one of start/end, pattern, offset/length",
                self.name
            )));
        }

        if let Some(pattern) = &self.pattern {
            return FieldDefinition::pattern(&self.name, pattern);
        }
        if let Some(offset) = self.offset {
            return Ok(FieldDefinition::fixed(&self.name, offset, self.length));
        }
        let start = self.start.as_deref().unwrap_or(&self.name);
        FieldDefinition::marker_between(&self.name, start, self.end.as_deref())
    }
}

/// Load a schema from a TOML file.
pub fn load_schema_file(path: &Path) -> Result<FieldSchema> {
    let text = std::fs::read_to_string(path)?;
    let raw: SchemaFileRaw =
        toml::from_str(&text).map_err(|e| SiftError::SchemaFile {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
    let mut fields = Vec::with_capacity(raw.fields.len());
    for field in &raw.fields {
        fields.push(field.compile()?);
    }
    FieldSchema::new(fields)
}

/// The effective schemas for a run: compiled defaults, selectively overridden
/// by `charter.toml` / `postmortem.toml` in the schema directory when present.
#[derive(Debug, Clone)]
pub struct SchemaSet {
    charter: FieldSchema,
    postmortem: FieldSchema,
}

impl SchemaSet {
    pub fn load(schema_dir: Option<&Path>) -> Result<Self> {
        let mut set = Self {
            charter: charter()?,
            postmortem: postmortem()?,
        };
        if let Some(dir) = schema_dir {
            let charter_path = dir.join("charter.toml");
            if charter_path.exists() {
                set.charter = load_schema_file(&charter_path)?;
            }
            let postmortem_path = dir.join("postmortem.toml");
            if postmortem_path.exists() {
                set.postmortem = load_schema_file(&postmortem_path)?;
            }
        }
        Ok(set)
    }

    /// Schema for a classified kind. `Unknown` has no schema.
    #[must_use]
    pub fn for_kind(&self, kind: DocKind) -> Option<&FieldSchema> {
        match kind {
            DocKind::Charter => Some(&self.charter),
            DocKind::Postmortem => Some(&self.postmortem),
            DocKind::Unknown => None,
        }
    }

    #[must_use]
    pub fn charter(&self) -> &FieldSchema {
        &self.charter
    }

    #[must_use]
    pub fn postmortem(&self) -> &FieldSchema {
        &self.postmortem
    }
}
