use regex::Regex;

use crate::schema::{FieldSchema, Rule};
use crate::table::Record;

/// Map one document's text to a record, one value per schema field.
///
/// Pure function of its inputs. A field with no detectable content yields an
/// empty string, never a missing index, so the record width always equals the
/// schema length.
#[must_use]
pub fn extract(schema: &FieldSchema, source: &str) -> Record {
    // First pass: the first match of every marker field. When several
    // candidates match a start rule, the earliest occurrence in document
    // order wins. These matches are the recognized boundaries that end the
    // other fields' sections.
    let anchors: Vec<Option<(usize, usize)>> = schema
        .fields()
        .iter()
        .map(|field| match &field.rule {
            Rule::Marker { start, .. } => {
                start.find(source).map(|m| (m.start(), m.end()))
            }
            _ => None,
        })
        .collect();

    let values = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| match &field.rule {
            Rule::Marker { end, .. } => {
                marker_value(source, &anchors, idx, end.as_ref())
            }
            Rule::Fixed { offset, len } => fixed_value(source, *offset, *len),
            Rule::Pattern(re) => pattern_value(source, re),
        })
        .collect();

    Record::new(values)
}

/// Everything under this field's label until the next recognized boundary:
/// another field's first marker match, the field's own end marker, or the end
/// of the document, whichever comes first.
fn marker_value(
    source: &str,
    anchors: &[Option<(usize, usize)>],
    idx: usize,
    end: Option<&Regex>,
) -> String {
    let Some((_, content_start)) = anchors[idx] else {
        return String::new();
    };

    let mut content_end = source.len();
    for (other, anchor) in anchors.iter().enumerate() {
        if other == idx {
            continue;
        }
        if let Some((start, _)) = anchor {
            if *start >= content_start && *start < content_end {
                content_end = *start;
            }
        }
    }
    if let Some(end_re) = end {
        if let Some(m) = end_re.find_at(source, content_start) {
            if m.start() < content_end {
                content_end = m.start();
            }
        }
    }

    source[content_start..content_end].trim().to_string()
}

fn fixed_value(source: &str, offset: usize, len: Option<usize>) -> String {
    let tail = source.chars().skip(offset);
    let value: String = match len {
        Some(n) => tail.take(n).collect(),
        None => tail.collect(),
    };
    value.trim().to_string()
}

fn pattern_value(source: &str, re: &Regex) -> String {
    re.captures(source)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
