/// Document classification. Determines which field schema applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Charter,
    Postmortem,
    /// Matches neither keyword; skipped in auto mode.
    Unknown,
}

impl DocKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::Charter => "charter",
            DocKind::Postmortem => "postmortem",
            DocKind::Unknown => "unknown",
        }
    }
}

/// Guess a document's kind from its file name, case-insensitively.
/// A name containing both keywords classifies as charter (checked first).
#[must_use]
pub fn classify(file_name: &str) -> DocKind {
    let lower = file_name.to_lowercase();
    if lower.contains("charter") {
        DocKind::Charter
    } else if lower.contains("postmortem") {
        DocKind::Postmortem
    } else {
        DocKind::Unknown
    }
}
