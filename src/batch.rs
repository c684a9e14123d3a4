use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Config, KindSelector};
use crate::error::{Result, SiftError};
use crate::extract::extract;
use crate::ingest::classify::{classify, DocKind};
use crate::ingest::scanner::{scan_documents, SkipReason};
use crate::schema::SchemaSet;
use crate::table::Table;

/// Counters from a batch run, printed as the run summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub docs_found: usize,
    pub docs_parsed: usize,
    /// Total documents skipped (sum of all skip categories).
    pub docs_skipped: usize,
    /// Documents matching neither kind keyword (auto mode).
    pub skipped_unclassified: usize,
    /// Documents whose content is not valid UTF-8.
    pub skipped_non_utf8: usize,
    /// Documents that could not be read.
    pub skipped_io_error: usize,
    pub charter_rows: usize,
    pub postmortem_rows: usize,
    pub artifacts_written: usize,
}

impl BatchSummary {
    fn skip(&mut self, reason: SkipReason) {
        self.docs_skipped += 1;
        match reason {
            SkipReason::Unclassified => self.skipped_unclassified += 1,
            SkipReason::NonUtf8 => self.skipped_non_utf8 += 1,
            SkipReason::IoError => self.skipped_io_error += 1,
        }
    }
}

/// Result of a batch run: one accumulated table per document kind, plus the
/// counters. Rows keep directory order.
#[derive(Debug)]
pub struct BatchOutcome {
    pub summary: BatchSummary,
    pub charter: Table,
    pub postmortem: Table,
}

/// Run the batch parser: discover documents, classify, extract, then write
/// one `<document-name>.csv` artifact per parsed document.
pub fn run_batch(config: &Config) -> Result<BatchOutcome> {
    let schemas = SchemaSet::load(config.schema_dir.as_deref())?;
    run_batch_with(config, &schemas)
}

/// Same as [`run_batch`] with an already-loaded schema set.
pub fn run_batch_with(config: &Config, schemas: &SchemaSet) -> Result<BatchOutcome> {
    let docs = scan_documents(&config.input_dir)?;
    if docs.is_empty() {
        return Err(SiftError::EmptyInput {
            path: config.input_dir.display().to_string(),
        });
    }
    std::fs::create_dir_all(&config.output_dir)?;

    let mut summary = BatchSummary {
        docs_found: docs.len(),
        ..Default::default()
    };
    let mut charter = Table::new(schemas.charter().header());
    let mut postmortem = Table::new(schemas.postmortem().header());
    // Per-document artifacts, written in one phase once extraction is done.
    let mut pending: Vec<(DocKind, PathBuf, Table)> = Vec::new();

    for doc in &docs {
        let kind = match config.kind {
            KindSelector::Auto => classify(&doc.name),
            KindSelector::Charter => DocKind::Charter,
            KindSelector::Postmortem => DocKind::Postmortem,
        };
        let (schema, kind_table) = match kind {
            DocKind::Charter => (schemas.charter(), &mut charter),
            DocKind::Postmortem => (schemas.postmortem(), &mut postmortem),
            DocKind::Unknown => {
                debug!(name = %doc.name, "matches neither kind keyword, skipping");
                summary.skip(SkipReason::Unclassified);
                continue;
            }
        };

        // Read bytes first so binary content is caught before extraction and
        // never produces a partial record.
        let bytes = match std::fs::read(&doc.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(name = %doc.name, error = %e, "unreadable document, skipping");
                summary.skip(SkipReason::IoError);
                continue;
            }
        };
        let source = match String::from_utf8(bytes) {
            Ok(source) => source,
            Err(_) => {
                let err = SiftError::Extraction {
                    name: doc.name.clone(),
                    detail: "content is not valid UTF-8 text".into(),
                };
                warn!("{err}, skipping");
                summary.skip(SkipReason::NonUtf8);
                continue;
            }
        };

        let record = extract(schema, &source);
        let mut artifact = Table::new(schema.header());
        artifact.push(record.clone())?;
        kind_table.push(record)?;

        let path = config.output_dir.join(format!("{}.csv", doc.name));
        pending.push((kind, path, artifact));
        summary.docs_parsed += 1;
    }

    // A write failure is fatal for that kind's remaining artifacts; the other
    // kind is still written, and the first error is reported to the operator.
    let mut write_err: Option<SiftError> = None;
    for kind in [DocKind::Charter, DocKind::Postmortem] {
        for (_, path, table) in pending.iter().filter(|(k, _, _)| *k == kind) {
            match table.write_to(path) {
                Ok(()) => summary.artifacts_written += 1,
                Err(e) => {
                    warn!(kind = kind.as_str(), "{e}; abandoning this kind's output");
                    if write_err.is_none() {
                        write_err = Some(e);
                    }
                    break;
                }
            }
        }
    }

    summary.charter_rows = charter.len();
    summary.postmortem_rows = postmortem.len();

    if let Some(e) = write_err {
        return Err(e);
    }
    Ok(BatchOutcome {
        summary,
        charter,
        postmortem,
    })
}
