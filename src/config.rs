use std::path::PathBuf;

use crate::error::{Result, SiftError};

/// Which schema a batch run applies: guessed per document or forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSelector {
    Auto,
    Charter,
    Postmortem,
}

impl KindSelector {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(KindSelector::Auto),
            "charter" => Ok(KindSelector::Charter),
            "postmortem" => Ok(KindSelector::Postmortem),
            other => Err(SiftError::Config(format!(
                "unknown kind selector `{other}`, use auto, charter or postmortem"
            ))),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            KindSelector::Auto => "auto",
            KindSelector::Charter => "charter",
            KindSelector::Postmortem => "postmortem",
        }
    }
}

/// Run configuration, built once at startup and passed into the batch parser.
/// Everything is validated here so processing never starts on a bad invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub kind: KindSelector,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Optional directory with `charter.toml` / `postmortem.toml` overrides.
    pub schema_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(
        kind: &str,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        schema_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let kind = KindSelector::parse(kind)?;

        let input_dir = input_dir.into();
        if input_dir.as_os_str().is_empty() {
            return Err(SiftError::Config("input directory must be set".into()));
        }
        if !input_dir.is_dir() {
            return Err(SiftError::Config(format!(
                "input directory {} does not exist",
                input_dir.display()
            )));
        }

        let output_dir = output_dir.into();
        if output_dir.as_os_str().is_empty() {
            return Err(SiftError::Config("output directory must be set".into()));
        }

        if let Some(dir) = &schema_dir {
            if !dir.is_dir() {
                return Err(SiftError::Config(format!(
                    "schema directory {} does not exist",
                    dir.display()
                )));
            }
        }

        Ok(Self {
            kind,
            input_dir,
            output_dir,
            schema_dir,
        })
    }
}
