//! Compiles the YAML icon-definition source into the JSON dataset the
//! browser-side picker loads.
//!
//! This is an operator-triggered, whole-catalog regeneration: the source is
//! parsed in full and the dataset file is rewritten atomically. Reruns with
//! unchanged input produce byte-identical output. The write itself is not
//! guarded against a concurrent run of the compiler; retrying after a
//! failure is safe, running two compilers at once is not.

use icon_model::{IconRecord, IconStyle};
use serde_yaml::Value as YamlValue;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed icon source: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("icon source is not a mapping of icon definitions")]
    NotAMapping,
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Regeneration runs only when all three hold: a debug flag, an explicit
/// opt-in, and administrative capability on the caller's side.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilerGate {
    pub debug: bool,
    pub opt_in: bool,
    pub admin: bool,
}

impl CompilerGate {
    pub const fn satisfied(self) -> bool {
        self.debug && self.opt_in && self.admin
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Gate not satisfied; nothing was read or written.
    Skipped,
    Written { path: PathBuf, records: usize },
}

/// Parses the icon-definition source into dataset records.
///
/// Entries without a unicode codepoint are dropped. The first listed style
/// variant decides the class family: `solid` maps to "fas", anything else
/// (or no variant at all) to "fab". Source order is preserved.
///
/// A source that is not a YAML mapping is an error: silently emitting an
/// empty catalog would erase every icon on the site.
pub fn parse_source(source: &str) -> Result<Vec<IconRecord>, CompileError> {
    let yaml: YamlValue = serde_yaml::from_str(source)?;

    let mapping = match yaml {
        YamlValue::Mapping(mapping) => mapping,
        _ => return Err(CompileError::NotAMapping),
    };

    let mut records = Vec::new();

    for (key, definition) in mapping {
        let Some(id) = key.as_str() else {
            continue;
        };

        let unicode = match definition.get("unicode") {
            Some(YamlValue::String(text)) => text.clone(),
            Some(YamlValue::Number(number)) => number.to_string(),
            _ => continue,
        };

        let first_style = definition
            .get("styles")
            .and_then(YamlValue::as_sequence)
            .and_then(|styles| styles.first())
            .and_then(YamlValue::as_str);

        let style = match first_style {
            Some("solid") => IconStyle::Solid,
            _ => IconStyle::Brand,
        };

        records.push(IconRecord { id: id.to_owned(), unicode, style });
    }

    Ok(records)
}

/// Serializes dataset records to their on-disk form.
pub fn dataset_bytes(records: &[IconRecord]) -> Result<Vec<u8>, CompileError> {
    Ok(serde_json::to_vec(records)?)
}

/// Regenerates the dataset file from a source file, behind the gate.
///
/// An ungated call is a silent no-op, not an error. A missing or malformed
/// source fails loudly and leaves the previous dataset untouched.
pub fn compile_file(
    gate: CompilerGate,
    source: &Path,
    output: &Path,
) -> Result<Outcome, CompileError> {
    if !gate.satisfied() {
        return Ok(Outcome::Skipped);
    }

    let text = fs::read_to_string(source)?;
    let records = parse_source(&text)?;
    let bytes = dataset_bytes(&records)?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write through a temporary file so a failed run never leaves a
    // truncated dataset behind.
    let temp_path = output.with_extension("tmp");
    fs::write(&temp_path, &bytes)?;
    fs::rename(&temp_path, output)?;

    Ok(Outcome::Written { path: output.to_owned(), records: records.len() })
}
