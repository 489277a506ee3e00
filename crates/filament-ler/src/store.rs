//! On-disk LER store: schema, EEP definitions, SOPs and signature patterns
//!
//! ```text
//! <root>/schemas/core_schema.yaml
//! <root>/eep_definitions/*.yaml
//! <root>/sops/**/*.yaml
//! <root>/signature_patterns/*.yaml
//! ```
//!
//! Everything is loaded once by [`LerStore::open`] and never written back.

use crate::error::{LerError, Result};
use crate::lookup::DocumentLookup;
use crate::record::Record;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const SCHEMA_FILE: &str = "schemas/core_schema.yaml";
pub const EEP_DIR: &str = "eep_definitions";
pub const SOP_DIR: &str = "sops";
pub const PATTERN_DIR: &str = "signature_patterns";

/// Fields every EEP definition must carry.
pub const REQUIRED_EEP_FIELDS: [&str; 4] = ["eep_id", "name", "universal_function", "category"];

pub struct LerStore {
    root: PathBuf,
    schema: Option<Value>,
    eeps: BTreeMap<String, Record>,
    sops: BTreeMap<String, Record>,
    patterns: BTreeMap<String, Value>,
}

impl fmt::Debug for LerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LerStore")
            .field("root", &self.root)
            .field("eeps", &self.eeps.len())
            .field("sops", &self.sops.len())
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

impl LerStore {
    /// Load every document under `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(LerError::RootNotFound(root));
        }

        let schema = load_schema(&root);
        let eeps = load_keyed(&root.join(EEP_DIR), "eep_id", false);
        let sops = load_keyed(&root.join(SOP_DIR), "sop_id", true);
        let patterns = load_patterns(&root.join(PATTERN_DIR));

        tracing::info!(
            "LER store initialized with {} EEPs, {} SOPs",
            eeps.len(),
            sops.len()
        );

        Ok(LerStore {
            root,
            schema,
            eeps,
            sops,
            patterns,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schema(&self) -> Option<&Value> {
        self.schema.as_ref()
    }

    pub fn get_eep(&self, eep_id: &str) -> Option<&Record> {
        self.eeps.get(eep_id)
    }

    pub fn get_sop(&self, sop_id: &str) -> Option<&Record> {
        self.sops.get(sop_id)
    }

    /// The step of `sop_id` whose `step_id` matches.
    pub fn get_sop_step(&self, sop_id: &str, step_id: &str) -> Option<Record> {
        self.get_sop(sop_id)?
            .records("steps")
            .into_iter()
            .find(|step| step.str("step_id") == Some(step_id))
    }

    /// `stub_implementation` text of a SOP step, if it has one.
    pub fn stub_implementation(&self, sop_id: &str, step_id: &str) -> Option<String> {
        self.get_sop_step(sop_id, step_id)?
            .str("stub_implementation")
            .map(str::to_string)
    }

    /// Signature patterns declared inline on an EEP definition, in file
    /// order. A bare string entry becomes a record with just that `name`.
    pub fn eep_signature_patterns(&self, eep_id: &str) -> Vec<Record> {
        let Some(eep) = self.get_eep(eep_id) else {
            return Vec::new();
        };
        eep.list("signature_patterns")
            .iter()
            .filter_map(|entry| match entry {
                Value::String(name) => Some(Record::named(name)),
                other => {
                    let record = Record::from_value(other.clone());
                    if record.is_none() {
                        tracing::warn!("{}: unusable signature pattern {:?}", eep_id, other);
                    }
                    record
                }
            })
            .collect()
    }

    /// Named document from `signature_patterns/`, keyed by file stem.
    pub fn signature_pattern(&self, name: &str) -> Option<&Value> {
        self.patterns.get(name)
    }

    pub fn list_eeps(&self) -> Vec<&str> {
        self.eeps.keys().map(String::as_str).collect()
    }

    pub fn list_sops(&self) -> Vec<&str> {
        self.sops.keys().map(String::as_str).collect()
    }

    pub fn list_signature_patterns(&self) -> Vec<&str> {
        self.patterns.keys().map(String::as_str).collect()
    }

    pub fn eeps_by_category(&self, category: &str) -> Vec<&Record> {
        self.eeps
            .values()
            .filter(|eep| eep.str("category") == Some(category))
            .collect()
    }

    /// SOPs whose `target_eeps` list names `eep_id`.
    pub fn find_sops_for_eep(&self, eep_id: &str) -> Vec<&Record> {
        self.sops
            .values()
            .filter(|sop| sop.str_list("target_eeps").contains(&eep_id))
            .collect()
    }

    /// Case-insensitive substring search over `universal_function`.
    pub fn search_eeps_by_function(&self, term: &str) -> Vec<&Record> {
        let term = term.to_lowercase();
        self.eeps
            .values()
            .filter(|eep| {
                eep.str("universal_function")
                    .is_some_and(|function| function.to_lowercase().contains(&term))
            })
            .collect()
    }

    pub fn validate_eep(&self, eep_id: &str) -> Validation {
        let Some(eep) = self.get_eep(eep_id) else {
            return Validation::NotFound(eep_id.to_string());
        };

        let missing: Vec<String> = REQUIRED_EEP_FIELDS
            .iter()
            .filter(|field| !eep.contains_key(field))
            .map(|field| field.to_string())
            .collect();

        if missing.is_empty() {
            Validation::Valid
        } else {
            Validation::MissingFields(missing)
        }
    }

    pub fn system_info(&self) -> SystemInfo {
        SystemInfo {
            ler_root: self.root.clone(),
            total_eeps: self.eeps.len(),
            total_sops: self.sops.len(),
            total_patterns: self.patterns.len(),
            schema_loaded: self.schema.is_some(),
            available_eeps: self.eeps.keys().cloned().collect(),
            available_sops: self.sops.keys().cloned().collect(),
        }
    }
}

impl DocumentLookup for LerStore {
    fn get_record(&self, id: &str) -> Option<&Record> {
        self.get_eep(id).or_else(|| self.get_sop(id))
    }

    fn get_sub_record(&self, parent_id: &str, child_id: &str) -> Option<Record> {
        self.get_sop_step(parent_id, child_id)
    }

    fn get_related_records(&self, id: &str) -> Vec<Record> {
        self.eep_signature_patterns(id)
    }
}

/// Outcome of [`LerStore::validate_eep`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    NotFound(String),
    MissingFields(Vec<String>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Valid => f.write_str("valid"),
            Validation::NotFound(id) => write!(f, "EEP {} not found", id),
            Validation::MissingFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
        }
    }
}

/// Store statistics, as reported by `filament info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub ler_root: PathBuf,
    pub total_eeps: usize,
    pub total_sops: usize,
    pub total_patterns: usize,
    pub schema_loaded: bool,
    pub available_eeps: Vec<String>,
    pub available_sops: Vec<String>,
}

/// Parse one YAML file. Empty documents come back as `Value::Null`.
pub fn read_yaml(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|source| LerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| LerError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

fn load_schema(root: &Path) -> Option<Value> {
    let path = root.join(SCHEMA_FILE);
    if !path.is_file() {
        tracing::warn!("Schema not found: {}", path.display());
        return None;
    }
    match read_yaml(&path) {
        Ok(Value::Null) => None,
        Ok(schema) => {
            tracing::info!("Core schema loaded successfully");
            Some(schema)
        }
        Err(e) => {
            tracing::error!("{}", e);
            None
        }
    }
}

/// Load every record in `dir` that carries `id_key`, keyed by that id.
fn load_keyed(dir: &Path, id_key: &str, recursive: bool) -> BTreeMap<String, Record> {
    let mut records = BTreeMap::new();

    for path in yaml_files(dir, recursive) {
        let record = match read_yaml(&path) {
            Ok(value) => Record::from_value(value),
            Err(e) => {
                tracing::error!("{}", e);
                continue;
            }
        };

        let id = record
            .as_ref()
            .and_then(|r| r.str(id_key))
            .map(str::to_string);

        match (id, record) {
            (Some(id), Some(record)) => {
                tracing::debug!("Loaded {} {}", id_key, id);
                records.insert(id, record);
            }
            _ => tracing::warn!("Skipping {}: no {}", path.display(), id_key),
        }
    }

    records
}

fn load_patterns(dir: &Path) -> BTreeMap<String, Value> {
    let mut patterns = BTreeMap::new();

    for path in yaml_files(dir, false) {
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
            continue;
        };
        match read_yaml(&path) {
            Ok(Value::Null) => tracing::warn!("Skipping empty pattern file {}", path.display()),
            Ok(value) => {
                patterns.insert(stem, value);
            }
            Err(e) => tracing::error!("{}", e),
        }
    }

    patterns
}

/// `*.yaml` files under `dir`, sorted by path. A missing directory logs a
/// warning and yields nothing.
fn yaml_files(dir: &Path, recursive: bool) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!("Directory not found: {}", dir.display());
        return Vec::new();
    }

    let mut files = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(dir.to_path_buf());

    while let Some(current) = queue.pop_front() {
        let entries = match fs::read_dir(&current) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot read directory {}: {}", current.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                if recursive {
                    queue.push_back(path);
                }
            } else if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}
