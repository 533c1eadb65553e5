//! Constant lookup services derived from the five (plus prune list, six total)
//! plain-text side-tables that steer CPACSGen's code generation.

mod error;
mod lines;

use std::collections::{HashMap, HashSet};
use std::path::Path;

pub use error::TablesError;

const CUSTOM_TYPES_FILE: &str = "CustomTypes.txt";
const FUNDAMENTAL_TYPES_FILE: &str = "FundamentalTypes.txt";
const TYPE_SUBSTITUTION_FILE: &str = "TypeSubstitution.txt";
const PARENT_POINTER_FILE: &str = "ParentPointer.txt";
const RESERVED_NAMES_FILE: &str = "ReservedNames.txt";
const PRUNE_LIST_FILE: &str = "PruneList.txt";

/// A key -> value lookup loaded from a two-column table file.
#[derive(Debug, Clone, Default)]
pub struct MappingTable(HashMap<String, String>);

impl MappingTable {
    fn load(dir: &Path, file_name: &str) -> Result<Self, TablesError> {
        let path = dir.join(file_name);
        tracing::info!(path = %path.display(), "reading mapping table");

        let mut map = HashMap::new();
        for record in lines::read_records(&path)? {
            match record.as_slice() {
                [key, value] => {
                    tracing::debug!(%key, %value, "mapping entry");
                    map.insert(key.clone(), value.clone());
                }
                [key] => {
                    tracing::warn!(%key, path = %path.display(), "mapping record missing value, storing empty");
                    map.insert(key.clone(), String::new());
                }
                _ => {
                    tracing::warn!(path = %path.display(), record = ?record, "ignoring malformed mapping record");
                }
            }
        }
        Ok(Self(map))
    }

    /// Exact lookup. `None` means "not present".
    pub fn find(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Overwrites `value` if a mapping exists for `key`.
    pub fn substitute_if_exists(&self, key: &str, value: &mut String) {
        if let Some(replacement) = self.find(key) {
            replacement.clone_into(value);
        }
    }
}

/// A set of reserved/flagged names loaded from a single-column table file.
#[derive(Debug, Clone, Default)]
pub struct Table(HashSet<String>);

impl Table {
    fn load(dir: &Path, file_name: &str) -> Result<Self, TablesError> {
        let path = dir.join(file_name);
        tracing::info!(path = %path.display(), "reading table");

        let mut set = HashSet::new();
        for record in lines::read_records(&path)? {
            match record.as_slice() {
                [name] => {
                    set.insert(name.clone());
                }
                _ => {
                    tracing::warn!(path = %path.display(), record = ?record, "ignoring malformed set record");
                }
            }
        }
        Ok(Self(set))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// The full set of curated side-tables, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub custom_types: MappingTable,
    pub fundamental_types: MappingTable,
    pub type_substitutions: MappingTable,
    pub parent_pointers: Table,
    pub reserved_names: Table,
    pub prune_list: Table,
}

impl Tables {
    /// Opens each of the six table files relative to `dir`. A missing file is fatal.
    pub fn load(dir: impl AsRef<Path>) -> Result<Tables, TablesError> {
        let dir = dir.as_ref();
        Ok(Tables {
            custom_types: MappingTable::load(dir, CUSTOM_TYPES_FILE)?,
            fundamental_types: MappingTable::load(dir, FUNDAMENTAL_TYPES_FILE)?,
            type_substitutions: MappingTable::load(dir, TYPE_SUBSTITUTION_FILE)?,
            parent_pointers: Table::load(dir, PARENT_POINTER_FILE)?,
            reserved_names: Table::load(dir, RESERVED_NAMES_FILE)?,
            prune_list: Table::load(dir, PRUNE_LIST_FILE)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_tables_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CUSTOM_TYPES_FILE),
            "// comment\nCPACSPoint ExternalPoint\n\nCPACSWing   ExternalWing\n",
        )
        .unwrap();
        fs::write(dir.path().join(FUNDAMENTAL_TYPES_FILE), "string String\ndouble Double\nint Int\nbool Bool\n").unwrap();
        fs::write(dir.path().join(TYPE_SUBSTITUTION_FILE), "xsd:ID string\n").unwrap();
        fs::write(dir.path().join(PARENT_POINTER_FILE), "CPACSWing\nCPACSWings\n").unwrap();
        fs::write(dir.path().join(RESERVED_NAMES_FILE), "class\nnamespace\n").unwrap();
        fs::write(dir.path().join(PRUNE_LIST_FILE), "CPACSUnused\n").unwrap();
        dir
    }

    #[test]
    fn loads_all_six_files() {
        let dir = write_tables_dir();
        let tables = Tables::load(dir.path()).unwrap();

        assert_eq!(tables.custom_types.find("CPACSPoint"), Some("ExternalPoint"));
        assert_eq!(tables.fundamental_types.find("double"), Some("Double"));
        assert!(tables.parent_pointers.contains("CPACSWing"));
        assert!(tables.reserved_names.contains("class"));
        assert!(tables.prune_list.contains("CPACSUnused"));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let dir = write_tables_dir();
        let tables = Tables::load(dir.path()).unwrap();
        assert_eq!(tables.custom_types.find("//"), None);
        assert!(!tables.custom_types.contains(""));
    }

    #[test]
    fn substitute_if_exists_overwrites_only_on_hit() {
        let dir = write_tables_dir();
        let tables = Tables::load(dir.path()).unwrap();

        let mut value = "xsd:ID".to_string();
        tables.type_substitutions.substitute_if_exists("xsd:ID", &mut value);
        assert_eq!(value, "string");

        let mut untouched = "xsd:unknown".to_string();
        tables.type_substitutions.substitute_if_exists("xsd:unknown", &mut untouched);
        assert_eq!(untouched, "xsd:unknown");
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Tables::load(dir.path()).unwrap_err();
        assert!(matches!(err, TablesError::Io { .. }));
    }
}
