//! Renders a built [`TypeSystem`] into the C++ header/implementation text
//! that make up the emitted class hierarchy: one `.h`/`.cpp` pair per
//! non-pruned class, one `.h`/`.cpp` pair per non-pruned enum.

mod class_emit;
mod enum_emit;
mod error;
mod includes;
mod license;
mod naming;
mod options;
mod writer;

use cpacsgen_tables::Tables;
use cpacsgen_typesystem::TypeSystem;

pub use error::CodegenError;
pub use options::Options;

/// One file CodeGen wants written to the output directory, relative to it.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub relative_path: String,
    pub contents: String,
}

/// Renders every non-pruned class and enum in `types` into header/source
/// text, skipping anything `run_prune_list` flagged.
pub fn generate(types: &TypeSystem, tables: &Tables, options: &Options) -> Result<Vec<GeneratedFile>, CodegenError> {
    let mut files = Vec::new();

    let mut class_names: Vec<&String> = types.classes.keys().collect();
    class_names.sort();
    for name in class_names {
        let class = &types.classes[name];
        if class.pruned {
            continue;
        }
        tracing::debug!(class = %class.name, "emitting class");
        let rendered = class_emit::write_class(class, types, tables, options)?;
        files.push(GeneratedFile {
            relative_path: format!("{}.h", class.name),
            contents: rendered.header,
        });
        files.push(GeneratedFile {
            relative_path: format!("{}.cpp", class.name),
            contents: rendered.source,
        });
    }

    let mut enum_names: Vec<&String> = types.enums.keys().collect();
    enum_names.sort();
    for name in enum_names {
        let e = &types.enums[name];
        if e.pruned {
            continue;
        }
        tracing::debug!(enum_name = %e.name, "emitting enum");
        let rendered = enum_emit::write_enum(e, tables, options);
        files.push(GeneratedFile {
            relative_path: format!("{}.h", e.name),
            contents: rendered.header,
        });
        files.push(GeneratedFile {
            relative_path: format!("{}.cpp", e.name),
            contents: rendered.source,
        });
    }

    tracing::info!(file_count = files.len(), "code generation complete");
    Ok(files)
}
