use cpacsgen_tables::Tables;
use cpacsgen_typesystem::{Cardinality, Class, TypeSystem};

/// Header/implementation include lists for one class, in the fixed order
/// the original generator's `resolveIncludes` produces them.
#[derive(Debug, Default)]
pub struct Includes {
    pub hpp_includes: Vec<String>,
    pub hpp_forwards: Vec<String>,
    pub hpp_custom_forwards: Vec<String>,
    pub cpp_includes: Vec<String>,
}

/// Order: handle header, `<string>`, then conditionally `<vector>` +
/// `<memory>` and the `Optional` wrapper header, then the export-macro
/// header, then the base-class include, then per-field includes/forward
/// declarations, then parent-pointer forward declarations (plus
/// `<cassert>` in the impl file), then the fixed trailing impl-only
/// includes.
pub fn resolve_includes(class: &Class, types: &TypeSystem, tables: &Tables) -> Includes {
    let mut includes = Includes::default();

    includes.hpp_includes.push("<CpacsDocument.h>".to_string());
    includes.hpp_includes.push("<string>".to_string());

    let has_vector = class.fields.iter().any(|f| f.cardinality == Cardinality::Vector);
    let has_optional = class.fields.iter().any(|f| f.cardinality == Cardinality::Optional);
    if has_vector {
        includes.hpp_includes.push("<vector>".to_string());
        includes.hpp_includes.push("<memory>".to_string());
    }
    if has_optional {
        includes.hpp_includes.push("\"Optional.hpp\"".to_string());
    }

    includes.hpp_includes.push("\"cpacsgen_export.h\"".to_string());

    if let Some(base) = &class.base {
        if types.classes.contains_key(base) {
            includes.hpp_includes.push(format!("\"{base}.h\""));
        }
    }

    for field in &class.fields {
        let is_enum = types.enums.contains_key(&field.type_name);
        let is_class = types.classes.contains_key(&field.type_name);
        if !is_enum && !is_class {
            continue;
        }

        match tables.custom_types.find(&field.type_name) {
            None => match field.cardinality {
                Cardinality::Optional | Cardinality::Mandatory => {
                    includes.hpp_includes.push(format!("\"{}.h\"", field.type_name));
                }
                Cardinality::Vector => {
                    includes.hpp_forwards.push(field.type_name.clone());
                    includes.cpp_includes.push(format!("\"{}.h\"", field.type_name));
                }
            },
            Some(custom) => match field.cardinality {
                Cardinality::Optional | Cardinality::Mandatory => {
                    includes.hpp_includes.push(format!("<{custom}.h>"));
                }
                Cardinality::Vector => {
                    includes.hpp_custom_forwards.push(custom.to_string());
                    includes.cpp_includes.push(format!("<{custom}.h>"));
                }
            },
        }
    }

    if tables.parent_pointers.contains(&class.name) {
        includes.cpp_includes.push("<cassert>".to_string());
        for parent in &class.dependencies.parent_classes {
            match tables.custom_types.find(parent) {
                Some(custom) => includes.hpp_custom_forwards.push(custom.to_string()),
                None => includes.hpp_forwards.push(parent.clone()),
            }
        }
    }

    includes.cpp_includes.push("\"IOHelper.h\"".to_string());
    includes.cpp_includes.push("\"CpacsLogging.h\"".to_string());
    includes.cpp_includes.push(format!("\"{}.h\"", class.name));

    includes
}
