use cpacsgen_tables::Tables;

/// `m_` + the field's display name, matching `Field::fieldName()`.
pub fn field_name(name: &str) -> String {
    format!("m_{name}")
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// `GetFoo`/`SetFoo`/`HasFoo` share the same capitalized stem; accessor
/// names capitalize only the first character, they do not re-case the rest
/// of the name (a field named `xy_position` must stay `GetXy_position`,
/// not `GetXyPosition`).
pub fn accessor_stem(field_display_name: &str) -> String {
    capitalize_first(field_display_name)
}

pub fn enum_to_string_func(enum_name: &str) -> String {
    format!("{enum_name}ToString")
}

pub fn string_to_enum_func(enum_name: &str) -> String {
    format!("stringTo{}", capitalize_first(enum_name))
}

/// The generated-code identifier for an enumeration value: replace `-`/` `
/// with `_`, then mangle against reserved names by appending a trailing
/// underscore until the result no longer collides.
///
/// The original only performs the character replacement; the reserved-name
/// collision handling is this crate's own resolution of spec.md's open
/// question on how `ReservedNames.txt` feeds enum identifier generation.
pub fn mangle_enum_value(spelling: &str, tables: &Tables) -> String {
    let mut identifier: String = spelling
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect();

    while tables.reserved_names.contains(&identifier) {
        identifier.push('_');
    }

    identifier
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tables_with_reserved(names: &[&str]) -> Tables {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CustomTypes.txt"), "").unwrap();
        fs::write(dir.path().join("FundamentalTypes.txt"), "").unwrap();
        fs::write(dir.path().join("TypeSubstitution.txt"), "").unwrap();
        fs::write(dir.path().join("ParentPointer.txt"), "").unwrap();
        fs::write(dir.path().join("ReservedNames.txt"), names.join("\n")).unwrap();
        fs::write(dir.path().join("PruneList.txt"), "").unwrap();
        Tables::load(dir.path()).unwrap()
    }

    #[test]
    fn replaces_hyphen_and_space() {
        let tables = tables_with_reserved(&[]);
        assert_eq!(mangle_enum_value("x-y-plane", &tables), "x_y_plane");
        assert_eq!(mangle_enum_value("free flight", &tables), "free_flight");
    }

    #[test]
    fn mangles_reserved_identifiers() {
        let tables = tables_with_reserved(&["class"]);
        assert_eq!(mangle_enum_value("class", &tables), "class_");
    }

    #[test]
    fn field_name_prefixes_m() {
        assert_eq!(field_name("wingspan"), "m_wingspan");
    }

    #[test]
    fn enum_func_names() {
        assert_eq!(enum_to_string_func("CPACSSymmetryAxis"), "CPACSSymmetryAxisToString");
        assert_eq!(string_to_enum_func("cpacsSymmetryAxis"), "stringToCpacsSymmetryAxis");
    }
}
