use cpacsgen_schema::strip_type_suffix;

/// `CPACS` + capitalize-first(strip-trailing-`Type`(schema name)).
///
/// Used for both class names and enum names, mirroring how the source lowers
/// both ComplexType and SimpleType schema names through the same helper.
pub fn make_class_name(schema_name: &str) -> String {
    let stem = strip_type_suffix(schema_name);
    let mut capitalized = String::with_capacity(stem.len());
    let mut chars = stem.chars();
    if let Some(first) = chars.next() {
        capitalized.extend(first.to_uppercase());
        capitalized.push_str(chars.as_str());
    }
    format!("CPACS{capitalized}")
}

/// Strips trailing ASCII decimal digits, used to decide whether two enum
/// names are "the same modulo a numeric suffix" during collapsing.
pub fn strip_trailing_digits(name: &str) -> String {
    name.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_and_capitalizes() {
        assert_eq!(make_class_name("wingType"), "CPACSWing");
        assert_eq!(make_class_name("PointType"), "CPACSPoint");
        assert_eq!(make_class_name("symmetryAxis"), "CPACSSymmetryAxis");
    }

    #[test]
    fn strips_trailing_digits_only() {
        assert_eq!(strip_trailing_digits("FooType2"), "FooType");
        assert_eq!(strip_trailing_digits("Foo"), "Foo");
        assert_eq!(strip_trailing_digits("Foo123"), "Foo");
    }
}
