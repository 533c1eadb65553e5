use crate::registry::SchemaRegistry;

/// Removes a trailing `Type` suffix, if any, so that a generated stem does
/// not accumulate suffixes across recursive inline-type naming.
pub fn strip_type_suffix(name: &str) -> &str {
    if name.len() > 4 {
        name.strip_suffix("Type").unwrap_or(name)
    } else {
        name
    }
}

/// Produces `{suggestion}Type`, disambiguated by appending the smallest
/// non-negative integer not already present in `registry`.
///
/// A pure function of `(suggestion, registry)`: it never consults a
/// traversal-order-dependent counter, so re-ordering how the schema is
/// walked yields the same names for the same set of already-registered types.
pub fn generate_unique_type_name(registry: &SchemaRegistry, suggestion: &str) -> String {
    let mut id: u32 = 0;
    loop {
        let candidate = if id == 0 {
            format!("{suggestion}Type")
        } else {
            format!("{suggestion}Type{id}")
        };
        if !registry.contains(&candidate) {
            return candidate;
        }
        id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComplexType, SchemaType};

    #[test]
    fn strips_trailing_type() {
        assert_eq!(strip_type_suffix("WingType"), "Wing");
        assert_eq!(strip_type_suffix("Wing"), "Wing");
        assert_eq!(strip_type_suffix("Type"), "Type");
    }

    fn dummy_complex(name: &str) -> SchemaType {
        SchemaType::Complex(ComplexType {
            origin: "/schema".into(),
            name: name.to_string(),
            base: None,
            content: Default::default(),
            attributes: Vec::new(),
        })
    }

    #[test]
    fn disambiguates_against_existing_names() {
        let mut registry = SchemaRegistry::new();
        registry.insert(dummy_complex("WingType")).unwrap();
        registry.insert(dummy_complex("WingType1")).unwrap();

        assert_eq!(generate_unique_type_name(&registry, "Wing"), "WingType2");
    }

    #[test]
    fn first_suggestion_has_no_numeric_suffix() {
        let registry = SchemaRegistry::new();
        assert_eq!(generate_unique_type_name(&registry, "Wing"), "WingType");
    }
}
