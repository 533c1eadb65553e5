use cpacsgen_tables::Tables;
use cpacsgen_typesystem::Enum;

use crate::license::write_license_header;
use crate::naming::{enum_to_string_func, mangle_enum_value, string_to_enum_func};
use crate::options::Options;
use crate::writer::CodeWriter;

pub fn write_enum_header(w: &mut CodeWriter, e: &Enum, tables: &Tables, _options: &Options) {
    w.line("#pragma once");
    w.blank();
    write_license_header(w);

    w.line("#include <string>");
    w.line("#include \"cpacsgen_export.h\"");
    w.blank();

    w.line("namespace cpacsgen {");
    w.scope(|w| {
        w.line("namespace generated {");
        w.scope(|w| {
            w.line(format!("// generated from {}", e.origin.origin));
            w.line(format!("enum class {} {{", e.name));
            w.scope(|w| {
                for value in &e.values {
                    w.line(format!("{},", mangle_enum_value(&value.spelling, tables)));
                }
            });
            w.line("};");
            w.blank();

            w.line(format!("CPACSGEN_EXPORT std::string {}(const {}& value);", enum_to_string_func(&e.name), e.name));
            w.line(format!("CPACSGEN_EXPORT {} {}(const std::string& value);", e.name, string_to_enum_func(&e.name)));
        });
        w.line("}");
        w.blank();
        w.line(format!("using generated::{};", e.name));
    });
    w.line("}");
    w.blank();
}

pub fn write_enum_source(w: &mut CodeWriter, e: &Enum, tables: &Tables, options: &Options) {
    write_license_header(w);
    w.line(format!("#include \"{}.h\"", e.name));
    w.line("#include <stdexcept>");
    w.blank();

    w.line("namespace cpacsgen {");
    w.scope(|w| {
        w.line("namespace generated {");
        w.scope(|w| {
            w.line(format!("std::string {}(const {}& value) {{", enum_to_string_func(&e.name), e.name));
            w.scope(|w| {
                w.line("switch (value) {");
                w.scope(|w| {
                    for value in &e.values {
                        let ident = mangle_enum_value(&value.spelling, tables);
                        w.line(format!("case {}::{ident}:", e.name));
                        w.scope(|w| {
                            w.line(format!("return \"{}\";", value.spelling));
                        });
                    }
                    w.line("default:");
                    w.scope(|w| {
                        w.line(format!(
                            "throw std::runtime_error(\"Invalid enum value \\\"\" + std::to_string(static_cast<int>(value)) + \"\\\" for enum type {}\");",
                            e.name
                        ));
                    });
                });
                w.line("}");
            });
            w.line("}");
            w.blank();

            w.line(format!("{} {}(const std::string& value) {{", e.name, string_to_enum_func(&e.name)));
            w.scope(|w| {
                for value in &e.values {
                    let ident = mangle_enum_value(&value.spelling, tables);
                    let condition = if options.generate_case_sensitive_string_to_enum {
                        format!("value == \"{}\"", value.spelling)
                    } else {
                        format!("StringsCaseInsensitiveEqual(value, \"{}\")", value.spelling)
                    };
                    w.line(format!("if ({condition}) {{"));
                    w.scope(|w| {
                        w.line(format!("return {}::{ident};", e.name));
                    });
                    w.line("}");
                }
                w.line(format!("throw std::runtime_error(\"invalid string value for {}: \" + value);", e.name));
            });
            w.line("}");
        });
        w.line("}");
    });
    w.line("}");
    w.blank();
}

pub struct EnumFiles {
    pub header: String,
    pub source: String,
}

pub fn write_enum(e: &Enum, tables: &Tables, options: &Options) -> EnumFiles {
    let mut hpp = CodeWriter::new();
    write_enum_header(&mut hpp, e, tables, options);

    let mut cpp = CodeWriter::new();
    write_enum_source(&mut cpp, e, tables, options);

    EnumFiles { header: hpp.finish(), source: cpp.finish() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpacsgen_schema::SimpleType;
    use cpacsgen_typesystem::{EnumDependencies, EnumValue};
    use std::fs;

    fn empty_tables() -> Tables {
        let dir = tempfile::tempdir().unwrap();
        for name in ["CustomTypes.txt", "FundamentalTypes.txt", "TypeSubstitution.txt", "ParentPointer.txt", "ReservedNames.txt", "PruneList.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        Tables::load(dir.path()).unwrap()
    }

    fn sample_enum() -> Enum {
        Enum {
            origin: SimpleType {
                origin: "/cpacs/wings/wing/symmetry".to_string(),
                name: "CPACSSymmetryAxisType".to_string(),
                base: "xsd:string".to_string(),
                restriction_values: vec!["x-y-plane".to_string(), "none".to_string()],
            },
            name: "CPACSSymmetryAxis".to_string(),
            values: vec![
                EnumValue { spelling: "x-y-plane".to_string() },
                EnumValue { spelling: "none".to_string() },
            ],
            pruned: false,
            dependencies: EnumDependencies::default(),
        }
    }

    #[test]
    fn header_declares_mangled_variants() {
        let tables = empty_tables();
        let files = write_enum(&sample_enum(), &tables, &Options::default());
        assert!(files.header.contains("x_y_plane,"));
        assert!(files.header.contains("none,"));
        assert!(files.header.contains("enum class CPACSSymmetryAxis {"));
    }

    #[test]
    fn source_round_trips_spellings() {
        let tables = empty_tables();
        let files = write_enum(&sample_enum(), &tables, &Options::default());
        assert!(files.source.contains("return \"x-y-plane\";"));
        assert!(files.source.contains("return CPACSSymmetryAxis::none;"));
    }

    #[test]
    fn lenient_matching_used_by_default() {
        let tables = empty_tables();
        let files = write_enum(&sample_enum(), &tables, &Options::default());
        assert!(files.source.contains("StringsCaseInsensitiveEqual"));
    }

    #[test]
    fn case_sensitive_option_switches_comparison() {
        let tables = empty_tables();
        let options = Options { generate_case_sensitive_string_to_enum: true, ..Options::default() };
        let files = write_enum(&sample_enum(), &tables, &options);
        assert!(files.source.contains("value == \"none\""));
        assert!(!files.source.contains("StringsCaseInsensitiveEqual"));
    }
}
