use std::fs;

use cpacsgen_codegen::{generate, Options};
use cpacsgen_tables::Tables;
use cpacsgen_typesystem::TypeSystem;

fn tables_with_parent_pointer() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("CustomTypes.txt"), "").unwrap();
    fs::write(dir.path().join("FundamentalTypes.txt"), "double Double\nstring String\n").unwrap();
    fs::write(dir.path().join("TypeSubstitution.txt"), "xsd:double double\nxsd:string string\n").unwrap();
    fs::write(dir.path().join("ParentPointer.txt"), "CPACSWingSegment\n").unwrap();
    fs::write(dir.path().join("ReservedNames.txt"), "").unwrap();
    fs::write(dir.path().join("PruneList.txt"), "").unwrap();
    dir
}

const SCHEMA: &str = r#"<?xml version="1.0"?>
<schema xmlns="http://www.w3.org/2001/XMLSchema">
    <complexType name="WingSegmentType">
        <sequence>
            <element name="fromElementUID" type="xsd:string"/>
        </sequence>
    </complexType>
    <complexType name="WingSegmentsType">
        <sequence>
            <element name="segment" type="WingSegmentType" maxOccurs="unbounded"/>
        </sequence>
    </complexType>
</schema>"#;

#[test]
fn parent_pointer_class_gets_constructor_and_getter_not_a_default_ctor() {
    let dir = tables_with_parent_pointer();
    let tables = Tables::load(dir.path()).unwrap();
    let registry = cpacsgen_schema::parse(SCHEMA).unwrap();
    let mut types = TypeSystem::build(&registry, &tables).unwrap();
    types.collapse_enums();
    types.run_prune_list(&tables);

    let files = generate(&types, &tables, &Options::default()).unwrap();
    let header = files.iter().find(|f| f.relative_path == "CPACSWingSegment.h").expect("header emitted");

    assert!(header.contents.contains("CPACSWingSegment(CPACSWingSegments* parent)"));
    assert!(!header.contents.contains("CPACSGEN_EXPORT CPACSWingSegment();"));
    assert!(header.contents.contains("GetParent"));

    let source = files.iter().find(|f| f.relative_path == "CPACSWingSegment.cpp").expect("source emitted");
    assert!(source.contents.contains("m_parent = parent;"));
}

#[test]
fn default_ctor_opt_in_adds_second_constructor() {
    let dir = tables_with_parent_pointer();
    let tables = Tables::load(dir.path()).unwrap();
    let registry = cpacsgen_schema::parse(SCHEMA).unwrap();
    let mut types = TypeSystem::build(&registry, &tables).unwrap();
    types.collapse_enums();
    types.run_prune_list(&tables);

    let options = Options { generate_default_ctors_for_parent_pointer_types: true, ..Options::default() };
    let files = generate(&types, &tables, &options).unwrap();
    let header = files.iter().find(|f| f.relative_path == "CPACSWingSegment.h").expect("header emitted");

    assert!(header.contents.contains("CPACSGEN_EXPORT CPACSWingSegment();"));
}
