//! Lowers a schema registry into the emitted-class model: [`Class`] and
//! [`Enum`] records with a rebuildable dependency graph, ready for CodeGen.

mod build;
mod error;
mod model;
mod naming;
mod typesystem;

pub use build::resolve_type;
pub use error::ModelError;
pub use model::{
    Cardinality, Class, ClassDependencies, Enum, EnumDependencies, EnumValue, Field, FieldOrigin,
    XmlConstruct,
};
pub use naming::{make_class_name, strip_trailing_digits};
pub use typesystem::TypeSystem;

#[cfg(test)]
mod tests {
    use super::*;
    use cpacsgen_tables::Tables;
    use std::fs;

    fn write_minimal_tables() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("CustomTypes.txt"), "").unwrap();
        fs::write(
            dir.path().join("FundamentalTypes.txt"),
            "double Double\nstring String\nbool Bool\nint Int\n",
        )
        .unwrap();
        fs::write(dir.path().join("TypeSubstitution.txt"), "xsd:double double\nxsd:string string\nxsd:boolean bool\nxsd:int int\n").unwrap();
        fs::write(dir.path().join("ParentPointer.txt"), "WingType\n").unwrap();
        fs::write(dir.path().join("ReservedNames.txt"), "").unwrap();
        fs::write(dir.path().join("PruneList.txt"), "").unwrap();
        dir
    }

    #[test]
    fn primitive_only_type_produces_three_mandatory_fields() {
        let xml = r#"<?xml version="1.0"?><schema xmlns="http://www.w3.org/2001/XMLSchema">
            <complexType name="PointType">
                <sequence>
                    <element name="x" type="xsd:double"/>
                    <element name="y" type="xsd:double"/>
                    <element name="z" type="xsd:double"/>
                </sequence>
            </complexType>
        </schema>"#;
        let registry = cpacsgen_schema::parse(xml).unwrap();
        let tables_dir = write_minimal_tables();
        let tables = Tables::load(tables_dir.path()).unwrap();

        let model = TypeSystem::build(&registry, &tables).unwrap();
        let class = model.classes.get("CPACSPoint").unwrap();
        assert_eq!(class.fields.len(), 3);
        for field in &class.fields {
            assert_eq!(field.cardinality, Cardinality::Mandatory);
            assert_eq!(field.type_name, "double");
        }
    }

    #[test]
    fn vector_of_class_field_builds_parent_child_dependency_edges() {
        let xml = r#"<?xml version="1.0"?><schema xmlns="http://www.w3.org/2001/XMLSchema">
            <complexType name="WingType">
                <sequence>
                    <element name="name" type="xsd:string"/>
                </sequence>
            </complexType>
            <complexType name="WingsType">
                <sequence>
                    <element name="wing" type="WingType" minOccurs="0" maxOccurs="unbounded"/>
                </sequence>
            </complexType>
        </schema>"#;
        let registry = cpacsgen_schema::parse(xml).unwrap();
        let tables_dir = write_minimal_tables();
        let tables = Tables::load(tables_dir.path()).unwrap();

        let mut model = TypeSystem::build(&registry, &tables).unwrap();
        model.build_dependencies();

        let wings = model.classes.get("CPACSWings").unwrap();
        let field = &wings.fields[0];
        assert_eq!(field.cardinality, Cardinality::Vector);
        assert_eq!(field.type_name, "CPACSWing");

        let wing = model.classes.get("CPACSWing").unwrap();
        assert!(wing.dependencies.parent_classes.contains(&"CPACSWings".to_string()));
        assert!(wings.dependencies.child_classes.contains(&"CPACSWing".to_string()));
    }

    #[test]
    fn choice_fields_get_disambiguated_names() {
        let xml = r#"<?xml version="1.0"?><schema xmlns="http://www.w3.org/2001/XMLSchema">
            <complexType name="EitherType">
                <choice>
                    <element name="a" type="xsd:double"/>
                    <element name="b" type="xsd:double"/>
                </choice>
            </complexType>
        </schema>"#;
        let registry = cpacsgen_schema::parse(xml).unwrap();
        let tables_dir = write_minimal_tables();
        let tables = Tables::load(tables_dir.path()).unwrap();

        let model = TypeSystem::build(&registry, &tables).unwrap();
        let class = model.classes.get("CPACSEither").unwrap();
        let names: Vec<&str> = class.fields.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["a_choice1", "b_choice2"]);
        assert!(class.fields.iter().all(|f| f.cardinality == Cardinality::Optional));
    }

    #[test]
    fn enum_collapse_merges_structurally_identical_enums() {
        let xml = r#"<?xml version="1.0"?><schema xmlns="http://www.w3.org/2001/XMLSchema">
            <simpleType name="FooType">
                <restriction base="xsd:string">
                    <enumeration value="a"/>
                    <enumeration value="b"/>
                </restriction>
            </simpleType>
            <simpleType name="Foo2Type">
                <restriction base="xsd:string">
                    <enumeration value="a"/>
                    <enumeration value="b"/>
                </restriction>
            </simpleType>
            <complexType name="HolderType">
                <sequence>
                    <element name="foo" type="FooType"/>
                    <element name="foo2" type="Foo2Type"/>
                </sequence>
            </complexType>
        </schema>"#;
        let registry = cpacsgen_schema::parse(xml).unwrap();
        let tables_dir = write_minimal_tables();
        let tables = Tables::load(tables_dir.path()).unwrap();

        let mut model = TypeSystem::build(&registry, &tables).unwrap();
        model.collapse_enums();

        assert_eq!(model.enums.len(), 1);
        let survivor_name = model.enums.keys().next().unwrap().clone();

        let holder = model.classes.get("CPACSHolder").unwrap();
        assert!(holder.fields.iter().all(|f| f.type_name == survivor_name));

        let before = model.enums.len();
        model.collapse_enums();
        assert_eq!(model.enums.len(), before);
    }

    #[test]
    fn fundamental_base_is_demoted_to_leading_field() {
        let xml = r#"<?xml version="1.0"?><schema xmlns="http://www.w3.org/2001/XMLSchema">
            <complexType name="MeasureType">
                <complexContent>
                    <extension base="xsd:double">
                        <attribute name="unit" type="xsd:string" use="optional"/>
                    </extension>
                </complexContent>
            </complexType>
        </schema>"#;
        let registry = cpacsgen_schema::parse(xml).unwrap();
        let tables_dir = write_minimal_tables();
        let tables = Tables::load(tables_dir.path()).unwrap();

        let model = TypeSystem::build(&registry, &tables).unwrap();
        let class = model.classes.get("CPACSMeasure").unwrap();
        assert!(class.base.is_none());
        assert_eq!(class.fields[0].xml_construct, XmlConstruct::FundamentalTypeBase);
        assert_eq!(class.fields[0].type_name, "double");
    }
}
