use cpacsgen_schema::{Attribute, ComplexType, Element, SimpleContent, SimpleType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Optional,
    Mandatory,
    Vector,
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Cardinality::Optional => "Optional",
            Cardinality::Mandatory => "Mandatory",
            Cardinality::Vector => "Vector",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlConstruct {
    Element,
    Attribute,
    SimpleContent,
    FundamentalTypeBase,
}

/// Where a field's data came from in the schema. `Synthetic` covers fields the
/// TypeSystem fabricates itself (currently only the `FundamentalTypeBase` lead field).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOrigin {
    Attribute(Attribute),
    Element(Element),
    SimpleContent(SimpleContent),
    Synthetic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub origin: FieldOrigin,
    pub cpacs_name: String,
    pub type_name: String,
    pub xml_construct: XmlConstruct,
    pub cardinality: Cardinality,
    pub explicit_name: Option<String>,
}

impl Field {
    /// The explicit override if set, otherwise the CPACS name.
    pub fn name(&self) -> &str {
        match &self.explicit_name {
            Some(n) if !n.is_empty() => n,
            _ => &self.cpacs_name,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassDependencies {
    pub bases: Vec<String>,
    pub deriveds: Vec<String>,
    pub child_classes: Vec<String>,
    pub child_enums: Vec<String>,
    pub parent_classes: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EnumDependencies {
    pub parent_classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Class {
    pub origin: ComplexType,
    pub name: String,
    pub base: Option<String>,
    pub fields: Vec<Field>,
    pub pruned: bool,
    pub dependencies: ClassDependencies,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    /// The literal XML spelling of this enumeration value.
    pub spelling: String,
}

#[derive(Debug, Clone)]
pub struct Enum {
    pub origin: SimpleType,
    pub name: String,
    pub values: Vec<EnumValue>,
    pub pruned: bool,
    pub dependencies: EnumDependencies,
}
