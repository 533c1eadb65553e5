//! The schema-level entities produced by [`crate::parse`], each identified by
//! the XPath-like origin it was read from.

/// Maximum representable `maxOccurs`, standing in for the XSD literal `unbounded`.
pub const UNBOUNDED: u64 = u64::MAX;

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub origin: String,
    pub name: String,
    pub type_name: String,
    pub default_value: Option<String>,
    pub fixed_value: Option<String>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub origin: String,
    pub name: String,
    pub type_name: String,
    pub min_occurs: u64,
    pub max_occurs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Any {
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct All {
    pub origin: String,
    pub elements: Vec<Element>,
}

/// A member of a `Choice` or `Sequence`, closed over the five particle kinds
/// the schema grammar admits.
#[derive(Debug, Clone, PartialEq)]
pub enum Particle {
    Element(Element),
    Group(Group),
    Choice(Choice),
    Sequence(Sequence),
    Any(Any),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub origin: String,
    pub elements: Vec<Particle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub origin: String,
    pub elements: Vec<Particle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleContent {
    pub origin: String,
    pub type_name: String,
}

/// The particle content of a [`ComplexType`]: at most one of a plain group
/// reference, an `all`/`choice`/`sequence` model group, or a simple-content body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ComplexContent {
    #[default]
    None,
    Group(Group),
    All(All),
    Choice(Choice),
    Sequence(Sequence),
    SimpleContent(SimpleContent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexType {
    pub origin: String,
    pub name: String,
    pub base: Option<String>,
    pub content: ComplexContent,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleType {
    pub origin: String,
    pub name: String,
    pub base: String,
    pub restriction_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    Complex(ComplexType),
    Simple(SimpleType),
}

impl SchemaType {
    pub fn name(&self) -> &str {
        match self {
            SchemaType::Complex(t) => &t.name,
            SchemaType::Simple(t) => &t.name,
        }
    }

    pub fn origin(&self) -> &str {
        match self {
            SchemaType::Complex(t) => &t.origin,
            SchemaType::Simple(t) => &t.origin,
        }
    }

    pub fn as_complex(&self) -> Option<&ComplexType> {
        match self {
            SchemaType::Complex(t) => Some(t),
            SchemaType::Simple(_) => None,
        }
    }

    pub fn as_simple(&self) -> Option<&SimpleType> {
        match self {
            SchemaType::Simple(t) => Some(t),
            SchemaType::Complex(_) => None,
        }
    }
}
