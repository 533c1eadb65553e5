//! Builds a canonical registry of schema types ([`SchemaRegistry`]) from a
//! CPACS XSD document.

mod error;
mod model;
mod naming;
mod parser;
mod registry;

pub use error::SchemaError;
pub use model::{
    All, Any, Attribute, Choice, ComplexContent, ComplexType, Element, Group, Particle, Sequence,
    SchemaType, SimpleContent, SimpleType, UNBOUNDED,
};
pub use naming::{generate_unique_type_name, strip_type_suffix};
pub use parser::parse;
pub use registry::SchemaRegistry;
