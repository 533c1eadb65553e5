#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown type referenced: {0}")]
    UnknownType(String),

    #[error("invalid cardinality (minOccurs={min}, maxOccurs={max})")]
    InvalidCardinality { min: u64, max: u64 },

    #[error("generating fields for '{0}' particles is not supported")]
    UnsupportedParticle(&'static str),

    #[error("field type '{type_name}' on class/enum '{owner}' resolves neither to a class, an enum, nor a fundamental type")]
    UnresolvedFieldType { owner: String, type_name: String },

    #[error("enum collapse left a dangling reference to '{0}'")]
    DanglingEnumReference(String),
}
