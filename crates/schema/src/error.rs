#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("unsupported XSD construct '{construct}' at {xpath}")]
    UnsupportedConstruct { construct: String, xpath: String },

    #[error("type with name '{name}' already exists (redefined at {xpath})")]
    DuplicateType { name: String, xpath: String },

    #[error("missing required attribute '{attribute}' at {xpath}")]
    MissingAttribute { xpath: String, attribute: String },

    #[error("invalid value '{value}' for 'use' attribute at {xpath}, expected 'optional' or 'required'")]
    InvalidUseValue { xpath: String, value: String },

    #[error("no type or unexpected type construct at {xpath}")]
    UnexpectedTypeConstruct { xpath: String },

    #[error("schema document has no root 'schema' element")]
    MissingSchemaRoot,
}
