use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[clap(version, about = "Generates a typed C++ class hierarchy with XML bindings from a CPACS XSD schema")]
pub struct Cli {
    /// Path to the CPACS XSD schema to read
    #[clap(long, value_parser)]
    pub schema: PathBuf,

    /// Directory holding the six curated side-tables (CustomTypes.txt, FundamentalTypes.txt, …)
    #[clap(long, value_parser)]
    pub tables: PathBuf,

    /// Directory the generated .h/.cpp files are written into; created if missing
    #[clap(long, value_parser)]
    pub output: PathBuf,

    /// Emit a default constructor for parent-pointer classes in addition to the per-parent overloads
    #[clap(long)]
    pub generate_default_ctors_for_parent_pointer_types: bool,

    /// Match enum string values case-sensitively instead of the default lenient comparison
    #[clap(long)]
    pub generate_case_sensitive_string_to_enum: bool,

    /// Let a failed optional-class read propagate instead of being caught, logged and discarded
    #[clap(long)]
    pub no_try_catch_around_optional_class_reads: bool,
}
