/// Generator-wide behavior toggles, threaded explicitly instead of living as
/// file-scope globals. Defaults reproduce the original generator's defaults.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Emit a default (no-argument) constructor even for parent-pointer
    /// classes, in addition to the per-parent constructor overloads.
    pub generate_default_ctors_for_parent_pointer_types: bool,
    /// Case-sensitive `StringToEnum` matching. Default is lenient
    /// (case-insensitive), since some schema test data capitalizes
    /// enumeration spellings inconsistently.
    pub generate_case_sensitive_string_to_enum: bool,
    /// Wrap an optional class field's read in a try/catch, logging and
    /// discarding the partially-constructed child on failure.
    pub generate_try_catch_around_optional_class_reads: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            generate_default_ctors_for_parent_pointer_types: false,
            generate_case_sensitive_string_to_enum: false,
            generate_try_catch_around_optional_class_reads: true,
        }
    }
}
