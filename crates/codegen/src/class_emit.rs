use cpacsgen_tables::Tables;
use cpacsgen_typesystem::{Cardinality, Class, Field, FieldOrigin, TypeSystem, XmlConstruct};

use crate::error::CodegenError;
use crate::includes::{resolve_includes, Includes};
use crate::license::write_license_header;
use crate::naming::{accessor_stem, enum_to_string_func, field_name, string_to_enum_func};
use crate::options::Options;
use crate::writer::CodeWriter;

fn custom_replaced_type<'a>(type_name: &'a str, tables: &'a Tables) -> &'a str {
    tables.custom_types.find(type_name).unwrap_or(type_name)
}

fn tixi_func_suffix(construct: XmlConstruct) -> &'static str {
    match construct {
        XmlConstruct::Attribute => "Attribute",
        XmlConstruct::Element | XmlConstruct::SimpleContent | XmlConstruct::FundamentalTypeBase => "Element",
    }
}

fn xml_construct_label(construct: XmlConstruct) -> &'static str {
    match construct {
        XmlConstruct::Attribute => "attribute",
        XmlConstruct::Element => "element",
        XmlConstruct::SimpleContent => "simpleContent",
        XmlConstruct::FundamentalTypeBase => "fundamental type base class",
    }
}

fn field_origin_comment(field: &Field) -> String {
    match &field.origin {
        FieldOrigin::Attribute(a) => format!("generated from {}", a.origin),
        FieldOrigin::Element(e) => format!("generated from {}", e.origin),
        FieldOrigin::SimpleContent(s) => format!("generated from {}", s.origin),
        FieldOrigin::Synthetic => "synthesized base-class field".to_string(),
    }
}

fn getter_setter_type(field: &Field, types: &TypeSystem, tables: &Tables) -> String {
    let type_name = custom_replaced_type(&field.type_name, tables);
    match field.cardinality {
        Cardinality::Optional | Cardinality::Mandatory => type_name.to_string(),
        Cardinality::Vector => {
            if types.classes.contains_key(&field.type_name) {
                format!("std::vector<std::unique_ptr<{type_name}>>")
            } else {
                format!("std::vector<{type_name}>")
            }
        }
    }
}

fn field_type(field: &Field, types: &TypeSystem, tables: &Tables) -> String {
    let base = getter_setter_type(field, types, tables);
    match field.cardinality {
        Cardinality::Optional => format!("Optional<{base}>"),
        _ => base,
    }
}

fn write_fields(w: &mut CodeWriter, fields: &[Field], types: &TypeSystem, tables: &Tables) {
    for field in fields {
        w.line(format!("// {}", field_origin_comment(field)));
        w.line(format!("{} {};", field_type(field, types, tables), field_name(field.name())));
    }
    if !fields.is_empty() {
        w.blank();
    }
}

fn write_accessor_declarations(w: &mut CodeWriter, fields: &[Field], types: &TypeSystem, tables: &Tables) {
    for field in fields {
        let stem = accessor_stem(field.name());
        let getter_type = getter_setter_type(field, types, tables);
        if field.cardinality == Cardinality::Optional {
            w.line(format!("CPACSGEN_EXPORT bool Has{stem}() const;"));
        }
        w.line(format!("CPACSGEN_EXPORT const {getter_type}& Get{stem}() const;"));

        let has_setter = !types.classes.contains_key(&field.type_name);
        if has_setter {
            w.line(format!("CPACSGEN_EXPORT void Set{stem}(const {getter_type}& value);"));
        } else {
            w.line(format!("CPACSGEN_EXPORT {getter_type}& Get{stem}();"));
        }
        w.blank();
    }
}

fn write_accessor_implementations(w: &mut CodeWriter, class_name: &str, fields: &[Field], types: &TypeSystem, tables: &Tables) {
    for field in fields {
        let stem = accessor_stem(field.name());
        let getter_type = getter_setter_type(field, types, tables);
        let name = field_name(field.name());
        let optional = field.cardinality == Cardinality::Optional;
        let deref = if optional { "*" } else { "" };

        if optional {
            w.line(format!("bool {class_name}::Has{stem}() const {{"));
            w.scope(|w| {
                w.line(format!("return static_cast<bool>({name});"));
            });
            w.line("}");
            w.blank();
        }

        w.line(format!("const {getter_type}& {class_name}::Get{stem}() const {{"));
        w.scope(|w| {
            w.line(format!("return {deref}{name};"));
        });
        w.line("}");
        w.blank();

        let has_setter = !types.classes.contains_key(&field.type_name);
        if has_setter {
            w.line(format!("void {class_name}::Set{stem}(const {getter_type}& value) {{"));
            w.scope(|w| {
                w.line(format!("{name} = value;"));
            });
            w.line("}");
        } else {
            w.line(format!("{getter_type}& {class_name}::Get{stem}() {{"));
            w.scope(|w| {
                w.line(format!("return {deref}{name};"));
            });
            w.line("}");
        }
        w.blank();
    }
}

fn write_parent_pointer_getters(w: &mut CodeWriter, class: &Class, tables: &Tables) {
    if !tables.parent_pointers.contains(&class.name) {
        return;
    }
    let parents = &class.dependencies.parent_classes;
    if parents.len() > 1 {
        w.line("// getter for parent classes");
        w.line("template<typename P>");
        w.line("bool IsParent() const {");
        w.scope(|w| {
            w.line("return m_parentType != nullptr && *m_parentType == typeid(P);");
        });
        w.line("}");
        w.blank();
        w.line("template<typename P>");
        w.line("P* GetParent() const {");
        w.scope(|w| {
            let clauses: Vec<String> = parents
                .iter()
                .map(|p| format!("std::is_same<P, {}>::value", custom_replaced_type(p, tables)))
                .collect();
            w.line(format!("static_assert({}, \"template argument for P is not a parent class of {}\");", clauses.join(" || "), class.name));
            w.line("if (m_parent == nullptr) {");
            w.scope(|w| {
                w.line("return nullptr;");
            });
            w.line("}");
            w.line("if (!IsParent<P>()) {");
            w.scope(|w| {
                w.line("throw std::runtime_error(\"bad parent\");");
            });
            w.line("}");
            w.line("return static_cast<P*>(m_parent);");
        });
        w.line("}");
    } else if parents.len() == 1 {
        w.line("// getter for parent class");
        w.line(format!("{}* GetParent() const;", custom_replaced_type(&parents[0], tables)));
    }
    w.blank();
}

fn write_parent_pointer_getter_implementation(w: &mut CodeWriter, class: &Class, tables: &Tables) {
    if !tables.parent_pointers.contains(&class.name) {
        return;
    }
    if class.dependencies.parent_classes.len() == 1 {
        w.line(format!("{}* {}::GetParent() const {{", custom_replaced_type(&class.dependencies.parent_classes[0], tables), class.name));
        w.scope(|w| {
            w.line("return m_parent;");
        });
        w.line("}");
        w.blank();
    }
}

fn write_io_declarations(w: &mut CodeWriter) {
    w.line("CPACSGEN_EXPORT virtual void ReadCPACS(const CpacsDocumentHandle& handle, const std::string& xpath);");
    w.line("CPACSGEN_EXPORT virtual void WriteCPACS(const CpacsDocumentHandle& handle, const std::string& xpath) const;");
    w.blank();
}

fn write_read_attribute_or_element_implementation(
    w: &mut CodeWriter,
    class: &Class,
    field: &Field,
    types: &TypeSystem,
    tables: &Tables,
    options: &Options,
) -> Result<(), CodegenError> {
    let att_or_elem = tixi_func_suffix(field.xml_construct);
    let name = field_name(field.name());

    if let Some(suffix) = tables.fundamental_types.find(&field.type_name) {
        match field.cardinality {
            Cardinality::Optional | Cardinality::Mandatory => {
                w.line(format!("{name} = Get{suffix}{att_or_elem}(handle, xpath, \"{}\");", field.cpacs_name));
            }
            Cardinality::Vector => {
                w.line(format!("ReadElements(handle, xpath, \"{}\", {name}, [&](const std::string& childXPath) {{", field.cpacs_name));
                w.scope(|w| {
                    w.line(format!("return Get{suffix}{att_or_elem}(handle, childXPath, \"\");"));
                });
                w.line("});");
            }
        }
        return Ok(());
    }

    if let Some(target_enum) = types.enums.get(&field.type_name) {
        let read_func = string_to_enum_func(&target_enum.name);
        match field.cardinality {
            Cardinality::Optional | Cardinality::Mandatory => {
                w.line(format!("{name} = {read_func}(GetText{att_or_elem}(handle, xpath, \"{}\"));", field.cpacs_name));
            }
            Cardinality::Vector => {
                return Err(CodegenError::UnresolvedFieldType { type_name: field.type_name.clone() });
            }
        }
        return Ok(());
    }

    if field.xml_construct != XmlConstruct::Attribute && field.xml_construct != XmlConstruct::FundamentalTypeBase && types.classes.contains_key(&field.type_name) {
        let requires_parent_pointer = tables.parent_pointers.contains(&field.type_name);
        let this_ptr = parent_pointer_this(&class.name, tables);
        match field.cardinality {
            Cardinality::Optional => {
                if requires_parent_pointer {
                    w.line(format!("{name}.construct({this_ptr});"));
                } else {
                    w.line(format!("{name}.construct();"));
                }
                if options.generate_try_catch_around_optional_class_reads {
                    w.line("try {");
                    w.scope(|w| {
                        w.line(format!("{name}->ReadCPACS(handle, xpath + \"/{}\");", field.cpacs_name));
                    });
                    w.line("} catch (const std::exception& e) {");
                    w.scope(|w| {
                        w.line(format!("LOG(ERROR) << \"Failed to read {} at xpath \" << xpath << \": \" << e.what();", field.cpacs_name));
                        w.line(format!("{name}.destroy();"));
                    });
                    w.line("}");
                } else {
                    w.line(format!("{name}->ReadCPACS(handle, xpath + \"/{}\");", field.cpacs_name));
                }
            }
            Cardinality::Mandatory => {
                w.line(format!("{name}.ReadCPACS(handle, xpath + \"/{}\");", field.cpacs_name));
            }
            Cardinality::Vector => {
                w.line(format!("ReadElements(handle, xpath, \"{}\", {name}, [&](const std::string& childXPath) {{", field.cpacs_name));
                w.scope(|w| {
                    let type_name = custom_replaced_type(&field.type_name, tables);
                    let ctor_arg = if requires_parent_pointer { this_ptr.clone() } else { String::new() };
                    w.line(format!("auto child = std::make_unique<{type_name}>({ctor_arg});"));
                    w.line("child->ReadCPACS(handle, childXPath);");
                    w.line("return child;");
                });
                w.line("});");
            }
        }
        return Ok(());
    }

    Err(CodegenError::UnresolvedFieldType { type_name: field.type_name.clone() })
}

fn write_write_attribute_or_element_implementation(w: &mut CodeWriter, field: &Field, types: &TypeSystem, tables: &Tables) -> Result<(), CodegenError> {
    let att_or_elem = tixi_func_suffix(field.xml_construct);
    let name = field_name(field.name());

    if tables.fundamental_types.contains(&field.type_name) {
        match field.cardinality {
            Cardinality::Optional | Cardinality::Mandatory => {
                w.line(format!("Save{att_or_elem}(handle, xpath, \"{}\", {name});", field.cpacs_name));
            }
            Cardinality::Vector => {
                w.line(format!("SaveElements(handle, xpath, \"{}\", {name}, [&](const std::string& childXPath, const {}& child) {{", field.cpacs_name, custom_replaced_type(&field.type_name, tables)));
                w.scope(|w| {
                    w.line(format!("Save{att_or_elem}(handle, childXPath, \"{}\", child);", field.cpacs_name));
                });
                w.line("});");
            }
        }
        return Ok(());
    }

    if let Some(target_enum) = types.enums.get(&field.type_name) {
        let deref = if field.cardinality == Cardinality::Optional { "*" } else { "" };
        match field.cardinality {
            Cardinality::Optional | Cardinality::Mandatory => {
                w.line(format!(
                    "Save{att_or_elem}(handle, xpath, \"{}\", {}({deref}{name}));",
                    field.cpacs_name,
                    enum_to_string_func(&target_enum.name)
                ));
            }
            Cardinality::Vector => {
                return Err(CodegenError::UnresolvedFieldType { type_name: field.type_name.clone() });
            }
        }
        return Ok(());
    }

    if field.xml_construct != XmlConstruct::Attribute && field.xml_construct != XmlConstruct::FundamentalTypeBase && types.classes.contains_key(&field.type_name) {
        match field.cardinality {
            Cardinality::Optional => {
                w.line(format!("if ({name}) {{"));
                w.scope(|w| {
                    w.line(format!("{name}->WriteCPACS(handle, xpath + \"/{}\");", field.cpacs_name));
                });
                w.line("}");
            }
            Cardinality::Mandatory => {
                w.line(format!("{name}.WriteCPACS(handle, xpath + \"/{}\");", field.cpacs_name));
            }
            Cardinality::Vector => {
                w.line(format!(
                    "SaveElements(handle, xpath, \"{}\", {name}, [&](const std::string& childXPath, const std::unique_ptr<{}>& child) {{",
                    field.cpacs_name,
                    custom_replaced_type(&field.type_name, tables)
                ));
                w.scope(|w| {
                    w.line("child->WriteCPACS(handle, childXPath);");
                });
                w.line("});");
            }
        }
        return Ok(());
    }

    Err(CodegenError::UnresolvedFieldType { type_name: field.type_name.clone() })
}

fn write_read_base_implementation(w: &mut CodeWriter, base: &str, types: &TypeSystem, tables: &Tables) -> Result<(), CodegenError> {
    if let Some(suffix) = tables.fundamental_types.find(base) {
        w.line(format!("*this = Get{suffix}Element(handle, xpath);"));
        return Ok(());
    }
    if types.classes.contains_key(base) {
        w.line(format!("{base}::ReadCPACS(handle, xpath);"));
        return Ok(());
    }
    Err(CodegenError::UnknownBase { class: base.to_string(), base: base.to_string() })
}

fn write_write_base_implementation(w: &mut CodeWriter, base: &str, types: &TypeSystem, tables: &Tables) -> Result<(), CodegenError> {
    if tables.fundamental_types.contains(base) {
        w.line("SaveElement(handle, xpath, *this);");
        return Ok(());
    }
    if types.classes.contains_key(base) {
        w.line(format!("{base}::WriteCPACS(handle, xpath);"));
        return Ok(());
    }
    Err(CodegenError::UnknownBase { class: base.to_string(), base: base.to_string() })
}

fn write_read_implementation(w: &mut CodeWriter, class: &Class, types: &TypeSystem, tables: &Tables, options: &Options) -> Result<(), CodegenError> {
    w.line(format!("void {}::ReadCPACS(const CpacsDocumentHandle& handle, const std::string& xpath) {{", class.name));
    let mut err = None;
    w.scope(|w| {
        if let Some(base) = &class.base {
            w.line("// read base");
            if let Err(e) = write_read_base_implementation(w, base, types, tables) {
                err = Some(e);
            }
            w.blank();
        }

        for field in &class.fields {
            let construct = xml_construct_label(field.xml_construct);
            let att_or_elem = tixi_func_suffix(field.xml_construct);
            w.line(format!("// read {} {}", construct, field.cpacs_name));
            w.line(format!("if (Check{att_or_elem}(handle, xpath, \"{}\")) {{", field.cpacs_name));
            w.scope(|w| {
                if let Err(e) = write_read_attribute_or_element_implementation(w, class, field, types, tables, options) {
                    err = Some(e);
                }
            });
            w.line("}");
            if field.cardinality == Cardinality::Mandatory {
                w.line("else {");
                w.scope(|w| {
                    w.line(format!("LOG(WARNING) << \"Required {} {} is missing\";", construct, field.cpacs_name));
                });
                w.line("}");
            }
            w.blank();
        }
    });
    w.line("}");
    w.blank();

    match err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn write_write_implementation(w: &mut CodeWriter, class: &Class, types: &TypeSystem, tables: &Tables) -> Result<(), CodegenError> {
    w.line(format!("void {}::WriteCPACS(const CpacsDocumentHandle& handle, const std::string& xpath) const {{", class.name));
    let mut err = None;
    w.scope(|w| {
        if let Some(base) = &class.base {
            w.line("// write base");
            if let Err(e) = write_write_base_implementation(w, base, types, tables) {
                err = Some(e);
            }
            w.blank();
        }

        for field in &class.fields {
            w.line(format!("// write {} {}", xml_construct_label(field.xml_construct), field.cpacs_name));
            if let Err(e) = write_write_attribute_or_element_implementation(w, field, types, tables) {
                err = Some(e);
            }
            w.blank();
        }
    });
    w.line("}");
    w.blank();

    match err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn parent_pointer_this(class_name: &str, tables: &Tables) -> String {
    match tables.custom_types.find(class_name) {
        Some(custom) => format!("reinterpret_cast<{custom}*>(this)"),
        None => "this".to_string(),
    }
}

fn write_ctors(w: &mut CodeWriter, class: &Class, tables: &Tables, options: &Options) {
    if tables.parent_pointers.contains(&class.name) {
        if options.generate_default_ctors_for_parent_pointer_types {
            w.line(format!("CPACSGEN_EXPORT {}();", class.name));
        }
        for parent in &class.dependencies.parent_classes {
            w.line(format!("CPACSGEN_EXPORT {}({}* parent);", class.name, custom_replaced_type(parent, tables)));
        }
        w.blank();
    } else {
        w.line(format!("CPACSGEN_EXPORT {}();", class.name));
    }
}

fn write_parent_pointer_field_initializers(w: &mut CodeWriter, class: &Class, tables: &Tables) {
    let mandatory_parent_fields: Vec<&Field> = class
        .fields
        .iter()
        .filter(|f| f.cardinality == Cardinality::Mandatory && tables.parent_pointers.contains(&f.type_name))
        .collect();
    if mandatory_parent_fields.is_empty() {
        return;
    }
    let this_ptr = parent_pointer_this(&class.name, tables);
    let initializers: Vec<String> = mandatory_parent_fields
        .iter()
        .map(|f| format!("{}({this_ptr})", field_name(f.name())))
        .collect();
    w.raw(format!(" : {}", initializers.join(", ")));
}

fn write_ctor_implementations(w: &mut CodeWriter, class: &Class, tables: &Tables, options: &Options) {
    if tables.parent_pointers.contains(&class.name) {
        if options.generate_default_ctors_for_parent_pointer_types {
            w.line(format!("{}::{}()", class.name, class.name));
            write_parent_pointer_field_initializers(w, class, tables);
            w.raw(" {");
            w.scope(|w| {
                w.line("m_parent = nullptr;");
                if class.dependencies.parent_classes.len() > 1 {
                    w.line("m_parentType = nullptr;");
                }
            });
            w.line("}");
            w.blank();
        }

        if class.dependencies.parent_classes.len() == 1 {
            w.line(format!("{}::{}({}* parent)", class.name, class.name, custom_replaced_type(&class.dependencies.parent_classes[0], tables)));
            write_parent_pointer_field_initializers(w, class, tables);
            w.raw(" {");
            w.scope(|w| {
                w.line("assert(parent != nullptr);");
                w.line("m_parent = parent;");
            });
            w.line("}");
            w.blank();
        } else {
            for parent in &class.dependencies.parent_classes {
                let rn = custom_replaced_type(parent, tables);
                w.line(format!("{}::{}({rn}* parent)", class.name, class.name));
                write_parent_pointer_field_initializers(w, class, tables);
                w.raw(" {");
                w.scope(|w| {
                    w.line("assert(parent != nullptr);");
                    w.line("m_parent = parent;");
                    w.line(format!("m_parentType = &typeid({rn});"));
                });
                w.line("}");
                w.blank();
            }
        }
    } else {
        w.line(format!("{}::{}()", class.name, class.name));
        write_parent_pointer_field_initializers(w, class, tables);
        w.raw(" {}");
    }
}

fn write_parent_pointer_fields(w: &mut CodeWriter, class: &Class, tables: &Tables) {
    if !tables.parent_pointers.contains(&class.name) {
        return;
    }
    let parents = &class.dependencies.parent_classes;
    if parents.len() > 1 {
        w.line("// pointer to parent classes");
        w.line("void* m_parent;");
        w.line("const std::type_info* m_parentType;");
    } else if parents.len() == 1 {
        w.line("// pointer to parent class");
        w.line(format!("{}* m_parent;", custom_replaced_type(&parents[0], tables)));
    }
    w.blank();
}

pub fn write_source(w: &mut CodeWriter, class: &Class, includes: &Includes, types: &TypeSystem, tables: &Tables, options: &Options) -> Result<(), CodegenError> {
    write_license_header(w);

    for inc in &includes.cpp_includes {
        w.line(format!("#include {inc}"));
    }
    if !includes.cpp_includes.is_empty() {
        w.blank();
    }

    w.line("namespace cpacsgen {");
    let mut err = None;
    w.scope(|w| {
        w.line("namespace generated {");
        w.scope(|w| {
            write_ctor_implementations(w, class, tables, options);
            w.blank();
            w.line(format!("{}::~{}() {{}}", class.name, class.name));
            w.blank();
            write_parent_pointer_getter_implementation(w, class, tables);
            if let Err(e) = write_read_implementation(w, class, types, tables, options) {
                err = Some(e);
            }
            if let Err(e) = write_write_implementation(w, class, types, tables) {
                err = Some(e);
            }
            write_accessor_implementations(w, &class.name, &class.fields, types, tables);
        });
        w.line("}");
    });
    w.line("}");
    w.blank();

    match err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

pub struct ClassFiles {
    pub header: String,
    pub source: String,
}

pub fn write_class(class: &Class, types: &TypeSystem, tables: &Tables, options: &Options) -> Result<ClassFiles, CodegenError> {
    let includes = resolve_includes(class, types, tables);

    let mut hpp = CodeWriter::new();
    write_header(&mut hpp, class, &includes, types, tables, options);

    let mut cpp = CodeWriter::new();
    write_source(&mut cpp, class, &includes, types, tables, options)?;

    Ok(ClassFiles { header: hpp.finish(), source: cpp.finish() })
}

pub fn write_header(w: &mut CodeWriter, class: &Class, includes: &Includes, types: &TypeSystem, tables: &Tables, options: &Options) {
    w.line("#pragma once");
    w.blank();
    write_license_header(w);

    for inc in &includes.hpp_includes {
        w.line(format!("#include {inc}"));
    }
    if !includes.hpp_includes.is_empty() {
        w.blank();
    }

    w.line("namespace cpacsgen {");
    w.scope(|w| {
        for fwd in &includes.hpp_custom_forwards {
            w.line(format!("class {fwd};"));
        }
        if !includes.hpp_custom_forwards.is_empty() {
            w.blank();
        }

        w.line("namespace generated {");
        w.scope(|w| {
            for fwd in &includes.hpp_forwards {
                w.line(format!("class {fwd};"));
            }
            if !includes.hpp_forwards.is_empty() {
                w.blank();
            }

            w.line("// This class is used in:");
            for parent in &class.dependencies.parent_classes {
                w.line(format!("// {parent}"));
            }
            if !class.dependencies.parent_classes.is_empty() {
                w.blank();
            }
            w.line(format!("// generated from {}", class.origin.origin));

            let base_clause = match &class.base {
                Some(base) => format!(" : public {base}"),
                None => String::new(),
            };
            w.line(format!("class {}{base_clause} {{", class.name));
            w.line("public:");
            w.scope(|w| {
                write_ctors(w, class, tables, options);
                w.line(format!("CPACSGEN_EXPORT virtual ~{}();", class.name));
                w.blank();
                write_parent_pointer_getters(w, class, tables);
                write_io_declarations(w);
                write_accessor_declarations(w, &class.fields, types, tables);
            });
            w.line("protected:");
            w.scope(|w| {
                write_parent_pointer_fields(w, class, tables);
                write_fields(w, &class.fields, types, tables);
            });
            w.line("private:");
            w.scope(|w| {
                w.line(format!("CPACSGEN_EXPORT {}(const {}&) = delete;", class.name, class.name));
                w.line(format!("CPACSGEN_EXPORT {}& operator=(const {}&) = delete;", class.name, class.name));
                w.blank();
                w.line(format!("CPACSGEN_EXPORT {}({}&&) = delete;", class.name, class.name));
                w.line(format!("CPACSGEN_EXPORT {}& operator=({}&&) = delete;", class.name, class.name));
            });
            w.line("};");
        });
        w.line("}");

        if tables.custom_types.find(&class.name).is_none() {
            w.blank();
            w.line("// This type is not customized, export it into the cpacsgen namespace");
            w.line(format!("using generated::{};", class.name));
        }
    });
    w.line("}");
    w.blank();
}
