use roxmltree::{Document, Node};

use crate::error::SchemaError;
use crate::model::{
    All, Any, Attribute, Choice, ComplexContent, ComplexType, Element, Group, Particle, SchemaType,
    Sequence, SimpleContent, SimpleType, UNBOUNDED,
};
use crate::naming::{generate_unique_type_name, strip_type_suffix};
use crate::registry::SchemaRegistry;

/// Parses a CPACS XSD document into a [`SchemaRegistry`].
pub fn parse(xml: &str) -> Result<SchemaRegistry, SchemaError> {
    let doc = Document::parse(xml)?;
    let mut parser = Parser {
        registry: SchemaRegistry::new(),
    };
    parser.parse_document(&doc)?;
    Ok(parser.registry)
}

struct Parser {
    registry: SchemaRegistry,
}

struct ComplexTypeDraft {
    base: Option<String>,
    content: ComplexContent,
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.is_element() && n.tag_name().name() == tag)
}

fn children<'a, 'input>(node: Node<'a, 'input>, tag: &'a str) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

fn nested<'a, 'input>(node: Node<'a, 'input>, chain: &[&str]) -> Option<Node<'a, 'input>> {
    let mut current = node;
    for tag in chain {
        current = child(current, tag)?;
    }
    Some(current)
}

fn child_path(parent_path: &str, tag: &str, index: usize) -> String {
    format!("{parent_path}/{tag}[{index}]")
}

fn require_attribute(node: Node<'_, '_>, name: &str, path: &str) -> Result<String, SchemaError> {
    node.attribute(name)
        .map(str::to_string)
        .ok_or_else(|| SchemaError::MissingAttribute {
            xpath: path.to_string(),
            attribute: name.to_string(),
        })
}

fn reject_if_present(node: Node<'_, '_>, attribute: &str, path: &str) -> Result<(), SchemaError> {
    if node.attribute(attribute).is_some() {
        return Err(SchemaError::UnsupportedConstruct {
            construct: format!("{attribute} attribute"),
            xpath: path.to_string(),
        });
    }
    Ok(())
}

fn inline_name_hint(stem: &str, local_name: &str) -> String {
    if stem.is_empty() {
        local_name.to_string()
    } else {
        format!("{stem}_{local_name}")
    }
}

impl Parser {
    fn parse_document(&mut self, doc: &Document<'_>) -> Result<(), SchemaError> {
        let schema = doc.root_element();
        if schema.tag_name().name() != "schema" {
            return Err(SchemaError::MissingSchemaRoot);
        }
        let path = "/schema";

        for (i, node) in children(schema, "simpleType").enumerate() {
            self.read_simple_type(node, &child_path(path, "simpleType", i), None)?;
        }
        for (i, node) in children(schema, "complexType").enumerate() {
            self.read_complex_type(node, &child_path(path, "complexType", i), None)?;
        }
        // Top-level elements become roots; their types are already registered
        // above or are parsed inline as a side effect of this call.
        for (i, node) in children(schema, "element").enumerate() {
            self.read_element(node, &child_path(path, "element", i), "")?;
        }

        Ok(())
    }

    fn read_attribute(&mut self, node: Node<'_, '_>, parent_path: &str, stem: &str) -> Result<Attribute, SchemaError> {
        let path = format!("{parent_path}/@{}", node.attribute("name").unwrap_or("?"));
        let name = require_attribute(node, "name", &path)?;

        let type_name = match node.attribute("type") {
            Some(t) => t.to_string(),
            None => self.read_inline_type(node, &path, &inline_name_hint(stem, &name))?,
        };

        let optional = match node.attribute("use") {
            Some("optional") => true,
            Some("required") => false,
            None => false,
            Some(other) => {
                return Err(SchemaError::InvalidUseValue {
                    xpath: path,
                    value: other.to_string(),
                })
            }
        };

        Ok(Attribute {
            origin: path,
            name,
            type_name,
            default_value: node.attribute("default").map(str::to_string),
            fixed_value: node.attribute("fixed").map(str::to_string),
            optional,
        })
    }

    fn read_element(&mut self, node: Node<'_, '_>, path: &str, stem: &str) -> Result<Element, SchemaError> {
        let name = require_attribute(node, "name", path)?;

        let min_occurs = match node.attribute("minOccurs") {
            Some(v) => v.parse().unwrap_or_else(|_| {
                tracing::warn!(xpath = path, value = v, "invalid minOccurs, defaulting to 1");
                1
            }),
            None => 1,
        };
        let max_occurs = match node.attribute("maxOccurs") {
            Some("unbounded") => UNBOUNDED,
            Some(v) => v.parse().unwrap_or_else(|_| {
                tracing::warn!(xpath = path, value = v, "invalid maxOccurs, defaulting to 1");
                1
            }),
            None => 1,
        };

        let type_name = match node.attribute("type") {
            Some(t) => t.to_string(),
            None => self.read_inline_type(node, path, &inline_name_hint(stem, &name))?,
        };

        Ok(Element {
            origin: path.to_string(),
            name,
            type_name,
            min_occurs,
            max_occurs,
        })
    }

    fn read_group(&mut self, _node: Node<'_, '_>, path: &str) -> Result<Group, SchemaError> {
        Err(SchemaError::UnsupportedConstruct {
            construct: "group".to_string(),
            xpath: path.to_string(),
        })
    }

    fn read_any(&mut self, _node: Node<'_, '_>, path: &str) -> Result<Any, SchemaError> {
        Err(SchemaError::UnsupportedConstruct {
            construct: "any".to_string(),
            xpath: path.to_string(),
        })
    }

    fn read_all(&mut self, node: Node<'_, '_>, path: &str, stem: &str) -> Result<All, SchemaError> {
        let mut elements = Vec::new();
        for (i, child_node) in children(node, "element").enumerate() {
            elements.push(self.read_element(child_node, &child_path(path, "element", i), stem)?);
        }
        Ok(All { origin: path.to_string(), elements })
    }

    fn read_particles(&mut self, node: Node<'_, '_>, path: &str, stem: &str) -> Result<Vec<Particle>, SchemaError> {
        let mut particles = Vec::new();
        for (i, n) in children(node, "element").enumerate() {
            particles.push(Particle::Element(self.read_element(n, &child_path(path, "element", i), stem)?));
        }
        for (i, n) in children(node, "group").enumerate() {
            particles.push(Particle::Group(self.read_group(n, &child_path(path, "group", i))?));
        }
        for (i, n) in children(node, "choice").enumerate() {
            particles.push(Particle::Choice(self.read_choice(n, &child_path(path, "choice", i), stem)?));
        }
        for (i, n) in children(node, "sequence").enumerate() {
            particles.push(Particle::Sequence(self.read_sequence(n, &child_path(path, "sequence", i), stem)?));
        }
        for (i, n) in children(node, "any").enumerate() {
            particles.push(Particle::Any(self.read_any(n, &child_path(path, "any", i))?));
        }
        Ok(particles)
    }

    fn read_choice(&mut self, node: Node<'_, '_>, path: &str, stem: &str) -> Result<Choice, SchemaError> {
        Ok(Choice { origin: path.to_string(), elements: self.read_particles(node, path, stem)? })
    }

    fn read_sequence(&mut self, node: Node<'_, '_>, path: &str, stem: &str) -> Result<Sequence, SchemaError> {
        Ok(Sequence { origin: path.to_string(), elements: self.read_particles(node, path, stem)? })
    }

    fn read_extension(&mut self, node: Node<'_, '_>, path: &str, name: &str, draft: &mut ComplexTypeDraft) -> Result<(), SchemaError> {
        draft.base = Some(require_attribute(node, "base", path)?);
        self.read_complex_type_element_configuration(node, path, name, draft)
    }

    fn read_simple_content(&mut self, node: Node<'_, '_>, path: &str, name: &str, draft: &mut ComplexTypeDraft) -> Result<(), SchemaError> {
        if let Some(restriction) = child(node, "restriction") {
            if child(restriction, "enumeration").is_some() {
                let synthetic_name = format!("{}_SimpleContentType", strip_type_suffix(name));
                let (base, values) = self.read_restriction_body(restriction, path)?;
                self.registry.insert(SchemaType::Simple(SimpleType {
                    origin: path.to_string(),
                    name: synthetic_name.clone(),
                    base,
                    restriction_values: values,
                }))?;
                draft.content = ComplexContent::SimpleContent(SimpleContent {
                    origin: path.to_string(),
                    type_name: synthetic_name,
                });
            } else {
                tracing::warn!(xpath = path, "restricted simpleContent is not an enum: {name}");
            }
        } else if let Some(extension) = child(node, "extension") {
            let base = require_attribute(extension, "base", path)?;
            draft.content = ComplexContent::SimpleContent(SimpleContent { origin: path.to_string(), type_name: base });
        }
        Ok(())
    }

    fn read_complex_content(&mut self, node: Node<'_, '_>, path: &str, name: &str, draft: &mut ComplexTypeDraft) -> Result<(), SchemaError> {
        if child(node, "restriction").is_some() {
            Err(SchemaError::UnsupportedConstruct {
                construct: "complexContent restriction".to_string(),
                xpath: path.to_string(),
            })
        } else if let Some(extension) = child(node, "extension") {
            self.read_extension(extension, &format!("{path}/extension"), name, draft)
        } else {
            Ok(())
        }
    }

    fn read_complex_type_element_configuration(
        &mut self,
        node: Node<'_, '_>,
        path: &str,
        name: &str,
        draft: &mut ComplexTypeDraft,
    ) -> Result<(), SchemaError> {
        let stem = strip_type_suffix(name).to_string();

        if let Some(all) = child(node, "all") {
            draft.content = ComplexContent::All(self.read_all(all, &format!("{path}/all"), &stem)?);
        } else if let Some(sequence) = child(node, "sequence") {
            draft.content = ComplexContent::Sequence(self.read_sequence(sequence, &format!("{path}/sequence"), &stem)?);
        } else if let Some(choice) = child(node, "choice") {
            draft.content = ComplexContent::Choice(self.read_choice(choice, &format!("{path}/choice"), &stem)?);
        } else if child(node, "group").is_some() {
            return Err(SchemaError::UnsupportedConstruct { construct: "group".to_string(), xpath: path.to_string() });
        } else if child(node, "any").is_some() {
            return Err(SchemaError::UnsupportedConstruct { construct: "any".to_string(), xpath: path.to_string() });
        }

        if let Some(complex_content) = child(node, "complexContent") {
            self.read_complex_content(complex_content, &format!("{path}/complexContent"), name, draft)?;
        } else if let Some(simple_content) = child(node, "simpleContent") {
            self.read_simple_content(simple_content, &format!("{path}/simpleContent"), name, draft)?;
        }

        Ok(())
    }

    fn read_attribute_set(&mut self, node: Node<'_, '_>, path: &str, stem: &str) -> Result<Vec<Attribute>, SchemaError> {
        let mut attributes = Vec::new();
        let locations: &[&[&str]] = &[
            &[],
            &["complexContent", "restriction"],
            &["complexContent", "extension"],
            &["simpleContent", "restriction"],
            &["simpleContent", "extension"],
        ];
        for chain in locations {
            if let Some(location) = nested(node, chain) {
                for attr_node in children(location, "attribute") {
                    attributes.push(self.read_attribute(attr_node, path, stem)?);
                }
            }
        }
        if child(node, "attributeGroup").is_some() {
            return Err(SchemaError::UnsupportedConstruct {
                construct: "attributeGroup".to_string(),
                xpath: path.to_string(),
            });
        }
        Ok(attributes)
    }

    fn read_complex_type(&mut self, node: Node<'_, '_>, path: &str, name_hint: Option<&str>) -> Result<String, SchemaError> {
        let name = match node.attribute("name") {
            Some(n) => n.to_string(),
            None => generate_unique_type_name(&self.registry, name_hint.expect("inline complex type needs a name hint")),
        };

        if self.registry.contains(&name) {
            return Err(SchemaError::DuplicateType { name, xpath: path.to_string() });
        }

        reject_if_present(node, "id", path)?;
        reject_if_present(node, "abstract", path)?;
        reject_if_present(node, "mixed", path)?;
        reject_if_present(node, "block", path)?;
        reject_if_present(node, "final", path)?;

        let mut draft = ComplexTypeDraft { base: None, content: ComplexContent::None };
        self.read_complex_type_element_configuration(node, path, &name, &mut draft)?;

        let stem = strip_type_suffix(&name).to_string();
        let attributes = self.read_attribute_set(node, path, &stem)?;

        self.registry.insert(SchemaType::Complex(ComplexType {
            origin: path.to_string(),
            name: name.clone(),
            base: draft.base,
            content: draft.content,
            attributes,
        }))?;

        Ok(name)
    }

    fn read_restriction_body(&mut self, node: Node<'_, '_>, path: &str) -> Result<(String, Vec<String>), SchemaError> {
        let base = require_attribute(node, "base", path)?;
        let mut values = Vec::new();
        for (i, enumeration) in children(node, "enumeration").enumerate() {
            let enum_path = child_path(path, "enumeration", i);
            values.push(require_attribute(enumeration, "value", &enum_path)?);
        }

        for facet in node.children().filter(|n| n.is_element() && n.tag_name().name() != "enumeration" && n.tag_name().name() != "annotation") {
            tracing::warn!(xpath = path, facet = facet.tag_name().name(), "ignoring unsupported restriction facet");
        }

        if values.is_empty() {
            tracing::warn!(xpath = path, "restriction has no enumeration values");
        }

        Ok((base, values))
    }

    fn read_simple_type(&mut self, node: Node<'_, '_>, path: &str, name_hint: Option<&str>) -> Result<String, SchemaError> {
        let name = match node.attribute("name") {
            Some(n) => n.to_string(),
            None => generate_unique_type_name(&self.registry, name_hint.expect("inline simple type needs a name hint")),
        };

        if self.registry.contains(&name) {
            return Err(SchemaError::DuplicateType { name, xpath: path.to_string() });
        }

        reject_if_present(node, "id", path)?;

        let (base, restriction_values) = if let Some(restriction) = child(node, "restriction") {
            self.read_restriction_body(restriction, &format!("{path}/restriction"))?
        } else if child(node, "list").is_some() {
            return Err(SchemaError::UnsupportedConstruct { construct: "simpleType list".to_string(), xpath: path.to_string() });
        } else if child(node, "union").is_some() {
            return Err(SchemaError::UnsupportedConstruct { construct: "simpleType union".to_string(), xpath: path.to_string() });
        } else {
            tracing::warn!(xpath = path, "simple type '{name}' has no restriction values; it will not produce an enum");
            (String::new(), Vec::new())
        };

        self.registry.insert(SchemaType::Simple(SimpleType {
            origin: path.to_string(),
            name: name.clone(),
            base,
            restriction_values,
        }))?;

        Ok(name)
    }

    fn read_inline_type(&mut self, node: Node<'_, '_>, path: &str, name_hint: &str) -> Result<String, SchemaError> {
        if let Some(complex_type) = child(node, "complexType") {
            self.read_complex_type(complex_type, &format!("{path}/complexType"), Some(name_hint))
        } else if let Some(simple_type) = child(node, "simpleType") {
            self.read_simple_type(simple_type, &format!("{path}/simpleType"), Some(name_hint))
        } else {
            Err(SchemaError::UnexpectedTypeConstruct { xpath: path.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XSD_HEADER: &str = r#"<?xml version="1.0"?><schema xmlns="http://www.w3.org/2001/XMLSchema">"#;

    #[test]
    fn primitive_only_type() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="PointType">
                <sequence>
                    <element name="x" type="xsd:double"/>
                    <element name="y" type="xsd:double"/>
                    <element name="z" type="xsd:double"/>
                </sequence>
            </complexType>
            </schema>"#
        );
        let registry = parse(&xml).unwrap();
        let ty = registry.get("PointType").unwrap().as_complex().unwrap();
        let ComplexContent::Sequence(seq) = &ty.content else { panic!("expected sequence") };
        assert_eq!(seq.elements.len(), 3);
        for (particle, name) in seq.elements.iter().zip(["x", "y", "z"]) {
            let Particle::Element(e) = particle else { panic!("expected element") };
            assert_eq!(e.name, name);
            assert_eq!(e.min_occurs, 1);
            assert_eq!(e.max_occurs, 1);
        }
    }

    #[test]
    fn optional_attribute_with_default() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="Header">
                <sequence>
                    <element name="name" type="xsd:string"/>
                </sequence>
                <attribute name="version" type="xsd:string" use="optional" default="1.0"/>
            </complexType>
            </schema>"#
        );
        let registry = parse(&xml).unwrap();
        let ty = registry.get("Header").unwrap().as_complex().unwrap();
        let attr = &ty.attributes[0];
        assert_eq!(attr.name, "version");
        assert!(attr.optional);
        assert_eq!(attr.default_value.as_deref(), Some("1.0"));
    }

    #[test]
    fn vector_with_unbounded_max_occurs() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="WingsType">
                <sequence>
                    <element name="wing" type="WingType" minOccurs="0" maxOccurs="unbounded"/>
                </sequence>
            </complexType>
            </schema>"#
        );
        let registry = parse(&xml).unwrap();
        let ty = registry.get("WingsType").unwrap().as_complex().unwrap();
        let ComplexContent::Sequence(seq) = &ty.content else { panic!("expected sequence") };
        let Particle::Element(e) = &seq.elements[0] else { panic!("expected element") };
        assert_eq!(e.max_occurs, UNBOUNDED);
        assert_eq!(e.min_occurs, 0);
    }

    #[test]
    fn choice_with_two_branches() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="EitherType">
                <choice>
                    <element name="a" type="xsd:double"/>
                    <element name="b" type="xsd:double"/>
                </choice>
            </complexType>
            </schema>"#
        );
        let registry = parse(&xml).unwrap();
        let ty = registry.get("EitherType").unwrap().as_complex().unwrap();
        let ComplexContent::Choice(choice) = &ty.content else { panic!("expected choice") };
        assert_eq!(choice.elements.len(), 2);
    }

    #[test]
    fn enumeration_with_non_identifier_spellings() {
        let xml = format!(
            r#"{XSD_HEADER}
            <simpleType name="SymmetryAxis">
                <restriction base="xsd:string">
                    <enumeration value="x-y-plane"/>
                    <enumeration value="x-z-plane"/>
                    <enumeration value="none"/>
                </restriction>
            </simpleType>
            </schema>"#
        );
        let registry = parse(&xml).unwrap();
        let ty = registry.get("SymmetryAxis").unwrap().as_simple().unwrap();
        assert_eq!(ty.restriction_values, vec!["x-y-plane", "x-z-plane", "none"]);
    }

    #[test]
    fn inline_type_naming_is_pure_function_of_registry() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="OuterType">
                <sequence>
                    <element name="inner">
                        <complexType>
                            <sequence>
                                <element name="value" type="xsd:double"/>
                            </sequence>
                        </complexType>
                    </element>
                </sequence>
            </complexType>
            </schema>"#
        );
        let registry = parse(&xml).unwrap();
        assert!(registry.contains("Outer_innerType"));
    }

    #[test]
    fn duplicate_type_name_is_rejected() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="DupType"><sequence/></complexType>
            <complexType name="DupType"><sequence/></complexType>
            </schema>"#
        );
        assert!(matches!(parse(&xml), Err(SchemaError::DuplicateType { .. })));
    }

    #[test]
    fn group_construct_is_rejected() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="HasGroupType">
                <group ref="SomeGroup"/>
            </complexType>
            </schema>"#
        );
        assert!(matches!(parse(&xml), Err(SchemaError::UnsupportedConstruct { .. })));
    }

    #[test]
    fn invalid_use_value_is_a_hard_error() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="BadUseType">
                <attribute name="a" type="xsd:string" use="sometimes"/>
            </complexType>
            </schema>"#
        );
        assert!(matches!(parse(&xml), Err(SchemaError::InvalidUseValue { .. })));
    }

    #[test]
    fn simple_content_enumeration_synthesizes_simple_type() {
        let xml = format!(
            r#"{XSD_HEADER}
            <complexType name="UnitType">
                <simpleContent>
                    <restriction base="xsd:string">
                        <enumeration value="m"/>
                        <enumeration value="ft"/>
                    </restriction>
                </simpleContent>
            </complexType>
            </schema>"#
        );
        let registry = parse(&xml).unwrap();
        assert!(registry.contains("Unit_SimpleContentType"));
        let ty = registry.get("UnitType").unwrap().as_complex().unwrap();
        assert!(matches!(ty.content, ComplexContent::SimpleContent(_)));
    }

    #[test]
    fn non_schema_root_is_rejected() {
        let xml = r#"<?xml version="1.0"?><cpacs><wings/></cpacs>"#;
        assert!(matches!(parse(xml), Err(SchemaError::MissingSchemaRoot)));
    }
}
