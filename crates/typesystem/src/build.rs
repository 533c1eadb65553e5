use cpacsgen_schema::{Choice, ComplexContent, ComplexType, Element, Particle, SchemaRegistry};
use cpacsgen_tables::Tables;

use crate::error::ModelError;
use crate::model::{Cardinality, Field, FieldOrigin, XmlConstruct};
use crate::naming::make_class_name;

/// Resolves a referenced schema name to its emitted name: registry hit first
/// (substituted if a `TypeSubstitution` entry exists, otherwise class-named),
/// then a bare `TypeSubstitution` hit, otherwise an error.
pub fn resolve_type(registry: &SchemaRegistry, name: &str, tables: &Tables) -> Result<String, ModelError> {
    if registry.contains(name) {
        if let Some(substituted) = tables.type_substitutions.find(name) {
            return Ok(substituted.to_string());
        }
        return Ok(make_class_name(name));
    }

    if let Some(substituted) = tables.type_substitutions.find(name) {
        return Ok(substituted.to_string());
    }

    Err(ModelError::UnknownType(name.to_string()))
}

pub fn build_field_list(registry: &SchemaRegistry, ty: &ComplexType, tables: &Tables) -> Result<Vec<Field>, ModelError> {
    let mut fields = Vec::new();

    for attribute in &ty.attributes {
        let type_name = resolve_type(registry, &attribute.type_name, tables)?;
        let cardinality = if attribute.optional { Cardinality::Optional } else { Cardinality::Mandatory };
        fields.push(Field {
            origin: FieldOrigin::Attribute(attribute.clone()),
            cpacs_name: attribute.name.clone(),
            type_name,
            xml_construct: XmlConstruct::Attribute,
            cardinality,
            explicit_name: None,
        });
    }

    match &ty.content {
        ComplexContent::None => {}
        ComplexContent::Group(_) => return Err(ModelError::UnsupportedParticle("group")),
        ComplexContent::All(all) => {
            for element in &all.elements {
                if let Some(field) = build_element_field(registry, element, tables)? {
                    fields.push(field);
                }
            }
        }
        ComplexContent::Sequence(sequence) => {
            build_particles_into(registry, &sequence.elements, tables, &mut fields)?;
        }
        ComplexContent::Choice(choice) => {
            fields.extend(build_choice_fields(registry, choice, tables)?);
        }
        ComplexContent::SimpleContent(simple_content) => {
            let type_name = resolve_type(registry, &simple_content.type_name, tables)?;
            fields.push(Field {
                origin: FieldOrigin::SimpleContent(simple_content.clone()),
                cpacs_name: String::new(),
                type_name,
                xml_construct: XmlConstruct::SimpleContent,
                cardinality: Cardinality::Mandatory,
                explicit_name: Some("simpleContent".to_string()),
            });
        }
    }

    Ok(fields)
}

fn build_element_field(registry: &SchemaRegistry, element: &Element, tables: &Tables) -> Result<Option<Field>, ModelError> {
    let cardinality = match (element.min_occurs, element.max_occurs) {
        (0, 1) => Cardinality::Optional,
        (1, 1) => Cardinality::Mandatory,
        (0, 0) => {
            tracing::warn!(
                element = %element.name,
                type_name = %element.type_name,
                "element omitted because minOccurs and maxOccurs are both zero"
            );
            return Ok(None);
        }
        (_, max) if max > 1 => Cardinality::Vector,
        (min, max) => return Err(ModelError::InvalidCardinality { min, max }),
    };

    let type_name = resolve_type(registry, &element.type_name, tables)?;
    Ok(Some(Field {
        origin: FieldOrigin::Element(element.clone()),
        cpacs_name: element.name.clone(),
        type_name,
        xml_construct: XmlConstruct::Element,
        cardinality,
        explicit_name: None,
    }))
}

fn build_particles_into(
    registry: &SchemaRegistry,
    particles: &[Particle],
    tables: &Tables,
    out: &mut Vec<Field>,
) -> Result<(), ModelError> {
    for particle in particles {
        match particle {
            Particle::Element(element) => {
                if let Some(field) = build_element_field(registry, element, tables)? {
                    out.push(field);
                }
            }
            Particle::Sequence(sequence) => build_particles_into(registry, &sequence.elements, tables, out)?,
            Particle::Choice(choice) => out.extend(build_choice_fields(registry, choice, tables)?),
            Particle::Group(_) => return Err(ModelError::UnsupportedParticle("group")),
            Particle::Any(_) => return Err(ModelError::UnsupportedParticle("any")),
        }
    }
    Ok(())
}

fn build_choice_fields(registry: &SchemaRegistry, choice: &Choice, tables: &Tables) -> Result<Vec<Field>, ModelError> {
    let mut all_choice_members = Vec::new();

    for (i, particle) in choice.elements.iter().enumerate() {
        let branch_index = i + 1;
        let mut branch_fields = Vec::new();
        match particle {
            Particle::Element(element) => {
                if let Some(field) = build_element_field(registry, element, tables)? {
                    branch_fields.push(field);
                }
            }
            Particle::Sequence(sequence) => build_particles_into(registry, &sequence.elements, tables, &mut branch_fields)?,
            Particle::Choice(nested) => branch_fields.extend(build_choice_fields(registry, nested, tables)?),
            Particle::Group(_) => return Err(ModelError::UnsupportedParticle("group")),
            Particle::Any(_) => return Err(ModelError::UnsupportedParticle("any")),
        }

        for field in &mut branch_fields {
            if field.cardinality == Cardinality::Mandatory {
                field.cardinality = Cardinality::Optional;
            }
            field.explicit_name = Some(format!("{}_choice{}", field.cpacs_name, branch_index));
        }
        all_choice_members.extend(branch_fields);
    }

    for i in 0..all_choice_members.len() {
        for j in (i + 1)..all_choice_members.len() {
            let f1 = &all_choice_members[i];
            let f2 = &all_choice_members[j];
            if f1.cpacs_name == f2.cpacs_name
                && !f1.cpacs_name.is_empty()
                && (f1.cardinality != f2.cardinality || f1.type_name != f2.type_name)
            {
                tracing::warn!(
                    "elements with same name but different cardinality or type inside choice: \
                     {} ({} {}) vs ({} {})",
                    f1.cpacs_name,
                    f1.cardinality,
                    f1.type_name,
                    f2.cardinality,
                    f2.type_name
                );
            }
        }
    }

    Ok(all_choice_members)
}
