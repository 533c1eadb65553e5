use std::collections::{HashMap, HashSet, VecDeque};

use cpacsgen_schema::{SchemaRegistry, SchemaType};
use cpacsgen_tables::Tables;

use crate::build::{build_field_list, resolve_type};
use crate::error::ModelError;
use crate::model::{Class, ClassDependencies, Enum, EnumDependencies, EnumValue, Field, FieldOrigin, XmlConstruct, Cardinality};
use crate::naming::{make_class_name, strip_trailing_digits};

/// The lowered, emittable model: every non-excluded schema type turned into a
/// [`Class`] or [`Enum`], read-only from CodeGen's point of view.
#[derive(Debug, Clone, Default)]
pub struct TypeSystem {
    pub classes: HashMap<String, Class>,
    pub enums: HashMap<String, Enum>,
}

impl TypeSystem {
    /// Lowers every schema type, then builds the initial dependency graph.
    pub fn build(registry: &SchemaRegistry, tables: &Tables) -> Result<TypeSystem, ModelError> {
        let mut classes = HashMap::new();
        let mut enums = HashMap::new();

        for (_, ty) in registry.iter() {
            match ty {
                SchemaType::Complex(complex) => {
                    let class = build_class(registry, complex, tables)?;
                    classes.insert(class.name.clone(), class);
                }
                SchemaType::Simple(simple) => {
                    if simple.restriction_values.is_empty() {
                        tracing::warn!(
                            name = %simple.name,
                            "simple type has no enumeration values and will not produce an enum"
                        );
                        continue;
                    }
                    let name = make_class_name(&simple.name);
                    let values = simple
                        .restriction_values
                        .iter()
                        .map(|v| EnumValue { spelling: v.clone() })
                        .collect();
                    enums.insert(
                        name.clone(),
                        Enum {
                            origin: simple.clone(),
                            name,
                            values,
                            pruned: false,
                            dependencies: EnumDependencies::default(),
                        },
                    );
                }
            }
        }

        let mut type_system = TypeSystem { classes, enums };
        type_system.check_type_closure(tables)?;
        type_system.build_dependencies();
        Ok(type_system)
    }

    fn check_type_closure(&self, tables: &Tables) -> Result<(), ModelError> {
        for class in self.classes.values() {
            if let Some(base) = &class.base {
                self.assert_resolves(&class.name, base, tables)?;
            }
            for field in &class.fields {
                self.assert_resolves(&class.name, &field.type_name, tables)?;
            }
        }
        Ok(())
    }

    fn assert_resolves(&self, owner: &str, type_name: &str, tables: &Tables) -> Result<(), ModelError> {
        if self.classes.contains_key(type_name) || self.enums.contains_key(type_name) || tables.fundamental_types.contains(type_name) {
            Ok(())
        } else {
            Err(ModelError::UnresolvedFieldType {
                owner: owner.to_string(),
                type_name: type_name.to_string(),
            })
        }
    }

    /// Rebuilds all dependency edges wholesale from the current classes/enums.
    pub fn build_dependencies(&mut self) {
        for class in self.classes.values_mut() {
            class.dependencies = ClassDependencies::default();
        }
        for e in self.enums.values_mut() {
            e.dependencies = EnumDependencies::default();
        }

        let names: Vec<String> = self.classes.keys().cloned().collect();

        for name in &names {
            let base = self.classes[name].base.clone();
            if let Some(base_name) = base {
                if self.classes.contains_key(&base_name) {
                    self.classes.get_mut(&base_name).unwrap().dependencies.deriveds.push(name.clone());
                    self.classes.get_mut(name).unwrap().dependencies.bases.push(base_name);
                }
            }
        }

        for name in &names {
            let field_types: Vec<String> = self.classes[name].fields.iter().map(|f| f.type_name.clone()).collect();
            for type_name in field_types {
                if self.enums.contains_key(&type_name) {
                    self.classes.get_mut(name).unwrap().dependencies.child_enums.push(type_name.clone());
                    self.enums.get_mut(&type_name).unwrap().dependencies.parent_classes.push(name.clone());
                } else if self.classes.contains_key(&type_name) {
                    self.classes.get_mut(name).unwrap().dependencies.child_classes.push(type_name.clone());
                    self.classes.get_mut(&type_name).unwrap().dependencies.parent_classes.push(name.clone());
                }
            }
        }

        for class in self.classes.values_mut() {
            sort_dedup(&mut class.dependencies.bases);
            sort_dedup(&mut class.dependencies.deriveds);
            sort_dedup(&mut class.dependencies.child_classes);
            sort_dedup(&mut class.dependencies.child_enums);
            sort_dedup(&mut class.dependencies.parent_classes);
        }
        for e in self.enums.values_mut() {
            sort_dedup(&mut e.dependencies.parent_classes);
        }
    }

    /// Merges structurally-identical enums (same ordered value spellings,
    /// names equal modulo a trailing numeric suffix) until no pair remains.
    pub fn collapse_enums(&mut self) {
        loop {
            let mut groups: HashMap<(String, Vec<String>), Vec<String>> = HashMap::new();
            for (name, e) in &self.enums {
                let key = (
                    strip_trailing_digits(name),
                    e.values.iter().map(|v| v.spelling.clone()).collect::<Vec<_>>(),
                );
                groups.entry(key).or_default().push(name.clone());
            }

            let mut survivors_and_losers = Vec::new();
            for mut names in groups.into_values() {
                if names.len() < 2 {
                    continue;
                }
                names.sort();
                let survivor = names.remove(0);
                for loser in names {
                    survivors_and_losers.push((survivor.clone(), loser));
                }
            }

            if survivors_and_losers.is_empty() {
                break;
            }

            for (survivor, loser) in survivors_and_losers {
                self.enums.remove(&loser);
                for class in self.classes.values_mut() {
                    for field in &mut class.fields {
                        if field.type_name == loser {
                            field.type_name = survivor.clone();
                        }
                    }
                }
            }
        }

        self.build_dependencies();
    }

    /// Flips `pruned` on every name in `tables.prune_list` present as a class
    /// or enum, then cascades to every class/enum whose parents are now all
    /// pruned (i.e. reachable only through the pruned subtree).
    pub fn run_prune_list(&mut self, tables: &Tables) {
        let mut queue: VecDeque<String> = tables
            .prune_list
            .iter()
            .filter(|name| self.classes.contains_key(*name) || self.enums.contains_key(*name))
            .map(String::from)
            .collect();
        let mut queued: HashSet<String> = queue.iter().cloned().collect();

        while let Some(name) = queue.pop_front() {
            if let Some(class) = self.classes.get_mut(&name) {
                if class.pruned {
                    continue;
                }
                class.pruned = true;
                let child_classes = class.dependencies.child_classes.clone();
                let child_enums = class.dependencies.child_enums.clone();

                for child_name in child_classes {
                    if self.class_reachable_only_through_pruned(&child_name) && queued.insert(child_name.clone()) {
                        queue.push_back(child_name);
                    }
                }
                for enum_name in child_enums {
                    if self.enum_reachable_only_through_pruned(&enum_name) && queued.insert(enum_name.clone()) {
                        queue.push_back(enum_name);
                    }
                }
            } else if let Some(e) = self.enums.get_mut(&name) {
                e.pruned = true;
            }
        }

        self.build_dependencies();
    }

    fn class_reachable_only_through_pruned(&self, name: &str) -> bool {
        match self.classes.get(name) {
            Some(class) => class
                .dependencies
                .parent_classes
                .iter()
                .all(|p| self.classes.get(p).map(|pc| pc.pruned).unwrap_or(true)),
            None => false,
        }
    }

    fn enum_reachable_only_through_pruned(&self, name: &str) -> bool {
        match self.enums.get(name) {
            Some(e) => e
                .dependencies
                .parent_classes
                .iter()
                .all(|p| self.classes.get(p).map(|pc| pc.pruned).unwrap_or(true)),
            None => false,
        }
    }
}

fn sort_dedup(v: &mut Vec<String>) {
    v.sort();
    v.dedup();
}

fn build_class(registry: &SchemaRegistry, ty: &cpacsgen_schema::ComplexType, tables: &Tables) -> Result<Class, ModelError> {
    let name = make_class_name(&ty.name);
    let mut fields = build_field_list(registry, ty, tables)?;

    let mut base = None;
    if let Some(base_name) = &ty.base {
        let resolved_base = resolve_type(registry, base_name, tables)?;
        if tables.fundamental_types.contains(&resolved_base) {
            fields.insert(
                0,
                Field {
                    origin: FieldOrigin::Synthetic,
                    cpacs_name: String::new(),
                    type_name: resolved_base,
                    xml_construct: XmlConstruct::FundamentalTypeBase,
                    cardinality: Cardinality::Mandatory,
                    explicit_name: Some("base".to_string()),
                },
            );
        } else {
            base = Some(resolved_base);
        }
    }

    Ok(Class {
        origin: ty.clone(),
        name,
        base,
        fields,
        pruned: false,
        dependencies: ClassDependencies::default(),
    })
}
