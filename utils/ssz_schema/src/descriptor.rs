//! Declarative container definitions with symbolic bounds.
//!
//! A [`ContainerDescriptor`] names its nested containers and maximum lengths instead of holding
//! them. [`build_schema`] resolves both through a [`SchemaContext`], which is how the same
//! definition yields different schemas under different presets and forks.

use core::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::error::SchemaError;
use crate::schema::{Field, Schema, Shape};

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Bound {
    Fixed(usize),
    Named(&'static str),
}

impl From<usize> for Bound {
    fn from(length: usize) -> Self {
        Bound::Fixed(length)
    }
}

impl From<&'static str> for Bound {
    fn from(name: &'static str) -> Self {
        Bound::Named(name)
    }
}

impl Display for Bound {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        match self {
            Bound::Fixed(length) => write!(formatter, "{}", length),
            Bound::Named(name) => write!(formatter, "{}", name),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum ShapeDescriptor {
    Boolean,
    Uint(usize),
    ByteVector(Bound),
    ByteList(Bound),
    Bitvector(Bound),
    Bitlist(Bound),
    Vector(Box<ShapeDescriptor>, Bound),
    List(Box<ShapeDescriptor>, Bound),
    Container(String),
}

impl ShapeDescriptor {
    pub fn vector(element: ShapeDescriptor, length: impl Into<Bound>) -> Self {
        ShapeDescriptor::Vector(Box::new(element), length.into())
    }

    pub fn list(element: ShapeDescriptor, max_length: impl Into<Bound>) -> Self {
        ShapeDescriptor::List(Box::new(element), max_length.into())
    }

    pub fn container(name: impl Into<String>) -> Self {
        ShapeDescriptor::Container(name.into())
    }

    fn collect_containers<'d>(&'d self, names: &mut Vec<&'d str>) {
        match self {
            ShapeDescriptor::Vector(element, _) | ShapeDescriptor::List(element, _) => {
                element.collect_containers(names)
            }
            ShapeDescriptor::Container(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str())
                }
            }
            _ => {}
        }
    }
}

/// Supplies the values named by descriptors.
pub trait SchemaContext {
    fn resolve_bound(&self, name: &str) -> Option<usize>;

    fn resolve_container(&self, name: &str) -> Option<Arc<Schema>>;
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ContainerDescriptor {
    name: String,
    fields: Vec<(String, ShapeDescriptor)>,
}

impl ContainerDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: vec![],
        }
    }

    /// Appends a field while declaring a container from scratch.
    /// Duplicates are reported when the schema is built.
    pub fn field(mut self, name: impl Into<String>, shape: ShapeDescriptor) -> Self {
        self.fields.push((name.into(), shape));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &ShapeDescriptor)> {
        self.fields.iter().map(|(name, shape)| (name.as_str(), shape))
    }

    pub fn shape_of(&self, field: &str) -> Option<&ShapeDescriptor> {
        self.position(field).map(|index| &self.fields[index].1)
    }

    fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|(name, _)| name == field)
    }

    fn unknown_field(&self, field: &str) -> SchemaError {
        SchemaError::UnknownField {
            container: self.name.clone(),
            field: field.to_owned(),
        }
    }

    /// Appends a field to an inherited definition.
    pub fn add(mut self, name: impl Into<String>, shape: ShapeDescriptor) -> Result<Self, SchemaError> {
        let name = name.into();
        if self.position(&name).is_some() {
            return Err(SchemaError::DuplicateField {
                container: self.name,
                field: name,
            });
        }
        self.fields.push((name, shape));
        Ok(self)
    }

    pub fn remove(mut self, name: &str) -> Result<Self, SchemaError> {
        let index = self.position(name).ok_or_else(|| self.unknown_field(name))?;
        self.fields.remove(index);
        Ok(self)
    }

    /// Replaces the shape of a field, keeping its name and position.
    pub fn retype(mut self, name: &str, shape: ShapeDescriptor) -> Result<Self, SchemaError> {
        let index = self.position(name).ok_or_else(|| self.unknown_field(name))?;
        self.fields[index].1 = shape;
        Ok(self)
    }

    /// Like [`retype`](Self::retype), but the field also takes a new name.
    pub fn replace(
        mut self,
        name: &str,
        new_name: impl Into<String>,
        shape: ShapeDescriptor,
    ) -> Result<Self, SchemaError> {
        let index = self.position(name).ok_or_else(|| self.unknown_field(name))?;
        let new_name = new_name.into();
        if self.position(&new_name).map_or(false, |other| other != index) {
            return Err(SchemaError::DuplicateField {
                container: self.name,
                field: new_name,
            });
        }
        self.fields[index] = (new_name, shape);
        Ok(self)
    }

    /// Names of the containers this one embeds, in field order, without repeats.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut names = vec![];
        for (_, shape) in &self.fields {
            shape.collect_containers(&mut names);
        }
        names
    }

    fn resolve(
        &self,
        field: &str,
        shape: &ShapeDescriptor,
        context: &impl SchemaContext,
    ) -> Result<Shape, SchemaError> {
        let bound = |bound: &Bound| match bound {
            Bound::Fixed(length) => Ok(*length),
            Bound::Named(name) => {
                context
                    .resolve_bound(name)
                    .ok_or_else(|| SchemaError::UnresolvedBound {
                        container: self.name.clone(),
                        field: field.to_owned(),
                        bound: (*name).to_owned(),
                    })
            }
        };

        let resolved = match shape {
            ShapeDescriptor::Boolean => Shape::Boolean,
            ShapeDescriptor::Uint(width) => Shape::Uint(*width),
            ShapeDescriptor::ByteVector(length) => Shape::ByteVector(bound(length)?),
            ShapeDescriptor::ByteList(max) => Shape::ByteList(bound(max)?),
            ShapeDescriptor::Bitvector(length) => Shape::Bitvector(bound(length)?),
            ShapeDescriptor::Bitlist(max) => Shape::Bitlist(bound(max)?),
            ShapeDescriptor::Vector(element, length) => {
                Shape::vector(self.resolve(field, element, context)?, bound(length)?)
            }
            ShapeDescriptor::List(element, max) => {
                Shape::list(self.resolve(field, element, context)?, bound(max)?)
            }
            ShapeDescriptor::Container(name) => context
                .resolve_container(name)
                .map(Shape::Container)
                .ok_or_else(|| SchemaError::UnresolvedContainer {
                    container: self.name.clone(),
                    field: field.to_owned(),
                    referenced: name.clone(),
                })?,
        };

        Ok(resolved)
    }
}

pub fn build_schema(
    descriptor: &ContainerDescriptor,
    context: &impl SchemaContext,
) -> Result<Schema, SchemaError> {
    let mut fields = Vec::with_capacity(descriptor.fields.len());
    for (name, shape) in &descriptor.fields {
        fields.push(Field::new(
            name.clone(),
            descriptor.resolve(name, shape, context)?,
        ));
    }
    Schema::new(descriptor.name.clone(), fields)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct Context {
        bounds: HashMap<&'static str, usize>,
        containers: HashMap<String, Arc<Schema>>,
    }

    impl SchemaContext for Context {
        fn resolve_bound(&self, name: &str) -> Option<usize> {
            self.bounds.get(name).copied()
        }

        fn resolve_container(&self, name: &str) -> Option<Arc<Schema>> {
            self.containers.get(name).cloned()
        }
    }

    fn checkpoint() -> ContainerDescriptor {
        ContainerDescriptor::new("Checkpoint")
            .field("epoch", ShapeDescriptor::Uint(8))
            .field("root", ShapeDescriptor::ByteVector(Bound::Fixed(32)))
    }

    fn body() -> ContainerDescriptor {
        ContainerDescriptor::new("Body")
            .field(
                "checkpoints",
                ShapeDescriptor::list(ShapeDescriptor::container("Checkpoint"), "MAX_CHECKPOINTS"),
            )
            .field("graffiti", ShapeDescriptor::ByteVector(Bound::Fixed(32)))
            .field("source", ShapeDescriptor::container("Checkpoint"))
    }

    fn context() -> Context {
        let mut context = Context::default();
        context.bounds.insert("MAX_CHECKPOINTS", 16);
        let checkpoint = build_schema(&checkpoint(), &context).expect("Test");
        context
            .containers
            .insert("Checkpoint".to_owned(), Arc::new(checkpoint));
        context
    }

    #[test]
    fn resolves_bounds_and_containers() {
        let context = context();
        let schema = build_schema(&body(), &context).expect("Test");

        let checkpoint = context.containers["Checkpoint"].clone();
        assert_eq!(
            schema.fields(),
            &[
                Field::new("checkpoints", Shape::list(Shape::Container(checkpoint.clone()), 16)),
                Field::new("graffiti", Shape::ByteVector(32)),
                Field::new("source", Shape::Container(checkpoint)),
            ][..]
        );
        assert_eq!(body().dependencies(), vec!["Checkpoint"]);
    }

    #[test]
    fn unresolved_bound() {
        let mut context = context();
        context.bounds.clear();

        assert_eq!(
            build_schema(&body(), &context),
            Err(SchemaError::UnresolvedBound {
                container: "Body".to_owned(),
                field: "checkpoints".to_owned(),
                bound: "MAX_CHECKPOINTS".to_owned(),
            })
        );
    }

    #[test]
    fn unresolved_container() {
        let mut context = context();
        context.containers.clear();

        assert!(matches!(
            build_schema(&body(), &context),
            Err(SchemaError::UnresolvedContainer { .. })
        ));
    }

    #[test]
    fn composition() {
        let derived = body()
            .retype("graffiti", ShapeDescriptor::ByteList(Bound::Fixed(64)))
            .and_then(|descriptor| descriptor.remove("source"))
            .and_then(|descriptor| descriptor.add("flag", ShapeDescriptor::Boolean))
            .expect("Test");

        let names: Vec<&str> = derived.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["checkpoints", "graffiti", "flag"]);
        assert_eq!(
            derived.shape_of("graffiti"),
            Some(&ShapeDescriptor::ByteList(Bound::Fixed(64)))
        );
        assert!(build_schema(&derived, &context()).is_ok());
    }

    #[test]
    fn composition_errors() {
        assert!(matches!(
            body().remove("missing"),
            Err(SchemaError::UnknownField { .. })
        ));
        assert!(matches!(
            body().retype("missing", ShapeDescriptor::Boolean),
            Err(SchemaError::UnknownField { .. })
        ));
        assert!(matches!(
            body().add("source", ShapeDescriptor::Boolean),
            Err(SchemaError::DuplicateField { .. })
        ));
        assert!(matches!(
            body().replace("graffiti", "source", ShapeDescriptor::Boolean),
            Err(SchemaError::DuplicateField { .. })
        ));
    }

    #[test]
    fn replace_keeps_position() {
        let derived = body()
            .replace("graffiti", "flags", ShapeDescriptor::Bitvector(Bound::Fixed(4)))
            .expect("Test");

        let names: Vec<&str> = derived.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["checkpoints", "flags", "source"]);
        assert_eq!(derived.shape_of("graffiti"), None);
    }

    #[test]
    fn duplicate_declared_field() {
        let descriptor = checkpoint().field("epoch", ShapeDescriptor::Uint(8));
        assert!(matches!(
            build_schema(&descriptor, &context()),
            Err(SchemaError::DuplicateField { .. })
        ));
    }
}
