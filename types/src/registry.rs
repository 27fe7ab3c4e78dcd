//! Per-fork codecs for every record.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, info};
use ssz_schema::{
    build_schema, deserialize, from_json, hash_tree_root, serialize, to_json, validate,
    ContainerDescriptor, DecodeError, EncodeError, JsonError, Schema, SchemaError, Value, H256,
};
use thiserror::Error;

use crate::bounds::ForkContext;
use crate::config::{Config, PresetName};
use crate::containers::Definitions;
use crate::forks::ForkName;

#[derive(PartialEq, Eq, Debug, Error)]
pub enum RegistryError {
    #[error("failed to build {fork} records")]
    Schema {
        fork: ForkName,
        #[source]
        source: SchemaError,
    },
    #[error("record {name} is not defined at {fork}")]
    UnknownRecord { fork: ForkName, name: String },
    #[error("records at {fork} contain each other: {}", cycle.join(" -> "))]
    CyclicDefinition { fork: ForkName, cycle: Vec<String> },
}

/// Codec of a single record at a single fork.
#[derive(PartialEq, Eq, Debug)]
pub struct Codec {
    schema: Arc<Schema>,
}

impl Codec {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    pub fn name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn default_value(&self) -> Value {
        self.schema.default_value()
    }

    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        serialize(value, &self.schema)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Value, DecodeError> {
        deserialize(bytes, &self.schema).map_err(|error| {
            debug!("rejected {} bytes as {}: {}", bytes.len(), self.name(), error);
            error
        })
    }

    /// Unlike [`ssz_schema::hash_tree_root`], values that do not fit the schema are an error.
    pub fn hash_tree_root(&self, value: &Value) -> Result<H256, EncodeError> {
        validate(value, &self.schema)?;
        Ok(hash_tree_root(value, &self.schema))
    }

    pub fn to_json(&self, value: &Value) -> Result<serde_json::Value, EncodeError> {
        to_json(value, &self.schema)
    }

    pub fn from_json(&self, json: &serde_json::Value) -> Result<Value, JsonError> {
        from_json(json, &self.schema)
    }
}

type Codecs = BTreeMap<String, Arc<Codec>>;

/// Codecs of every record at every fork, built for one preset.
#[derive(Debug)]
pub struct TypeRegistry {
    preset: PresetName,
    forks: BTreeMap<ForkName, Codecs>,
}

impl TypeRegistry {
    pub fn build<C: Config>() -> Result<Self, RegistryError> {
        RegistryBuilder::new().build::<C>()
    }

    pub fn preset(&self) -> PresetName {
        self.preset
    }

    pub fn codec(&self, fork: ForkName, name: &str) -> Result<&Arc<Codec>, RegistryError> {
        self.forks
            .get(&fork)
            .and_then(|codecs| codecs.get(name))
            .ok_or_else(|| RegistryError::UnknownRecord {
                fork,
                name: name.to_owned(),
            })
    }

    /// Record names defined at `fork`, sorted.
    pub fn records(&self, fork: ForkName) -> impl Iterator<Item = &str> {
        self.forks
            .get(&fork)
            .into_iter()
            .flat_map(|codecs| codecs.keys().map(String::as_str))
    }
}

#[derive(Default, Debug)]
pub struct RegistryBuilder {
    required: Vec<(ForkName, String)>,
    extra: Vec<(ForkName, ContainerDescriptor)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `build` fail unless `name` is defined at `fork`.
    pub fn require(mut self, fork: ForkName, name: impl Into<String>) -> Self {
        self.required.push((fork, name.into()));
        self
    }

    /// Adds or redefines a record from `fork` on.
    pub fn define(mut self, fork: ForkName, descriptor: ContainerDescriptor) -> Self {
        self.extra.push((fork, descriptor));
        self
    }

    pub fn build<C: Config>(self) -> Result<TypeRegistry, RegistryError> {
        let mut forks = BTreeMap::<ForkName, Codecs>::new();
        let mut definitions: Option<Definitions> = None;

        for fork in ForkName::ALL.iter().copied() {
            let mut current = match definitions.take() {
                None => Definitions::for_fork(fork)?,
                Some(previous) => previous.upgrade(fork)?,
            };

            for (_, descriptor) in self.extra.iter().filter(|(from, _)| *from == fork) {
                current.insert(descriptor.clone());
            }

            let parent = fork.parent().and_then(|parent| forks.get(&parent));
            let codecs = ForkBuilder::<C>::new(&current, parent).build_all()?;

            let shared = codecs
                .iter()
                .filter(|(name, codec)| {
                    parent
                        .and_then(|parent| parent.get(name.as_str()))
                        .map_or(false, |previous| Arc::ptr_eq(previous, *codec))
                })
                .count();
            info!(
                "built {} {} records, {} shared with the previous fork",
                codecs.len(),
                fork,
                shared,
            );

            forks.insert(fork, codecs);
            definitions = Some(current);
        }

        let registry = TypeRegistry {
            preset: C::PRESET,
            forks,
        };

        for (fork, name) in &self.required {
            registry.codec(*fork, name)?;
        }

        Ok(registry)
    }
}

struct ForkBuilder<'a, C> {
    definitions: &'a Definitions,
    parent: Option<&'a Codecs>,
    built: HashMap<String, Arc<Schema>>,
    codecs: Codecs,
    in_progress: Vec<String>,
    config: core::marker::PhantomData<C>,
}

impl<'a, C: Config> ForkBuilder<'a, C> {
    fn new(definitions: &'a Definitions, parent: Option<&'a Codecs>) -> Self {
        Self {
            definitions,
            parent,
            built: HashMap::new(),
            codecs: Codecs::new(),
            in_progress: vec![],
            config: core::marker::PhantomData,
        }
    }

    fn build_all(mut self) -> Result<Codecs, RegistryError> {
        let definitions = self.definitions;
        for descriptor in definitions.iter() {
            self.build_record(descriptor)?;
        }
        Ok(self.codecs)
    }

    fn build_record(&mut self, descriptor: &'a ContainerDescriptor) -> Result<(), RegistryError> {
        let fork = self.definitions.fork();
        let name = descriptor.name();

        if self.built.contains_key(name) {
            return Ok(());
        }

        if let Some(start) = self.in_progress.iter().position(|other| other == name) {
            let mut cycle = self.in_progress[start..].to_vec();
            cycle.push(name.to_owned());
            return Err(RegistryError::CyclicDefinition { fork, cycle });
        }

        // Dependencies that are not defined at all are reported by `build_schema`.
        self.in_progress.push(name.to_owned());
        let definitions = self.definitions;
        for dependency in descriptor.dependencies() {
            if let Some(dependency) = definitions.get(dependency) {
                self.build_record(dependency)?;
            }
        }
        self.in_progress.pop();

        let schema = build_schema(descriptor, &ForkContext::<C>::new(fork, &self.built))
            .map_err(|source| RegistryError::Schema { fork, source })?;

        let codec = match self.parent.and_then(|parent| parent.get(name)) {
            Some(previous) if **previous.schema() == schema => {
                debug!("{} is unchanged at {}", name, fork);
                previous.clone()
            }
            _ => Arc::new(Codec::new(Arc::new(schema))),
        };

        self.built.insert(name.to_owned(), codec.schema().clone());
        self.codecs.insert(name.to_owned(), codec);
        Ok(())
    }
}
