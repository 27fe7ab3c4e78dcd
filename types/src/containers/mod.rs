//! Record definitions of every fork.
//!
//! Each fork starts from its parent's definitions and adds, redefines or keeps records.

use ssz_schema::{ContainerDescriptor, SchemaError};

use crate::forks::ForkName;
use crate::registry::RegistryError;

mod altair;
mod bellatrix;
mod capella;
mod deneb;
mod electra;
mod phase0;

pub use altair::*;
pub use bellatrix::*;
pub use capella::*;
pub use deneb::*;
pub use electra::*;
pub use phase0::*;

#[derive(Clone, Debug)]
pub struct Definitions {
    fork: ForkName,
    records: Vec<ContainerDescriptor>,
}

impl Definitions {
    /// The definitions in force at `fork`.
    pub fn for_fork(fork: ForkName) -> Result<Self, RegistryError> {
        match fork.parent() {
            None => {
                let mut definitions = Self {
                    fork,
                    records: vec![],
                };
                phase0::define(&mut definitions)?;
                Ok(definitions)
            }
            Some(parent) => Self::for_fork(parent)?.upgrade(fork),
        }
    }

    /// Applies the changes `fork` makes to these definitions.
    ///
    /// `fork` must be the direct child of the current one.
    pub fn upgrade(mut self, fork: ForkName) -> Result<Self, RegistryError> {
        debug_assert_eq!(fork.parent(), Some(self.fork));

        self.fork = fork;
        match fork {
            ForkName::Phase0 => phase0::define(&mut self)?,
            ForkName::Altair => altair::define(&mut self)?,
            ForkName::Bellatrix => bellatrix::define(&mut self)?,
            ForkName::Capella => capella::define(&mut self)?,
            ForkName::Deneb => deneb::define(&mut self)?,
            ForkName::Electra => electra::define(&mut self)?,
        }
        Ok(self)
    }

    pub fn fork(&self) -> ForkName {
        self.fork
    }

    pub fn get(&self, name: &str) -> Option<&ContainerDescriptor> {
        self.records.iter().find(|record| record.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContainerDescriptor> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a record, or redefines the one with the same name in place.
    pub fn insert(&mut self, descriptor: ContainerDescriptor) {
        match self
            .records
            .iter_mut()
            .find(|record| record.name() == descriptor.name())
        {
            Some(record) => *record = descriptor,
            None => self.records.push(descriptor),
        }
    }

    /// Derives a new version of an inherited record.
    pub fn modify(
        &mut self,
        name: &str,
        change: impl FnOnce(ContainerDescriptor) -> Result<ContainerDescriptor, SchemaError>,
    ) -> Result<(), RegistryError> {
        let fork = self.fork;
        let record = self
            .records
            .iter_mut()
            .find(|record| record.name() == name)
            .ok_or_else(|| RegistryError::UnknownRecord {
                fork,
                name: name.to_owned(),
            })?;

        *record = change(record.clone()).map_err(|source| RegistryError::Schema { fork, source })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ssz_schema::ShapeDescriptor;

    use super::*;

    fn field_names(definitions: &Definitions, record: &str) -> Vec<String> {
        definitions
            .get(record)
            .expect("Test")
            .fields()
            .map(|(name, _)| name.to_owned())
            .collect()
    }

    #[test]
    fn catalogue_grows_fork_over_fork() {
        let mut previous = 0;
        for fork in ForkName::ALL.iter().copied() {
            let definitions = Definitions::for_fork(fork).expect("Test");
            assert_eq!(definitions.fork(), fork);
            assert!(definitions.len() >= previous);
            previous = definitions.len();
        }
    }

    #[test]
    fn later_forks_append_to_the_body() {
        let phase0 = Definitions::for_fork(ForkName::Phase0).expect("Test");
        let electra = Definitions::for_fork(ForkName::Electra).expect("Test");

        let phase0_fields = field_names(&phase0, BEACON_BLOCK_BODY);
        let electra_fields = field_names(&electra, BEACON_BLOCK_BODY);

        assert_eq!(electra_fields[..phase0_fields.len()], phase0_fields[..]);
        assert_eq!(
            electra_fields[phase0_fields.len()..],
            [
                "sync_aggregate",
                "execution_payload",
                "bls_to_execution_changes",
                "blob_kzg_commitments",
                "execution_requests",
            ]
        );
    }

    #[test]
    fn altair_replaces_pending_attestations() {
        let altair = Definitions::for_fork(ForkName::Altair).expect("Test");
        let fields = field_names(&altair, BEACON_STATE);

        assert_eq!(fields[15], "previous_epoch_participation");
        assert_eq!(fields[16], "current_epoch_participation");
        assert!(!fields.iter().any(|field| field.ends_with("_attestations")));
        assert_eq!(fields.last().map(String::as_str), Some("next_sync_committee"));
    }

    #[test]
    fn modifying_unknown_record() {
        let mut definitions = Definitions::for_fork(ForkName::Phase0).expect("Test");
        let result = definitions.modify("ExecutionPayload", |record| {
            record.add("blob_gas_used", ShapeDescriptor::Uint(8))
        });

        assert!(matches!(
            result,
            Err(RegistryError::UnknownRecord {
                fork: ForkName::Phase0,
                ..
            })
        ));
    }

    #[test]
    fn insert_redefines_in_place() {
        let mut definitions = Definitions::for_fork(ForkName::Phase0).expect("Test");
        let count = definitions.len();
        let position = definitions
            .iter()
            .position(|record| record.name() == CHECKPOINT);

        definitions.insert(ContainerDescriptor::new(CHECKPOINT).field("epoch", ShapeDescriptor::Uint(8)));

        assert_eq!(definitions.len(), count);
        assert_eq!(
            definitions
                .iter()
                .position(|record| record.name() == CHECKPOINT),
            position
        );
        assert_eq!(field_names(&definitions, CHECKPOINT), ["epoch"]);
    }
}
