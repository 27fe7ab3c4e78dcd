//! Consensus records of every fork, and the registry that serves their codecs.

pub mod bounds;
pub mod config;
pub mod consts;
pub mod containers;
pub mod forks;
pub mod primitives;
pub mod registry;

pub use crate::forks::{ConfigError, ForkName, ForkSchedule, UnknownFork};
pub use crate::registry::{Codec, RegistryBuilder, RegistryError, TypeRegistry};
