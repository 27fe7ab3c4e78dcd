use core::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use typenum::Unsigned;

use crate::config::Config;
use crate::consts::{FAR_FUTURE_EPOCH, GENESIS_EPOCH};
use crate::primitives::{Epoch, Slot};

#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ForkName {
    #[display(fmt = "phase0")]
    Phase0,
    #[display(fmt = "altair")]
    Altair,
    #[display(fmt = "bellatrix")]
    Bellatrix,
    #[display(fmt = "capella")]
    Capella,
    #[display(fmt = "deneb")]
    Deneb,
    #[display(fmt = "electra")]
    Electra,
}

impl ForkName {
    /// Every fork, oldest first.
    pub const ALL: [ForkName; 6] = [
        ForkName::Phase0,
        ForkName::Altair,
        ForkName::Bellatrix,
        ForkName::Capella,
        ForkName::Deneb,
        ForkName::Electra,
    ];

    pub fn parent(self) -> Option<Self> {
        match self {
            ForkName::Phase0 => None,
            ForkName::Altair => Some(ForkName::Phase0),
            ForkName::Bellatrix => Some(ForkName::Altair),
            ForkName::Capella => Some(ForkName::Bellatrix),
            ForkName::Deneb => Some(ForkName::Capella),
            ForkName::Electra => Some(ForkName::Deneb),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Error)]
#[error("unknown fork {0:?}")]
pub struct UnknownFork(String);

impl FromStr for ForkName {
    type Err = UnknownFork;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        ForkName::ALL
            .iter()
            .copied()
            .find(|fork| fork.to_string().eq_ignore_ascii_case(string))
            .ok_or_else(|| UnknownFork(string.to_owned()))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse chain config")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{later} is scheduled at epoch {later_epoch}, before {earlier} at epoch {earlier_epoch}")]
    ForkEpochsOutOfOrder {
        earlier: ForkName,
        earlier_epoch: Epoch,
        later: ForkName,
        later_epoch: Epoch,
    },
}

fn far_future_epoch() -> Epoch {
    FAR_FUTURE_EPOCH
}

/// Activation epochs of each fork, as found in a chain config file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ForkSchedule {
    #[serde(default = "far_future_epoch")]
    pub altair_fork_epoch: Epoch,
    #[serde(default = "far_future_epoch")]
    pub bellatrix_fork_epoch: Epoch,
    #[serde(default = "far_future_epoch")]
    pub capella_fork_epoch: Epoch,
    #[serde(default = "far_future_epoch")]
    pub deneb_fork_epoch: Epoch,
    #[serde(default = "far_future_epoch")]
    pub electra_fork_epoch: Epoch,
}

impl Default for ForkSchedule {
    fn default() -> Self {
        Self {
            altair_fork_epoch: FAR_FUTURE_EPOCH,
            bellatrix_fork_epoch: FAR_FUTURE_EPOCH,
            capella_fork_epoch: FAR_FUTURE_EPOCH,
            deneb_fork_epoch: FAR_FUTURE_EPOCH,
            electra_fork_epoch: FAR_FUTURE_EPOCH,
        }
    }
}

impl ForkSchedule {
    pub fn mainnet() -> Self {
        Self {
            altair_fork_epoch: 74_240,
            bellatrix_fork_epoch: 144_896,
            capella_fork_epoch: 194_048,
            deneb_fork_epoch: 269_568,
            electra_fork_epoch: 364_032,
        }
    }

    /// Every fork active from genesis.
    pub fn all_at_genesis() -> Self {
        Self {
            altair_fork_epoch: GENESIS_EPOCH,
            bellatrix_fork_epoch: GENESIS_EPOCH,
            capella_fork_epoch: GENESIS_EPOCH,
            deneb_fork_epoch: GENESIS_EPOCH,
            electra_fork_epoch: GENESIS_EPOCH,
        }
    }

    /// Reads the fork epochs out of a chain config. Other keys are ignored.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let schedule: Self = serde_yaml::from_str(yaml)?;
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn fork_epoch(&self, fork: ForkName) -> Epoch {
        match fork {
            ForkName::Phase0 => GENESIS_EPOCH,
            ForkName::Altair => self.altair_fork_epoch,
            ForkName::Bellatrix => self.bellatrix_fork_epoch,
            ForkName::Capella => self.capella_fork_epoch,
            ForkName::Deneb => self.deneb_fork_epoch,
            ForkName::Electra => self.electra_fork_epoch,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for pair in ForkName::ALL.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            let (earlier_epoch, later_epoch) = (self.fork_epoch(earlier), self.fork_epoch(later));
            if later_epoch < earlier_epoch {
                return Err(ConfigError::ForkEpochsOutOfOrder {
                    earlier,
                    earlier_epoch,
                    later,
                    later_epoch,
                });
            }
        }
        Ok(())
    }

    pub fn fork_at_epoch(&self, epoch: Epoch) -> ForkName {
        ForkName::ALL
            .iter()
            .rev()
            .copied()
            .find(|fork| self.fork_epoch(*fork) <= epoch)
            .unwrap_or(ForkName::Phase0)
    }

    pub fn fork_at_slot<C: Config>(&self, slot: Slot) -> ForkName {
        self.fork_at_epoch(slot / C::SlotsPerEpoch::to_u64())
    }
}
