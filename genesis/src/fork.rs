use types::{
    config::Config,
    nonstandard::Phase,
    phase0::{containers::Fork, primitives::H32},
};

use crate::Error;

struct ScheduleEntry {
    phase: Phase,
    epoch_field: &'static str,
    version_field: &'static str,
}

const FORK_SCHEDULE: [ScheduleEntry; 6] = [
    ScheduleEntry {
        phase: Phase::Phase0,
        epoch_field: "",
        version_field: "GENESIS_FORK_VERSION",
    },
    ScheduleEntry {
        phase: Phase::Altair,
        epoch_field: "ALTAIR_FORK_EPOCH",
        version_field: "ALTAIR_FORK_VERSION",
    },
    ScheduleEntry {
        phase: Phase::Bellatrix,
        epoch_field: "BELLATRIX_FORK_EPOCH",
        version_field: "BELLATRIX_FORK_VERSION",
    },
    ScheduleEntry {
        phase: Phase::Capella,
        epoch_field: "CAPELLA_FORK_EPOCH",
        version_field: "CAPELLA_FORK_VERSION",
    },
    ScheduleEntry {
        phase: Phase::Deneb,
        epoch_field: "DENEB_FORK_EPOCH",
        version_field: "DENEB_FORK_VERSION",
    },
    ScheduleEntry {
        phase: Phase::Electra,
        epoch_field: "ELECTRA_FORK_EPOCH",
        version_field: "ELECTRA_FORK_VERSION",
    },
];

/// The highest fork whose activation epoch is configured as 0. Falls back to
/// Phase 0 when no fork activates at genesis, no matter which versions are
/// configured.
#[must_use]
pub fn genesis_phase(config: &Config) -> Phase {
    FORK_SCHEDULE
        .iter()
        .rev()
        .take_while(|entry| entry.phase != Phase::Phase0)
        .find(|entry| config.get_uint(entry.epoch_field) == Some(0))
        .map_or(Phase::Phase0, |entry| entry.phase)
}

/// The `fork` field of a genesis state: this fork's version paired with its
/// predecessor's (or itself for Phase 0), both at epoch 0.
pub fn state_fork(phase: Phase, config: &Config) -> Result<Fork, Error> {
    let current_version = configured_version(phase, config)?;
    let previous_version = match phase.previous() {
        Some(previous) => configured_version(previous, config)?,
        None => current_version,
    };

    Ok(Fork {
        previous_version,
        current_version,
        epoch: 0,
    })
}

fn configured_version(phase: Phase, config: &Config) -> Result<H32, Error> {
    let field = FORK_SCHEDULE
        .iter()
        .find(|entry| entry.phase == phase)
        .map(|entry| entry.version_field)
        .expect("every phase has a schedule entry");

    config
        .get_bytes(field)
        .and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
        .map(H32)
        .ok_or(Error::MissingForkVersion { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> Config {
        Config::from_yaml_str(&format!("PRESET_BASE: \"minimal\"\n{yaml}"))
            .expect("config is valid")
    }

    #[test]
    fn the_highest_fork_at_epoch_zero_wins() {
        let config = config(
            "ALTAIR_FORK_EPOCH: 0\n\
             BELLATRIX_FORK_EPOCH: 0\n\
             CAPELLA_FORK_EPOCH: 0\n\
             DENEB_FORK_EPOCH: 10\n",
        );

        assert_eq!(genesis_phase(&config), Phase::Capella);
    }

    #[test]
    fn configured_versions_alone_do_not_select_a_fork() {
        let config = config(
            "ALTAIR_FORK_VERSION: \"0x01000000\"\n\
             BELLATRIX_FORK_VERSION: \"0x02000000\"\n",
        );

        assert_eq!(genesis_phase(&config), Phase::Phase0);
    }

    #[test]
    fn fork_versions_pair_current_with_previous() {
        let config = config(
            "GENESIS_FORK_VERSION: \"0x00000099\"\n\
             ALTAIR_FORK_VERSION: \"0x01000099\"\n\
             ALTAIR_FORK_EPOCH: 0\n",
        );

        let fork = state_fork(Phase::Altair, &config).expect("versions are configured");

        assert_eq!(fork.previous_version, H32([0x00, 0x00, 0x00, 0x99]));
        assert_eq!(fork.current_version, H32([0x01, 0x00, 0x00, 0x99]));
        assert_eq!(fork.epoch, 0);

        let fork = state_fork(Phase::Phase0, &config).expect("versions are configured");

        assert_eq!(fork.previous_version, fork.current_version);
    }

    #[test]
    fn missing_versions_are_reported() {
        let error = state_fork(Phase::Deneb, &config("DENEB_FORK_EPOCH: 0\n"))
            .expect_err("no versions are configured");

        assert!(error.to_string().contains("DENEB_FORK_VERSION"));
    }
}
