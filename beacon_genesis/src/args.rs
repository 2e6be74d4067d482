use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Generate the initial state of an Ethereum proof-of-stake consensus chain.
#[derive(Debug, Parser)]
#[clap(
    name = "beacon-genesis",
    version,
    subcommand_negates_reqs = true,
    args_conflicts_with_subcommands = true
)]
pub struct BeaconGenesisArgs {
    #[clap(subcommand)]
    pub command: Option<BeaconGenesisCommand>,

    /// `devnet` is the default action when no subcommand is given.
    #[clap(flatten)]
    pub devnet: DevnetOptions,
}

#[derive(Debug, Subcommand)]
pub enum BeaconGenesisCommand {
    /// Generate a devnet genesis state
    Devnet(DevnetOptions),
    /// Print the version of the application
    Version,
}

#[derive(Debug, Args)]
pub struct DevnetOptions {
    /// Path to execution genesis config (genesis.json)
    #[clap(long, value_name = "PATH")]
    pub eth1_config: PathBuf,

    /// Path to consensus genesis config (config.yaml)
    #[clap(long, value_name = "PATH")]
    pub config: PathBuf,

    /// Path to the file containing the mnemonics for genesis validators
    #[clap(long, value_name = "PATH")]
    pub mnemonics: Option<PathBuf>,

    /// Path to the file with a list of additional genesis validators
    #[clap(long, value_name = "PATH")]
    pub additional_validators: Option<PathBuf>,

    /// Path or URL of an execution block to create a shadow fork from
    #[clap(long, value_name = "PATH_OR_URL")]
    pub shadow_fork_block: Option<String>,

    /// Execution RPC URL to fetch the shadow-fork block from
    #[clap(long, value_name = "URL")]
    pub shadow_fork_rpc: Option<String>,

    /// Path to write the genesis state to in SSZ format
    #[clap(long, value_name = "PATH")]
    pub state_output: Option<PathBuf>,

    /// Path to write the genesis state to in JSON format
    #[clap(long, value_name = "PATH")]
    pub json_output: Option<PathBuf>,

    /// Suppress informational output
    #[clap(long, short)]
    pub quiet: bool,
}

impl BeaconGenesisArgs {
    pub fn quiet(&self) -> bool {
        match &self.command {
            Some(BeaconGenesisCommand::Devnet(options)) => options.quiet,
            Some(BeaconGenesisCommand::Version) => false,
            None => self.devnet.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn the_command_line_is_well_formed() {
        BeaconGenesisArgs::command().debug_assert();
    }

    #[test]
    fn devnet_is_the_default_subcommand() {
        let args = BeaconGenesisArgs::try_parse_from([
            "beacon-genesis",
            "--eth1-config",
            "genesis.json",
            "--config",
            "config.yaml",
            "--quiet",
        ])
        .expect("arguments are valid");

        assert!(args.command.is_none());
        assert_eq!(args.devnet.eth1_config, PathBuf::from("genesis.json"));
        assert!(args.quiet());
    }

    #[test]
    fn explicit_devnet_and_version_subcommands_parse() {
        let args = BeaconGenesisArgs::try_parse_from([
            "beacon-genesis",
            "devnet",
            "--eth1-config",
            "genesis.json",
            "--config",
            "config.yaml",
            "--state-output",
            "genesis.ssz",
        ])
        .expect("arguments are valid");

        assert!(matches!(
            args.command,
            Some(BeaconGenesisCommand::Devnet(_)),
        ));

        BeaconGenesisArgs::try_parse_from(["beacon-genesis", "version"])
            .expect("the version subcommand takes no arguments");
    }

    #[test]
    fn the_required_inputs_are_enforced() {
        BeaconGenesisArgs::try_parse_from(["beacon-genesis", "devnet", "--config", "c.yaml"])
            .expect_err("--eth1-config is required");
    }
}
