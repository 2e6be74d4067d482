use std::fs;

use anyhow::{ensure, Context as _, Result};
use genesis::ContentType;
use tracing::info;
use types::config::Config;

use crate::args::{BeaconGenesisArgs, BeaconGenesisCommand, DevnetOptions};

pub fn run(args: BeaconGenesisArgs) -> Result<()> {
    match args.command {
        Some(BeaconGenesisCommand::Devnet(options)) => devnet(options),
        Some(BeaconGenesisCommand::Version) => {
            println!("beacon-genesis version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => devnet(args.devnet),
    }
}

fn devnet(options: DevnetOptions) -> Result<()> {
    let el_genesis =
        eth1::load_genesis_file(&options.eth1_config).context("failed to load execution genesis")?;

    let cl_config = Config::load(&options.config).context("failed to load consensus config")?;

    let mut genesis_validators = vec![];

    if let Some(path) = &options.mnemonics {
        let mut derived = validators::generate_from_mnemonics_file(path)
            .context("failed to load validators from mnemonics file")?;
        genesis_validators.append(&mut derived);
    }

    if let Some(path) = &options.additional_validators {
        let mut listed = validators::load_validators_file(path)
            .context("failed to load validators from file")?;
        genesis_validators.append(&mut listed);
    }

    ensure!(!genesis_validators.is_empty(), "no validators found");

    let mut builder = genesis::new_genesis_builder(el_genesis, cl_config);
    builder.add_validators(genesis_validators);

    if let Some(location) = &options.shadow_fork_block {
        let block =
            eth1::load_block_from_file(location).context("failed to load shadow fork block")?;
        builder.set_shadow_fork_block(block);
    } else if let Some(url) = &options.shadow_fork_rpc {
        let block = eth1::load_block_from_rpc(url).context("failed to get shadow fork block")?;
        builder.set_shadow_fork_block(block);
    }

    let state = builder.build_state().context("failed to build genesis")?;

    info!("genesis version: {}", state.phase());
    info!("genesis time: {}", state.genesis_time());
    info!(
        "genesis validators root: {:?}",
        state.genesis_validators_root(),
    );

    if let Some(path) = &options.state_output {
        let ssz = builder
            .serialize(&state, ContentType::Ssz)
            .context("failed to serialize genesis state")?;
        fs::write(path, ssz)
            .with_context(|| format!("failed to write genesis state to {}", path.display()))?;
    }

    if let Some(path) = &options.json_output {
        let json = builder
            .serialize(&state, ContentType::Json)
            .context("failed to serialize genesis state")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write genesis state to {}", path.display()))?;
    }

    if options.state_output.is_none() && options.json_output.is_none() {
        let json = builder
            .serialize(&state, ContentType::Json)
            .context("failed to serialize genesis state")?;
        println!("{}", String::from_utf8(json).context("JSON output is UTF-8")?);
    }

    Ok(())
}
