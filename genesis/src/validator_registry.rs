use anyhow::Result;
use types::{
    phase0::{
        consts::FAR_FUTURE_EPOCH,
        containers::Validator,
        primitives::{Gwei, H256},
    },
    specs::Specs,
};
use validators::Validator as InputValidator;

/// Turns input validators into consensus validators and computes the
/// registry's hash-tree-root, which doubles as the genesis validators root.
///
/// A validator activates at genesis iff its effective balance reaches
/// `MAX_EFFECTIVE_BALANCE`. When Electra is active at genesis, validators
/// with `0x02` credentials may hold up to `MAX_EFFECTIVE_BALANCE_ELECTRA`.
pub fn get_genesis_validators(
    specs: &Specs,
    input: &[InputValidator],
) -> Result<(Vec<Validator>, H256)> {
    let max_effective_balance = specs.get_uint_default("MAX_EFFECTIVE_BALANCE", 32_000_000_000);
    let max_effective_balance_electra =
        specs.get_uint_default("MAX_EFFECTIVE_BALANCE_ELECTRA", 2_048_000_000_000);
    let far_future_epoch = specs.get_uint_default("FAR_FUTURE_EPOCH", FAR_FUTURE_EPOCH);
    let electra_active = specs.get_uint("ELECTRA_FORK_EPOCH") == Some(0);

    let mut registry = Vec::with_capacity(input.len());

    for validator in input {
        let ceiling = if electra_active && validator.withdrawal_credentials[0] == 0x02 {
            max_effective_balance_electra
        } else {
            max_effective_balance
        };

        let effective_balance = validator.balance.unwrap_or(max_effective_balance).min(ceiling);
        let activates = effective_balance >= max_effective_balance;

        registry.push(Validator {
            pubkey: validator.public_key,
            withdrawal_credentials: validator.withdrawal_credentials,
            effective_balance,
            slashed: false,
            activation_eligibility_epoch: if activates { 0 } else { far_future_epoch },
            activation_epoch: if activates { 0 } else { far_future_epoch },
            exit_epoch: far_future_epoch,
            withdrawable_epoch: far_future_epoch,
        });
    }

    let registry_limit = specs.get_uint_default("VALIDATOR_REGISTRY_LIMIT", 1_099_511_627_776);

    let root = ssz::hash_with(|hasher| {
        for validator in &registry {
            validator.hash_to(hasher)?;
        }

        hasher.merkleize_with_mixin(0, registry.len() as u64, registry_limit)?;
        Ok(())
    })?;

    Ok((registry, root))
}

/// Genesis balances: the configured balance when present, otherwise
/// `MAX_EFFECTIVE_BALANCE`. Balances are not capped, only effective
/// balances are.
#[must_use]
pub fn get_genesis_balances(specs: &Specs, input: &[InputValidator]) -> Vec<Gwei> {
    let max_effective_balance = specs.get_uint_default("MAX_EFFECTIVE_BALANCE", 32_000_000_000);

    input
        .iter()
        .map(|validator| validator.balance.unwrap_or(max_effective_balance))
        .collect()
}

#[cfg(test)]
mod tests {
    use bls::PublicKeyBytes;
    use hex_literal::hex;
    use types::config::Config;

    use super::*;

    fn specs(yaml: &str) -> Specs {
        let config = Config::from_yaml_str(&format!("PRESET_BASE: \"minimal\"\n{yaml}"))
            .expect("config is valid");

        Specs::from_config(&config)
    }

    fn input(fill: u8, balance: Option<Gwei>) -> InputValidator {
        InputValidator {
            public_key: PublicKeyBytes::repeat_byte(fill),
            withdrawal_credentials: H256::repeat_byte(fill),
            balance,
        }
    }

    #[test]
    fn activation_follows_the_effective_balance() {
        let (registry, root) = get_genesis_validators(
            &specs("ELECTRA_FORK_EPOCH: 18446744073709551615\n"),
            &[input(1, None), input(2, Some(16_000_000_000))],
        )
        .expect("validators are valid");

        assert_eq!(registry.len(), 2);

        assert_eq!(registry[0].effective_balance, 32_000_000_000);
        assert_eq!(registry[0].activation_epoch, 0);
        assert_eq!(registry[0].activation_eligibility_epoch, 0);

        assert_eq!(registry[1].effective_balance, 16_000_000_000);
        assert_eq!(registry[1].activation_epoch, FAR_FUTURE_EPOCH);
        assert_eq!(registry[1].activation_eligibility_epoch, FAR_FUTURE_EPOCH);

        for validator in &registry {
            assert_eq!(validator.exit_epoch, FAR_FUTURE_EPOCH);
            assert_eq!(validator.withdrawable_epoch, FAR_FUTURE_EPOCH);
        }

        assert_eq!(
            root,
            H256(hex!(
                "bb3e018dcc2e297c4c9404a7c17334c7290bdbd11bc0cfbe0dad1410eac00162"
            )),
        );
    }

    #[test]
    fn electra_raises_the_ceiling_for_compounding_credentials() {
        let (registry, root) = get_genesis_validators(
            &specs("ELECTRA_FORK_EPOCH: 0\n"),
            &[
                input(1, Some(64_000_000_000)),
                input(2, Some(2_049_000_000_000)),
            ],
        )
        .expect("validators are valid");

        // 0x01 credentials stay capped at MAX_EFFECTIVE_BALANCE.
        assert_eq!(registry[0].effective_balance, 32_000_000_000);
        // 0x02 credentials may hold up to MAX_EFFECTIVE_BALANCE_ELECTRA.
        assert_eq!(registry[1].effective_balance, 2_048_000_000_000);

        assert!(registry.iter().all(|validator| validator.activation_epoch == 0));

        assert_eq!(
            root,
            H256(hex!(
                "bd258b3ed92b57d323de641f587466174633109e6147fd3ae106d692c4ceb1fa"
            )),
        );
    }

    #[test]
    fn balances_default_to_the_maximum_but_are_never_capped() {
        let balances = get_genesis_balances(
            &specs(""),
            &[input(1, None), input(2, Some(0)), input(3, Some(64_000_000_000))],
        );

        assert_eq!(balances, vec![32_000_000_000, 0, 64_000_000_000]);
    }
}
