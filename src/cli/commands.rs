//! Command implementations.

use std::io::Write;
use std::path::Path;

use crate::abi::{self, AccountInput, ACCOUNT_LENGTH};
use crate::cli::contracts::{
    bundled_contract, BONDING_CONTRACT, STANDARD_PAYMENT_CONTRACT, UNBONDING_CONTRACT,
};
use crate::cli::output::{print_json, print_stream};
use crate::cli::{CliError, Command, DeployArgs};
use crate::client::CasperLabsClient;
use crate::deploy::{ContractOptions, DeployOptions};
use crate::error::{ValidationError, ValidationResult};
use crate::proto::Arg;

/// Run one command against the node, writing results to `out`.
pub async fn execute<W: Write>(
    client: &CasperLabsClient,
    command: Command,
    out: &mut W,
) -> Result<(), CliError> {
    let contracts = Path::new(&client.config().contracts.directory);

    match command {
        Command::Deploy(args) => deploy_command(client, args, contracts, out).await,

        Command::Bond { amount, mut deploy } => {
            tracing::info!(amount, "Bond");
            use_bundled_session(&mut deploy, contracts, BONDING_CONTRACT)?;
            if deploy.session_args.is_none() {
                deploy.session_args = Some(abi::args_to_json(&[abi::long_value("amount", amount)]));
            }
            deploy_command(client, deploy, contracts, out).await
        }

        Command::Unbond { amount, mut deploy } => {
            tracing::info!(?amount, "Unbond");
            use_bundled_session(&mut deploy, contracts, UNBONDING_CONTRACT)?;
            if deploy.session_args.is_none() {
                let amount = amount.map(|amount| abi::long_value("amount", amount));
                deploy.session_args = Some(abi::args_to_json(&[abi::optional_value("amount", amount)]));
            }
            deploy_command(client, deploy, contracts, out).await
        }

        Command::Propose => {
            let response = client.propose().await?;
            writeln!(out, "Success! Block hash: {}", hex::encode(&response.block_hash))?;
            Ok(())
        }

        Command::ShowBlock { hash } => print_json(out, &client.show_block(&hash, true).await?),

        Command::ShowBlocks { depth } => {
            let blocks = client.show_blocks(depth, 0, true).await?;
            print_stream(out, blocks, "block").await.map(|_| ())
        }

        Command::ShowDeploy { hash } => print_json(out, &client.show_deploy(&hash, false).await?),

        Command::ShowDeploys { hash } => {
            let deploys = client.show_deploys(&hash, false).await?;
            print_stream(out, deploys, "deploy").await.map(|_| ())
        }

        Command::Vdag { depth, .. } => {
            let dot = client.visualize_dag(depth).await?;
            writeln!(out, "{}", dot)?;
            Ok(())
        }

        Command::QueryState {
            block_hash,
            key,
            path,
            key_type,
        } => {
            let value = client
                .query_state(&block_hash, &key, &path, key_type.as_str())
                .await?;
            print_json(out, &value)
        }

        Command::Balance {
            address,
            block_hash,
        } => {
            let balance = client.balance(&address, &block_hash).await?;
            writeln!(out, "{}", balance)?;
            Ok(())
        }
    }
}

async fn deploy_command<W: Write>(
    client: &CasperLabsClient,
    args: DeployArgs,
    contracts: &Path,
    out: &mut W,
) -> Result<(), CliError> {
    let options = deploy_options(&args, contracts)?;
    let deploy_hash = client.deploy(options).await?;
    writeln!(out, "Success! Deploy {} deployed", hex::encode(deploy_hash))?;
    Ok(())
}

/// Use a bundled contract as session code unless one was given.
fn use_bundled_session(args: &mut DeployArgs, contracts: &Path, file_name: &str) -> ValidationResult<()> {
    if !args.has_session() {
        args.session = Some(bundled_contract(contracts, file_name)?);
    }
    Ok(())
}

/// Translate command line arguments into deploy options.
pub fn deploy_options(args: &DeployArgs, contracts: &Path) -> ValidationResult<DeployOptions> {
    let from = hex::decode(&args.from).map_err(|e| ValidationError::InvalidHex {
        field: "--from".into(),
        reason: e.to_string(),
    })?;
    if from.len() != ACCOUNT_LENGTH {
        return Err(ValidationError::InvalidFromAddr(from.len()));
    }

    let mut payment = ContractOptions {
        wasm_path: args.payment.clone(),
        hash: optional_hex("--payment-hash", &args.payment_hash)?,
        name: args.payment_name.clone(),
        uref: optional_hex("--payment-uref", &args.payment_uref)?,
    };
    let payment_args = match args.payment_amount {
        Some(amount) => {
            if payment.is_empty() {
                payment.wasm_path = Some(bundled_contract(contracts, STANDARD_PAYMENT_CONTRACT)?);
            }
            vec![abi::big_int("amount", amount)]
        }
        None => optional_args(&args.payment_args)?,
    };

    Ok(DeployOptions {
        from_addr: Some(AccountInput::Raw(from)),
        gas_price: args.gas_price,
        ttl_millis: args.ttl_millis,
        session: ContractOptions {
            wasm_path: args.session.clone(),
            hash: optional_hex("--session-hash", &args.session_hash)?,
            name: args.session_name.clone(),
            uref: optional_hex("--session-uref", &args.session_uref)?,
        },
        payment,
        session_args: optional_args(&args.session_args)?,
        payment_args,
        public_key: args.public_key.clone(),
        private_key: args.private_key.clone(),
        timestamp: None,
    })
}

fn optional_hex(field: &str, value: &Option<String>) -> ValidationResult<Option<Vec<u8>>> {
    value
        .as_deref()
        .map(|text| {
            hex::decode(text).map_err(|e| ValidationError::InvalidHex {
                field: field.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn optional_args(json: &Option<String>) -> ValidationResult<Vec<Arg>> {
    match json.as_deref() {
        Some(text) => abi::args_from_json(text),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> DeployArgs {
        DeployArgs {
            from: "11".repeat(32),
            gas_price: 10,
            session_name: Some("counter".into()),
            ..DeployArgs::default()
        }
    }

    #[test]
    fn from_must_be_32_hex_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let mut short = args();
        short.from = "abcd".into();
        assert_eq!(
            deploy_options(&short, dir.path()).unwrap_err(),
            ValidationError::InvalidFromAddr(2)
        );

        let mut garbage = args();
        garbage.from = "zz".into();
        assert!(matches!(
            deploy_options(&garbage, dir.path()),
            Err(ValidationError::InvalidHex { .. })
        ));
    }

    #[test]
    fn payment_amount_uses_bundled_standard_payment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STANDARD_PAYMENT_CONTRACT), b"\0asm").unwrap();
        let mut with_amount = args();
        with_amount.payment_amount = Some(5000);

        let options = deploy_options(&with_amount, dir.path()).unwrap();
        assert_eq!(
            options.payment.wasm_path,
            Some(dir.path().join(STANDARD_PAYMENT_CONTRACT))
        );
        assert_eq!(options.payment_args, vec![abi::big_int("amount", 5000)]);
    }

    #[test]
    fn payment_amount_keeps_explicit_payment() {
        let dir = tempfile::tempdir().unwrap();
        let mut with_amount = args();
        with_amount.payment_amount = Some(5000);
        with_amount.payment_hash = Some("ab".repeat(32));

        let options = deploy_options(&with_amount, dir.path()).unwrap();
        assert_eq!(options.payment.hash, Some(vec![0xab; 32]));
        assert!(options.payment.wasm_path.is_none());
    }

    #[test]
    fn missing_standard_payment_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut with_amount = args();
        with_amount.payment_amount = Some(1);
        assert!(matches!(
            deploy_options(&with_amount, dir.path()),
            Err(ValidationError::MissingBundledContract { .. })
        ));
    }

    #[test]
    fn session_args_are_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let mut with_args = args();
        with_args.session_args = Some(r#"[{"name": "amount", "value": {"long_value": 123456}}]"#.into());
        let options = deploy_options(&with_args, dir.path()).unwrap();
        assert_eq!(options.session_args, vec![abi::long_value("amount", 123_456)]);
        assert_eq!(options.session, ContractOptions::name("counter"));
    }

    #[test]
    fn bundled_session_only_when_none_given() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BONDING_CONTRACT), b"\0asm").unwrap();

        let mut explicit = args();
        use_bundled_session(&mut explicit, dir.path(), BONDING_CONTRACT).unwrap();
        assert!(explicit.session.is_none());

        let mut implicit = args();
        implicit.session_name = None;
        use_bundled_session(&mut implicit, dir.path(), BONDING_CONTRACT).unwrap();
        assert_eq!(implicit.session, Some(dir.path().join(BONDING_CONTRACT)));
    }
}
