//! Command execution against an in-process node.

use std::sync::Arc;

use casperlabs_client::abi;
use casperlabs_client::cli::contracts::{BONDING_CONTRACT, UNBONDING_CONTRACT};
use casperlabs_client::cli::{execute, CliError, Command, DeployArgs};
use casperlabs_client::proto::consensus::code::Contract;
use casperlabs_client::{CasperLabsClient, ValidationError};

mod common;

use common::{FakeNode, NodeState, RecordingSleeper};

const BONDING_WASM: &[u8] = b"\x00asm\x01\x00\x00\x00bond";

fn client_with_contracts(node: &FakeNode, contracts: &tempfile::TempDir) -> CasperLabsClient {
    let mut config = node.config();
    config.contracts.directory = contracts.path().display().to_string();
    CasperLabsClient::new(config)
        .unwrap()
        .with_sleeper(Arc::new(RecordingSleeper::default()))
}

fn account_args() -> DeployArgs {
    DeployArgs {
        from: "07".repeat(32),
        gas_price: 10,
        ..DeployArgs::default()
    }
}

#[tokio::test]
async fn bond_sends_the_bundled_bonding_contract() {
    let contracts = tempfile::tempdir().unwrap();
    std::fs::write(contracts.path().join(BONDING_CONTRACT), BONDING_WASM).unwrap();
    let node = FakeNode::start(NodeState::default()).await;
    let client = client_with_contracts(&node, &contracts);

    let mut out = Vec::new();
    let command = Command::Bond {
        amount: 1000,
        deploy: account_args(),
    };
    execute(&client, command, &mut out).await.unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("Success! Deploy "));

    let state = node.state.lock().unwrap();
    assert_eq!(state.deploys.len(), 1);
    let session = state.deploys[0].body.as_ref().unwrap().session.clone().unwrap();
    assert_eq!(session.contract, Some(Contract::Wasm(BONDING_WASM.to_vec())));
    assert_eq!(session.args, vec![abi::long_value("amount", 1000)]);
    assert!(printed.contains(&hex::encode(&state.deploys[0].deploy_hash)));
}

#[tokio::test]
async fn bond_keeps_an_explicit_session() {
    let contracts = tempfile::tempdir().unwrap();
    let node = FakeNode::start(NodeState::default()).await;
    let client = client_with_contracts(&node, &contracts);

    let mut deploy = account_args();
    deploy.session_name = Some("my_bonding".into());
    let mut out = Vec::new();
    execute(&client, Command::Bond { amount: 5, deploy }, &mut out)
        .await
        .unwrap();

    let state = node.state.lock().unwrap();
    let session = state.deploys[0].body.as_ref().unwrap().session.clone().unwrap();
    assert_eq!(session.contract, Some(Contract::Name("my_bonding".into())));
}

#[tokio::test]
async fn unbond_without_bundled_contract_is_a_validation_error() {
    let contracts = tempfile::tempdir().unwrap();
    let node = FakeNode::start(NodeState::default()).await;
    let client = client_with_contracts(&node, &contracts);

    let mut out = Vec::new();
    let command = Command::Unbond {
        amount: None,
        deploy: account_args(),
    };
    let error = execute(&client, command, &mut out).await.unwrap_err();

    match error {
        CliError::Validation(ValidationError::MissingBundledContract { name, .. }) => {
            assert_eq!(name, UNBONDING_CONTRACT);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(node.calls().is_empty());
    assert!(out.is_empty());
}

#[tokio::test]
async fn unbond_without_amount_sends_an_empty_optional() {
    let contracts = tempfile::tempdir().unwrap();
    std::fs::write(contracts.path().join(UNBONDING_CONTRACT), b"\x00asm").unwrap();
    let node = FakeNode::start(NodeState::default()).await;
    let client = client_with_contracts(&node, &contracts);

    let mut out = Vec::new();
    let command = Command::Unbond {
        amount: None,
        deploy: account_args(),
    };
    execute(&client, command, &mut out).await.unwrap();

    let state = node.state.lock().unwrap();
    let session = state.deploys[0].body.as_ref().unwrap().session.clone().unwrap();
    assert_eq!(session.args, vec![abi::optional_value("amount", None)]);
}

#[tokio::test]
async fn deploy_with_malformed_from_fails_before_sending() {
    let contracts = tempfile::tempdir().unwrap();
    let node = FakeNode::start(NodeState::default()).await;
    let client = client_with_contracts(&node, &contracts);

    let mut deploy = account_args();
    deploy.from = "abcd".into();
    deploy.session_name = Some("counter".into());
    let mut out = Vec::new();
    let error = execute(&client, Command::Deploy(deploy), &mut out)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        CliError::Validation(ValidationError::InvalidFromAddr(2))
    ));
    assert!(node.calls().is_empty());
}
