//! Transfer pipeline tests against an in-memory chain.

use std::sync::Arc;
use std::time::Duration;

use alloy::consensus::{SignableTransaction, Transaction, TxEnvelope};
use alloy::primitives::{Address, U256};
use tokio::sync::Barrier;

use omniwallet::blockchain::{BlockchainError, ChainRegistry, ChainRpc};
use omniwallet::config::TransferConfig;
use omniwallet::keystore::KeyStore;
use omniwallet::transfer::{SendStage, TransferError, TransferRequest, TransferService};

mod common;
use common::{MockChain, RECIPIENT};

const GWEI: u128 = 1_000_000_000;
const ONE_ETH: u128 = 1_000_000_000_000_000_000;

struct Fixture {
    service: TransferService,
    primary: Arc<MockChain>,
    secondary: Arc<MockChain>,
    _dir: tempfile::TempDir,
}

fn fixture_with(primary: MockChain, secondary: MockChain, serialize: bool, wallet: bool) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let keystore: Arc<dyn KeyStore> = if wallet {
        Arc::new(common::dev_keystore(dir.path()))
    } else {
        Arc::new(common::empty_keystore(dir.path()))
    };

    let primary = Arc::new(primary);
    let secondary = Arc::new(secondary);
    let chains = ChainRegistry::new(
        primary.clone() as Arc<dyn ChainRpc>,
        secondary.clone() as Arc<dyn ChainRpc>,
    );
    let service = TransferService::new(
        keystore,
        chains,
        &TransferConfig {
            serialize_per_address: serialize,
        },
    );

    Fixture {
        service,
        primary,
        secondary,
        _dir: dir,
    }
}

fn fixture() -> Fixture {
    fixture_with(
        MockChain::new(1, 5, 3 * GWEI),
        MockChain::new(8453, 0, GWEI),
        true,
        true,
    )
}

#[tokio::test]
async fn test_send_builds_expected_transaction() {
    let f = fixture();

    let hash = f
        .service
        .send(TransferRequest::new("eth", RECIPIENT, "1.0").with_gas_price_gwei("10"))
        .await
        .unwrap();

    let sent = f.primary.sent_transactions();
    assert_eq!(sent.len(), 1);
    let tx = &sent[0];
    assert_eq!(*tx.tx_hash(), hash);
    assert_eq!(tx.nonce(), 5);
    assert_eq!(tx.gas_price(), Some(10 * GWEI));
    assert_eq!(tx.gas_limit(), 21_000);
    assert_eq!(tx.value(), U256::from(ONE_ETH));
    assert_eq!(tx.chain_id(), Some(1));
    assert_eq!(tx.to(), Some(RECIPIENT.parse::<Address>().unwrap()));
    assert!(tx.input().is_empty());

    let TxEnvelope::Legacy(legacy) = tx else {
        panic!("expected a legacy transaction");
    };
    let signer = legacy
        .signature()
        .recover_address_from_prehash(&legacy.tx().signature_hash())
        .unwrap();
    assert_eq!(signer, common::DEV_ADDRESS.parse::<Address>().unwrap());
}

#[tokio::test]
async fn test_gas_price_override_skips_node_price() {
    let f = fixture();

    f.service
        .send(TransferRequest::new("eth", RECIPIENT, "0.5").with_gas_price_gwei("2.5"))
        .await
        .unwrap();

    let tx = &f.primary.sent_transactions()[0];
    assert_eq!(tx.gas_price(), Some(2_500_000_000));
    assert_eq!(tx.value(), U256::from(ONE_ETH / 2));
}

#[tokio::test]
async fn test_base_routes_to_secondary_chain() {
    let f = fixture();

    f.service
        .send(TransferRequest::new("Base", RECIPIENT, "0.01"))
        .await
        .unwrap();

    assert_eq!(f.primary.call_count(), 0);
    let tx = &f.secondary.sent_transactions()[0];
    assert_eq!(tx.chain_id(), Some(8453));
    assert_eq!(tx.nonce(), 0);
    assert_eq!(tx.gas_price(), Some(GWEI));
}

#[tokio::test]
async fn test_unknown_chain_falls_back_to_primary() {
    let f = fixture();

    f.service
        .send(TransferRequest::new("polygon", RECIPIENT, "0.01"))
        .await
        .unwrap();

    assert_eq!(f.primary.sent_transactions().len(), 1);
    assert_eq!(f.secondary.call_count(), 0);
}

#[tokio::test]
async fn test_validation_happens_before_any_chain_call() {
    let f = fixture();

    let cases = [
        TransferRequest::default(),
        TransferRequest {
            to: Some(RECIPIENT.to_string()),
            ..TransferRequest::default()
        },
        TransferRequest::new("eth", "not-an-address", "1"),
        TransferRequest::new("eth", RECIPIENT, "lots"),
        TransferRequest::new("eth", RECIPIENT, "0"),
        TransferRequest::new("eth", RECIPIENT, "-1"),
    ];

    for request in cases {
        let err = f.service.send(request.clone()).await.unwrap_err();
        assert!(
            matches!(err, TransferError::Validation(_)),
            "{request:?} gave {err:?}"
        );
    }
    assert_eq!(f.primary.call_count(), 0);
}

#[tokio::test]
async fn test_missing_fields_message() {
    let f = fixture();

    let err = f.service.send(TransferRequest::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "missing 'to' or 'amount_eth'");
}

#[tokio::test]
async fn test_no_wallet() {
    let f = fixture_with(
        MockChain::new(1, 0, GWEI),
        MockChain::new(8453, 0, GWEI),
        true,
        false,
    );

    let err = f
        .service
        .send(TransferRequest::new("eth", RECIPIENT, "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::NoWallet));
    assert_eq!(f.primary.call_count(), 0);
}

#[tokio::test]
async fn test_no_wallet_takes_precedence_over_malformed_fields() {
    let f = fixture_with(
        MockChain::new(1, 0, GWEI),
        MockChain::new(8453, 0, GWEI),
        true,
        false,
    );

    let cases = [
        TransferRequest::new("eth", "not-an-address", "1"),
        TransferRequest::new("eth", RECIPIENT, "lots"),
        TransferRequest::new("eth", RECIPIENT, "0"),
        TransferRequest::new("eth", RECIPIENT, "1").with_gas_price_gwei("fast"),
    ];
    for request in cases {
        let err = f.service.send(request.clone()).await.unwrap_err();
        assert!(matches!(err, TransferError::NoWallet), "{request:?} gave {err:?}");
    }

    let err = f.service.send(TransferRequest::default()).await.unwrap_err();
    assert!(matches!(err, TransferError::Validation(_)));
    assert_eq!(f.primary.call_count(), 0);
}

#[tokio::test]
async fn test_rpc_failure_is_a_send_error() {
    let f = fixture();
    f.primary.fail();

    let err = f
        .service
        .send(TransferRequest::new("eth", RECIPIENT, "1"))
        .await
        .unwrap_err();

    match err {
        TransferError::Send { stage, source } => {
            assert_eq!(stage, SendStage::Nonce);
            assert!(matches!(source, BlockchainError::Rpc(_)));
        }
        other => panic!("expected send error, got {other:?}"),
    }
    assert!(f.primary.sent_transactions().is_empty());
}

#[tokio::test]
async fn test_nonce_is_read_fresh_for_each_send() {
    let f = fixture();

    for _ in 0..3 {
        f.service
            .send(TransferRequest::new("eth", RECIPIENT, "0.1"))
            .await
            .unwrap();
    }

    let nonces: Vec<u64> = f.primary.sent_transactions().iter().map(|tx| tx.nonce()).collect();
    assert_eq!(nonces, vec![5, 6, 7]);
}

#[tokio::test]
async fn test_concurrent_sends_race_without_serialization() {
    let barrier = Arc::new(Barrier::new(2));
    let f = fixture_with(
        MockChain::new(1, 9, GWEI).with_barrier(barrier),
        MockChain::new(8453, 0, GWEI),
        false,
        true,
    );

    let (a, b) = tokio::join!(
        f.service.send(TransferRequest::new("eth", RECIPIENT, "0.1")),
        f.service.send(TransferRequest::new("eth", RECIPIENT, "0.2")),
    );

    let results = [a, b];
    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(succeeded, 1, "both sends read nonce 9; only one can land");

    let failure = results.into_iter().find_map(Result::err).unwrap();
    assert!(matches!(
        failure,
        TransferError::Send {
            stage: SendStage::Broadcast,
            source: BlockchainError::Rejected(_)
        }
    ));
    assert_eq!(f.primary.sent_transactions()[0].nonce(), 9);
}

#[tokio::test]
async fn test_concurrent_sends_serialized_per_address() {
    let f = fixture_with(
        MockChain::new(1, 9, GWEI).with_delay(Duration::from_millis(50)),
        MockChain::new(8453, 0, GWEI),
        true,
        true,
    );

    let (a, b) = tokio::join!(
        f.service.send(TransferRequest::new("eth", RECIPIENT, "0.1")),
        f.service.send(TransferRequest::new("eth", RECIPIENT, "0.2")),
    );
    assert!(a.is_ok());
    assert!(b.is_ok());

    let mut nonces: Vec<u64> = f.primary.sent_transactions().iter().map(|tx| tx.nonce()).collect();
    nonces.sort_unstable();
    assert_eq!(nonces, vec![9, 10]);
}
