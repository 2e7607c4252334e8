//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Barrier;

use omniwallet::blockchain::{BlockchainError, BlockchainResult, ChainId, ChainRpc, Wallet};
use omniwallet::keystore::{FileKeyStore, Keyfile};

/// Well-known development key (first Anvil/Hardhat account).
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Write a keyfile for [`DEV_KEY`] and return a store reading it.
pub fn dev_keystore(dir: &Path) -> FileKeyStore {
    let path = dir.join("key.json");
    let wallet = Wallet::from_private_key(DEV_KEY).unwrap();
    let keyfile = Keyfile::from_wallet(&wallet);
    std::fs::write(&path, serde_json::to_vec(&keyfile).unwrap()).unwrap();
    FileKeyStore::new(vec![path], true)
}

/// A store whose only candidate path does not exist.
pub fn empty_keystore(dir: &Path) -> FileKeyStore {
    FileKeyStore::new(vec![dir.join("missing.json")], true)
}

/// In-memory chain that behaves like a node for the calls a transfer makes.
///
/// Broadcasts are accepted only at the current nonce, which then advances;
/// a stale nonce is rejected the way a real node rejects it.
pub struct MockChain {
    chain_id: u64,
    gas_price: u128,
    nonce: AtomicU64,
    failing: AtomicBool,
    /// Every task reading the nonce waits here first.
    barrier: Option<Arc<Barrier>>,
    /// Pause after reading the nonce.
    delay: Option<Duration>,
    pub sent: Mutex<Vec<Bytes>>,
    pub calls: AtomicUsize,
}

impl MockChain {
    pub fn new(chain_id: u64, nonce: u64, gas_price: u128) -> Self {
        Self {
            chain_id,
            gas_price,
            nonce: AtomicU64::new(nonce),
            failing: AtomicBool::new(false),
            barrier: None,
            delay: None,
            sent: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every call fail with an RPC error.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent_transactions(&self) -> Vec<TxEnvelope> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|raw| TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap())
            .collect()
    }

    fn enter(&self) -> BlockchainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(BlockchainError::Rpc("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainRpc for MockChain {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.enter()?;
        Ok(ChainId(self.chain_id))
    }

    async fn transaction_count(&self, _address: Address) -> BlockchainResult<u64> {
        self.enter()?;
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        let nonce = self.nonce.load(Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(nonce)
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.enter()?;
        Ok(self.gas_price)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> BlockchainResult<TxHash> {
        self.enter()?;
        let envelope = TxEnvelope::decode_2718(&mut raw.as_ref())
            .map_err(|e| BlockchainError::Rejected(e.to_string()))?;

        let expected = self.nonce.load(Ordering::SeqCst);
        if envelope.nonce() != expected {
            return Err(BlockchainError::Rejected(format!(
                "nonce too low: next nonce {}, tx nonce {}",
                expected,
                envelope.nonce()
            )));
        }
        self.nonce.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(raw);
        Ok(*envelope.tx_hash())
    }
}

/// A minimal balance API stand-in on an ephemeral port.
///
/// Answers every request with `status` and `body`, counting hits and
/// remembering the last request line.
pub struct MockBalanceApi {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<String>>>,
}

impl MockBalanceApi {
    pub async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let last_request = Arc::new(Mutex::new(None));

        let counter = hits.clone();
        let recorder = last_request.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let counter = counter.clone();
                let recorder = recorder.clone();
                tokio::spawn(async move {
                    let head = read_request_head(&mut socket).await;
                    counter.fetch_add(1, Ordering::SeqCst);
                    *recorder.lock().unwrap() = head.lines().next().map(str::to_string);

                    let status_text = match status {
                        200 => "200 OK",
                        401 => "401 Unauthorized",
                        404 => "404 Not Found",
                        500 => "500 Internal Server Error",
                        _ => "200 OK",
                    };
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status_text,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            addr,
            hits,
            last_request,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request_line(&self) -> Option<String> {
        self.last_request.lock().unwrap().clone()
    }
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
