//! Plaintext JSON keyfile store.
//!
//! The private key is written unencrypted. This is the zero-setup trade-off
//! the wallet makes for local signing; anything that needs key protection at
//! rest should provide a different [`KeyStore`] implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;

use crate::blockchain::Wallet;
use crate::config::KeystoreConfig;
use crate::keystore::keyfile::Keyfile;
use crate::keystore::{KeyStore, KeyStoreError};

/// Keyfile store over a fixed list of candidate paths.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    /// Candidate locations, highest priority first.
    paths: Vec<PathBuf>,
    verify_address: bool,
}

impl FileKeyStore {
    pub fn new(paths: Vec<PathBuf>, verify_address: bool) -> Self {
        Self {
            paths,
            verify_address,
        }
    }

    pub fn from_config(config: &KeystoreConfig) -> Self {
        Self::new(config.key_paths.clone(), config.verify_address_on_load)
    }

    /// The keyfile in use: the first candidate that exists.
    pub fn existing_path(&self) -> Option<&Path> {
        self.paths.iter().map(PathBuf::as_path).find(|p| p.exists())
    }

    fn read_wallet(&self, path: &Path) -> Result<Wallet, String> {
        let content = fs::read_to_string(path).map_err(|e| format!("unreadable: {}", e))?;
        let keyfile: Keyfile =
            serde_json::from_str(&content).map_err(|e| format!("malformed keyfile: {}", e))?;

        let recorded: Address = keyfile
            .address
            .trim()
            .parse()
            .map_err(|e| format!("invalid address field: {}", e))?;
        let wallet = Wallet::from_private_key(&keyfile.private_key)
            .map_err(|e| e.to_string())?
            .with_recorded_address(recorded);

        if self.verify_address && !wallet.is_consistent() {
            return Err(format!(
                "address {} does not match private key (derives {})",
                recorded,
                wallet.signer_address()
            ));
        }
        Ok(wallet)
    }

    fn write_keyfile(path: &Path, keyfile: &Keyfile) -> Result<(), KeyStoreError> {
        let json = serde_json::to_vec(keyfile)?;
        let io_err = |source| KeyStoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        Ok(())
    }
}

fn parent_exists(path: &Path) -> bool {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => true,
        Some(parent) => parent.is_dir(),
        None => false,
    }
}

impl KeyStore for FileKeyStore {
    fn load_wallet(&self) -> Option<Wallet> {
        let path = self.existing_path()?;
        match self.read_wallet(path) {
            Ok(wallet) => Some(wallet),
            Err(reason) => {
                tracing::warn!(path = %path.display(), %reason, "Ignoring unusable keyfile");
                None
            }
        }
    }

    fn ensure_wallet(&self) -> Result<Wallet, KeyStoreError> {
        if let Some(wallet) = self.load_wallet() {
            return Ok(wallet);
        }
        // Never replace key material we failed to read.
        if let Some(path) = self.existing_path() {
            return Err(KeyStoreError::KeyfileUnusable(path.to_path_buf()));
        }

        let wallet = Wallet::random();
        let keyfile = Keyfile::from_wallet(&wallet);

        for path in self.paths.iter().filter(|p| parent_exists(p)) {
            match Self::write_keyfile(path, &keyfile) {
                Ok(()) => {
                    tracing::info!(
                        path = %path.display(),
                        address = %wallet.address(),
                        "Created new local wallet (private key stored unencrypted)"
                    );
                    return Ok(wallet);
                }
                Err(e) => tracing::warn!(error = %e, "Keyfile location not writable"),
            }
        }

        Err(KeyStoreError::NoWritableLocation)
    }
}
