//! Wallet-provider abstraction and its ethers-rs implementation.
//!
//! The submission flow only needs four things from a wallet: who is signing,
//! which chain it is on, a way to sign and broadcast, and a way to look up a
//! receipt. Everything else (key storage, RPC transport) stays behind the trait.

use crate::config::Config;
use crate::error::{classify_rpc_error, MultisendError};
use ethers::prelude::*;
use ethers::providers::MiddlewareError;
use ethers::types::transaction::eip2718::TypedTransaction;
use std::sync::Arc;
use tracing::{error, info};

#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Account that signs and pays
    fn address(&self) -> Address;

    fn chain_id(&self) -> u64;

    /// Sign `tx` and broadcast it. Returns as soon as the node accepts it.
    async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash, MultisendError>;

    /// `Ok(None)` while the transaction is not mined yet.
    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>, MultisendError>;
}

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Local private-key wallet talking to an HTTP JSON-RPC endpoint.
#[derive(Clone)]
pub struct EthersWallet {
    client: Arc<SignerClient>,
    chain_id: u64,
}

impl EthersWallet {
    /// Build a wallet from a hex private key for the configured chain.
    pub fn from_private_key(config: &Config, private_key: &str) -> Result<Self, MultisendError> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        let wallet: LocalWallet = key
            .parse()
            .map_err(|_| MultisendError::InvalidInput("Invalid private key".to_string()))?;
        let wallet = wallet.with_chain_id(config.chain.chain_id);

        let provider = config
            .get_provider()
            .map_err(|e| MultisendError::NetworkOrRpcFailure(e.to_string()))?;
        let client = SignerMiddleware::new((*provider).clone(), wallet);

        Ok(Self {
            client: Arc::new(client),
            chain_id: config.chain.chain_id,
        })
    }

    /// Verify the RPC endpoint serves the configured chain.
    pub async fn verify_chain(&self) -> Result<(), MultisendError> {
        let remote = self
            .client
            .get_chainid()
            .await
            .map_err(|e| MultisendError::NetworkOrRpcFailure(e.to_string()))?;
        if remote != U256::from(self.chain_id) {
            return Err(MultisendError::NetworkOrRpcFailure(format!(
                "RPC endpoint is on chain {} but chain {} is configured",
                remote, self.chain_id
            )));
        }
        Ok(())
    }

    /// Native balance of the connected account.
    pub async fn balance(&self) -> Result<U256, MultisendError> {
        self.client
            .get_balance(self.address(), None)
            .await
            .map_err(|e| MultisendError::NetworkOrRpcFailure(e.to_string()))
    }
}

fn map_middleware_error<E: MiddlewareError>(e: E) -> MultisendError {
    let message = e.to_string();
    let classified = match e.as_error_response() {
        Some(rpc) => {
            let revert = rpc.as_revert_data();
            classify_rpc_error(&rpc.message, Some(rpc.code), revert.as_deref())
        }
        None => classify_rpc_error(&message, None, None),
    };
    error!("Wallet request failed: {}", message);
    classified
}

impl WalletProvider for EthersWallet {
    fn address(&self) -> Address {
        self.client.address()
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn send_transaction(&self, tx: TypedTransaction) -> Result<TxHash, MultisendError> {
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(map_middleware_error)?;
        let hash = pending.tx_hash();
        info!("Transaction sent: {:?}", hash);
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>, MultisendError> {
        self.client
            .get_transaction_receipt(hash)
            .await
            .map_err(map_middleware_error)
    }
}
