use anyhow::{anyhow, Result};
use ethers::providers::{Http, Provider};
use ethers::types::Address;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Environment variable overriding the RPC endpoint
pub const ENV_RPC_URL: &str = "MULTISENDER_RPC_URL";
/// Environment variable overriding the multisender contract address
pub const ENV_CONTRACT_ADDRESS: &str = "MULTISENDER_CONTRACT_ADDRESS";
/// Environment variable holding the signing key used to connect on startup
pub const ENV_PRIVATE_KEY: &str = "MULTISENDER_PRIVATE_KEY";

/// Multisender deployment used when nothing else is configured (Somnia Testnet)
pub const DEFAULT_MULTISENDER_ADDRESS: &str = "0xf5934921684f6f581A5C3198EB4f62a9FA37D6b4";

pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_RECEIPT_TIMEOUT_SECS: u64 = 120;

/// Native currency metadata of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// An EVM chain definition: identity, currency, RPC, and explorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainConfig {
    pub label: &'static str,
    pub chain_id: u64,
    pub currency: NativeCurrency,
    pub default_rpc: &'static str,
    pub explorer_name: &'static str,
    pub explorer_url: &'static str,
    pub testnet: bool,
    /// Whether Type 2 (EIP-1559) transactions are used
    pub supports_eip1559: bool,
}

pub const SOMNIA_TESTNET: ChainConfig = ChainConfig {
    label: "Somnia Testnet",
    chain_id: 50312,
    currency: NativeCurrency {
        name: "Somnia Test Token",
        symbol: "STT",
        decimals: 18,
    },
    default_rpc: "https://dream-rpc.somnia.network/",
    explorer_name: "Shannon Explorer",
    explorer_url: "https://shannon-explorer.somnia.network",
    testnet: true,
    supports_eip1559: false,
};

/// Chains the application knows about.
pub const CHAINS: &[ChainConfig] = &[SOMNIA_TESTNET];

/// Find a chain by chain ID
pub fn find_chain_by_id(chain_id: u64) -> Option<&'static ChainConfig> {
    CHAINS.iter().find(|c| c.chain_id == chain_id)
}

impl ChainConfig {
    /// Full URL to view a transaction on the block explorer
    pub fn tx_explorer_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), tx_hash)
    }

    /// Full URL to view an address on the block explorer
    pub fn address_explorer_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url.trim_end_matches('/'), address)
    }
}

/// How often and how long to wait for a receipt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReceiptPolling {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for ReceiptPolling {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_RECEIPT_POLL_INTERVAL_MS),
            timeout: Duration::from_secs(DEFAULT_RECEIPT_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub chain: ChainConfig,
    pub rpc_url: String,
    pub multisender_address: Address,
    pub receipt_polling: ReceiptPolling,
}

impl Config {
    pub fn new(chain: ChainConfig, rpc_url: String, multisender_address: Address) -> Self {
        Self {
            chain,
            rpc_url,
            multisender_address,
            receipt_polling: ReceiptPolling::default(),
        }
    }

    /// Defaults for `chain`, then `MULTISENDER_RPC_URL` / `MULTISENDER_CONTRACT_ADDRESS`.
    pub fn from_env(chain: ChainConfig) -> Result<Self> {
        let mut config = Self::new(
            chain,
            chain.default_rpc.to_string(),
            parse_contract_address(DEFAULT_MULTISENDER_ADDRESS)?,
        );

        if let Ok(rpc) = env::var(ENV_RPC_URL) {
            config.set_rpc_url(&rpc)?;
        }
        if let Ok(addr) = env::var(ENV_CONTRACT_ADDRESS) {
            config.multisender_address = parse_contract_address(&addr)?;
        }
        Ok(config)
    }

    /// Apply persisted user overrides on top of this config.
    pub fn apply_settings(&mut self, settings: &crate::user_settings::UserSettings) -> Result<()> {
        if let Some(rpc) = settings.rpc_url_override.as_deref() {
            self.set_rpc_url(rpc)?;
        }
        if let Some(addr) = settings.multisender_address_override.as_deref() {
            self.multisender_address = parse_contract_address(addr)?;
        }
        self.receipt_polling = settings.receipt_polling();
        Ok(())
    }

    pub fn set_rpc_url(&mut self, rpc_url: &str) -> Result<()> {
        let trimmed = rpc_url.trim();
        let url = Url::parse(trimmed).map_err(|e| anyhow!("Invalid RPC URL '{}': {}", trimmed, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("RPC URL must use http or https: {}", trimmed));
        }
        self.rpc_url = trimmed.to_string();
        Ok(())
    }

    pub fn native_token(&self) -> &str {
        self.chain.currency.symbol
    }

    pub fn network_label(&self) -> &str {
        self.chain.label
    }

    pub fn get_provider(&self) -> Result<Arc<Provider<Http>>> {
        let url = Url::parse(&self.rpc_url)?;
        let provider = Provider::<Http>::try_from(url.as_str())?;
        Ok(Arc::new(provider))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            SOMNIA_TESTNET,
            SOMNIA_TESTNET.default_rpc.to_string(),
            DEFAULT_MULTISENDER_ADDRESS.parse().unwrap_or_default(),
        )
    }
}

/// Parse a contract address, requiring the `0x` + 40 hex digit form.
pub fn parse_contract_address(input: &str) -> Result<Address> {
    let trimmed = input.trim();
    if !crate::validator::is_valid_address(trimmed) {
        return Err(anyhow!("Invalid multisender contract address: {}", trimmed));
    }
    trimmed
        .parse()
        .map_err(|_| anyhow!("Invalid multisender contract address: {}", trimmed))
}
