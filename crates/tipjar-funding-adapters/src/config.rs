/// Anvil's default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// First contract deployed by the default Anvil account at nonce 0.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Dev,
    Production,
}

#[derive(Debug, Clone)]
pub struct FundingAdapterConfig {
    pub rpc_url: String,
    pub eip1193_proxy_url: Option<String>,
    pub rpc_timeout_ms: u64,
    pub runtime_profile: RuntimeProfile,
    pub contract_address: String,
}

impl Default for FundingAdapterConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_owned(),
            eip1193_proxy_url: None,
            rpc_timeout_ms: 15_000,
            runtime_profile: RuntimeProfile::Dev,
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_owned(),
        }
    }
}

impl FundingAdapterConfig {
    /// Environment overrides on top of the fixed local defaults. Unparseable
    /// values fall back to the default rather than failing startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("TIPJAR_RPC_URL") {
            if !url.is_empty() {
                config.rpc_url = url;
            }
        }
        if let Ok(url) = std::env::var("TIPJAR_EIP1193_PROXY_URL") {
            if !url.is_empty() {
                config.eip1193_proxy_url = Some(url);
            }
        }
        if let Ok(raw) = std::env::var("TIPJAR_RPC_TIMEOUT_MS") {
            if let Ok(ms) = raw.parse() {
                config.rpc_timeout_ms = ms;
            }
        }
        if let Ok(profile) = std::env::var("TIPJAR_RUNTIME_PROFILE") {
            if profile.eq_ignore_ascii_case("production") {
                config.runtime_profile = RuntimeProfile::Production;
            }
        }
        if let Ok(address) = std::env::var("TIPJAR_CONTRACT_ADDRESS") {
            if !address.is_empty() {
                config.contract_address = address;
            }
        }
        config
    }

    /// Production profiles never fall back to the deterministic provider.
    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }
}
