use alloy::primitives::{Address, U256};

use crate::domain::{fund_calldata, CallRequest, ChainIdentity, PreparedCall};
use crate::pipeline::FundingError;
use crate::ports::NodePort;

/// Read-side wrapper over the chain node.
pub struct ChainEndpoint<N: NodePort> {
    node: N,
    rpc_url: String,
}

impl<N: NodePort> ChainEndpoint<N> {
    pub fn new(node: N, rpc_url: impl Into<String>) -> Self {
        Self {
            node,
            rpc_url: rpc_url.into(),
        }
    }

    /// Build the descriptor for whatever chain the node currently serves.
    ///
    /// Resolved fresh on every funding attempt: a user who switched networks
    /// mid-session must be simulated against the live chain, so the id is
    /// never carried over from an earlier attempt.
    pub fn resolve_identity(&self) -> Result<ChainIdentity, FundingError> {
        let chain_id = self
            .node
            .chain_id()
            .map_err(FundingError::EndpointUnreachable)?;
        Ok(ChainIdentity::custom(chain_id, &self.rpc_url))
    }

    pub fn balance_of(&self, address: Address) -> Result<U256, FundingError> {
        self.node
            .balance_of(address)
            .map_err(FundingError::EndpointUnreachable)
    }

    /// Dry-run the funding call and pick up a gas estimate. A revert or a
    /// transport failure both surface as a simulation failure; the caller
    /// decides how much of that the user gets to see.
    pub fn simulate_fund(
        &self,
        target: Address,
        from: Address,
        value: U256,
        chain: &ChainIdentity,
    ) -> Result<PreparedCall, FundingError> {
        let request = CallRequest {
            from,
            to: target,
            value,
            data: fund_calldata(),
        };
        self.node
            .call(&request)
            .map_err(FundingError::SimulationFailed)?;
        let gas = self
            .node
            .estimate_gas(&request)
            .map_err(FundingError::SimulationFailed)?;
        Ok(PreparedCall {
            chain_id: chain.chain_id,
            from: request.from,
            to: request.to,
            value: request.value,
            data: request.data,
            gas,
        })
    }
}
