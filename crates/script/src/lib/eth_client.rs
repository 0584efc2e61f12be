use alloy::contract::SolCallBuilder;
use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::sol_types::{decode_revert_reason, SolCall, SolValue};
use alloy::transports::http::reqwest::Url;
use direct_staking_shared::authorization::StakeAuthorization;
use direct_staking_shared::stake_request::StakeRequest;
use tracing::Instrument;

use std::sync::Arc;
use thiserror::Error;

use DirectStaking::DirectStakingInstance;
use ProxyAdmin::ProxyAdminInstance;
use RewardPool::RewardPoolInstance;

use crate::env;
use crate::signer::{decode_key, KeyError};

sol! {
    #[sol(rpc)]
    interface DirectStaking {
        function initialize() external;
        function setETHDepositContract(address ethDepositContract) external;
        function setRewardPool(address rewardPool) external;
        function setSigner(address signer) external;
        function toggleShangHai() external;

        function stake(
            address claimaddr,
            address withdrawaddr,
            bytes[] calldata pubkeys,
            bytes[] calldata signatures,
            bytes calldata paySig,
            uint256 extradata,
            uint256 tips
        ) external payable;

        function exit(uint256 validatorId) external;
        function batchExit(uint256[] calldata validatorIds) external;
        function emergencyExit(uint256 validatorId, bool claimRewards) external;
        function batchEmergencyExit(uint256[] calldata validatorIds, bool claimRewards) external;

        function getExitQueueLength() external view returns (uint256);
        function getExitQueue(uint256 from, uint256 to) external view returns (bytes[] memory);
        function DEPOSIT_SIZE() external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface RewardPool {
        function initialize() external;
        function CONTROLLER_ROLE() external view returns (bytes32);
        function grantRole(bytes32 role, address account) external;
        function hasRole(bytes32 role, address account) external view returns (bool);
        function setManagerFeeShare(uint256 milli) external;

        function updateReward() external;
        function claimRewards(address beneficiary, uint256 amount) external;
        function claimRewardsFor(address claimaddr) external;
        function withdrawManagerRevenue(uint256 amount, address to) external;

        function getPendingReward(address claimaddr) external view returns (uint256);
        function getPendingManagerRevenue() external view returns (uint256);
        function getAccountedBalance() external view returns (uint256);
    }
}

sol! {
    #[sol(rpc)]
    interface ProxyAdmin {
        function upgrade(address proxy, address implementation) external;
    }
}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Contract rejected: {0}")]
    Rejection(String),

    #[error("Transaction {0} reverted without reason")]
    Reverted(B256),

    #[error("Deployment transaction {0} did not create a contract")]
    DeploymentFailed(B256),

    #[error("Other alloy error {0:#?}")]
    OtherAlloyError(alloy::contract::Error),

    #[error("Transport error {0:#?}")]
    TransportError(#[from] alloy::transports::TransportError),

    #[error("Transaction error {0:#?}")]
    TransactionError(#[from] alloy::providers::PendingTransactionError),
}

impl From<alloy::contract::Error> for ContractError {
    fn from(error: alloy::contract::Error) -> Self {
        if let alloy::contract::Error::TransportError(alloy::transports::RpcError::ErrorResp(ref error_payload)) = error
        {
            if let Some(reason) = error_payload
                .as_revert_data()
                .and_then(|data| decode_revert_reason(&data))
            {
                ContractError::Rejection(reason)
            } else if error_payload.message.contains("execution reverted") {
                ContractError::Rejection(error_payload.message.to_string())
            } else {
                ContractError::OtherAlloyError(error)
            }
        } else {
            ContractError::OtherAlloyError(error)
        }
    }
}

/// Preflight, send and await a state-changing call. A reverted receipt is
/// replayed as `eth_call` to surface the revert reason.
async fn execute<P, C>(label: &'static str, tx_builder: SolCallBuilder<P, C>) -> Result<TransactionReceipt, ContractError>
where
    P: Provider<Ethereum>,
    C: SolCall,
{
    if !env::SKIP_PREFLIGHT_CALL.is_set() {
        if let Err(err) = tx_builder.call().await {
            tracing::error!(call = label, "Preflight call reverted: {err:?}");
            return Err(err.into());
        }
    }

    tracing::info!(call = label, "Submitting transaction");
    let tx = tx_builder
        .send()
        .instrument(tracing::info_span!("send_tx", call = label))
        .await
        .inspect(|val| tracing::debug!(call = label, "Submitted transaction {}", val.tx_hash()))
        .inspect_err(|err| tracing::error!(call = label, "Failed to submit transaction {err:?}"))?;

    let tx_result = tx
        .get_receipt()
        .instrument(tracing::info_span!("get_receipt", call = label))
        .await
        .inspect(|val| {
            if val.status() {
                tracing::info!(call = label, "Transaction completed {:#?}", val.transaction_hash)
            } else {
                tracing::error!(call = label, "Transaction reverted {:#?}", val.transaction_hash)
            }
        })
        .inspect_err(|err| tracing::error!(call = label, "Transaction failed {err:?}"))?;

    if !tx_result.status() {
        return match tx_builder.call().await {
            Ok(_) => Err(ContractError::Reverted(tx_result.transaction_hash)),
            Err(e) => Err(e.into()),
        };
    }
    Ok(tx_result)
}

fn to_uint_ids(validator_ids: &[u64]) -> Vec<U256> {
    validator_ids.iter().map(|id| U256::from(*id)).collect()
}

pub struct DirectStakingContractWrapper<P>
where
    P: Provider<Ethereum>,
{
    contract: DirectStakingInstance<Arc<P>>,
}

impl<P> DirectStakingContractWrapper<P>
where
    P: Provider<Ethereum>,
{
    pub fn new(provider: Arc<P>, contract_address: Address) -> Self {
        let contract = DirectStakingInstance::new(contract_address, provider);
        Self { contract }
    }

    pub fn address(&self) -> &Address {
        self.contract.address()
    }

    pub async fn initialize(&self) -> Result<TransactionReceipt, ContractError> {
        execute("DirectStaking.initialize", self.contract.initialize()).await
    }

    pub async fn set_eth_deposit_contract(&self, deposit_contract: Address) -> Result<TransactionReceipt, ContractError> {
        execute(
            "DirectStaking.setETHDepositContract",
            self.contract.setETHDepositContract(deposit_contract),
        )
        .await
    }

    pub async fn set_reward_pool(&self, reward_pool: Address) -> Result<TransactionReceipt, ContractError> {
        execute("DirectStaking.setRewardPool", self.contract.setRewardPool(reward_pool)).await
    }

    pub async fn set_signer(&self, signer: Address) -> Result<TransactionReceipt, ContractError> {
        execute("DirectStaking.setSigner", self.contract.setSigner(signer)).await
    }

    pub async fn toggle_shanghai(&self) -> Result<TransactionReceipt, ContractError> {
        execute("DirectStaking.toggleShangHai", self.contract.toggleShangHai()).await
    }

    pub async fn stake(
        &self,
        request: &StakeRequest,
        authorization: &StakeAuthorization,
        tips: U256,
    ) -> Result<TransactionReceipt, ContractError> {
        let value = request.stake_value(tips);
        tracing::info!(
            validators = request.validator_count(),
            %value,
            claim_address = %request.claim_address,
            "Staking"
        );
        let pubkeys: Vec<Bytes> = request.pubkeys.iter().map(|pk| Bytes::copy_from_slice(pk)).collect();
        let signatures: Vec<Bytes> = request.signatures.iter().map(|sig| Bytes::copy_from_slice(sig)).collect();
        let tx_builder = self
            .contract
            .stake(
                request.claim_address,
                request.withdraw_address,
                pubkeys,
                signatures,
                Bytes::copy_from_slice(authorization.as_bytes()),
                request.extra_data,
                tips,
            )
            .value(value);
        execute("DirectStaking.stake", tx_builder).await
    }

    pub async fn exit(&self, validator_ids: &[u64]) -> Result<TransactionReceipt, ContractError> {
        match validator_ids {
            [validator_id] => execute("DirectStaking.exit", self.contract.exit(U256::from(*validator_id))).await,
            ids => execute("DirectStaking.batchExit", self.contract.batchExit(to_uint_ids(ids))).await,
        }
    }

    pub async fn emergency_exit(
        &self,
        validator_ids: &[u64],
        claim_rewards: bool,
    ) -> Result<TransactionReceipt, ContractError> {
        match validator_ids {
            [validator_id] => {
                execute(
                    "DirectStaking.emergencyExit",
                    self.contract.emergencyExit(U256::from(*validator_id), claim_rewards),
                )
                .await
            }
            ids => {
                execute(
                    "DirectStaking.batchEmergencyExit",
                    self.contract.batchEmergencyExit(to_uint_ids(ids), claim_rewards),
                )
                .await
            }
        }
    }

    pub async fn get_exit_queue_length(&self) -> Result<U256, ContractError> {
        let length = self
            .contract
            .getExitQueueLength()
            .call()
            .await
            .inspect_err(|err| tracing::error!("Failed to read exit queue length {err:?}"))?;
        Ok(length)
    }

    pub async fn get_exit_queue(&self, from: U256, to: U256) -> Result<Vec<Bytes>, ContractError> {
        let queue = self
            .contract
            .getExitQueue(from, to)
            .call()
            .await
            .inspect_err(|err| tracing::error!(%from, %to, "Failed to read exit queue {err:?}"))?;
        Ok(queue)
    }

    pub async fn deposit_size(&self) -> Result<U256, ContractError> {
        Ok(self.contract.DEPOSIT_SIZE().call().await?)
    }
}

pub struct RewardPoolContractWrapper<P>
where
    P: Provider<Ethereum>,
{
    contract: RewardPoolInstance<Arc<P>>,
}

impl<P> RewardPoolContractWrapper<P>
where
    P: Provider<Ethereum>,
{
    pub fn new(provider: Arc<P>, contract_address: Address) -> Self {
        let contract = RewardPoolInstance::new(contract_address, provider);
        Self { contract }
    }

    pub fn address(&self) -> &Address {
        self.contract.address()
    }

    pub async fn initialize(&self) -> Result<TransactionReceipt, ContractError> {
        execute("RewardPool.initialize", self.contract.initialize()).await
    }

    pub async fn controller_role(&self) -> Result<B256, ContractError> {
        Ok(self.contract.CONTROLLER_ROLE().call().await?)
    }

    pub async fn has_controller_role(&self, account: Address) -> Result<bool, ContractError> {
        let role = self.controller_role().await?;
        Ok(self.contract.hasRole(role, account).call().await?)
    }

    pub async fn grant_controller_role(&self, account: Address) -> Result<TransactionReceipt, ContractError> {
        let role = self.controller_role().await?;
        tracing::info!(%account, %role, "Granting controller role");
        execute("RewardPool.grantRole", self.contract.grantRole(role, account)).await
    }

    pub async fn set_manager_fee_share(&self, milli: u64) -> Result<TransactionReceipt, ContractError> {
        execute(
            "RewardPool.setManagerFeeShare",
            self.contract.setManagerFeeShare(U256::from(milli)),
        )
        .await
    }

    pub async fn update_reward(&self) -> Result<TransactionReceipt, ContractError> {
        execute("RewardPool.updateReward", self.contract.updateReward()).await
    }

    pub async fn claim_rewards(&self, beneficiary: Address, amount: U256) -> Result<TransactionReceipt, ContractError> {
        execute("RewardPool.claimRewards", self.contract.claimRewards(beneficiary, amount)).await
    }

    pub async fn claim_rewards_for(&self, claim_address: Address) -> Result<TransactionReceipt, ContractError> {
        execute("RewardPool.claimRewardsFor", self.contract.claimRewardsFor(claim_address)).await
    }

    pub async fn withdraw_manager_revenue(&self, amount: U256, to: Address) -> Result<TransactionReceipt, ContractError> {
        execute(
            "RewardPool.withdrawManagerRevenue",
            self.contract.withdrawManagerRevenue(amount, to),
        )
        .await
    }

    pub async fn get_pending_reward(&self, claim_address: Address) -> Result<U256, ContractError> {
        let reward = self
            .contract
            .getPendingReward(claim_address)
            .call()
            .await
            .inspect(|val| tracing::debug!(%claim_address, "Pending reward {val}"))
            .inspect_err(|err| tracing::error!(%claim_address, "Failed to read pending reward {err:?}"))?;
        Ok(reward)
    }

    pub async fn get_pending_manager_revenue(&self) -> Result<U256, ContractError> {
        Ok(self.contract.getPendingManagerRevenue().call().await?)
    }

    pub async fn get_accounted_balance(&self) -> Result<U256, ContractError> {
        Ok(self.contract.getAccountedBalance().call().await?)
    }
}

pub struct ProxyAdminWrapper<P>
where
    P: Provider<Ethereum>,
{
    contract: ProxyAdminInstance<Arc<P>>,
}

impl<P> ProxyAdminWrapper<P>
where
    P: Provider<Ethereum>,
{
    pub fn new(provider: Arc<P>, contract_address: Address) -> Self {
        let contract = ProxyAdminInstance::new(contract_address, provider);
        Self { contract }
    }

    pub async fn upgrade(&self, proxy: Address, implementation: Address) -> Result<TransactionReceipt, ContractError> {
        tracing::info!(%proxy, %implementation, "Upgrading proxy");
        execute("ProxyAdmin.upgrade", self.contract.upgrade(proxy, implementation)).await
    }
}

/// Sends a contract creation transaction and returns the created address.
pub async fn deploy_bytecode<P>(provider: &P, creation_code: Bytes) -> Result<Address, ContractError>
where
    P: Provider<Ethereum>,
{
    let tx = TransactionRequest::default().with_deploy_code(creation_code);
    let receipt = provider
        .send_transaction(tx)
        .instrument(tracing::info_span!("send_deploy_tx"))
        .await?
        .get_receipt()
        .instrument(tracing::info_span!("get_deploy_receipt"))
        .await?;

    match receipt.contract_address {
        Some(address) if receipt.status() => {
            tracing::info!(%address, "Deployed contract");
            Ok(address)
        }
        _ => Err(ContractError::DeploymentFailed(receipt.transaction_hash)),
    }
}

/// Creation code for `TransparentUpgradeableProxy(logic, admin, "")`.
pub fn proxy_creation_code(proxy_bytecode: &Bytes, logic: Address, admin: Address) -> Bytes {
    let constructor_args = (logic, admin, Bytes::new()).abi_encode_params();
    let mut code = proxy_bytecode.to_vec();
    code.extend_from_slice(&constructor_args);
    code.into()
}

pub type DefaultProvider = alloy::providers::fillers::FillProvider<
    alloy::providers::fillers::JoinFill<
        alloy::providers::fillers::JoinFill<
            alloy::providers::Identity,
            <Ethereum as alloy::providers::fillers::RecommendedFillers>::RecommendedFillers,
        >,
        alloy::providers::fillers::WalletFiller<EthereumWallet>,
    >,
    alloy::providers::RootProvider,
>;

pub type DirectStakingContract = DirectStakingContractWrapper<DefaultProvider>;
pub type RewardPoolContract = RewardPoolContractWrapper<DefaultProvider>;
pub type ProxyAdminContract = ProxyAdminWrapper<DefaultProvider>;

pub struct ProviderFactory {}
impl ProviderFactory {
    pub fn create_provider(key: k256::SecretKey, endpoint: Url) -> DefaultProvider {
        let signer: PrivateKeySigner = PrivateKeySigner::from(key);
        let wallet: EthereumWallet = EthereumWallet::from(signer);
        ProviderBuilder::new().wallet(wallet).connect_http(endpoint)
    }

    pub fn create_provider_decode_key(key_str: &str, endpoint: Url) -> Result<DefaultProvider, KeyError> {
        let key = decode_key(key_str)?;
        Ok(Self::create_provider(key, endpoint))
    }
}
