use std::path::Path;

use alloy::primitives::B256;
use direct_staking_shared::stake_request::deposit_size_wei;

use crate::scripts::prelude::ScriptRuntime;
use crate::scripts::sign::SignedStakeManifest;
use crate::utils;

pub async fn run(runtime: &ScriptRuntime, manifest_path: &Path, dry_run: bool) -> anyhow::Result<Option<B256>> {
    tracing::info!("Reading signed manifest from {:?}", manifest_path.as_os_str());
    let manifest: SignedStakeManifest = utils::read_json(manifest_path)?;

    let direct_staking = runtime.direct_staking()?;
    manifest.verify(
        runtime.network(),
        Some(*direct_staking.address()),
        runtime.expected_signer(),
    )?;

    let deposit_size = direct_staking.deposit_size().await?;
    if deposit_size != deposit_size_wei() {
        anyhow::bail!("Contract deposit size {deposit_size} differs from {}", deposit_size_wei());
    }
    tracing::info!(
        digest = %manifest.digest,
        validators = manifest.request.validator_count(),
        value = %manifest.stake_value(),
        "Manifest verified"
    );

    if dry_run || runtime.is_dry_run() {
        tracing::info!("Dry run is set, not staking");
        return Ok(None);
    }

    let receipt = direct_staking
        .stake(&manifest.request, &manifest.authorization, manifest.tips)
        .await?;
    tracing::info!("Stake transaction complete {}", receipt.transaction_hash);
    Ok(Some(receipt.transaction_hash))
}
