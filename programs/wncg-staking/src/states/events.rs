use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track protocol state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the global configuration is initialized.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct GlobalConfigInitialized {
    pub operator: Pubkey,
    pub principal_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub secondary_mint: Pubkey,
    pub rewards_vault: Pubkey,
    pub bal_operation_vault: Pubkey,
    pub principal_vault: Pubkey,
    pub secondary_vault: Pubkey,
    /// `Pubkey::default()` when no external yield position is wired up.
    pub yield_program: Pubkey,
    pub stake_info: Pubkey,
    pub cooldown_seconds: u64,
    pub unstake_window: u64,
    pub earmark_incentive: u64,
    pub operation_fee: u64,
}

/// Emitted by every operator setter with the resulting configuration.
///
/// One event shape for all setters keeps indexers simple: the latest event
/// is always the full current parameter set.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct ConfigUpdated {
    pub operator: Pubkey,
    pub receipt_mint: Pubkey,
    pub reward_pool: Pubkey,
    pub rewards_vault: Pubkey,
    pub bal_operation_vault: Pubkey,
    pub emission_per_second: u64,
    pub cooldown_seconds: u64,
    pub unstake_window: u64,
    pub earmark_incentive: u64,
    pub operation_fee: u64,
    pub pause_staking: bool,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardPoolCreated {
    pub reward_pool: Pubkey,
    pub reward_mint: Pubkey,
    pub duration: u64,
    pub new_reward_ratio: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
    pub staked_balance: u64,
    pub total_staked: u64,
    /// Cooldown start after dilution; `0` if none is active.
    pub cooldown_start_timestamp: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Withdrawn {
    pub user: Pubkey,
    pub amount: u64,
    pub staked_balance: u64,
    pub total_staked: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct CooldownStarted {
    pub user: Pubkey,
    pub cooldown_start_timestamp: u64,
    pub cooldown_end_timestamp: u64,
    pub withdraw_end_timestamp: u64,
}

/// Emitted for each non-zero reward payment.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardPaid {
    pub user: Pubkey,
    pub reward_mint: Pubkey,
    pub amount: u64,
}

/// Emitted by `earmark_rewards` with the split of one harvest.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsEarmarked {
    pub caller: Pubkey,
    pub harvested: u64,
    pub operation_fee: u64,
    pub earmark_incentive: u64,
    /// Queued into the reward pool for stakers.
    pub remainder: u64,
    pub reward_rate: u64,
    pub period_finish: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct IdleRewardsProcessed {
    pub amount: u64,
    pub reward_rate: u64,
    pub period_finish: u64,
}
