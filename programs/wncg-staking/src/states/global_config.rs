use crate::error::ErrorCode;
use crate::math::CooldownWindow;
use crate::states::StakeInfo;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Global Configuration Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the global configuration account.
pub const GLOBAL_CONFIG_SEED: &str = "global_config";

/// Default cooldown before withdrawal: 14 days.
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 1_209_600;
/// Default window during which withdrawal is allowed: 3 days.
pub const DEFAULT_UNSTAKE_WINDOW: u64 = 259_200;
/// Default keeper incentive: 1%.
pub const DEFAULT_EARMARK_INCENTIVE: u64 = 100;
/// Default protocol fee: 19%.
pub const DEFAULT_OPERATION_FEE: u64 = 1_900;
pub const EARMARK_INCENTIVE_MAX: u64 = 100;
pub const OPERATION_FEE_MAX: u64 = 2_000;

/// Operator-controlled parameters and the addresses of every collaborator.
///
/// Created once by `initialise_configs`. Afterwards it only changes through
/// the `set_*`/`change_*` methods below, each of which checks the caller is
/// the operator and validates every argument before writing any field.
#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    /// PDA bump for this account.
    pub bump: u8,

    /// PDA bump of the staking authority.
    pub authority_bump: u8,

    /// Holder of every operator-gated instruction.
    pub operator: Pubkey,

    /// Token that is staked (WNCG).
    pub principal_mint: Pubkey,

    /// Token paid as the emission reward (WNCG).
    pub reward_mint: Pubkey,

    /// Token harvested from the yield position (BAL).
    pub secondary_mint: Pubkey,

    /// Receipt (deposit token) minted 1:1 against stake. Default until configured.
    pub receipt_mint: Pubkey,

    /// BAL reward pool account. Default until configured.
    pub reward_pool: Pubkey,

    /// Token account paying emission rewards; delegates to the staking authority.
    pub rewards_vault: Pubkey,

    /// Token account receiving the operation fee.
    pub bal_operation_vault: Pubkey,

    /// Program-owned vault for staked principal.
    pub principal_vault: Pubkey,

    /// Program-owned vault receiving harvested BAL.
    pub secondary_vault: Pubkey,

    /// Program wrapping the external yield position. Default means none.
    pub yield_program: Pubkey,

    /// Global accrual account.
    pub stake_info: Pubkey,

    /// Emission reward units distributed per second.
    pub emission_per_second: u64,

    /// Seconds between `cooldown` and the opening of the withdraw window.
    pub cooldown_seconds: u64,

    /// Length of the withdraw window in seconds.
    pub unstake_window: u64,

    /// Keeper share of each harvest in basis points.
    pub earmark_incentive: u64,

    /// Protocol share of each harvest in basis points.
    pub operation_fee: u64,

    pub earmark_incentive_max: u64,

    pub operation_fee_max: u64,

    /// If `true`, `stake` is rejected.
    pub pause_staking: bool,
}

impl GlobalConfig {
    /// Fixed serialized size of the account (for allocation at initialization).
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1 + 1: bumps
    /// - 32 * 12: twelve Pubkeys
    /// - 8 * 7: seven u64 fields
    /// - 1: pause flag
    pub const LEN: usize = 8 + 1 + 1 + 32 * 12 + 8 * 7 + 1;

    /// Writes the launch values of the tunable parameters.
    pub fn apply_defaults(&mut self) {
        self.emission_per_second = 0;
        self.cooldown_seconds = DEFAULT_COOLDOWN_SECONDS;
        self.unstake_window = DEFAULT_UNSTAKE_WINDOW;
        self.earmark_incentive = DEFAULT_EARMARK_INCENTIVE;
        self.operation_fee = DEFAULT_OPERATION_FEE;
        self.earmark_incentive_max = EARMARK_INCENTIVE_MAX;
        self.operation_fee_max = OPERATION_FEE_MAX;
        self.pause_staking = false;
        self.receipt_mint = Pubkey::default();
        self.reward_pool = Pubkey::default();
    }

    pub fn require_operator(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.operator, ErrorCode::OnlyOperator);
        Ok(())
    }

    /// Both collaborators `stake` needs.
    pub fn require_collaborators(&self) -> Result<()> {
        require_keys_neq!(
            self.receipt_mint,
            Pubkey::default(),
            ErrorCode::InvalidDepositTokenAddr
        );
        self.require_reward_pool()
    }

    pub fn require_reward_pool(&self) -> Result<()> {
        require_keys_neq!(
            self.reward_pool,
            Pubkey::default(),
            ErrorCode::InvalidBalRewardPool
        );
        Ok(())
    }

    pub fn cooldown_window(&self) -> CooldownWindow {
        CooldownWindow::new(self.cooldown_seconds, self.unstake_window)
    }

    /// Points the registry at a receipt mint and a reward pool. Either may be
    /// `Pubkey::default()` to leave it unset.
    ///
    /// Neither may change while anything is staked: reward-pool shares and
    /// receipts are issued 1:1 with stake and must stay with it.
    pub fn set_deposit_token_and_reward_pool(
        &mut self,
        caller: &Pubkey,
        receipt_mint: Pubkey,
        reward_pool: Pubkey,
        total_staked: u64,
    ) -> Result<()> {
        self.require_operator(caller)?;
        let changed = receipt_mint != self.receipt_mint || reward_pool != self.reward_pool;
        require!(
            !(changed && total_staked > 0),
            ErrorCode::CollaboratorInUse
        );
        self.receipt_mint = receipt_mint;
        self.reward_pool = reward_pool;
        Ok(())
    }

    /// Settles the emission index at the old rate, then switches rates, so the
    /// new rate never applies retroactively.
    pub fn set_emission_per_second(
        &mut self,
        caller: &Pubkey,
        emission_per_second: u64,
        stake_info: &mut StakeInfo,
        now: u64,
    ) -> Result<()> {
        self.require_operator(caller)?;
        stake_info.update_reward_per_token(now, self.emission_per_second)?;
        self.emission_per_second = emission_per_second;
        Ok(())
    }

    pub fn set_cooldown_second_and_unstake_window(
        &mut self,
        caller: &Pubkey,
        cooldown_seconds: u64,
        unstake_window: u64,
    ) -> Result<()> {
        self.require_operator(caller)?;
        require_gt!(cooldown_seconds, 0, ErrorCode::InvalidCooldownSeconds);
        require_gt!(unstake_window, 0, ErrorCode::InvalidUnstakeWindow);
        self.cooldown_seconds = cooldown_seconds;
        self.unstake_window = unstake_window;
        Ok(())
    }

    pub fn set_fees(
        &mut self,
        caller: &Pubkey,
        earmark_incentive: u64,
        operation_fee: u64,
    ) -> Result<()> {
        self.require_operator(caller)?;
        require_gte!(
            self.earmark_incentive_max,
            earmark_incentive,
            ErrorCode::InvalidEarmarkIncentive
        );
        require_gte!(
            self.operation_fee_max,
            operation_fee,
            ErrorCode::InvalidOperationFee
        );
        self.earmark_incentive = earmark_incentive;
        self.operation_fee = operation_fee;
        Ok(())
    }

    /// Hands the operator role over. The old operator loses access at once.
    pub fn change_operator(&mut self, caller: &Pubkey, new_operator: Pubkey) -> Result<()> {
        self.require_operator(caller)?;
        require_keys_neq!(new_operator, Pubkey::default(), ErrorCode::InvalidAddress);
        self.operator = new_operator;
        Ok(())
    }

    pub fn change_rewards_vault(&mut self, caller: &Pubkey, rewards_vault: Pubkey) -> Result<()> {
        self.require_operator(caller)?;
        require_keys_neq!(rewards_vault, Pubkey::default(), ErrorCode::InvalidAddress);
        self.rewards_vault = rewards_vault;
        Ok(())
    }

    pub fn change_bal_operation_vault(
        &mut self,
        caller: &Pubkey,
        bal_operation_vault: Pubkey,
    ) -> Result<()> {
        self.require_operator(caller)?;
        require_keys_neq!(
            bal_operation_vault,
            Pubkey::default(),
            ErrorCode::InvalidAddress
        );
        self.bal_operation_vault = bal_operation_vault;
        Ok(())
    }

    pub fn change_pause_staking(&mut self, caller: &Pubkey, pause_staking: bool) -> Result<()> {
        self.require_operator(caller)?;
        self.pause_staking = pause_staking;
        Ok(())
    }
}
