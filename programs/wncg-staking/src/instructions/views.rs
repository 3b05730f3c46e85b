//! Read-only instructions. Each returns its value through Anchor return data
//! and writes nothing; accrual is computed up to the current second.

use crate::error::ErrorCode;
use crate::ledger::Ledger;
use crate::states::*;
use crate::utils::current_timestamp;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct ViewGlobal<'info> {
    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        seeds = [STAKE_INFO_SEED.as_bytes()],
        bump = stake_info.bump,
    )]
    pub stake_info: Box<Account<'info, StakeInfo>>,

    #[account(
        address = global_config.reward_pool @ ErrorCode::InvalidBalRewardPool
    )]
    pub reward_pool: Option<Box<Account<'info, RewardPool>>>,
}

/// Like [`ViewGlobal`], for a single staker's record.
#[derive(Accounts)]
pub struct ViewAccount<'info> {
    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        seeds = [STAKE_INFO_SEED.as_bytes()],
        bump = stake_info.bump,
    )]
    pub stake_info: Box<Account<'info, StakeInfo>>,

    #[account(
        address = global_config.reward_pool @ ErrorCode::InvalidBalRewardPool
    )]
    pub reward_pool: Option<Box<Account<'info, RewardPool>>>,

    /// CHECK: Any address; only used to derive `user_stake_info`.
    pub user: UncheckedAccount<'info>,

    /// CHECK: PDA derivation enforced via seeds. May not exist yet, in which
    /// case the user reads as a fresh record.
    #[account(
        seeds = [USER_STAKE_INFO_SEED.as_bytes(), user.key().as_ref()],
        bump,
    )]
    pub user_stake_info: UncheckedAccount<'info>,
}

impl<'info> ViewAccount<'info> {
    fn user_stake_info(&self) -> Result<UserStakeInfo> {
        let info = self.user_stake_info.to_account_info();
        if info.data_is_empty() || info.owner != &crate::ID {
            return Ok(UserStakeInfo::default());
        }
        let data = info.try_borrow_data()?;
        UserStakeInfo::try_deserialize(&mut &data[..])
    }

    /// Runs `read` against copies of the accounts, so nothing is written back.
    fn with_ledger<T>(
        &self,
        read: impl FnOnce(&Ledger, &UserStakeInfo) -> Result<T>,
    ) -> Result<T> {
        let now = current_timestamp()?;
        let user = self.user_stake_info()?;
        let mut stake_info = StakeInfo::clone(&self.stake_info);
        let mut reward_pool = self.reward_pool.as_deref().map(|pool| RewardPool::clone(pool));
        let ledger = Ledger::new(
            &self.global_config,
            &mut stake_info,
            reward_pool.as_mut(),
            now,
        );
        read(&ledger, &user)
    }
}

pub fn total_staked(ctx: Context<ViewGlobal>) -> Result<u64> {
    Ok(ctx.accounts.stake_info.total_staked)
}

pub fn staked_token_balance(ctx: Context<ViewAccount>) -> Result<u64> {
    Ok(ctx.accounts.user_stake_info()?.staked_balance)
}

/// WNCG the user could claim right now.
pub fn earned_wncg(ctx: Context<ViewAccount>) -> Result<u64> {
    ctx.accounts
        .with_ledger(|ledger, user| ledger.earned_wncg(user))
}

/// BAL the user could claim right now.
pub fn earned_bal(ctx: Context<ViewAccount>) -> Result<u64> {
    ctx.accounts
        .with_ledger(|ledger, user| ledger.earned_bal(user))
}

/// `cooldown_start + cooldown_seconds`.
pub fn get_cooldown_end_timestamp(ctx: Context<ViewAccount>) -> Result<u64> {
    let start = ctx.accounts.user_stake_info()?.cooldown_start_timestamp;
    Ok(ctx.accounts.global_config.cooldown_window().cooldown_end(start))
}

/// End of the withdraw window that follows the cooldown.
pub fn get_withdraw_end_timestamp(ctx: Context<ViewAccount>) -> Result<u64> {
    let start = ctx.accounts.user_stake_info()?.cooldown_start_timestamp;
    Ok(ctx.accounts.global_config.cooldown_window().withdraw_end(start))
}

/// Cooldown start the user would carry after receiving `incoming_amount`
/// whose own cooldown started at `from_cooldown_timestamp`, given the user
/// holds `to_balance`.
pub fn get_next_cooldown_timestamp(
    ctx: Context<ViewAccount>,
    from_cooldown_timestamp: u64,
    incoming_amount: u64,
    to_balance: u64,
) -> Result<u64> {
    let now = current_timestamp()?;
    let start = ctx.accounts.user_stake_info()?.cooldown_start_timestamp;
    Ok(ctx
        .accounts
        .global_config
        .cooldown_window()
        .next_cooldown_timestamp(from_cooldown_timestamp, incoming_amount, start, to_balance, now))
}

/// BAL released per second in the current reward period.
pub fn get_bal_reward_rate(ctx: Context<ViewGlobal>) -> Result<u64> {
    ctx.accounts.global_config.require_reward_pool()?;
    let pool = ctx
        .accounts
        .reward_pool
        .as_ref()
        .ok_or(ErrorCode::InvalidBalRewardPool)?;
    Ok(pool.reward_rate)
}

pub fn get_wncg_emission_per_sec(ctx: Context<ViewGlobal>) -> Result<u64> {
    Ok(ctx.accounts.global_config.emission_per_second)
}

pub fn get_current_block_timestamp(_ctx: Context<ViewGlobal>) -> Result<u64> {
    current_timestamp()
}
