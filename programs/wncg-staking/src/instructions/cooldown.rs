use crate::error::ErrorCode;
use crate::ledger::Ledger;
use crate::states::*;
use crate::utils::current_timestamp;
use anchor_lang::prelude::*;

/// Accounts context for `cooldown`.
#[derive(Accounts)]
pub struct Cooldown<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [STAKE_INFO_SEED.as_bytes()],
        bump = stake_info.bump,
    )]
    pub stake_info: Box<Account<'info, StakeInfo>>,

    #[account(
        init_if_needed,
        seeds = [USER_STAKE_INFO_SEED.as_bytes(), owner.key().as_ref()],
        bump,
        payer = owner,
        space = UserStakeInfo::LEN
    )]
    pub user_stake_info: Box<Account<'info, UserStakeInfo>>,

    #[account(
        mut,
        address = global_config.reward_pool @ ErrorCode::InvalidBalRewardPool
    )]
    pub reward_pool: Option<Box<Account<'info, RewardPool>>>,

    pub system_program: Program<'info, System>,
}

/// Starts the signer's cooldown now. Calling it again restarts the clock.
pub fn cooldown(ctx: Context<Cooldown>) -> Result<()> {
    let now = current_timestamp()?;
    let owner = ctx.accounts.owner.key();

    let user_stake_info: &mut UserStakeInfo = &mut ctx.accounts.user_stake_info;
    if user_stake_info.owner == Pubkey::default() {
        user_stake_info.owner = owner;
        user_stake_info.bump = ctx.bumps.user_stake_info;
    }
    let start = Ledger::new(
        &ctx.accounts.global_config,
        &mut ctx.accounts.stake_info,
        ctx.accounts.reward_pool.as_deref_mut().map(|pool| &mut **pool),
        now,
    )
    .cooldown(user_stake_info)?;

    let window = ctx.accounts.global_config.cooldown_window();
    emit!(CooldownStarted {
        user: owner,
        cooldown_start_timestamp: start,
        cooldown_end_timestamp: window.cooldown_end(start),
        withdraw_end_timestamp: window.withdraw_end(start),
    });
    msg!("cooldown started for {} at {}", owner, start);
    Ok(())
}
