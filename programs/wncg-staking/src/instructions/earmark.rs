use crate::error::ErrorCode;
use crate::ledger::Ledger;
use crate::states::*;
use crate::utils::{current_timestamp, transfer_from_pool_vault_to_user, YieldPosition};
use crate::SECONDARY_VAULT_SEED;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `earmark_rewards`. Anyone may call it; the caller
/// receives the earmark incentive. Yield position accounts follow in
/// `remaining_accounts`.
#[derive(Accounts)]
pub struct EarmarkRewards<'info> {
    pub caller: Signer<'info>,

    /// CHECK: PDA derivation enforced via seeds. Signs the harvest and the
    /// fee transfers.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump = global_config.authority_bump,
    )]
    pub authority: UncheckedAccount<'info>,

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
        mut,
        address = global_config.reward_pool @ ErrorCode::InvalidBalRewardPool
    )]
    pub reward_pool: Option<Box<Account<'info, RewardPool>>>,

    #[account(
        address = global_config.secondary_mint @ ErrorCode::InvalidVaultMint
    )]
    pub secondary_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [SECONDARY_VAULT_SEED.as_bytes()],
        bump,
    )]
    pub secondary_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = global_config.bal_operation_vault @ ErrorCode::InvalidAddress
    )]
    pub bal_operation_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = secondary_mint,
    )]
    pub caller_secondary_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Accounts context for `process_idle_rewards`.
#[derive(Accounts)]
pub struct ProcessIdleRewards<'info> {
    pub caller: Signer<'info>,

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
        mut,
        address = global_config.reward_pool @ ErrorCode::InvalidBalRewardPool
    )]
    pub reward_pool: Option<Box<Account<'info, RewardPool>>>,
}

/// Harvests BAL from the yield position and splits it.
///
/// Steps:
/// 1. Require a configured reward pool.
/// 2. Harvest into the BAL vault; the vault balance delta is the harvest.
/// 3. Split it, queue the stakers' share into the reward pool
///    (see [`Ledger::earmark`]).
/// 4. Send the operation fee to the BAL operation vault and the incentive
///    to the caller.
pub fn earmark_rewards<'info>(
    ctx: Context<'_, '_, 'info, 'info, EarmarkRewards<'info>>,
) -> Result<()> {
    let now = current_timestamp()?;
    ctx.accounts.global_config.require_reward_pool()?;
    require!(
        ctx.accounts.reward_pool.is_some(),
        ErrorCode::InvalidBalRewardPool
    );

    let signer_seeds: &[&[&[u8]]] = &[&[
        crate::AUTH_SEED.as_bytes(),
        &[ctx.accounts.global_config.authority_bump],
    ]];
    let harvested = YieldPosition::load(
        &ctx.accounts.global_config.yield_program,
        ctx.accounts.authority.to_account_info(),
        ctx.remaining_accounts,
    )?
    .harvest(&mut ctx.accounts.secondary_vault, signer_seeds)?;

    let split = Ledger::new(
        &ctx.accounts.global_config,
        &mut ctx.accounts.stake_info,
        ctx.accounts.reward_pool.as_deref_mut().map(|pool| &mut **pool),
        now,
    )
    .earmark(harvested)?;

    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.secondary_vault.to_account_info(),
        ctx.accounts.bal_operation_vault.to_account_info(),
        ctx.accounts.secondary_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        split.operation_fee,
        ctx.accounts.secondary_mint.decimals,
        signer_seeds,
    )?;
    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.secondary_vault.to_account_info(),
        ctx.accounts.caller_secondary_token.to_account_info(),
        ctx.accounts.secondary_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        split.earmark_incentive,
        ctx.accounts.secondary_mint.decimals,
        signer_seeds,
    )?;

    let (reward_rate, period_finish) = ctx
        .accounts
        .reward_pool
        .as_ref()
        .map_or((0, 0), |pool| (pool.reward_rate, pool.period_finish));
    emit!(RewardsEarmarked {
        caller: ctx.accounts.caller.key(),
        harvested,
        operation_fee: split.operation_fee,
        earmark_incentive: split.earmark_incentive,
        remainder: split.remainder,
        reward_rate,
        period_finish,
    });
    msg!(
        "earmarked {}: fee={}, incentive={}, queued={}",
        harvested,
        split.operation_fee,
        split.earmark_incentive,
        split.remainder
    );
    Ok(())
}

/// Starts a new BAL reward period from queued rewards once the current
/// period has finished. A no-op otherwise.
pub fn process_idle_rewards(ctx: Context<ProcessIdleRewards>) -> Result<()> {
    let now = current_timestamp()?;
    let released = Ledger::new(
        &ctx.accounts.global_config,
        &mut ctx.accounts.stake_info,
        ctx.accounts.reward_pool.as_deref_mut().map(|pool| &mut **pool),
        now,
    )
    .process_idle_rewards()?;

    if released > 0 {
        let (reward_rate, period_finish) = ctx
            .accounts
            .reward_pool
            .as_ref()
            .map_or((0, 0), |pool| (pool.reward_rate, pool.period_finish));
        emit!(IdleRewardsProcessed {
            amount: released,
            reward_rate,
            period_finish,
        });
    }
    Ok(())
}
