use crate::error::ErrorCode;
use crate::states::{ConfigUpdated, GlobalConfig, StakeInfo, GLOBAL_CONFIG_SEED, STAKE_INFO_SEED};
use crate::utils::current_timestamp;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

/// Accounts context for the operator setters that only touch `global_config`.
///
/// The signer is checked against `global_config.operator` inside the setter,
/// so a rejected call leaves every field untouched.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

/// Accounts context for `config_emission_per_second`, which also settles the
/// emission index.
#[derive(Accounts)]
pub struct UpdateEmission<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        seeds = [STAKE_INFO_SEED.as_bytes()],
        bump = stake_info.bump,
    )]
    pub stake_info: Account<'info, StakeInfo>,
}

/// Accounts context for `change_rewards_vault` / `change_bal_operation_vault`.
#[derive(Accounts)]
pub struct UpdateVault<'info> {
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// The vault being switched to.
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,
}

pub(crate) fn emit_config_updated(config: &GlobalConfig) {
    emit!(ConfigUpdated {
        operator: config.operator,
        receipt_mint: config.receipt_mint,
        reward_pool: config.reward_pool,
        rewards_vault: config.rewards_vault,
        bal_operation_vault: config.bal_operation_vault,
        emission_per_second: config.emission_per_second,
        cooldown_seconds: config.cooldown_seconds,
        unstake_window: config.unstake_window,
        earmark_incentive: config.earmark_incentive,
        operation_fee: config.operation_fee,
        pause_staking: config.pause_staking,
    });
}

/// Sets the WNCG emission rate. Emission up to now is settled at the old rate.
pub fn config_emission_per_second(
    ctx: Context<UpdateEmission>,
    emission_per_second: u64,
) -> Result<()> {
    let now = current_timestamp()?;
    let operator = ctx.accounts.operator.key();
    ctx.accounts.global_config.set_emission_per_second(
        &operator,
        emission_per_second,
        &mut ctx.accounts.stake_info,
        now,
    )?;
    msg!("emission per second set to {}", emission_per_second);
    emit_config_updated(&ctx.accounts.global_config);
    Ok(())
}

/// Sets the cooldown and withdraw window lengths (both in seconds, both > 0).
pub fn config_cooldown_second_and_unstake_window(
    ctx: Context<UpdateConfig>,
    cooldown_seconds: u64,
    unstake_window: u64,
) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    ctx.accounts.global_config.set_cooldown_second_and_unstake_window(
        &operator,
        cooldown_seconds,
        unstake_window,
    )?;
    emit_config_updated(&ctx.accounts.global_config);
    Ok(())
}

/// Sets the harvest fee rates in basis points, each bounded by its maximum.
pub fn config_fees(
    ctx: Context<UpdateConfig>,
    earmark_incentive: u64,
    operation_fee: u64,
) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    ctx.accounts
        .global_config
        .set_fees(&operator, earmark_incentive, operation_fee)?;
    emit_config_updated(&ctx.accounts.global_config);
    Ok(())
}

pub fn change_operator(ctx: Context<UpdateConfig>, new_operator: Pubkey) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    ctx.accounts
        .global_config
        .change_operator(&operator, new_operator)?;
    msg!("operator changed: {} -> {}", operator, new_operator);
    emit_config_updated(&ctx.accounts.global_config);
    Ok(())
}

pub fn change_pause_staking(ctx: Context<UpdateConfig>, pause_staking: bool) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    ctx.accounts
        .global_config
        .change_pause_staking(&operator, pause_staking)?;
    msg!("pause staking: {}", pause_staking);
    emit_config_updated(&ctx.accounts.global_config);
    Ok(())
}

/// Points WNCG payouts at a new vault. The vault must hold the reward mint.
pub fn change_rewards_vault(ctx: Context<UpdateVault>) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    let vault = &ctx.accounts.vault;
    let global_config = &mut ctx.accounts.global_config;
    global_config.require_operator(&operator)?;
    require_keys_eq!(
        vault.mint,
        global_config.reward_mint,
        ErrorCode::InvalidVaultMint
    );
    global_config.change_rewards_vault(&operator, vault.key())?;
    emit_config_updated(global_config);
    Ok(())
}

/// Points operation fees at a new vault. The vault must hold the BAL mint.
pub fn change_bal_operation_vault(ctx: Context<UpdateVault>) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    let vault = &ctx.accounts.vault;
    let global_config = &mut ctx.accounts.global_config;
    global_config.require_operator(&operator)?;
    require_keys_eq!(
        vault.mint,
        global_config.secondary_mint,
        ErrorCode::InvalidVaultMint
    );
    global_config.change_bal_operation_vault(&operator, vault.key())?;
    emit_config_updated(global_config);
    Ok(())
}
