use crate::error::ErrorCode;
use crate::utils::current_timestamp;
use crate::{states::*, PRINCIPAL_VAULT_SEED, SECONDARY_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Accounts context for `initialise_configs`.
///
/// This handler:
/// - Creates the global configuration and the global stake accounting.
/// - Creates the program-owned principal vault and BAL vault.
/// - Records the externally owned rewards vault and BAL operation vault.
///
/// The rewards vault stays owned by the treasury; it must approve the
/// staking authority as delegate before rewards can be claimed.
#[derive(Accounts)]
pub struct InitialiseConfigs<'info> {
    /// Program admin (must match the program-level admin id). Pays for the
    /// new accounts.
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Program authority PDA: owns both vaults, mints receipts and acts as
    /// rewards-vault delegate.
    ///
    /// CHECK: PDA derivation enforced via seeds. Used as a signer only.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = GlobalConfig::LEN
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        init,
        seeds = [STAKE_INFO_SEED.as_bytes()],
        bump,
        payer = owner,
        space = StakeInfo::LEN
    )]
    pub stake_info: Box<Account<'info, StakeInfo>>,

    /// Staked token (WNCG).
    pub principal_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Emission reward token (WNCG).
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Harvested reward token (BAL).
    pub secondary_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        constraint = rewards_vault.mint == reward_mint.key() @ ErrorCode::InvalidVaultMint
    )]
    pub rewards_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        constraint = bal_operation_vault.mint == secondary_mint.key() @ ErrorCode::InvalidVaultMint
    )]
    pub bal_operation_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Program-owned vault holding staked principal.
    #[account(
        init,
        seeds = [PRINCIPAL_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = principal_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub principal_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Program-owned vault receiving harvested BAL.
    #[account(
        init,
        seeds = [SECONDARY_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = secondary_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub secondary_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Initializes the staking configuration with launch defaults.
///
/// Steps:
/// 1. Validate the operator address.
/// 2. Write addresses and default parameters to `global_config`.
/// 3. Start the emission clock in `stake_info`.
/// 4. Emit `GlobalConfigInitialized`.
///
/// `yield_program` may be `Pubkey::default()` to run without an external
/// yield position.
pub fn initialise_configs(
    ctx: Context<InitialiseConfigs>,
    operator: Pubkey,
    yield_program: Pubkey,
) -> Result<()> {
    require_keys_neq!(operator, Pubkey::default(), ErrorCode::InvalidAddress);
    let now = current_timestamp()?;

    let stake_info_key = ctx.accounts.stake_info.key();
    let global_config = ctx.accounts.global_config.deref_mut();
    global_config.bump = ctx.bumps.global_config;
    global_config.authority_bump = ctx.bumps.authority;
    global_config.operator = operator;
    global_config.principal_mint = ctx.accounts.principal_mint.key();
    global_config.reward_mint = ctx.accounts.reward_mint.key();
    global_config.secondary_mint = ctx.accounts.secondary_mint.key();
    global_config.rewards_vault = ctx.accounts.rewards_vault.key();
    global_config.bal_operation_vault = ctx.accounts.bal_operation_vault.key();
    global_config.principal_vault = ctx.accounts.principal_vault.key();
    global_config.secondary_vault = ctx.accounts.secondary_vault.key();
    global_config.yield_program = yield_program;
    global_config.stake_info = stake_info_key;
    global_config.apply_defaults();

    let stake_info = ctx.accounts.stake_info.deref_mut();
    stake_info.bump = ctx.bumps.stake_info;
    stake_info.last_update_timestamp = now;

    let global_config = &ctx.accounts.global_config;
    emit!(GlobalConfigInitialized {
        operator: global_config.operator,
        principal_mint: global_config.principal_mint,
        reward_mint: global_config.reward_mint,
        secondary_mint: global_config.secondary_mint,
        rewards_vault: global_config.rewards_vault,
        bal_operation_vault: global_config.bal_operation_vault,
        principal_vault: global_config.principal_vault,
        secondary_vault: global_config.secondary_vault,
        yield_program: global_config.yield_program,
        stake_info: global_config.stake_info,
        cooldown_seconds: global_config.cooldown_seconds,
        unstake_window: global_config.unstake_window,
        earmark_incentive: global_config.earmark_incentive,
        operation_fee: global_config.operation_fee,
    });

    msg!(
        "staking initialised: operator={}, yield_program={}",
        operator,
        yield_program
    );
    Ok(())
}
