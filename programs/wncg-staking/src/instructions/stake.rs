use crate::error::ErrorCode;
use crate::ledger::Ledger;
use crate::states::*;
use crate::utils::{
    current_timestamp, token_mint_to, transfer_from_user_to_pool_vault, YieldPosition,
};
use crate::PRINCIPAL_VAULT_SEED;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `stake`.
///
/// `receipt_mint`, `owner_receipt_token` and `reward_pool` are optional so
/// an unconfigured collaborator is reported as such instead of failing
/// account deserialization. Yield position accounts follow in
/// `remaining_accounts`.
#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: PDA derivation enforced via seeds. Signs vault and mint CPIs.
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

    /// Created on the owner's first stake.
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

    #[account(
        address = global_config.principal_mint @ ErrorCode::InvalidVaultMint
    )]
    pub principal_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = principal_mint,
        token::authority = owner,
    )]
    pub owner_principal_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [PRINCIPAL_VAULT_SEED.as_bytes()],
        bump,
    )]
    pub principal_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = global_config.receipt_mint @ ErrorCode::InvalidDepositTokenAddr
    )]
    pub receipt_mint: Option<Box<InterfaceAccount<'info, Mint>>>,

    #[account(mut)]
    pub owner_receipt_token: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Stakes `amount` of principal for the signer.
///
/// Steps:
/// 1. Settle both reward streams, dilute an active cooldown, and credit the
///    stake (see [`Ledger::stake`]).
/// 2. Pull `amount` from the owner into the principal vault.
/// 3. Route it into the yield position, if one is configured.
/// 4. Mint `amount` receipt tokens to the owner.
pub fn stake<'info>(ctx: Context<'_, '_, 'info, 'info, Stake<'info>>, amount: u64) -> Result<()> {
    let now = current_timestamp()?;
    let owner = ctx.accounts.owner.key();

    let user_stake_info: &mut UserStakeInfo = &mut ctx.accounts.user_stake_info;
    if user_stake_info.owner == Pubkey::default() {
        user_stake_info.owner = owner;
        user_stake_info.bump = ctx.bumps.user_stake_info;
    }
    Ledger::new(
        &ctx.accounts.global_config,
        &mut ctx.accounts.stake_info,
        ctx.accounts.reward_pool.as_deref_mut().map(|pool| &mut **pool),
        now,
    )
    .stake(user_stake_info, amount)?;

    let (Some(receipt_mint), Some(owner_receipt_token)) = (
        ctx.accounts.receipt_mint.as_ref(),
        ctx.accounts.owner_receipt_token.as_ref(),
    ) else {
        return err!(ErrorCode::InvalidDepositTokenAddr);
    };
    require_keys_eq!(
        owner_receipt_token.mint,
        receipt_mint.key(),
        ErrorCode::InvalidReceiptMint
    );

    let signer_seeds: &[&[&[u8]]] = &[&[
        crate::AUTH_SEED.as_bytes(),
        &[ctx.accounts.global_config.authority_bump],
    ]];
    transfer_from_user_to_pool_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_principal_token.to_account_info(),
        ctx.accounts.principal_vault.to_account_info(),
        ctx.accounts.principal_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.principal_mint.decimals,
    )?;
    YieldPosition::load(
        &ctx.accounts.global_config.yield_program,
        ctx.accounts.authority.to_account_info(),
        ctx.remaining_accounts,
    )?
    .deposit(amount, signer_seeds)?;
    token_mint_to(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        receipt_mint.to_account_info(),
        owner_receipt_token.to_account_info(),
        amount,
        signer_seeds,
    )?;

    let user_stake_info = &ctx.accounts.user_stake_info;
    emit!(Staked {
        user: owner,
        amount,
        staked_balance: user_stake_info.staked_balance,
        total_staked: ctx.accounts.stake_info.total_staked,
        cooldown_start_timestamp: user_stake_info.cooldown_start_timestamp,
    });
    msg!("staked {} for {}", amount, owner);
    Ok(())
}
