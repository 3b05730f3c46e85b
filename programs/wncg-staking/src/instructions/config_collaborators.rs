use crate::error::ErrorCode;
use crate::instructions::emit_config_updated;
use crate::states::*;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token_interface::Mint;

/// Accounts context for `config_deposit_token_and_bal_reward_pool`.
///
/// Omitting `receipt_mint` or `reward_pool` clears that collaborator.
#[derive(Accounts)]
pub struct ConfigCollaborators<'info> {
    pub operator: Signer<'info>,

    /// CHECK: PDA derivation enforced via seeds. Compared against the receipt
    /// mint authority.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump = global_config.authority_bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        mut,
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
        address = global_config.principal_mint @ ErrorCode::InvalidVaultMint
    )]
    pub principal_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Receipt (deposit token) mint, minted 1:1 against stake.
    pub receipt_mint: Option<Box<InterfaceAccount<'info, Mint>>>,

    #[account(
        seeds = [REWARD_POOL_SEED.as_bytes(), global_config.secondary_mint.as_ref()],
        bump = reward_pool.bump,
    )]
    pub reward_pool: Option<Box<Account<'info, RewardPool>>>,
}

/// Accounts context for `create_reward_pool`.
#[derive(Accounts)]
pub struct CreateRewardPool<'info> {
    /// Current operator; pays for the pool account.
    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump = global_config.bump,
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        address = global_config.secondary_mint @ ErrorCode::InvalidVaultMint
    )]
    pub secondary_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        seeds = [REWARD_POOL_SEED.as_bytes(), secondary_mint.key().as_ref()],
        bump,
        payer = operator,
        space = RewardPool::LEN
    )]
    pub reward_pool: Box<Account<'info, RewardPool>>,

    pub system_program: Program<'info, System>,
}

/// Wires the receipt mint and the BAL reward pool into the configuration.
///
/// A receipt mint must be controlled by the staking authority and share the
/// principal's decimals so receipts track stake 1:1. Neither collaborator
/// may change while anything is staked.
pub fn config_deposit_token_and_bal_reward_pool(ctx: Context<ConfigCollaborators>) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    ctx.accounts.global_config.require_operator(&operator)?;

    let receipt_mint = match &ctx.accounts.receipt_mint {
        Some(mint) => {
            require!(
                mint.mint_authority == COption::Some(ctx.accounts.authority.key()),
                ErrorCode::InvalidReceiptMint
            );
            require_eq!(
                mint.decimals,
                ctx.accounts.principal_mint.decimals,
                ErrorCode::InvalidReceiptMint
            );
            mint.key()
        }
        None => Pubkey::default(),
    };
    let reward_pool = ctx
        .accounts
        .reward_pool
        .as_ref()
        .map_or(Pubkey::default(), |pool| pool.key());

    let total_staked = ctx.accounts.stake_info.total_staked;
    ctx.accounts.global_config.set_deposit_token_and_reward_pool(
        &operator,
        receipt_mint,
        reward_pool,
        total_staked,
    )?;

    msg!(
        "collaborators set: receipt_mint={}, reward_pool={}",
        receipt_mint,
        reward_pool
    );
    emit_config_updated(&ctx.accounts.global_config);
    Ok(())
}

/// Creates the BAL reward pool for the configured secondary mint.
pub fn create_reward_pool(ctx: Context<CreateRewardPool>) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    ctx.accounts.global_config.require_operator(&operator)?;

    let reward_mint = ctx.accounts.secondary_mint.key();
    let reward_pool: &mut RewardPool = &mut ctx.accounts.reward_pool;
    reward_pool.initialize(ctx.bumps.reward_pool, reward_mint);

    emit!(RewardPoolCreated {
        reward_pool: ctx.accounts.reward_pool.key(),
        reward_mint,
        duration: ctx.accounts.reward_pool.duration,
        new_reward_ratio: ctx.accounts.reward_pool.new_reward_ratio,
    });
    Ok(())
}
