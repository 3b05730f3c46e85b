use crate::error::ErrorCode;
use crate::ledger::Ledger;
use crate::states::*;
use crate::utils::{current_timestamp, transfer_from_pool_vault_to_user};
use crate::SECONDARY_VAULT_SEED;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context shared by `claim_wncg_rewards`, `claim_bal_rewards` and
/// `claim_all_rewards`.
#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: PDA derivation enforced via seeds. Owner of the BAL vault and
    /// delegate of the rewards vault.
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
        address = global_config.reward_mint @ ErrorCode::InvalidVaultMint
    )]
    pub reward_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        address = global_config.rewards_vault @ ErrorCode::InvalidAddress
    )]
    pub rewards_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = reward_mint,
    )]
    pub owner_reward_token: Box<InterfaceAccount<'info, TokenAccount>>,

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
        token::mint = secondary_mint,
    )]
    pub owner_secondary_token: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Which streams a claim instruction releases.
enum ClaimKind {
    Wncg(u64),
    Bal,
    All(u64),
}

impl<'info> Claim<'info> {
    fn pay(&self, wncg_paid: u64, bal_paid: u64) -> Result<()> {
        let signer_seeds: &[&[&[u8]]] = &[&[
            crate::AUTH_SEED.as_bytes(),
            &[self.global_config.authority_bump],
        ]];
        let owner = self.owner.key();

        transfer_from_pool_vault_to_user(
            self.authority.to_account_info(),
            self.rewards_vault.to_account_info(),
            self.owner_reward_token.to_account_info(),
            self.reward_mint.to_account_info(),
            self.token_program.to_account_info(),
            wncg_paid,
            self.reward_mint.decimals,
            signer_seeds,
        )?;
        transfer_from_pool_vault_to_user(
            self.authority.to_account_info(),
            self.secondary_vault.to_account_info(),
            self.owner_secondary_token.to_account_info(),
            self.secondary_mint.to_account_info(),
            self.token_program.to_account_info(),
            bal_paid,
            self.secondary_mint.decimals,
            signer_seeds,
        )?;

        if wncg_paid > 0 {
            emit!(RewardPaid {
                user: owner,
                reward_mint: self.reward_mint.key(),
                amount: wncg_paid,
            });
        }
        if bal_paid > 0 {
            emit!(RewardPaid {
                user: owner,
                reward_mint: self.secondary_mint.key(),
                amount: bal_paid,
            });
        }
        msg!("claimed wncg={}, bal={} for {}", wncg_paid, bal_paid, owner);
        Ok(())
    }
}

fn claim(ctx: Context<Claim>, kind: ClaimKind) -> Result<()> {
    let now = current_timestamp()?;
    let owner = ctx.accounts.owner.key();

    let user_stake_info: &mut UserStakeInfo = &mut ctx.accounts.user_stake_info;
    if user_stake_info.owner == Pubkey::default() {
        user_stake_info.owner = owner;
        user_stake_info.bump = ctx.bumps.user_stake_info;
    }
    let (wncg_paid, bal_paid) = {
        let mut ledger = Ledger::new(
            &ctx.accounts.global_config,
            &mut ctx.accounts.stake_info,
            ctx.accounts.reward_pool.as_deref_mut().map(|pool| &mut **pool),
            now,
        );
        match kind {
            ClaimKind::Wncg(amount) => (ledger.claim_wncg(user_stake_info, amount)?, 0),
            ClaimKind::Bal => (0, ledger.claim_bal(user_stake_info)?),
            ClaimKind::All(amount) => ledger.claim_all(user_stake_info, amount)?,
        }
    };

    ctx.accounts.pay(wncg_paid, bal_paid)
}

/// Pays up to `amount` of the signer's pending WNCG. Asking for more than is
/// pending pays what is pending.
pub fn claim_wncg_rewards(ctx: Context<Claim>, amount: u64) -> Result<()> {
    claim(ctx, ClaimKind::Wncg(amount))
}

/// Pays all of the signer's pending BAL.
pub fn claim_bal_rewards(ctx: Context<Claim>) -> Result<()> {
    claim(ctx, ClaimKind::Bal)
}

/// Pays up to `amount` of pending WNCG and all pending BAL.
pub fn claim_all_rewards(ctx: Context<Claim>, amount: u64) -> Result<()> {
    claim(ctx, ClaimKind::All(amount))
}
