use crate::error::ErrorCode;
use crate::ledger::Ledger;
use crate::states::*;
use crate::utils::{
    current_timestamp, token_burn, transfer_from_pool_vault_to_user, YieldPosition,
};
use crate::{PRINCIPAL_VAULT_SEED, SECONDARY_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts context for `withdraw`.
///
/// Carries optional reward accounts so `claim_all` can pay both streams in
/// the same instruction. Yield position accounts follow in
/// `remaining_accounts`.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: PDA derivation enforced via seeds. Signs vault CPIs.
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
        address = global_config.principal_mint @ ErrorCode::InvalidVaultMint
    )]
    pub principal_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = principal_mint,
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

    /// Receipts are burned from here; the owner must still hold them.
    #[account(mut)]
    pub owner_receipt_token: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    /// The reward accounts below are only needed when `claim_all` is set.
    #[account(
        address = global_config.reward_mint @ ErrorCode::InvalidVaultMint
    )]
    pub reward_mint: Option<Box<InterfaceAccount<'info, Mint>>>,

    #[account(
        mut,
        address = global_config.rewards_vault @ ErrorCode::InvalidAddress
    )]
    pub rewards_vault: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(mut)]
    pub owner_reward_token: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(
        address = global_config.secondary_mint @ ErrorCode::InvalidVaultMint
    )]
    pub secondary_mint: Option<Box<InterfaceAccount<'info, Mint>>>,

    #[account(
        mut,
        seeds = [SECONDARY_VAULT_SEED.as_bytes()],
        bump,
    )]
    pub secondary_vault: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    #[account(mut)]
    pub owner_secondary_token: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

impl<'info> Withdraw<'info> {
    fn payout_accounts_present(&self) -> [bool; 6] {
        [
            self.reward_mint.is_some(),
            self.rewards_vault.is_some(),
            self.owner_reward_token.is_some(),
            self.secondary_mint.is_some(),
            self.secondary_vault.is_some(),
            self.owner_secondary_token.is_some(),
        ]
    }

    /// Pays claimed WNCG and BAL. Nothing is claimed without `claim_all`,
    /// in which case the accounts may be absent.
    fn pay_rewards(&self, wncg_paid: u64, bal_paid: u64, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        let owner = self.owner.key();
        if let (Some(reward_mint), Some(rewards_vault), Some(owner_reward_token)) = (
            self.reward_mint.as_ref(),
            self.rewards_vault.as_ref(),
            self.owner_reward_token.as_ref(),
        ) {
            transfer_from_pool_vault_to_user(
                self.authority.to_account_info(),
                rewards_vault.to_account_info(),
                owner_reward_token.to_account_info(),
                reward_mint.to_account_info(),
                self.token_program.to_account_info(),
                wncg_paid,
                reward_mint.decimals,
                signer_seeds,
            )?;
            if wncg_paid > 0 {
                emit!(RewardPaid {
                    user: owner,
                    reward_mint: reward_mint.key(),
                    amount: wncg_paid,
                });
            }
        }
        if let (Some(secondary_mint), Some(secondary_vault), Some(owner_secondary_token)) = (
            self.secondary_mint.as_ref(),
            self.secondary_vault.as_ref(),
            self.owner_secondary_token.as_ref(),
        ) {
            transfer_from_pool_vault_to_user(
                self.authority.to_account_info(),
                secondary_vault.to_account_info(),
                owner_secondary_token.to_account_info(),
                secondary_mint.to_account_info(),
                self.token_program.to_account_info(),
                bal_paid,
                secondary_mint.decimals,
                signer_seeds,
            )?;
            if bal_paid > 0 {
                emit!(RewardPaid {
                    user: owner,
                    reward_mint: secondary_mint.key(),
                    amount: bal_paid,
                });
            }
        }
        Ok(())
    }
}

fn require_payout_accounts(claim_all: bool, present: &[bool]) -> Result<()> {
    if claim_all {
        require!(
            present.iter().all(|present| *present),
            ErrorCode::MissingRewardAccount
        );
    }
    Ok(())
}

/// Withdraws `amount` of principal inside the owner's withdraw window.
///
/// Steps:
/// 1. Check the cooldown window, settle both reward streams and debit the
///    stake (see [`Ledger::withdraw`]). With `claim_all`, also release all
///    pending WNCG and BAL.
/// 2. Pull `amount` back from the yield position, if one is configured.
/// 3. Burn `amount` receipt tokens from the owner.
/// 4. Return the principal and pay any claimed rewards.
pub fn withdraw<'info>(
    ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>,
    amount: u64,
    claim_all: bool,
) -> Result<()> {
    let now = current_timestamp()?;
    let owner = ctx.accounts.owner.key();
    require_payout_accounts(claim_all, &ctx.accounts.payout_accounts_present())?;

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
        ledger.withdraw(user_stake_info, amount)?;
        if claim_all {
            ledger.claim_all(user_stake_info, u64::MAX)?
        } else {
            (0, 0)
        }
    };

    let (Some(receipt_mint), Some(owner_receipt_token)) = (
        ctx.accounts.receipt_mint.as_ref(),
        ctx.accounts.owner_receipt_token.as_ref(),
    ) else {
        return err!(ErrorCode::InvalidDepositTokenAddr);
    };

    let signer_seeds: &[&[&[u8]]] = &[&[
        crate::AUTH_SEED.as_bytes(),
        &[ctx.accounts.global_config.authority_bump],
    ]];
    YieldPosition::load(
        &ctx.accounts.global_config.yield_program,
        ctx.accounts.authority.to_account_info(),
        ctx.remaining_accounts,
    )?
    .withdraw(amount, signer_seeds)?;
    token_burn(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        receipt_mint.to_account_info(),
        owner_receipt_token.to_account_info(),
        amount,
    )?;
    transfer_from_pool_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.principal_vault.to_account_info(),
        ctx.accounts.owner_principal_token.to_account_info(),
        ctx.accounts.principal_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.principal_mint.decimals,
        signer_seeds,
    )?;
    ctx.accounts.pay_rewards(wncg_paid, bal_paid, signer_seeds)?;

    let user_stake_info = &ctx.accounts.user_stake_info;
    emit!(Withdrawn {
        user: owner,
        amount,
        staked_balance: user_stake_info.staked_balance,
        total_staked: ctx.accounts.stake_info.total_staked,
    });
    msg!("withdrew {} for {}", amount, owner);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn principal_only_withdraw_needs_no_reward_accounts() {
        assert!(require_payout_accounts(false, &[false; 6]).is_ok());
        assert!(require_payout_accounts(true, &[true; 6]).is_ok());
    }

    #[test]
    fn claim_all_needs_every_reward_account() {
        for missing in 0..6 {
            let mut present = [true; 6];
            present[missing] = false;
            assert_eq!(
                require_payout_accounts(true, &present).unwrap_err(),
                Error::from(ErrorCode::MissingRewardAccount)
            );
        }
    }
}
