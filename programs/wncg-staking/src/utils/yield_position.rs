//! Adapter for the external position that staked principal is routed through.
//!
//! The position is any program exposing Anchor-style `deposit(amount)`,
//! `withdraw(amount)` and `harvest()` instructions that take the staking
//! authority as their first (signer) account. Its remaining accounts are
//! supplied by the caller through `remaining_accounts`, led by the position
//! program itself.

use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use anchor_spl::token_interface::TokenAccount;

/// Anchor instruction discriminator: first 8 bytes of `sha256("global:<name>")`.
pub fn sighash(name: &str) -> [u8; 8] {
    let preimage = format!("global:{name}");
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    discriminator
}

pub enum YieldPosition<'info> {
    /// No position wired up: deposits and withdrawals stay in the principal
    /// vault and harvests yield nothing.
    Unconfigured,
    External {
        program: AccountInfo<'info>,
        authority: AccountInfo<'info>,
        accounts: Vec<AccountInfo<'info>>,
    },
}

impl<'info> YieldPosition<'info> {
    /// Resolves the position from the configured program and the
    /// instruction's remaining accounts.
    pub fn load(
        yield_program: &Pubkey,
        authority: AccountInfo<'info>,
        remaining_accounts: &[AccountInfo<'info>],
    ) -> Result<Self> {
        if *yield_program == Pubkey::default() {
            return Ok(Self::Unconfigured);
        }
        let (program, accounts) = remaining_accounts
            .split_first()
            .ok_or(ErrorCode::MissingRemainingAccount)?;
        require_keys_eq!(program.key(), *yield_program, ErrorCode::InvalidYieldProgram);
        require!(program.executable, ErrorCode::InvalidYieldProgram);

        Ok(Self::External {
            program: program.clone(),
            authority,
            accounts: accounts.to_vec(),
        })
    }

    fn invoke(&self, name: &str, amount: Option<u64>, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        let Self::External {
            program,
            authority,
            accounts,
        } = self
        else {
            return Ok(());
        };

        let mut data = sighash(name).to_vec();
        if let Some(amount) = amount {
            data.extend_from_slice(&amount.to_le_bytes());
        }
        let mut metas = Vec::with_capacity(accounts.len() + 1);
        metas.push(AccountMeta::new_readonly(authority.key(), true));
        metas.extend(accounts.iter().map(|account| AccountMeta {
            pubkey: account.key(),
            is_signer: account.is_signer,
            is_writable: account.is_writable,
        }));
        let ix = Instruction {
            program_id: program.key(),
            accounts: metas,
            data,
        };

        let mut infos = Vec::with_capacity(accounts.len() + 2);
        infos.push(authority.clone());
        infos.extend(accounts.iter().cloned());
        infos.push(program.clone());
        invoke_signed(&ix, &infos, signer_seeds)?;

        #[cfg(feature = "enable-log")]
        msg!("yield position {}: amount={:?}", name, amount);
        Ok(())
    }

    /// Routes `amount` of principal from the principal vault into the position.
    pub fn deposit(&self, amount: u64, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        self.invoke("deposit", Some(amount), signer_seeds)
    }

    /// Pulls `amount` of principal back into the principal vault.
    pub fn withdraw(&self, amount: u64, signer_seeds: &[&[&[u8]]]) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        self.invoke("withdraw", Some(amount), signer_seeds)
    }

    /// Collects pending rewards into `secondary_vault` and returns how much
    /// arrived.
    pub fn harvest(
        &self,
        secondary_vault: &mut InterfaceAccount<'info, TokenAccount>,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u64> {
        if let Self::Unconfigured = self {
            return Ok(0);
        }
        let before = secondary_vault.amount;
        self.invoke("harvest", None, signer_seeds)?;
        secondary_vault.reload()?;
        secondary_vault
            .amount
            .checked_sub(before)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    #[test]
    fn sighash_matches_anchor_convention() {
        let expected = &hash(b"global:harvest").to_bytes()[..8];
        assert_eq!(&sighash("harvest")[..], expected);
        assert_ne!(sighash("deposit"), sighash("withdraw"));
    }

    #[test]
    fn resolution_from_remaining_accounts() {
        let authority_key = Pubkey::new_unique();
        let program_key = Pubkey::new_unique();
        let other_key = Pubkey::new_unique();
        let owner = Pubkey::default();
        let (mut l0, mut l1, mut l2) = (0u64, 0u64, 0u64);
        let (mut d0, mut d1, mut d2) = (Vec::<u8>::new(), Vec::<u8>::new(), Vec::<u8>::new());
        let authority = AccountInfo::new(
            &authority_key, false, false, &mut l0, &mut d0, &owner, false, 0,
        );
        let program = AccountInfo::new(
            &program_key, false, false, &mut l1, &mut d1, &owner, true, 0,
        );
        let other = AccountInfo::new(
            &other_key, false, true, &mut l2, &mut d2, &owner, false, 0,
        );

        let position = YieldPosition::load(&Pubkey::default(), authority.clone(), &[]).unwrap();
        assert!(matches!(position, YieldPosition::Unconfigured));

        assert_eq!(
            YieldPosition::load(&program_key, authority.clone(), &[])
                .err()
                .unwrap(),
            Error::from(ErrorCode::MissingRemainingAccount)
        );
        assert_eq!(
            YieldPosition::load(&program_key, authority.clone(), &[other.clone()])
                .err()
                .unwrap(),
            Error::from(ErrorCode::InvalidYieldProgram)
        );

        match YieldPosition::load(&program_key, authority, &[program, other]).unwrap() {
            YieldPosition::External { accounts, .. } => {
                assert_eq!(accounts.len(), 1);
                assert_eq!(accounts[0].key(), other_key);
            }
            YieldPosition::Unconfigured => panic!("expected an external position"),
        }
    }

    #[test]
    fn unconfigured_position_is_inert() {
        let position = YieldPosition::Unconfigured;
        position.deposit(10, &[]).unwrap();
        position.withdraw(10, &[]).unwrap();
    }
}
