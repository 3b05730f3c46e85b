use anchor_lang::prelude::*;

declare_id!("Hk5Lu3an5VXr4V5kX6oiJcdJ3UhpgxLDepUcEoTevY3e");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("6zQEnn7H3x3df6Mhiz2ZiYr4Q9g1L4u1SsJq9UzcRC1A");
}

pub const AUTH_SEED: &str = "staking_authority";
pub const PRINCIPAL_VAULT_SEED: &str = "principal_vault";
pub const SECONDARY_VAULT_SEED: &str = "secondary_vault";

pub mod error;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod states;
pub mod utils;

use instructions::*;

#[program]
pub mod wncg_staking {

    use super::*;

    pub fn initialise_configs(
        ctx: Context<InitialiseConfigs>,
        operator: Pubkey,
        yield_program: Pubkey,
    ) -> Result<()> {
        instructions::initialise_configs(ctx, operator, yield_program)
    }

    pub fn create_reward_pool(ctx: Context<CreateRewardPool>) -> Result<()> {
        instructions::create_reward_pool(ctx)
    }

    pub fn config_deposit_token_and_bal_reward_pool(
        ctx: Context<ConfigCollaborators>,
    ) -> Result<()> {
        instructions::config_deposit_token_and_bal_reward_pool(ctx)
    }

    pub fn config_emission_per_second(
        ctx: Context<UpdateEmission>,
        emission_per_second: u64,
    ) -> Result<()> {
        instructions::config_emission_per_second(ctx, emission_per_second)
    }

    pub fn config_cooldown_second_and_unstake_window(
        ctx: Context<UpdateConfig>,
        cooldown_seconds: u64,
        unstake_window: u64,
    ) -> Result<()> {
        instructions::config_cooldown_second_and_unstake_window(
            ctx,
            cooldown_seconds,
            unstake_window,
        )
    }

    pub fn config_fees(
        ctx: Context<UpdateConfig>,
        earmark_incentive: u64,
        operation_fee: u64,
    ) -> Result<()> {
        instructions::config_fees(ctx, earmark_incentive, operation_fee)
    }

    pub fn change_operator(ctx: Context<UpdateConfig>, new_operator: Pubkey) -> Result<()> {
        instructions::change_operator(ctx, new_operator)
    }

    pub fn change_rewards_vault(ctx: Context<UpdateVault>) -> Result<()> {
        instructions::change_rewards_vault(ctx)
    }

    pub fn change_bal_operation_vault(ctx: Context<UpdateVault>) -> Result<()> {
        instructions::change_bal_operation_vault(ctx)
    }

    pub fn change_pause_staking(ctx: Context<UpdateConfig>, pause_staking: bool) -> Result<()> {
        instructions::change_pause_staking(ctx, pause_staking)
    }

    pub fn stake<'info>(
        ctx: Context<'_, '_, 'info, 'info, Stake<'info>>,
        amount: u64,
    ) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    pub fn withdraw<'info>(
        ctx: Context<'_, '_, 'info, 'info, Withdraw<'info>>,
        amount: u64,
        claim_all: bool,
    ) -> Result<()> {
        instructions::withdraw(ctx, amount, claim_all)
    }

    pub fn cooldown(ctx: Context<Cooldown>) -> Result<()> {
        instructions::cooldown(ctx)
    }

    pub fn claim_wncg_rewards(ctx: Context<Claim>, amount: u64) -> Result<()> {
        instructions::claim_wncg_rewards(ctx, amount)
    }

    pub fn claim_bal_rewards(ctx: Context<Claim>) -> Result<()> {
        instructions::claim_bal_rewards(ctx)
    }

    pub fn claim_all_rewards(ctx: Context<Claim>, amount: u64) -> Result<()> {
        instructions::claim_all_rewards(ctx, amount)
    }

    pub fn earmark_rewards<'info>(
        ctx: Context<'_, '_, 'info, 'info, EarmarkRewards<'info>>,
    ) -> Result<()> {
        instructions::earmark_rewards(ctx)
    }

    pub fn process_idle_rewards(ctx: Context<ProcessIdleRewards>) -> Result<()> {
        instructions::process_idle_rewards(ctx)
    }

    pub fn total_staked(ctx: Context<ViewGlobal>) -> Result<u64> {
        instructions::total_staked(ctx)
    }

    pub fn staked_token_balance(ctx: Context<ViewAccount>) -> Result<u64> {
        instructions::staked_token_balance(ctx)
    }

    pub fn earned_wncg(ctx: Context<ViewAccount>) -> Result<u64> {
        instructions::earned_wncg(ctx)
    }

    pub fn earned_bal(ctx: Context<ViewAccount>) -> Result<u64> {
        instructions::earned_bal(ctx)
    }

    pub fn get_cooldown_end_timestamp(ctx: Context<ViewAccount>) -> Result<u64> {
        instructions::get_cooldown_end_timestamp(ctx)
    }

    pub fn get_withdraw_end_timestamp(ctx: Context<ViewAccount>) -> Result<u64> {
        instructions::get_withdraw_end_timestamp(ctx)
    }

    pub fn get_next_cooldown_timestamp(
        ctx: Context<ViewAccount>,
        from_cooldown_timestamp: u64,
        incoming_amount: u64,
        to_balance: u64,
    ) -> Result<u64> {
        instructions::get_next_cooldown_timestamp(
            ctx,
            from_cooldown_timestamp,
            incoming_amount,
            to_balance,
        )
    }

    pub fn get_bal_reward_rate(ctx: Context<ViewGlobal>) -> Result<u64> {
        instructions::get_bal_reward_rate(ctx)
    }

    pub fn get_wncg_emission_per_sec(ctx: Context<ViewGlobal>) -> Result<u64> {
        instructions::get_wncg_emission_per_sec(ctx)
    }

    pub fn get_current_block_timestamp(ctx: Context<ViewGlobal>) -> Result<u64> {
        instructions::get_current_block_timestamp(ctx)
    }
}
