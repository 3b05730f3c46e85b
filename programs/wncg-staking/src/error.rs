use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Caller is not the operator")]
    OnlyOperator,

    #[msg("Initializer is not the program admin")]
    InvalidOwner,

    #[msg("Amount must be greater than zero")]
    InvalidZeroAmount,

    #[msg("Cooldown seconds must be greater than zero")]
    InvalidCooldownSeconds,

    #[msg("Unstake window must be greater than zero")]
    InvalidUnstakeWindow,

    #[msg("Earmark incentive exceeds its maximum")]
    InvalidEarmarkIncentive,

    #[msg("Operation fee exceeds its maximum")]
    InvalidOperationFee,

    #[msg("Address must not be the default pubkey")]
    InvalidAddress,

    #[msg("Token account mint does not match the configured mint")]
    InvalidVaultMint,

    #[msg("Receipt mint must be controlled by the staking authority and match principal decimals")]
    InvalidReceiptMint,

    #[msg("Deposit token is not configured")]
    InvalidDepositTokenAddr,

    #[msg("BAL reward pool is not configured")]
    InvalidBalRewardPool,

    #[msg("Yield position program does not match the configured program")]
    InvalidYieldProgram,

    #[msg("Missing remaining account")]
    MissingRemainingAccount,

    #[msg("Reward token accounts are required to claim while withdrawing")]
    MissingRewardAccount,

    #[msg("Staking is paused")]
    StakingPaused,

    #[msg("Insufficient staked balance")]
    InsufficientStakedBalance,

    #[msg("Cooldown period has not elapsed")]
    InsufficientCooldown,

    #[msg("Unstake window has finished, call cooldown again")]
    UnstakeWindowFinished,

    #[msg("No active cooldown for a staked balance")]
    InvalidBalanceOnCooldown,

    #[msg("Collaborators cannot change while principal is staked")]
    CollaboratorInUse,

    #[msg("Invalid timestamp conversion")]
    InvalidTimestamp,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,
}

/// Coarse classification of [`ErrorCode`] used by clients and keepers to
/// decide whether a failed instruction is worth retrying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller lacks the operator role.
    Authorization,
    /// Argument rejected (zero amount, bad duration, fee over max, bad address).
    Validation,
    /// A required collaborator has not been configured yet.
    Configuration,
    /// The current ledger state forbids the operation.
    State,
    /// Fixed-point or clock arithmetic failed.
    Arithmetic,
}

impl ErrorCode {
    pub fn kind(self) -> ErrorKind {
        match self {
            ErrorCode::OnlyOperator | ErrorCode::InvalidOwner => ErrorKind::Authorization,
            ErrorCode::InvalidZeroAmount
            | ErrorCode::InvalidCooldownSeconds
            | ErrorCode::InvalidUnstakeWindow
            | ErrorCode::InvalidEarmarkIncentive
            | ErrorCode::InvalidOperationFee
            | ErrorCode::InvalidAddress
            | ErrorCode::InvalidVaultMint
            | ErrorCode::InvalidReceiptMint
            | ErrorCode::InvalidYieldProgram
            | ErrorCode::MissingRemainingAccount
            | ErrorCode::MissingRewardAccount
            | ErrorCode::InsufficientStakedBalance => ErrorKind::Validation,
            ErrorCode::InvalidDepositTokenAddr | ErrorCode::InvalidBalRewardPool => {
                ErrorKind::Configuration
            }
            ErrorCode::StakingPaused
            | ErrorCode::InsufficientCooldown
            | ErrorCode::UnstakeWindowFinished
            | ErrorCode::InvalidBalanceOnCooldown
            | ErrorCode::CollaboratorInUse => ErrorKind::State,
            ErrorCode::InvalidTimestamp | ErrorCode::MathOverflow => ErrorKind::Arithmetic,
        }
    }
}
