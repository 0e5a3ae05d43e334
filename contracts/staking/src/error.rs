use soroban_sdk::contracterror;
use vonvault::EngineError;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 600,
    AdminNotSet = 601,
    ConfigNotSet = 602,
    SameAdmin = 603,
    PositionNotFound = 604,
    PositionNotMatured = 605,
    PositionAlreadyClaimed = 606,
    InvalidAmount = 607,
    UnknownRateKey = 608,
    InconsistentTierBounds = 609,
    InvalidTerm = 610,
    InvalidBps = 611,
    StakingDisabled = 612,
    StakeBelowMinimum = 613,
    StakeAboveMaximum = 614,
    FeesExceedAmount = 615,
}

impl From<EngineError> for ContractError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidAmount => ContractError::InvalidAmount,
            EngineError::UnknownRateKey => ContractError::UnknownRateKey,
            EngineError::InconsistentTierBounds => ContractError::InconsistentTierBounds,
            EngineError::InvalidTerm => ContractError::InvalidTerm,
            EngineError::InvalidBps => ContractError::InvalidBps,
            EngineError::StakingDisabled => ContractError::StakingDisabled,
            EngineError::StakeBelowMinimum => ContractError::StakeBelowMinimum,
            EngineError::StakeAboveMaximum => ContractError::StakeAboveMaximum,
            EngineError::FeesExceedAmount => ContractError::FeesExceedAmount,
        }
    }
}
