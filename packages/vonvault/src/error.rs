use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum EngineError {
    /// Negative principal, gross amount or gas estimate
    InvalidAmount = 1,
    /// Tier or network missing from the configured rate tables
    UnknownRateKey = 2,
    /// Tier table is not contiguous, ordered, or fully covering
    InconsistentTierBounds = 3,
    InvalidTerm = 4,
    InvalidBps = 5,

    /// Stake admission errors
    StakingDisabled = 6,
    StakeBelowMinimum = 7,
    StakeAboveMaximum = 8,

    FeesExceedAmount = 9,
}
