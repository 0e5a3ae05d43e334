/// Stablecoin amounts are stored with 7 decimal places, the Stellar token convention.
pub const AMOUNT_DECIMALS: u32 = 7;
pub const ONE_UNIT: i128 = 10i128.pow(AMOUNT_DECIMALS);

/// One cent in atomic units. Two independently computed totals are considered equal
/// when they differ by no more than this.
pub const ROUNDING_EPSILON: i128 = ONE_UNIT / 100;

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
pub const DAYS_PER_MONTH: u64 = 30;
pub const MONTHS_PER_YEAR: i128 = 12;

pub const MAX_BPS: i64 = 10_000;

// Defaults for a freshly deployed engine
pub const DEFAULT_TERM_DAYS: u64 = 365;
/// Longest staking term a config may set
pub const MAX_TERM_DAYS: u64 = 10 * 365;
pub const DEFAULT_STAKING_FEE_BPS: i64 = 75;
pub const DEFAULT_SWAP_PLATFORM_FEE_BPS: i64 = 85;
pub const DEFAULT_MIN_STAKE: i128 = 1_000 * ONE_UNIT;
pub const DEFAULT_MAX_STAKE: i128 = 250_000 * ONE_UNIT;
