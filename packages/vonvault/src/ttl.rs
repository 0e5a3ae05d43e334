// Constants for storage bump amounts
pub const DAY_IN_LEDGERS: u32 = 17280;

// target TTL for the contract instance and its code (7 days of ledger units).
pub const INSTANCE_TARGET_TTL: u32 = 7 * DAY_IN_LEDGERS;
// an instance TTL below this threshold is bumped back to INSTANCE_TARGET_TTL.
pub const INSTANCE_RENEWAL_THRESHOLD: u32 = INSTANCE_TARGET_TTL - DAY_IN_LEDGERS;

// persistent entries are bumped to 30 days on every read or write, so positions stay
// live while their member keeps using the contract.
pub const PERSISTENT_TARGET_TTL: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_RENEWAL_THRESHOLD: u32 = PERSISTENT_TARGET_TTL - DAY_IN_LEDGERS;
