use soroban_sdk::{contracttype, String, Vec};

use crate::{constants::SECONDS_PER_DAY, error::EngineError};

/// Membership bands, ordered from lowest to highest.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TierName {
    Basic = 0,
    Club = 1,
    Premium = 2,
    Vip = 3,
    Elite = 4,
}

/// Stakeable stablecoins
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Token {
    Usdc = 0,
    Usdt = 1,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Network {
    Ethereum = 0,
    Polygon = 1,
    Bsc = 2,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PositionStatus {
    Active = 0,
    Matured = 1,
    Claimed = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    pub name: TierName,
    /// Inclusive lower bound of the total staked principal
    pub min_amount: i128,
    /// Inclusive upper bound, `None` for the top tier
    pub max_amount: Option<i128>,
    pub apy_bps: i64,
    /// Members of a tier without staking can only hold funds
    pub staking_enabled: bool,
    pub color: String,
    pub benefits: Vec<String>,
}

impl Tier {
    pub fn contains(&self, amount: i128) -> bool {
        amount >= self.min_amount && self.max_amount.map_or(true, |max| amount <= max)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub id: u64,
    /// Gross amount staked, counted towards the member's tier
    pub principal: i128,
    /// Charged when the position was opened, earns no interest
    pub service_fee: i128,
    pub token: Token,
    /// Tier the position was opened in
    pub tier: TierName,
    /// Tier APY at the time the position was opened
    pub apy_bps: i64,
    pub start_date: u64,
    pub maturity_date: u64,
    pub status: PositionStatus,
}

impl StakePosition {
    /// Status as of `now`. Active positions mature on their own once the term is over,
    /// claimed ones stay claimed.
    pub fn status_at(&self, now: u64) -> PositionStatus {
        match self.status {
            PositionStatus::Active if now >= self.maturity_date => PositionStatus::Matured,
            status => status,
        }
    }

    pub fn with_status_at(&self, now: u64) -> StakePosition {
        StakePosition {
            status: self.status_at(now),
            ..self.clone()
        }
    }

    /// Principal net of the service fee, the amount interest accrues on.
    pub fn invested(&self) -> Result<i128, EngineError> {
        if self.principal <= 0 || self.service_fee < 0 || self.service_fee >= self.principal {
            return Err(EngineError::InvalidAmount);
        }
        Ok(self.principal - self.service_fee)
    }

    pub fn term_days(&self) -> Result<u64, EngineError> {
        if self.maturity_date <= self.start_date {
            return Err(EngineError::InvalidTerm);
        }
        Ok((self.maturity_date - self.start_date) / SECONDS_PER_DAY)
    }
}
