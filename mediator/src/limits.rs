//! Limit Tracker
//!
//! Tracks cumulative value moved per day against configured caps, separately
//! for outbound relays and inbound executions. A day is the block time divided
//! into fixed 86 400 second epochs; unused capacity never carries over.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

/// Length of one accounting epoch in seconds
pub const DAY_SECONDS: u64 = 86_400;

#[cw_serde]
#[derive(Copy)]
pub enum Direction {
    /// Tokens relayed from this chain
    Outbound,
    /// Instructions executed on this chain
    Inbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outbound => write!(f, "outbound"),
            Direction::Inbound => write!(f, "inbound"),
        }
    }
}

/// Relay-side limits
#[cw_serde]
pub struct OutboundLimits {
    /// Cap on value relayed per day (0 halts relaying)
    pub daily_limit: Uint128,
    /// Largest single relay (0 halts relaying)
    pub max_per_tx: Uint128,
    /// Smallest single relay
    pub min_per_tx: Uint128,
}

/// Execution-side limits
#[cw_serde]
pub struct ExecutionLimits {
    /// Cap on value executed per day (0 parks everything)
    pub daily_limit: Uint128,
    /// Largest single execution
    pub max_per_tx: Uint128,
}

impl OutboundLimits {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.min_per_tx.is_zero() {
            return Err(invalid("min_per_tx must be greater than zero"));
        }
        if !self.max_per_tx.is_zero() && self.max_per_tx <= self.min_per_tx {
            return Err(invalid("max_per_tx must be greater than min_per_tx"));
        }
        if !self.daily_limit.is_zero() && self.daily_limit <= self.max_per_tx {
            return Err(invalid("daily_limit must be greater than max_per_tx"));
        }
        Ok(())
    }

    /// Stricter check used at initialization, where zero is not allowed.
    pub fn validate_initial(&self) -> Result<(), ContractError> {
        if self.daily_limit.is_zero() || self.max_per_tx.is_zero() {
            return Err(invalid("outbound limits must be non-zero"));
        }
        self.validate()
    }
}

impl ExecutionLimits {
    pub fn validate(&self) -> Result<(), ContractError> {
        if !self.daily_limit.is_zero() && self.daily_limit <= self.max_per_tx {
            return Err(invalid(
                "execution daily_limit must be greater than execution max_per_tx",
            ));
        }
        Ok(())
    }

    pub fn validate_initial(&self) -> Result<(), ContractError> {
        if self.daily_limit.is_zero() || self.max_per_tx.is_zero() {
            return Err(invalid("execution limits must be non-zero"));
        }
        self.validate()
    }
}

fn invalid(reason: &str) -> ContractError {
    ContractError::InvalidLimits {
        reason: reason.to_string(),
    }
}

// ============================================================================
// Storage
// ============================================================================

pub const OUTBOUND_LIMITS: Item<OutboundLimits> = Item::new("outbound_limits");

pub const EXECUTION_LIMITS: Item<ExecutionLimits> = Item::new("execution_limits");

/// Key: day number, Value: value relayed that day
pub const TOTAL_SPENT_PER_DAY: Map<u64, Uint128> = Map::new("total_spent_per_day");

/// Key: day number, Value: value executed that day
pub const TOTAL_EXECUTED_PER_DAY: Map<u64, Uint128> = Map::new("total_executed_per_day");

// ============================================================================
// Tracking
// ============================================================================

/// Day number for a block time.
pub fn day_of(time: Timestamp) -> u64 {
    time.seconds() / DAY_SECONDS
}

fn spend_map(direction: Direction) -> Map<'static, u64, Uint128> {
    match direction {
        Direction::Outbound => TOTAL_SPENT_PER_DAY,
        Direction::Inbound => TOTAL_EXECUTED_PER_DAY,
    }
}

/// Value already moved in `direction` during `day`.
pub fn spent_on(storage: &dyn Storage, direction: Direction, day: u64) -> StdResult<Uint128> {
    Ok(spend_map(direction)
        .may_load(storage, day)?
        .unwrap_or_default())
}

/// Add `value` to the day bucket for `direction`.
pub fn record_spend(
    storage: &mut dyn Storage,
    direction: Direction,
    day: u64,
    value: Uint128,
) -> Result<(), ContractError> {
    let total = spent_on(storage, direction, day)?.checked_add(value).map_err(StdError::from)?;
    spend_map(direction).save(storage, day, &total)?;
    Ok(())
}

/// Check `value` against the per-tx bounds and the would-be day total.
pub fn check_limit(
    storage: &dyn Storage,
    direction: Direction,
    day: u64,
    value: Uint128,
) -> Result<(), ContractError> {
    let (daily_limit, max_per_tx, min_per_tx) = match direction {
        Direction::Outbound => {
            let limits = OUTBOUND_LIMITS.load(storage)?;
            (limits.daily_limit, limits.max_per_tx, limits.min_per_tx)
        }
        Direction::Inbound => {
            let limits = EXECUTION_LIMITS.load(storage)?;
            (limits.daily_limit, limits.max_per_tx, Uint128::zero())
        }
    };

    let exceeded = |limit_type: &str, limit: Uint128| ContractError::LimitExceeded {
        direction,
        limit_type: limit_type.to_string(),
        limit,
        requested: value,
    };

    if value < min_per_tx {
        return Err(exceeded("min_per_tx", min_per_tx));
    }
    if value > max_per_tx {
        return Err(exceeded("max_per_tx", max_per_tx));
    }

    let next_total = spent_on(storage, direction, day)?.checked_add(value);
    match next_total {
        Ok(total) if total <= daily_limit => Ok(()),
        _ => Err(exceeded("daily", daily_limit)),
    }
}

/// Boolean form of [`check_limit`]; storage errors still propagate.
pub fn within_limit(
    storage: &dyn Storage,
    direction: Direction,
    day: u64,
    value: Uint128,
) -> StdResult<bool> {
    match check_limit(storage, direction, day, value) {
        Ok(()) => Ok(true),
        Err(ContractError::Std(err)) => Err(err),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    fn save_limits(storage: &mut dyn Storage) {
        OUTBOUND_LIMITS
            .save(
                storage,
                &OutboundLimits {
                    daily_limit: Uint128::new(1000),
                    max_per_tx: Uint128::new(500),
                    min_per_tx: Uint128::new(10),
                },
            )
            .unwrap();
        EXECUTION_LIMITS
            .save(
                storage,
                &ExecutionLimits {
                    daily_limit: Uint128::new(1000),
                    max_per_tx: Uint128::new(500),
                },
            )
            .unwrap();
    }

    #[test]
    fn test_day_of() {
        assert_eq!(day_of(Timestamp::from_seconds(0)), 0);
        assert_eq!(day_of(Timestamp::from_seconds(86_399)), 0);
        assert_eq!(day_of(Timestamp::from_seconds(86_400)), 1);
    }

    #[test]
    fn test_outbound_bounds() {
        let mut deps = mock_dependencies();
        save_limits(deps.as_mut().storage);
        let storage = deps.as_ref().storage;

        assert!(within_limit(storage, Direction::Outbound, 0, Uint128::new(10)).unwrap());
        assert!(within_limit(storage, Direction::Outbound, 0, Uint128::new(500)).unwrap());
        assert!(!within_limit(storage, Direction::Outbound, 0, Uint128::new(9)).unwrap());
        assert!(!within_limit(storage, Direction::Outbound, 0, Uint128::new(501)).unwrap());
    }

    #[test]
    fn test_inbound_has_no_minimum() {
        let mut deps = mock_dependencies();
        save_limits(deps.as_mut().storage);

        assert!(within_limit(deps.as_ref().storage, Direction::Inbound, 0, Uint128::new(1)).unwrap());
    }

    #[test]
    fn test_daily_cap_and_rollover() {
        let mut deps = mock_dependencies();
        save_limits(deps.as_mut().storage);

        record_spend(deps.as_mut().storage, Direction::Outbound, 7, Uint128::new(500)).unwrap();
        record_spend(deps.as_mut().storage, Direction::Outbound, 7, Uint128::new(400)).unwrap();

        let err = check_limit(deps.as_ref().storage, Direction::Outbound, 7, Uint128::new(101))
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::LimitExceeded {
                direction: Direction::Outbound,
                limit_type: "daily".to_string(),
                limit: Uint128::new(1000),
                requested: Uint128::new(101),
            }
        );
        assert!(within_limit(deps.as_ref().storage, Direction::Outbound, 7, Uint128::new(100)).unwrap());

        // Next day starts empty
        assert!(within_limit(deps.as_ref().storage, Direction::Outbound, 8, Uint128::new(500)).unwrap());
        // Directions are independent
        assert_eq!(
            spent_on(deps.as_ref().storage, Direction::Inbound, 7).unwrap(),
            Uint128::zero()
        );
    }

    #[test]
    fn test_validate_limits() {
        let limits = OutboundLimits {
            daily_limit: Uint128::new(1000),
            max_per_tx: Uint128::new(500),
            min_per_tx: Uint128::new(10),
        };
        assert!(limits.validate_initial().is_ok());

        let zero_min = OutboundLimits {
            min_per_tx: Uint128::zero(),
            ..limits.clone()
        };
        assert!(zero_min.validate().is_err());

        let max_below_min = OutboundLimits {
            max_per_tx: Uint128::new(5),
            ..limits.clone()
        };
        assert!(max_below_min.validate().is_err());

        let halted = OutboundLimits {
            daily_limit: Uint128::zero(),
            ..limits.clone()
        };
        assert!(halted.validate().is_ok());
        assert!(halted.validate_initial().is_err());

        let execution = ExecutionLimits {
            daily_limit: Uint128::new(500),
            max_per_tx: Uint128::new(500),
        };
        assert!(execution.validate().is_err());
    }
}
