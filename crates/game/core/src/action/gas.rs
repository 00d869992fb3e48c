use crate::error::{ErrorKind, GameError};

/// Tracks cost charged against an action's gas limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    used: u64,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Charges `amount`; on failure nothing is charged.
    pub fn charge(&mut self, amount: u64) -> Result<(), GasError> {
        match self.used.checked_add(amount) {
            Some(total) if total <= self.limit => {
                self.used = total;
                Ok(())
            }
            _ => Err(GasError::Exhausted {
                limit: self.limit,
                used: self.used,
                required: amount,
            }),
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn remaining(&self) -> u64 {
        self.limit - self.used
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GasError {
    #[error("gas exhausted: {required} required with {used} of {limit} used")]
    Exhausted { limit: u64, used: u64, required: u64 },
}

impl GameError for GasError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::CostExhausted
    }

    fn error_code(&self) -> &'static str {
        "GAS_EXHAUSTED"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charges_until_limit() {
        let mut meter = GasMeter::new(5);
        meter.charge(3).unwrap();
        meter.charge(2).unwrap();
        assert_eq!(meter.remaining(), 0);

        let error = meter.charge(1).unwrap_err();
        assert_eq!(
            error,
            GasError::Exhausted {
                limit: 5,
                used: 5,
                required: 1
            }
        );
        assert_eq!(meter.used(), 5);
    }

    #[test]
    fn overflowing_charge_is_exhaustion() {
        let mut meter = GasMeter::new(u64::MAX);
        meter.charge(1).unwrap();
        assert!(meter.charge(u64::MAX).is_err());
    }
}
