//! Gas cost tiers and the per-frame gas meter.
//!
//! Costs follow EVM conventions. Fixed-tier opcodes pre-check the meter;
//! EXP derives its cost from the exponent's significant byte count.

use super::error::HaltReason;

// ── Fixed tiers ───────────────────────────────────────────────────────────
pub const GAS_ZERO: u64 = 0;
pub const GAS_BASE: u64 = 2;
pub const GAS_VERYLOW: u64 = 3;
pub const GAS_LOW: u64 = 5;
pub const GAS_MID: u64 = 8;

// ── Dynamic costs ─────────────────────────────────────────────────────────
pub const GAS_EXP_BASE: u64 = 10;
pub const GAS_EXP_BYTE: u64 = 50;
/// Warm external-call base charge.
pub const GAS_EXT_CALL: u64 = 100;
/// Container-create base charge.
pub const GAS_CREATE: u64 = 32_000;

/// EXP cost: base plus a per-byte charge on the significant bytes of the
/// exponent.
pub fn exp_cost(exponent_bytes: u32) -> u64 {
    GAS_EXP_BASE + GAS_EXP_BYTE * exponent_bytes as u64
}

/// Tracks gas spent against a per-frame limit.
#[derive(Debug, Clone, Copy)]
pub struct GasMeter {
    limit: u64,
    used: u64,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Charge `amount` gas, halting with `InsufficientGas` past the limit.
    /// A failed charge leaves the meter drained.
    pub fn charge(&mut self, amount: u64) -> Result<(), HaltReason> {
        let new = self.used.saturating_add(amount);
        if new > self.limit {
            self.used = self.limit;
            return Err(HaltReason::InsufficientGas);
        }
        self.used = new;
        Ok(())
    }

    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    /// Drains the meter; exceptional halts consume all remaining gas.
    pub fn consume_all(&mut self) {
        self.used = self.limit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_within_limit() {
        let mut g = GasMeter::new(1000);
        assert!(g.charge(500).is_ok());
        assert_eq!(g.used(), 500);
        assert_eq!(g.remaining(), 500);
    }

    #[test]
    fn charge_past_limit_drains_the_meter() {
        let mut g = GasMeter::new(100);
        assert!(g.charge(50).is_ok());
        assert_eq!(g.charge(60), Err(HaltReason::InsufficientGas));
        assert_eq!(g.remaining(), 0);
    }

    #[test]
    fn exact_limit_is_allowed() {
        let mut g = GasMeter::new(100);
        assert!(g.charge(100).is_ok());
        assert_eq!(g.remaining(), 0);
        assert!(g.charge(1).is_err());
    }

    #[test]
    fn exp_cost_scales_with_exponent_width() {
        assert_eq!(exp_cost(0), 10);
        assert_eq!(exp_cost(1), 60);
        assert_eq!(exp_cost(32), 10 + 50 * 32);
    }
}
