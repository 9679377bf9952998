//! Calculator memory register (M+, M-, MR, MC).

use tracing::trace;

/// A single accumulator that survives across calculator operations.
///
/// The evaluator never reads or writes it; a session owns one and feeds it values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Memory {
    value: f64,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// M+: adds `value` to the register and returns the new contents.
    pub fn add(&mut self, value: f64) -> f64 {
        self.value += value;
        trace!(memory = self.value, "memory add");
        self.value
    }

    /// M-: subtracts `value` from the register and returns the new contents.
    pub fn subtract(&mut self, value: f64) -> f64 {
        self.value -= value;
        trace!(memory = self.value, "memory subtract");
        self.value
    }

    /// MR
    pub fn recall(&self) -> f64 {
        self.value
    }

    /// MC: resets the register to zero.
    pub fn clear(&mut self) {
        self.value = 0.0;
        trace!("memory cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_starts_at_zero() {
        assert_eq!(Memory::new().recall(), 0.0);
    }

    #[test]
    fn test_memory_accumulates() {
        let mut memory = Memory::new();
        assert_eq!(memory.add(5.0), 5.0);
        assert_eq!(memory.add(2.5), 7.5);
        assert_eq!(memory.subtract(10.0), -2.5);
        assert_eq!(memory.recall(), -2.5);
    }

    #[test]
    fn test_memory_clear() {
        let mut memory = Memory::new();
        memory.add(42.0);
        memory.clear();
        assert_eq!(memory.recall(), 0.0);
        assert_eq!(memory.add(1.0), 1.0);
    }
}
