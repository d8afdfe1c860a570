// Mon Feb 02 2026 - Alex

use std::fmt;

/// Width of a reference slot on the modeled runtime. Every header, array
/// header and padding rule is expressed in multiples of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerWidth {
    value: usize,
}

impl PointerWidth {
    pub fn new(value: usize) -> Self {
        assert!(value > 0 && value.is_power_of_two());
        Self { value }
    }

    pub fn bytes(&self) -> usize {
        self.value
    }

    pub fn words(&self, count: usize) -> usize {
        self.value * count
    }

    /// Rounds `size` up to the next multiple of the pointer width.
    pub fn align(&self, size: usize) -> usize {
        let pad = size % self.value;
        if pad == 0 {
            size
        } else {
            size + self.value - pad
        }
    }
}

impl Default for PointerWidth {
    fn default() -> Self {
        Self::new(8)
    }
}

impl fmt::Display for PointerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-byte pointers", self.value)
    }
}
