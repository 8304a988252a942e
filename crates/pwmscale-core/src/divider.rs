//! Fixed-point clock divider register.
//!
//! The PWM slice divides the system clock by an 8.4 fixed-point value: an
//! 8-bit integer part and a 4-bit fraction packed into one 12-bit register.
//! [`Divider`] keeps the raw register value and the scale factor together so
//! callers never mix up "register units" and "real divisor".

use serde::Serialize;
use std::fmt;

/// Number of fractional bits in the divider register.
pub const FRAC_BITS: u32 = 4;

/// Register value of a divisor of exactly 1.0.
pub const DIVIDER_ONE: u16 = 1 << FRAC_BITS;

/// Largest raw value the 8.4 register can hold.
pub const DIVIDER_MAX: u16 = (1 << 12) - 1;

/// Raw 8.4 fixed-point divider register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Divider(u16);

impl Divider {
    /// Wraps a raw register value.
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Raw register value as written to the hardware.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Real divisor, `raw / 2^FRAC_BITS`.
    ///
    /// # Examples
    /// ```
    /// use pwmscale_core::Divider;
    ///
    /// assert_eq!(Divider::from_raw(16).divisor(), 1.0);
    /// assert_eq!(Divider::from_raw(0x28).divisor(), 2.5);
    /// ```
    pub fn divisor(self) -> f64 {
        f64::from(self.0) / f64::from(DIVIDER_ONE)
    }

    /// Integer part of the divisor (DIV_INT field).
    pub const fn integer_part(self) -> u16 {
        self.0 >> FRAC_BITS
    }

    /// Fractional sixteenths (DIV_FRAC field).
    pub const fn fraction_part(self) -> u16 {
        self.0 & (DIVIDER_ONE - 1)
    }
}

impl fmt::Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}/16", self.integer_part(), self.fraction_part())
    }
}
