//! This is a platform-agnostic Rust driver for the MCP9600 thermocouple EMF
//! to temperature converter based on the [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//!
//! For further details of the device architecture and operation, please refer
//! to the official [`Datasheet`].
//!
//! [`Datasheet`]: https://ww1.microchip.com/downloads/en/DeviceDoc/MCP960X-Data-Sheet-20005426.pdf

#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

mod registers;
pub use registers::*;

pub mod blocking;

/// I2C address selected by the ADDR pin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    /// ADDR tied to VCC (default).
    #[default]
    Default,
    /// ADDR tied to GND.
    Alternate,
}

impl From<Address> for u8 {
    fn from(address: Address) -> Self {
        match address {
            Address::Default => 0x67,
            Address::Alternate => 0x60,
        }
    }
}
