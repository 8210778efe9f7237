#![allow(missing_docs)]
use bilge::prelude::*;

/// Expected content of the device ID byte.
pub const DEVICE_ID: u8 = 0x40;

const CELSIUS_PER_BIT: f32 = 0.0625;

/// Register addresses
#[derive(Debug, PartialEq, PartialOrd)]
pub enum Register {
    /// Hot-junction (thermocouple) temperature register address.
    HotJunction,

    /// Junction temperature delta register address.
    JunctionDelta,

    /// Cold-junction temperature register address.
    ColdJunction,

    /// Raw ADC data register address.
    RawAdc,

    /// Status register address.
    Status,

    /// Thermocouple sensor configuration register address.
    SensorConfiguration,

    /// Device configuration register address.
    DeviceConfiguration,

    /// Alert configuration register address for the given alert.
    AlertConfiguration(Alert),

    /// Alert hysteresis register address for the given alert.
    AlertHysteresis(Alert),

    /// Alert limit register address for the given alert.
    AlertLimit(Alert),

    /// Device ID/revision register address.
    DeviceId,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> Self {
        match reg {
            Register::HotJunction => 0x00,
            Register::JunctionDelta => 0x01,
            Register::ColdJunction => 0x02,
            Register::RawAdc => 0x03,
            Register::Status => 0x04,
            Register::SensorConfiguration => 0x05,
            Register::DeviceConfiguration => 0x06,
            Register::AlertConfiguration(alert) => 0x08 + alert.index(),
            Register::AlertHysteresis(alert) => 0x0c + alert.index(),
            Register::AlertLimit(alert) => 0x10 + alert.index(),
            Register::DeviceId => 0x20,
        }
    }
}

/// One of the four alert outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alert {
    /// Alert 1
    Alert1,

    /// Alert 2
    Alert2,

    /// Alert 3
    Alert3,

    /// Alert 4
    Alert4,
}

impl Alert {
    const fn index(self) -> u8 {
        self as u8
    }
}

/// Alert numbers are 1-based, anything outside `1..=4` is rejected.
impl TryFrom<u8> for Alert {
    type Error = InvalidAlert;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(Self::Alert1),
            2 => Ok(Self::Alert2),
            3 => Ok(Self::Alert3),
            4 => Ok(Self::Alert4),
            n => Err(InvalidAlert(n)),
        }
    }
}

/// Alert number outside of `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAlert(pub u8);

/// Device ID/revision register.
#[bitsize(16)]
#[derive(Clone, Copy, DebugBits, FromBits, PartialEq)]
pub struct DeviceId {
    /// Silicon revision
    pub revision: u8,

    /// Device ID, `0x40` for the MCP9600
    pub id: u8,
}

/// Device configuration register.
#[bitsize(8)]
#[derive(Clone, Copy, DebugBits, FromBits, PartialEq)]
pub struct DeviceConfiguration {
    /// Shutdown mode
    pub shutdown_mode: ShutdownMode,

    /// Number of temperature samples taken in burst mode
    pub burst_samples: BurstSamples,

    /// ADC measurement resolution
    pub adc_resolution: AdcResolution,

    /// Cold-junction resolution
    pub cold_junction_resolution: ColdJunctionResolution,
}

impl Default for DeviceConfiguration {
    fn default() -> Self {
        Self::from(0b0000_0000)
    }
}

impl DeviceConfiguration {
    /// Configure shutdown mode.
    #[must_use]
    pub fn with_shutdown_mode(mut self, mode: ShutdownMode) -> Self {
        self.set_shutdown_mode(mode);
        self
    }

    /// Configure burst mode sample count.
    #[must_use]
    pub fn with_burst_samples(mut self, samples: BurstSamples) -> Self {
        self.set_burst_samples(samples);
        self
    }

    /// Configure ADC resolution.
    #[must_use]
    pub fn with_adc_resolution(mut self, resolution: AdcResolution) -> Self {
        self.set_adc_resolution(resolution);
        self
    }

    /// Configure cold-junction resolution.
    #[must_use]
    pub fn with_cold_junction_resolution(mut self, resolution: ColdJunctionResolution) -> Self {
        self.set_cold_junction_resolution(resolution);
        self
    }
}

/// Thermocouple sensor configuration register.
#[bitsize(8)]
#[derive(Clone, Copy, DebugBits, FromBits, PartialEq)]
pub struct SensorConfiguration {
    /// Digital filter coefficient. `0` disables filtering.
    pub filter: u3,

    reserved3: bool,

    /// Thermocouple type
    pub thermocouple_type: ThermocoupleType,

    reserved7: bool,
}

impl Default for SensorConfiguration {
    fn default() -> Self {
        Self::from(0b0000_0000)
    }
}

impl SensorConfiguration {
    /// Configure the filter coefficient. Only the low two bits of `filter`
    /// are used, giving a range of `0..=3`.
    #[must_use]
    pub fn with_filter(mut self, filter: u8) -> Self {
        self.set_filter(u3::new(filter & 0b11));
        self
    }

    /// Configure thermocouple type.
    #[must_use]
    pub fn with_thermocouple_type(mut self, kind: ThermocoupleType) -> Self {
        self.set_thermocouple_type(kind);
        self
    }
}

/// Status register.
#[bitsize(8)]
#[derive(Clone, Copy, DebugBits, FromBits, PartialEq)]
pub struct Status {
    /// Alert 1 triggered
    pub alert1: bool,

    /// Alert 2 triggered
    pub alert2: bool,

    /// Alert 3 triggered
    pub alert3: bool,

    /// Alert 4 triggered
    pub alert4: bool,

    /// Thermocouple EMF exceeds the input range of the selected type
    pub input_range: bool,

    reserved5: bool,

    /// Hot-junction temperature register updated
    pub th_update: bool,

    /// Burst mode conversions complete
    pub burst_complete: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DeviceId {{ id: {=u8:#x}, revision: {=u8:#x} }}", self.id(), self.revision());
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceConfiguration {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DeviceConfiguration({=u8:#b})", self.value);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorConfiguration {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "SensorConfiguration({=u8:#b})", self.value);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AlertConfiguration {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "AlertConfiguration({=u8:#b})", self.value);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Status {{ burst_complete: {=bool}, th_update: {=bool}, input_range: {=bool}, alerts: [{=bool}, {=bool}, {=bool}, {=bool}] }}",
            self.burst_complete(),
            self.th_update(),
            self.input_range(),
            self.alert1(),
            self.alert2(),
            self.alert3(),
            self.alert4()
        );
    }
}

impl Status {
    /// Whether the given alert has been triggered.
    pub fn alert(&self, alert: Alert) -> bool {
        match alert {
            Alert::Alert1 => self.alert1(),
            Alert::Alert2 => self.alert2(),
            Alert::Alert3 => self.alert3(),
            Alert::Alert4 => self.alert4(),
        }
    }
}

/// Alert configuration register.
#[bitsize(8)]
#[derive(Clone, Copy, DebugBits, FromBits, PartialEq)]
pub struct AlertConfiguration {
    /// Alert output enable
    pub enable: bool,

    /// Comparator or interrupt mode
    pub mode: AlertMode,

    /// Alert pin polarity
    pub polarity: Polarity,

    /// Alert on rising or falling temperature
    pub edge: Edge,

    /// Temperature monitored by the alert
    pub source: AlertSource,

    reserved5_6: u2,

    /// Clear the interrupt flag, only meaningful in interrupt mode
    pub clear_interrupt: bool,
}

impl Default for AlertConfiguration {
    fn default() -> Self {
        Self::from(0b0000_0000)
    }
}

impl AlertConfiguration {
    /// Configure alert enable.
    #[must_use]
    pub fn with_enable(mut self, enable: bool) -> Self {
        self.set_enable(enable);
        self
    }

    /// Configure alert mode.
    #[must_use]
    pub fn with_mode(mut self, mode: AlertMode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Configure alert polarity.
    #[must_use]
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.set_polarity(polarity);
        self
    }

    /// Configure alert edge.
    #[must_use]
    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.set_edge(edge);
        self
    }

    /// Configure monitored temperature.
    #[must_use]
    pub fn with_source(mut self, source: AlertSource) -> Self {
        self.set_source(source);
        self
    }

    /// Configure interrupt clear bit.
    #[must_use]
    pub fn with_clear_interrupt(mut self, clear: bool) -> Self {
        self.set_clear_interrupt(clear);
        self
    }
}

/// Shutdown mode.
#[bitsize(2)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum ShutdownMode {
    /// Normal operation, continuous conversions.
    Normal,

    /// Shutdown. The serial interface stays active.
    Shutdown,

    /// Burst mode. The device takes `BurstSamples` conversions, sets the
    /// burst complete status flag and enters shutdown.
    #[fallback]
    Burst,
}

/// Burst mode temperature samples.
#[bitsize(3)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum BurstSamples {
    /// 1 sample (default).
    Samples1,

    /// 2 samples.
    Samples2,

    /// 4 samples.
    Samples4,

    /// 8 samples.
    Samples8,

    /// 16 samples.
    Samples16,

    /// 32 samples.
    Samples32,

    /// 64 samples.
    Samples64,

    /// 128 samples.
    Samples128,
}

/// ADC measurement resolution.
#[bitsize(2)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum AdcResolution {
    /// 18-bit resolution (default).
    Bits18,

    /// 16-bit resolution.
    Bits16,

    /// 14-bit resolution.
    Bits14,

    /// 12-bit resolution.
    Bits12,
}

/// Cold-junction (ambient) sensor resolution.
#[bitsize(1)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum ColdJunctionResolution {
    /// 0.0625℃ resolution (default).
    Celsius00625,

    /// 0.25℃ resolution.
    Celsius025,
}

/// Thermocouple type.
#[bitsize(3)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum ThermocoupleType {
    /// Type K (default).
    K,

    /// Type J.
    J,

    /// Type T.
    T,

    /// Type N.
    N,

    /// Type S.
    S,

    /// Type E.
    E,

    /// Type B.
    B,

    /// Type R.
    R,
}

/// Alert mode
#[bitsize(1)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum AlertMode {
    /// Comparator mode (default).
    Comparator,

    /// Interrupt mode. The output latches until cleared.
    Interrupt,
}

/// Polarity
#[bitsize(1)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum Polarity {
    /// Active low (default).
    ActiveLow,

    /// Active high.
    ActiveHigh,
}

/// Temperature direction that triggers an alert.
#[bitsize(1)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum Edge {
    /// Alert when temperature falls below the limit (default).
    Falling,

    /// Alert when temperature rises above the limit.
    Rising,
}

/// Temperature monitored by an alert.
#[bitsize(1)]
#[derive(Debug, FromBits, PartialEq, PartialOrd)]
pub enum AlertSource {
    /// Hot junction, i.e. the thermocouple (default).
    Thermocouple,

    /// Cold junction.
    ColdJunction,
}

/// Decode a hot-junction or junction-delta register: sign flag in bit 15,
/// magnitude in bits 0-14.
pub(crate) fn hot_junction_to_celsius(raw: u16) -> f32 {
    let celsius = f32::from(raw & 0x7fff) * CELSIUS_PER_BIT;
    if raw & 0x8000 != 0 {
        -celsius
    } else {
        celsius
    }
}

/// Decode a cold-junction register: sign flag in bit 12, magnitude in bits
/// 0-11.
pub(crate) fn cold_junction_to_celsius(raw: u16) -> f32 {
    let celsius = f32::from(raw & 0x0fff) * CELSIUS_PER_BIT;
    if raw & 0x1000 != 0 {
        -celsius
    } else {
        celsius
    }
}

#[allow(clippy::cast_possible_wrap)]
pub(crate) fn adc_from_raw(raw: u32) -> i32 {
    if raw & 0x0400_0000 != 0 {
        (raw | 0xfc00_0000) as i32
    } else {
        raw as i32
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn celsius_to_limit(t: f32) -> i16 {
    (t / CELSIUS_PER_BIT) as i16
}
