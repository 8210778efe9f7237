//! Mcp9600 Blocking API

#[cfg(feature = "embedded-sensors-hal")]
use embedded_sensors_hal::sensor;
#[cfg(feature = "embedded-sensors-hal")]
use embedded_sensors_hal::temperature::{DegreesCelsius, TemperatureSensor};

use super::registers::{adc_from_raw, celsius_to_limit, cold_junction_to_celsius, hot_junction_to_celsius};
use super::{
    AdcResolution, Address, Alert, AlertConfiguration, BurstSamples, ColdJunctionResolution, DeviceConfiguration,
    DeviceId, Register, SensorConfiguration, ShutdownMode, Status, ThermocoupleType, DEVICE_ID,
};

/// MCP9600 blocking device driver
pub struct Mcp9600<I2C: embedded_hal::i2c::I2c> {
    /// The concrete I2C bus implementation
    i2c: I2C,

    /// The I2C address.
    pub(crate) addr: u8,

    /// Last device configuration written to the device.
    config: DeviceConfiguration,

    /// Last sensor configuration written to the device.
    sensor: SensorConfiguration,
}

impl<I2C: embedded_hal::i2c::I2c> Mcp9600<I2C> {
    /// Create a new MCP9600 instance. No bus traffic happens until
    /// [`Mcp9600::begin`] is called.
    pub fn new(i2c: I2C, address: Address) -> Self {
        Self {
            i2c,
            addr: address.into(),
            config: DeviceConfiguration::default(),
            sensor: SensorConfiguration::default(),
        }
    }

    /// Create a new MCP9600 instance with ADDR tied to VCC, resulting in an
    /// instance responding to address `0x67`.
    pub fn new_with_default_address(i2c: I2C) -> Self {
        Self::new(i2c, Address::Default)
    }

    /// Create a new MCP9600 instance with ADDR tied to GND, resulting in an
    /// instance responding to address `0x60`.
    pub fn new_with_alternate_address(i2c: I2C) -> Self {
        Self::new(i2c, Address::Alternate)
    }

    /// Destroy the driver instance, return the I2C bus instance.
    pub fn destroy(self) -> I2C {
        self.i2c
    }

    /// Verify the device identity and write the default device and sensor
    /// configuration: 18-bit ADC, 0.0625℃ cold-junction resolution, normal
    /// operation, type K thermocouple with filtering disabled.
    ///
    /// Nothing is written when the identity check fails.
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    /// `Error::InvalidDeviceId` when the device does not identify as an MCP9600
    pub fn begin(&mut self) -> Result<(), Error<I2C::Error>> {
        let id = self.device_id()?;
        if id.id() != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("unexpected device id {=u8:#x} at address {=u8:#x}", id.id(), self.addr);
            return Err(Error::InvalidDeviceId(id.id()));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("MCP9600 revision {=u8:#x} at address {=u8:#x}", id.revision(), self.addr);

        self.set_configuration(DeviceConfiguration::default())?;
        self.set_sensor_configuration(SensorConfiguration::default())
    }

    /// Read device ID/revision register
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn device_id(&mut self) -> Result<DeviceId, Error<I2C::Error>> {
        let raw = self.read::<2>(Register::DeviceId)?;
        Ok(DeviceId::from(u16::from_be_bytes(raw)))
    }

    /// Last device configuration written to the device.
    pub fn configuration(&self) -> DeviceConfiguration {
        self.config
    }

    /// Set device configuration register
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_configuration(&mut self, config: DeviceConfiguration) -> Result<(), Error<I2C::Error>> {
        self.write(Register::DeviceConfiguration, &[config.into()])?;

        // Only cache config after successful write
        self.config = config;
        Ok(())
    }

    /// Last sensor configuration written to the device.
    pub fn sensor_configuration(&self) -> SensorConfiguration {
        self.sensor
    }

    /// Set thermocouple sensor configuration register
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_sensor_configuration(&mut self, sensor: SensorConfiguration) -> Result<(), Error<I2C::Error>> {
        self.write(Register::SensorConfiguration, &[sensor.into()])?;
        self.sensor = sensor;
        Ok(())
    }

    /// Read hot-junction (thermocouple) temperature in ℃
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn thermocouple_temperature(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read::<2>(Register::HotJunction)?;
        Ok(hot_junction_to_celsius(u16::from_be_bytes(raw)))
    }

    /// Read the difference between hot and cold junction temperatures in ℃
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn junction_delta(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read::<2>(Register::JunctionDelta)?;
        Ok(hot_junction_to_celsius(u16::from_be_bytes(raw)))
    }

    /// Read cold-junction (ambient) temperature in ℃
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn cold_junction_temperature(&mut self) -> Result<f32, Error<I2C::Error>> {
        let raw = self.read::<2>(Register::ColdJunction)?;
        Ok(cold_junction_to_celsius(u16::from_be_bytes(raw)))
    }

    /// Read raw ADC data register
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn raw_adc(&mut self) -> Result<i32, Error<I2C::Error>> {
        let [upper, high, low] = self.read::<3>(Register::RawAdc)?;
        Ok(adc_from_raw(u32::from_be_bytes([0, upper, high, low])))
    }

    /// Read status register
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn status(&mut self) -> Result<Status, Error<I2C::Error>> {
        let [raw] = self.read::<1>(Register::Status)?;
        Ok(Status::from(raw))
    }

    /// Place device in shutdown mode, or return it to normal operation
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn sleep(&mut self, sleep: bool) -> Result<(), Error<I2C::Error>> {
        let mode = if sleep {
            ShutdownMode::Shutdown
        } else {
            ShutdownMode::Normal
        };
        self.set_shutdown_mode(mode)
    }

    /// Set shutdown mode. Selecting [`ShutdownMode::Burst`] starts a burst
    /// of conversions, completion is reported by [`Status::burst_complete`].
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_shutdown_mode(&mut self, mode: ShutdownMode) -> Result<(), Error<I2C::Error>> {
        self.set_configuration(self.config.with_shutdown_mode(mode))
    }

    /// Set ADC resolution
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_adc_resolution(&mut self, resolution: AdcResolution) -> Result<(), Error<I2C::Error>> {
        self.set_configuration(self.config.with_adc_resolution(resolution))
    }

    /// Set number of samples taken in burst mode
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_burst_samples(&mut self, samples: BurstSamples) -> Result<(), Error<I2C::Error>> {
        self.set_configuration(self.config.with_burst_samples(samples))
    }

    /// Set cold-junction resolution
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_cold_junction_resolution(&mut self, resolution: ColdJunctionResolution) -> Result<(), Error<I2C::Error>> {
        self.set_configuration(self.config.with_cold_junction_resolution(resolution))
    }

    /// Set thermocouple type
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_thermocouple_type(&mut self, kind: ThermocoupleType) -> Result<(), Error<I2C::Error>> {
        self.set_sensor_configuration(self.sensor.with_thermocouple_type(kind))
    }

    /// Set digital filter coefficient. Only the low two bits are used, `0`
    /// disables filtering and `3` gives the most smoothing.
    ///
    /// # Errors
    ///
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_filter(&mut self, filter: u8) -> Result<(), Error<I2C::Error>> {
        self.set_sensor_configuration(self.sensor.with_filter(filter))
    }

    /// Set limit temperature in ℃ and hysteresis for alert `1..=4`. Only the
    /// low four bits of `hysteresis` are used.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` when `alert` is outside `1..=4`, nothing is written
    /// `Error::Bus` when the I2C transaction fails
    pub fn set_alert_temperature(&mut self, alert: u8, limit: f32, hysteresis: u8) -> Result<(), Error<I2C::Error>> {
        let alert = Self::alert(alert)?;
        let raw = celsius_to_limit(limit);
        self.write(Register::AlertLimit(alert), &raw.to_be_bytes())?;
        self.write(Register::AlertHysteresis(alert), &[hysteresis & 0x0f])
    }

    /// Configure alert `1..=4`. The clear interrupt bit is never set by this
    /// method, see [`Mcp9600::clear_alert_interrupt`].
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` when `alert` is outside `1..=4`, nothing is written
    /// `Error::Bus` when the I2C transaction fails
    pub fn configure_alert(&mut self, alert: u8, config: AlertConfiguration) -> Result<(), Error<I2C::Error>> {
        let alert = Self::alert(alert)?;
        let value: u8 = config.with_clear_interrupt(false).into();
        self.write(Register::AlertConfiguration(alert), &[value])
    }

    /// Read configuration of alert `1..=4`
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` when `alert` is outside `1..=4`
    /// `Error::Bus` when the I2C transaction fails
    pub fn alert_configuration(&mut self, alert: u8) -> Result<AlertConfiguration, Error<I2C::Error>> {
        let alert = Self::alert(alert)?;
        self.read_alert_configuration(alert)
    }

    /// Clear a latched interrupt of alert `1..=4`, keeping its configuration
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` when `alert` is outside `1..=4`
    /// `Error::Bus` when the I2C transaction fails
    pub fn clear_alert_interrupt(&mut self, alert: u8) -> Result<(), Error<I2C::Error>> {
        let alert = Self::alert(alert)?;
        let config = self.read_alert_configuration(alert)?.with_clear_interrupt(true);
        self.write(Register::AlertConfiguration(alert), &[config.into()])
    }

    fn read_alert_configuration(&mut self, alert: Alert) -> Result<AlertConfiguration, Error<I2C::Error>> {
        let [raw] = self.read::<1>(Register::AlertConfiguration(alert))?;
        Ok(AlertConfiguration::from(raw))
    }

    fn alert(number: u8) -> Result<Alert, Error<I2C::Error>> {
        Alert::try_from(number).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("alert {=u8} outside of 1..=4", number);
            Error::InvalidInput
        })
    }

    fn read<const N: usize>(&mut self, reg: Register) -> Result<[u8; N], Error<I2C::Error>> {
        let mut bytes = [0; N];
        self.i2c
            .write_read(self.addr, &[reg.into()], &mut bytes)
            .map_err(Error::Bus)?;
        Ok(bytes)
    }

    /// Registers written by this driver are one or two bytes wide.
    fn write(&mut self, reg: Register, value: &[u8]) -> Result<(), Error<I2C::Error>> {
        let mut data = [0; 3];
        let len = value.len() + 1;

        data[0] = reg.into();
        data[1..len].copy_from_slice(value);

        self.i2c.write(self.addr, &data[..len]).map_err(Error::Bus)
    }
}

/// Mcp9600 Errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: embedded_hal::i2c::Error> {
    /// I2C Bus Error
    Bus(E),
    /// Device ID register did not contain the MCP9600 ID
    InvalidDeviceId(u8),
    /// Invalid Input Error
    InvalidInput,
}

#[cfg(feature = "embedded-sensors-hal")]
impl<E: embedded_hal::i2c::Error> sensor::Error for Error<E> {
    fn kind(&self) -> sensor::ErrorKind {
        match *self {
            Self::Bus(_) => sensor::ErrorKind::Peripheral,
            Self::InvalidInput => sensor::ErrorKind::InvalidInput,
            Self::InvalidDeviceId(_) => sensor::ErrorKind::Other,
        }
    }
}

#[cfg(feature = "embedded-sensors-hal")]
impl<I2C: embedded_hal::i2c::I2c> sensor::ErrorType for Mcp9600<I2C> {
    type Error = Error<I2C::Error>;
}

#[cfg(feature = "embedded-sensors-hal")]
impl<I2C: embedded_hal::i2c::I2c> TemperatureSensor for Mcp9600<I2C> {
    fn temperature(&mut self) -> Result<DegreesCelsius, Self::Error> {
        self.thermocouple_temperature()
    }
}
