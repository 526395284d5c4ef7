/// One sample as handed over by the sensor driver.
///
/// Each field is independently absent when the driver could not produce it.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Reading {
    /// Degrees Celsius
    pub temperature: Option<f32>,
    /// Percent relative humidity
    pub humidity: Option<f32>,
}

/// A reading with both fields present.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Measurement {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// The only failure the sampling cycle knows about.
///
/// The flags are kept for diagnostics; a reading missing one field is
/// reported exactly like one missing both.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid reading (temperature missing: {temperature}, humidity missing: {humidity})")]
pub struct InvalidReading {
    pub temperature: bool,
    pub humidity: bool,
}

impl Reading {
    pub const fn new(temperature: Option<f32>, humidity: Option<f32>) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    pub const fn absent() -> Self {
        Self::new(None, None)
    }

    /// Maps the driver-level NaN sentinel to an absent field.
    pub fn from_raw(temperature: f32, humidity: f32) -> Self {
        Self::new(present(temperature), present(humidity))
    }

    pub fn validate(self) -> Result<Measurement, InvalidReading> {
        match (
            self.temperature.and_then(present),
            self.humidity.and_then(present),
        ) {
            (Some(temperature_c), Some(humidity_pct)) => Ok(Measurement {
                temperature_c,
                humidity_pct,
            }),
            (temperature, humidity) => Err(InvalidReading {
                temperature: temperature.is_none(),
                humidity: humidity.is_none(),
            }),
        }
    }
}

impl From<Measurement> for Reading {
    fn from(m: Measurement) -> Self {
        Self::new(Some(m.temperature_c), Some(m.humidity_pct))
    }
}

fn present(value: f32) -> Option<f32> {
    (!value.is_nan()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_present_is_valid() {
        let m = Reading::new(Some(21.5), Some(45.0)).validate().unwrap();
        assert_eq!(m.temperature_c, 21.5);
        assert_eq!(m.humidity_pct, 45.0);
    }

    #[test]
    fn zero_is_a_value_not_an_absence() {
        let m = Reading::new(Some(0.0), Some(0.0)).validate().unwrap();
        assert_eq!(m.temperature_c, 0.0);
        assert_eq!(m.humidity_pct, 0.0);
    }

    #[test]
    fn one_missing_field_fails_the_whole_reading() {
        let err = Reading::new(Some(21.5), None).validate().unwrap_err();
        assert_eq!(
            err,
            InvalidReading {
                temperature: false,
                humidity: true
            }
        );

        let err = Reading::new(None, Some(45.0)).validate().unwrap_err();
        assert!(err.temperature);
        assert!(!err.humidity);
    }

    #[test]
    fn nan_is_treated_as_absent() {
        assert_eq!(Reading::from_raw(f32::NAN, 40.0).temperature, None);
        assert_eq!(Reading::from_raw(20.0, f32::NAN).humidity, None);
        assert!(Reading::from_raw(f32::NAN, f32::NAN).validate().is_err());

        // NaN smuggled in through the optional fields is still rejected
        assert!(Reading::new(Some(f32::NAN), Some(40.0)).validate().is_err());
    }

    #[test]
    fn partial_readings_never_validate() {
        assert!(Reading::new(Some(21.0), None).validate().is_err());
        assert!(Reading::new(None, Some(40.0)).validate().is_err());
        assert!(Reading::new(Some(21.0), Some(40.0)).validate().is_ok());
    }

    #[test]
    fn absent_reading_fails() {
        let err = Reading::absent().validate().unwrap_err();
        assert!(err.temperature && err.humidity);
    }
}
