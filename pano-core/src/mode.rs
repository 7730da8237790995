//! Display modes
//!
//! Defines which content is on the panel. Raw selector values from the
//! control surface are decoded here; anything unrecognized stays a raw
//! value so the controller can show the fallback frame.

/// Modes selectable through the mode register (bus variant)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusMode {
    /// Panel blank
    Off,
    /// Welcome text scrolling right to left
    WelcomeScroll,
    /// Price register with currency unit
    PriceDisplay,
    /// Time register with time unit (or as a clock)
    TimeDisplay,
}

// Register values
const MODE_OFF: u16 = 0;
const MODE_WELCOME: u16 = 1;
const MODE_PRICE: u16 = 2;
const MODE_TIME: u16 = 3;

impl BusMode {
    /// Decode the mode register; `None` for values outside the enumeration
    pub fn from_register(value: u16) -> Option<Self> {
        match value {
            MODE_OFF => Some(BusMode::Off),
            MODE_WELCOME => Some(BusMode::WelcomeScroll),
            MODE_PRICE => Some(BusMode::PriceDisplay),
            MODE_TIME => Some(BusMode::TimeDisplay),
            _ => None,
        }
    }

    /// Value to write into the mode register to select this mode
    pub fn to_register(self) -> u16 {
        match self {
            BusMode::Off => MODE_OFF,
            BusMode::WelcomeScroll => MODE_WELCOME,
            BusMode::PriceDisplay => MODE_PRICE,
            BusMode::TimeDisplay => MODE_TIME,
        }
    }

    /// Short label for status output
    pub fn label(self) -> &'static str {
        match self {
            BusMode::Off => "off",
            BusMode::WelcomeScroll => "welcome",
            BusMode::PriceDisplay => "price",
            BusMode::TimeDisplay => "time",
        }
    }
}

/// Outer modes of the standalone showcase, visited in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShowcaseMode {
    /// Canned strings shown one per dwell interval
    #[default]
    StaticRotation,
    /// Long text scrolling right to left
    Scroll,
    /// Clock derived from run time
    ClockSimulation,
}

impl ShowcaseMode {
    /// The mode after this one, wrapping back to the first
    pub fn next(self) -> Self {
        match self {
            ShowcaseMode::StaticRotation => ShowcaseMode::Scroll,
            ShowcaseMode::Scroll => ShowcaseMode::ClockSimulation,
            ShowcaseMode::ClockSimulation => ShowcaseMode::StaticRotation,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShowcaseMode::StaticRotation => "static",
            ShowcaseMode::Scroll => "scroll",
            ShowcaseMode::ClockSimulation => "clock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_decode() {
        assert_eq!(BusMode::from_register(0), Some(BusMode::Off));
        assert_eq!(BusMode::from_register(1), Some(BusMode::WelcomeScroll));
        assert_eq!(BusMode::from_register(2), Some(BusMode::PriceDisplay));
        assert_eq!(BusMode::from_register(3), Some(BusMode::TimeDisplay));
    }

    #[test]
    fn test_unrecognized_register_values() {
        for value in [4, 7, 255, 0x8000, u16::MAX] {
            assert_eq!(BusMode::from_register(value), None);
        }
    }

    #[test]
    fn test_register_encode_matches_decode() {
        for mode in [
            BusMode::Off,
            BusMode::WelcomeScroll,
            BusMode::PriceDisplay,
            BusMode::TimeDisplay,
        ] {
            assert_eq!(BusMode::from_register(mode.to_register()), Some(mode));
        }
    }

    #[test]
    fn test_showcase_modes_cycle() {
        let mut mode = ShowcaseMode::default();
        assert_eq!(mode, ShowcaseMode::StaticRotation);

        for expected in [
            ShowcaseMode::Scroll,
            ShowcaseMode::ClockSimulation,
            ShowcaseMode::StaticRotation,
            ShowcaseMode::Scroll,
        ] {
            mode = mode.next();
            assert_eq!(mode, expected);
        }
    }
}
