//! Clock and numeric value formatting

use core::fmt::{self, Write};

use crate::render::Text;
use crate::time::Millis;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wall-clock time of day, derived from a second count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl ClockTime {
    /// Split a second count into hours (modulo 24), minutes and seconds
    pub fn from_secs(total: u32) -> Self {
        Self {
            hours: ((total / 3600) % 24) as u8,
            minutes: ((total / 60) % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    /// Simulated clock that starts at 00:00:00 on boot
    pub fn from_uptime(now: Millis) -> Self {
        Self::from_secs(now.as_secs())
    }

    /// `HH:MM:SS`
    pub fn to_text(self) -> Text {
        let mut out = Text::new();
        // Eight characters always fit
        let _ = write!(out, "{}", self);
        out
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// How the time register is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeStyle {
    /// Raw value followed by the unit, e.g. `60 sn`
    #[default]
    Suffix,
    /// Value as seconds on a clock face, e.g. `00:01:00`
    Clock,
}

/// `"{value}{unit}"`, e.g. `1500 TL`
pub fn with_unit(value: i16, unit: &str) -> Text {
    let mut out = Text::new();
    let _ = write!(out, "{}", value);
    for ch in unit.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Render a signed second count in the given style
pub fn format_time(value: i16, unit: &str, style: TimeStyle) -> Text {
    match style {
        TimeStyle::Suffix => with_unit(value, unit),
        TimeStyle::Clock => {
            let mut out = Text::new();
            if value < 0 {
                let _ = out.push('-');
            }
            let clock = ClockTime::from_secs(u32::from(value.unsigned_abs()));
            let _ = write!(out, "{}", clock);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hour_one_minute_one_second() {
        assert_eq!(ClockTime::from_secs(3661).to_text().as_str(), "01:01:01");
    }

    #[test]
    fn test_hours_wrap_at_midnight() {
        let clock = ClockTime::from_secs(24 * 3600 + 59);
        assert_eq!(clock.to_text().as_str(), "00:00:59");
    }

    #[test]
    fn test_uptime_clock() {
        let clock = ClockTime::from_uptime(Millis::new(3_723_999));
        assert_eq!(
            clock,
            ClockTime {
                hours: 1,
                minutes: 2,
                seconds: 3
            }
        );
    }

    #[test]
    fn test_price_with_unit() {
        assert_eq!(with_unit(1500, " TL").as_str(), "1500 TL");
        assert_eq!(with_unit(-250, " TL").as_str(), "-250 TL");
    }

    #[test]
    fn test_time_suffix_style() {
        assert_eq!(format_time(60, " sn", TimeStyle::Suffix).as_str(), "60 sn");
    }

    #[test]
    fn test_time_clock_style() {
        assert_eq!(
            format_time(3661, " sn", TimeStyle::Clock).as_str(),
            "01:01:01"
        );
        assert_eq!(
            format_time(-90, " sn", TimeStyle::Clock).as_str(),
            "-00:01:30"
        );
        assert_eq!(
            format_time(i16::MIN, " sn", TimeStyle::Clock).as_str(),
            "-09:06:08"
        );
    }
}
