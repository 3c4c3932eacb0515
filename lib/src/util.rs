use crate::clock::Clock;
use crate::precision::Precision;
use crate::timer::ElapsedTimer;
use std::fmt;
use std::time::Duration;

/// Elapsed time rendered in the coarsest unit that reads at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed(pub Duration);

impl Elapsed {
    pub fn unit(&self) -> Precision {
        match self.0.as_secs() {
            0 => match self.0.subsec_nanos() {
                n if n < 1000 => Precision::Nanoseconds,
                n if n < 1_000_000 => Precision::Microseconds,
                _ => Precision::Milliseconds,
            },
            s if s < 60 => Precision::Seconds,
            s if s < 3600 => Precision::Minutes,
            s if s < 86_400 => Precision::Hours,
            _ => Precision::Days,
        }
    }
}

impl From<Duration> for Elapsed {
    fn from(duration: Duration) -> Self {
        Elapsed(duration)
    }
}

impl<C: Clock> From<&ElapsedTimer<C>> for Elapsed {
    fn from(timer: &ElapsedTimer<C>) -> Self {
        Elapsed(timer.peek())
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, out: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let unit = self.unit();
        let value = unit.convert(self.0);
        match unit {
            Precision::Nanoseconds | Precision::Microseconds | Precision::Milliseconds => {
                write!(out, "{} {}", value.trunc(), unit)
            }
            _ => write!(out, "{:.2} {}", value, unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, Timestamp};

    #[test]
    fn picks_readable_unit() {
        let cases = [
            (Duration::from_nanos(850), "850 ns"),
            (Duration::from_nanos(1_999), "1 µs"),
            (Duration::from_micros(12_345), "12 ms"),
            (Duration::from_millis(1_500), "1.50 s"),
            (Duration::from_secs(120), "2.00 min"),
            (Duration::from_secs(5_400), "1.50 h"),
            (Duration::from_secs(3 * 86_400), "3.00 d"),
        ];
        for (duration, expected) in cases {
            assert_eq!(Elapsed::from(duration).to_string(), expected);
        }
    }

    #[test]
    fn zero_is_nanoseconds() {
        assert_eq!(Elapsed(Duration::ZERO).unit(), Precision::Nanoseconds);
        assert_eq!(Elapsed(Duration::ZERO).to_string(), "0 ns");
    }

    #[test]
    fn from_timer_does_not_tare() {
        let clock = ManualClock::new(Timestamp::from_nanos(0));
        let timer = ElapsedTimer::with_clock(clock.clone());
        clock.advance(Duration::from_secs(2));
        assert_eq!(Elapsed::from(&timer).to_string(), "2.00 s");
        assert_eq!(timer.start().as_nanos(), 0);
    }
}
