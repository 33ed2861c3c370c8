//! Mapping from wall-clock time to hand rotations.
//!
//! The three hand angles are a pure function of the sampled timestamp. They
//! are recomputed absolutely every frame rather than advanced from the
//! previous frame, so slow frames self-correct and no drift can accumulate.

use std::f64::consts::TAU;

use time::OffsetDateTime;

/// A timestamp decomposed onto a 12-hour dial.
///
/// Fractional parts carry upward: milliseconds into `seconds`, seconds into
/// `minutes`, minutes into `hours`, which is what makes sub-second hand
/// motion smooth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockTime {
    /// Hours on the dial, `[0, 12)`.
    pub hours: f64,
    /// Minutes, `[0, 60)`.
    pub minutes: f64,
    /// Seconds, `[0, 60)`.
    pub seconds: f64,
}

impl ClockTime {
    /// Decomposes integral clock fields into fractional dial time.
    pub fn from_hms_milli(hours: u8, minutes: u8, seconds: u8, millis: u16) -> Self {
        let seconds = f64::from(seconds) + f64::from(millis) / 1_000.0;
        let minutes = f64::from(minutes) + seconds / 60.0;
        let hours = f64::from(hours % 12) + minutes / 60.0;
        ClockTime {
            hours,
            minutes,
            seconds,
        }
    }
}

impl From<OffsetDateTime> for ClockTime {
    fn from(t: OffsetDateTime) -> Self {
        ClockTime::from_hms_milli(t.hour(), t.minute(), t.second(), t.millisecond())
    }
}

/// Rotations of the three hands about the dial normal, in radians.
///
/// The scene graph's rotation convention is counter-clockwise-positive, so
/// clockwise hand motion is encoded with a negative sign. All three hands
/// share the convention; every value lies in `(-2π, 0]` with exactly `0` at
/// the 12-o'clock position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl From<ClockTime> for HandAngles {
    fn from(t: ClockTime) -> Self {
        HandAngles {
            hour: -(t.hours / 12.0) * TAU,
            minute: -(t.minutes / 60.0) * TAU,
            second: -(t.seconds / 60.0) * TAU,
        }
    }
}

impl HandAngles {
    /// Angles for the given timestamp.
    pub fn at(t: OffsetDateTime) -> Self {
        ClockTime::from(t).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use time::macros::datetime;

    fn angles(h: u8, m: u8, s: u8, ms: u16) -> HandAngles {
        ClockTime::from_hms_milli(h, m, s, ms).into()
    }

    #[test]
    fn midnight_is_all_zero() {
        let a = angles(0, 0, 0, 0);
        assert_eq!(a.hour, 0.0);
        assert_eq!(a.minute, 0.0);
        assert_eq!(a.second, 0.0);
    }

    #[test]
    fn half_past_the_minute() {
        let a = angles(0, 0, 30, 0);
        assert_relative_eq!(a.second, -PI);
    }

    #[test]
    fn quarter_past_the_hour() {
        let a = angles(0, 15, 0, 0);
        assert_relative_eq!(a.minute, -PI / 2.0);
    }

    #[test]
    fn six_o_clock() {
        let a = angles(6, 0, 0, 0);
        assert_relative_eq!(a.hour, -PI);
    }

    #[test]
    fn hours_wrap_at_twelve() {
        // 18:00 reads the same as 06:00 on a 12-hour dial.
        assert_eq!(angles(18, 0, 0, 0), angles(6, 0, 0, 0));
    }

    #[test]
    fn all_angles_stay_in_range() {
        for h in [0u8, 3, 11, 23] {
            for m in [0u8, 17, 59] {
                for s in [0u8, 31, 59] {
                    for ms in [0u16, 400, 999] {
                        let a = angles(h, m, s, ms);
                        for v in [a.hour, a.minute, a.second] {
                            assert!(v <= 0.0 && v > -TAU, "{v} out of (-2π, 0]");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn second_hand_decreases_monotonically() {
        let mut prev = f64::INFINITY;
        for ms in (0..60_000).step_by(250) {
            let a = angles(2, 14, (ms / 1000) as u8, (ms % 1000) as u16);
            assert!(a.second < prev, "not strictly decreasing at {ms} ms");
            prev = a.second;
        }
        // Wrap: the next minute tick returns toward zero, not past -2π.
        assert_eq!(angles(2, 15, 0, 0).second, 0.0);
    }

    #[test]
    fn fractions_carry_upward() {
        let t = ClockTime::from_hms_milli(10, 30, 30, 500);
        assert_relative_eq!(t.seconds, 30.5);
        assert_relative_eq!(t.minutes, 30.0 + 30.5 / 60.0);
        assert_relative_eq!(t.hours, 10.0 + t.minutes / 60.0);
    }

    #[test]
    fn computation_is_pure() {
        let t = datetime!(2024-05-17 09:41:25.125 UTC);
        assert_eq!(HandAngles::at(t), HandAngles::at(t));
    }
}
