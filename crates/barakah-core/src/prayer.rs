//! Prayer schedule model and next-prayer lookup.

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

/// Minutes in a full day.
const DAY_MINUTES: u32 = 24 * 60;

/// One scheduled prayer, as minutes since local midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTime {
    pub name: String,
    pub minutes: u32,
}

/// An ordered daily schedule of prayers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerSchedule {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub times: Vec<PrayerTime>,
}

impl PrayerSchedule {
    /// A fixed fallback schedule used before the first successful fetch of
    /// location-aware times.
    pub fn fallback() -> Self {
        let times = [
            ("Fajr", 5 * 60 + 30),
            ("Dhuhr", 12 * 60 + 15),
            ("Asr", 15 * 60 + 45),
            ("Maghrib", 18 * 60 + 20),
            ("Isha", 19 * 60 + 50),
        ]
        .into_iter()
        .map(|(name, minutes)| PrayerTime {
            name: name.to_string(),
            minutes,
        })
        .collect();
        Self { date: None, times }
    }
}

/// The result of a next-prayer lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPrayer {
    pub prayer: PrayerTime,
    /// Whole minutes until the prayer starts.
    pub minutes_until: u32,
}

/// Finds the next prayer after `now_minutes` (minutes since midnight).
///
/// Comparison is strictly greater-than: at the exact scheduled instant the
/// boundary belongs to the *following* prayer. Past the last entry of the day
/// the lookup wraps to the first entry, with the remaining time computed
/// across midnight. Returns `None` only for an empty schedule.
pub fn next_prayer(schedule: &[PrayerTime], now_minutes: u32) -> Option<NextPrayer> {
    if let Some(upcoming) = schedule.iter().find(|p| p.minutes > now_minutes) {
        return Some(NextPrayer {
            prayer: upcoming.clone(),
            minutes_until: upcoming.minutes - now_minutes,
        });
    }

    // Past the last prayer of the day: wrap to tomorrow's first entry.
    schedule.first().map(|first| NextPrayer {
        prayer: first.clone(),
        minutes_until: first.minutes + DAY_MINUTES - now_minutes,
    })
}

/// Extracts minutes-since-midnight from a wall-clock time.
pub fn minutes_since_midnight(time: chrono::NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Qibla bearing from a location, in degrees clockwise from true north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QiblaDirection {
    pub bearing_deg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> Vec<PrayerTime> {
        PrayerSchedule::fallback().times
    }

    #[test]
    fn before_first_prayer_returns_fajr() {
        let next = next_prayer(&schedule(), 0).unwrap();
        assert_eq!(next.prayer.name, "Fajr");
        assert_eq!(next.minutes_until, 330);
    }

    #[test]
    fn between_prayers_returns_the_upcoming_one() {
        // 13:00, between Dhuhr (12:15) and Asr (15:45)
        let next = next_prayer(&schedule(), 13 * 60).unwrap();
        assert_eq!(next.prayer.name, "Asr");
        assert_eq!(next.minutes_until, 165);
    }

    #[test]
    fn exact_offset_belongs_to_the_following_prayer() {
        let times = schedule();
        let expected_following = ["Dhuhr", "Asr", "Maghrib", "Isha", "Fajr"];
        for (prayer, following) in times.iter().zip(expected_following) {
            let next = next_prayer(&times, prayer.minutes).unwrap();
            assert_eq!(
                next.prayer.name, following,
                "at the exact instant of {} the next prayer must be {}",
                prayer.name, following
            );
        }
    }

    #[test]
    fn after_isha_wraps_to_tomorrows_fajr() {
        // 23:00, past Isha (19:50)
        let next = next_prayer(&schedule(), 23 * 60).unwrap();
        assert_eq!(next.prayer.name, "Fajr");
        // 60 minutes to midnight plus 5h30 to Fajr
        assert_eq!(next.minutes_until, 60 + 330);
    }

    #[test]
    fn empty_schedule_yields_none() {
        assert!(next_prayer(&[], 600).is_none());
    }

    #[test]
    fn minutes_since_midnight_converts_wall_clock() {
        let t = chrono::NaiveTime::from_hms_opt(15, 45, 59).unwrap();
        assert_eq!(minutes_since_midnight(t), 15 * 60 + 45);
    }
}
