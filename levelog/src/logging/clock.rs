//! 현재 시각 공급자
//!
//! 타임스탬프와 날짜별 파일 순환은 모두 이 시계를 통해 "지금"을 얻습니다.

use chrono::{DateTime, Local, Utc};
use parking_lot::Mutex;

/// 현재 시각을 제공하는 시계
pub trait Clock: Send + Sync {
    /// 현재 시각 (UTC)
    fn now(&self) -> DateTime<Utc>;

    /// 로컬 달력 기준 오늘 날짜 (`YYYY-MM-DD`)
    fn today(&self) -> String {
        self.now().with_timezone(&Local).format("%Y-%m-%d").to_string()
    }
}

/// 시스템 시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 수동으로 조작하는 시계 (테스트용)
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// 시각 변경
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    /// 시각 전진
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_is_stable() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_manual_clock_set_jumps() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        let later = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        clock.set(later);
        assert_eq!(clock.now(), later);
    }

    #[test]
    fn test_manual_clock_advance_changes_day() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(at);
        let first = clock.today();

        clock.advance(chrono::Duration::days(1));
        let second = clock.today();

        assert_ne!(first, second);
        assert_eq!(second, (at + chrono::Duration::days(1)).with_timezone(&Local).format("%Y-%m-%d").to_string());
    }
}
