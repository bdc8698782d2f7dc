//! 로거 설정 관리
//!
//! 로거 하나가 소유하는 설정 값과 타임존 정의를 담당합니다.

use anyhow::Context;
use chrono::format::{Item, StrftimeItems};
use chrono::FixedOffset;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error_handling::{LogError, LogResult};

/// 기본 타임스탬프 형식 (chrono strftime)
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// 구분선 기본 너비
pub const DEFAULT_SEPARATOR_WIDTH: usize = 80;

/// 타임스탬프 렌더링에 사용할 타임존
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogTimeZone {
    /// UTC
    Utc,
    /// 머신 로컬 시간
    Local,
    /// 고정 오프셋 (예: `+09:00`)
    Fixed(FixedOffset),
    /// IANA 타임존 이름 (예: `Europe/Brussels`, 서머타임 반영)
    Named(Tz),
}

impl FromStr for LogTimeZone {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(LogTimeZone::Utc);
        }
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(LogTimeZone::Local);
        }
        if let Some(offset) = parse_offset(trimmed) {
            return Ok(LogTimeZone::Fixed(offset));
        }
        trimmed
            .parse::<Tz>()
            .map(LogTimeZone::Named)
            .map_err(|_| LogError::InvalidTimeZone(s.to_string()))
    }
}

/// `+HH:MM`, `-HH:MM`, `+HHMM` 형식의 오프셋 파싱
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for LogTimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogTimeZone::Utc => write!(f, "UTC"),
            LogTimeZone::Local => write!(f, "Local"),
            LogTimeZone::Fixed(offset) => write!(f, "{}", offset),
            LogTimeZone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

impl TryFrom<String> for LogTimeZone {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogTimeZone> for String {
    fn from(zone: LogTimeZone) -> Self {
        zone.to_string()
    }
}

/// 로거 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// DEBUG 레벨 출력 여부 (기본값: false)
    pub debug_mode: bool,

    /// ANSI 색상 출력 여부 (기본값: true)
    pub print_colors: bool,

    /// 타임스탬프 출력 여부 (기본값: false)
    pub print_timestamp: bool,

    /// 타임스탬프 타임존 (None이면 머신 로컬 시간)
    pub time_zone: Option<LogTimeZone>,

    /// 타임스탬프 형식 (기본값: `%Y-%m-%d %H:%M:%S%.3f`)
    pub time_format: String,

    /// 파일 출력 경로 (None이면 콘솔 출력)
    pub file_output: Option<PathBuf>,

    /// 날짜별 파일 순환 여부 (기본값: false)
    pub rotate_file: bool,

    /// 구분선 너비 (기본값: 80)
    pub separator_width: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            print_colors: true,
            print_timestamp: false,
            time_zone: Some(LogTimeZone::Utc),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            file_output: None,
            rotate_file: false,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
        }
    }
}

impl LoggerConfig {
    /// 환경변수에서 설정 로드
    ///
    /// `DEBUG=1`, `PRINT_TIMESTAMP=1`과 `LOG_*` 변수를 읽습니다.
    /// 해석할 수 없는 값은 무시하고 기본값을 유지합니다.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.debug_mode = env_flag("DEBUG").unwrap_or(false);
        config.print_timestamp = env_flag("PRINT_TIMESTAMP").unwrap_or(false);

        if let Ok(val) = std::env::var("LOG_PRINT_COLORS") {
            config.print_colors = val.trim() != "0";
        }

        if let Ok(val) = std::env::var("LOG_TIME_ZONE") {
            match val.parse() {
                Ok(zone) => config.time_zone = Some(zone),
                Err(e) => tracing::warn!(error = %e, "LOG_TIME_ZONE 무시됨"),
            }
        }

        if let Ok(val) = std::env::var("LOG_TIME_FORMAT") {
            match validate_time_format(&val) {
                Ok(()) => config.time_format = val,
                Err(e) => tracing::warn!(error = %e, "LOG_TIME_FORMAT 무시됨"),
            }
        }

        if let Ok(val) = std::env::var("LOG_FILE_OUTPUT") {
            if !val.trim().is_empty() {
                config.file_output = Some(PathBuf::from(val.trim()));
            }
        }

        config.rotate_file = env_flag("LOG_ROTATE_FILE").unwrap_or(false);

        config
    }

    /// JSON 문서에서 설정 로드 (누락된 필드는 기본값)
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("로거 설정 JSON 파싱 실패")?;
        config.validate().context("로거 설정 유효성 검증 실패")?;
        Ok(config)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> LogResult<()> {
        validate_time_format(&self.time_format)?;

        if self.separator_width == 0 {
            return Err(LogError::InvalidConfig {
                message: "separator_width must be greater than 0".to_string(),
            });
        }

        if let Some(path) = &self.file_output {
            validate_file_output(path)?;
        }

        Ok(())
    }

    /// 파일 출력이 설정되어 있는지 여부
    pub fn has_file_output(&self) -> bool {
        self.file_output.is_some()
    }
}

/// 파일 출력 경로 검증 (파일 이름이 있어야 함)
pub(crate) fn validate_file_output(path: &Path) -> LogResult<()> {
    if path.as_os_str().is_empty() || path.file_name().is_none() {
        return Err(LogError::InvalidConfig {
            message: format!("file_output is not a file path: {}", path.display()),
        });
    }
    Ok(())
}

/// strftime 형식 문자열 검증
pub(crate) fn validate_time_format(format: &str) -> LogResult<()> {
    if format.is_empty() {
        return Err(LogError::InvalidConfig {
            message: "time_format must not be empty".to_string(),
        });
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(LogError::InvalidConfig {
            message: format!("invalid time_format: {}", format),
        });
    }
    Ok(())
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|val| val.trim() == "1")
}
