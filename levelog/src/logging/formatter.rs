//! 로그 포매터
//!
//! 메시지 조합, 구분선, 타임스탬프, 값 덤프와 최종 라인 형식을 담당합니다.
//! 모든 함수는 부수 효과가 없습니다.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Write as _};
use std::str::FromStr;

use crate::logging::config::LogTimeZone;

/// 로그 레벨 열거형
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// 디버깅 정보 (debug_mode에서만 출력)
    Debug = 1,
    /// 일반 정보
    Info = 2,
    /// 경고 상황
    Warn = 3,
    /// 오류 상황
    Error = 4,
    /// 프로세스 종료 수준 오류
    Fatal = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    /// 로그 레벨을 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// 5자로 패딩된 출력용 라벨
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO ",
            LogLevel::Warn => "WARN ",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// stderr로 보내야 하는 레벨인지 여부
    pub fn is_error(&self) -> bool {
        matches!(self, LogLevel::Error | LogLevel::Fatal)
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(()),
        }
    }
}

/// 인자들을 공백 하나로 이어 붙이고 끝의 공백/개행을 제거
pub fn format_message(args: &[&dyn Display]) -> String {
    let mut msg = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            msg.push(' ');
        }
        let _ = write!(msg, "{}", arg);
    }
    trim_message(msg)
}

/// `format_args!`로 만든 메시지를 렌더링
pub fn format_arguments(args: fmt::Arguments<'_>) -> String {
    let mut msg = String::new();
    let _ = msg.write_fmt(args);
    trim_message(msg)
}

fn trim_message(mut msg: String) -> String {
    let len = msg.trim_end_matches([' ', '\r', '\n']).len();
    msg.truncate(len);
    msg
}

/// 구분선 생성
///
/// 제목이 비어 있으면 `fill`을 `width`번 반복합니다. 그 외에는
/// `====[ title ]=====...` 형태이며, 남는 길이가 없으면 접미사를 생략합니다.
pub fn format_separator(title: &str, fill: char, width: usize) -> String {
    if title.is_empty() {
        return fill.to_string().repeat(width);
    }

    let prefix = fill.to_string().repeat(4);
    let suffix_len = width as i64 - title.chars().count() as i64 - 4 - 4;

    let mut banner = format!("{}[ {} ]", prefix, title);
    if suffix_len > 0 {
        banner.push_str(&fill.to_string().repeat(suffix_len as usize));
    }
    banner
}

/// 주어진 타임존과 형식으로 시각 렌더링
///
/// `zone`이 None이면 머신 로컬 시간을 사용합니다.
pub fn format_time(now: DateTime<Utc>, zone: Option<LogTimeZone>, format: &str) -> String {
    let mut out = String::new();
    let rendered = match zone {
        Some(LogTimeZone::Utc) => write!(out, "{}", now.format(format)),
        Some(LogTimeZone::Fixed(offset)) => write!(out, "{}", now.with_timezone(&offset).format(format)),
        Some(LogTimeZone::Named(tz)) => write!(out, "{}", now.with_timezone(&tz).format(format)),
        Some(LogTimeZone::Local) | None => write!(out, "{}", now.with_timezone(&Local).format(format)),
    };

    // 잘못된 형식 문자열은 RFC 3339로 대체
    if rendered.is_err() {
        out.clear();
        out.push_str(&now.to_rfc3339());
    }
    out
}

/// `"<time> [<LEVEL>] <message>"` 형식으로 타임스탬프 추가
pub fn add_timestamp_to_message(
    now: DateTime<Utc>,
    zone: Option<LogTimeZone>,
    format: &str,
    level: LogLevel,
    message: &str,
) -> String {
    format!("{} [{}] {}", format_time(now, zone, format), level.as_str(), message)
}

/// 값의 pretty Debug 표현 앞에 접두사를 그대로 붙임
pub fn format_dump<T: fmt::Debug + ?Sized>(value: &T, prefix: &str) -> String {
    format!("{}{:#?}", prefix, value)
}

/// 타임스탬프 없는 출력 라인 (개행 제외): `"INFO  | message"`
pub fn format_line(level: LogLevel, message: &str) -> String {
    format!("{} | {}", level.label(), message)
}

/// 타임스탬프가 있는 출력 라인 (개행 제외): `"<time> [INFO] | message"`
pub fn format_timestamped_line(
    now: DateTime<Utc>,
    zone: Option<LogTimeZone>,
    format: &str,
    level: LogLevel,
    message: &str,
) -> String {
    add_timestamp_to_message(now, zone, format, level, &format!("| {}", message))
}
