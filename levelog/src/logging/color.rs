//! ANSI 색상 처리
//!
//! 레벨별 색상 코드와 여러 줄 메시지의 줄 단위 색상 적용.

use crate::logging::formatter::LogLevel;

/// 색상 리셋
pub const RESET: &str = "\x1b[0m";

/// 레벨별 ANSI 색상 코드
pub fn color_code(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "\x1b[90m", // 밝은 검정
        LogLevel::Info => "\x1b[92m",  // 밝은 녹색
        LogLevel::Warn => "\x1b[93m",  // 밝은 노란색
        LogLevel::Error => "\x1b[91m", // 밝은 빨간색
        LogLevel::Fatal => "\x1b[91m", // 밝은 빨간색
    }
}

/// 실행 플랫폼이 ANSI 색상을 지원하는지 여부
pub fn platform_supports_ansi() -> bool {
    !cfg!(windows)
}

/// `\r\n`, `\r`을 `\n`으로 정규화한 뒤 줄 단위로 분리
pub fn split_in_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}

/// 각 줄을 독립적으로 색상 시작/리셋으로 감싸고 개행으로 끝냄
pub fn colorize(level: LogLevel, message: &str) -> String {
    let code = color_code(level);
    let mut out = String::with_capacity(message.len() + 16);
    for line in split_in_lines(message) {
        out.push_str(code);
        out.push_str(&line);
        out.push_str(RESET);
        out.push('\n');
    }
    out
}
