//! 로거 에러 타입
//!
//! 로깅 호출 자체는 에러를 반환하지 않습니다 (fire-and-forget).
//! 여기의 에러는 로거를 구성하는 시점(싱크 열기, 설정 파싱)에만 발생합니다.

use std::path::PathBuf;
use thiserror::Error;

/// 로거 구성 에러
#[derive(Error, Debug)]
pub enum LogError {
    #[error("로그 파일을 열 수 없음: {}", path.display())]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("알 수 없는 타임존: {0}")]
    InvalidTimeZone(String),

    #[error("설정 오류: {message}")]
    InvalidConfig {
        message: String,
    },
}

/// Result 타입 별칭
pub type LogResult<T> = Result<T, LogError>;

impl LogError {
    /// 프로세스를 종료시켜야 하는 싱크 에러인지 여부
    pub fn is_sink_failure(&self) -> bool {
        matches!(self, Self::SinkOpen { .. })
    }
}
