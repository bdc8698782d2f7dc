//! 레벨별 로깅 시스템
//!
//! 사람이 읽는 로그 라인(DEBUG/INFO/WARN/ERROR/FATAL)을 콘솔 스트림이나
//! 날짜별로 순환하는 파일에 동기적으로 기록합니다.
//!
//! # 주요 기능
//! - **레벨별 라우팅**: ERROR/FATAL은 stderr, 나머지는 stdout
//! - **날짜별 파일 관리**: 로컬 날짜가 바뀌면 `name_YYYY-MM-DD.ext`로 교체
//! - **ANSI 색상**: 터미널 출력에 한해 줄 단위로 적용
//! - **덤프/구분선/스택 추적** 헬퍼
//!
//! # 사용 예시
//! ```no_run
//! use levelog::logging::{Logger, LoggerConfig};
//!
//! fn main() -> Result<(), levelog::LogError> {
//!     let logger = Logger::new(LoggerConfig::from_env())?;
//!
//!     logger.info(&[&"서버 시작", &50051]);
//!     logger.infof(format_args!("port={}", 50051));
//!     logger.info_separator("초기화");
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod color;
pub mod config;
pub mod exit;
pub mod formatter;
pub mod rotation;
pub mod stack;
pub mod system;
pub mod writer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LogTimeZone, LoggerConfig};
pub use exit::{ExitHook, ProcessExit, FATAL_EXIT_CODE, SINK_FAILURE_EXIT_CODE};
pub use formatter::LogLevel;
pub use rotation::FileSink;
pub use stack::{formatted_stack_trace, ResultExt, TracedError};
pub use system::Logger;
pub use writer::{LogWriter, SharedBuffer};
