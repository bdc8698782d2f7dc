//! 레벨별 콘솔/파일 로거
//!
//! 단일 프로세스, 동기식, best-effort 로그 출력 라이브러리입니다.

pub mod error_handling;
pub mod logging;
mod macros;

pub use error_handling::{LogError, LogResult};
pub use logging::{
    formatted_stack_trace, LogLevel, LogTimeZone, LogWriter, Logger, LoggerConfig, ResultExt,
    SharedBuffer, TracedError,
};
