//! 로거 데모
//!
//! `.env`와 환경변수(`DEBUG`, `PRINT_TIMESTAMP`, `LOG_*`)로 로거를 구성한 뒤
//! 모든 레벨의 호출을 한 번씩 실행합니다. `--fatal`을 주면 마지막에
//! `check_error`로 프로세스를 종료합니다.

use std::collections::BTreeMap;

use levelog::{log_info, log_warnf, Logger, LoggerConfig, ResultExt, TracedError};
use tracing_subscriber::EnvFilter;

fn load_config() -> Result<(), TracedError> {
    std::fs::read_to_string("definitely-missing.toml")
        .map(|_| ())
        .traced("설정 파일 로드")
}

fn main() {
    dotenv::dotenv().ok();

    // 로거 내부 진단(tracing)은 RUST_LOG로 제어
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let logger = match Logger::new(LoggerConfig::from_env()) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("로거 초기화 실패: {}", e);
            std::process::exit(levelog::logging::SINK_FAILURE_EXIT_CODE);
        }
    };

    let mut data = BTreeMap::new();
    data.insert("hello", "world");
    data.insert("port", "50051");

    logger.debug(&[&"arg1", &"arg2"]);
    logger.debugf(format_args!("arg1 {}", 1));
    logger.debug_dump(&data, "prefix ");
    logger.debug_separator("title");

    log_info!(logger, "arg1", "arg2");
    logger.infof(format_args!("arg1 {}", 1));
    logger.info_dump(&data, "prefix ");
    logger.info_separator("title");

    logger.warn(&[&"arg1", &"arg2"]);
    log_warnf!(logger, "arg1 {}", 1);
    logger.warn_dump(&data, "prefix ");
    logger.warn_separator("title");

    logger.error(&[&"arg1", &"arg2"]);
    logger.errorf(format_args!("arg1 {}", 1));
    logger.error_dump(&data, "prefix ");
    logger.error_separator("title");

    let result = load_config();
    if let Err(e) = &result {
        logger.stack_trace(e);
    }

    if std::env::args().any(|arg| arg == "--fatal") {
        logger.check_error(result);
    }
}
