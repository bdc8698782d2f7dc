//! 레벨별 로거
//!
//! 설정, 출력 스트림, 시계, 종료 훅을 소유하는 `Logger`와 레벨별 공개 API.
//! 전역 상태가 없으므로 한 프로세스 안에서 독립적으로 설정된 로거를 여러 개
//! 만들 수 있습니다.

use parking_lot::{Mutex, RwLock};
use std::error::Error;
use std::fmt::{self, Display};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::error_handling::LogResult;
use crate::logging::{
    clock::{Clock, SystemClock},
    color::{colorize, platform_supports_ansi},
    config::{validate_file_output, validate_time_format, LogTimeZone, LoggerConfig},
    exit::{ExitHook, ProcessExit, FATAL_EXIT_CODE, SINK_FAILURE_EXIT_CODE},
    formatter::{
        format_arguments, format_dump, format_line, format_message, format_separator,
        format_timestamped_line, LogLevel,
    },
    rotation::FileSink,
    stack::formatted_stack_trace,
    writer::{LogWriter, WriterRouter},
};

/// 구분선 채움 문자
const SEPARATOR_FILL: char = '=';

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// 레벨별 로거
pub struct Logger {
    /// 로거 설정
    config: RwLock<LoggerConfig>,
    /// 출력 라우터 (쓰기, 색상 출력, 파일 순환을 한 번에 직렬화)
    router: Mutex<WriterRouter>,
    /// 종료 훅
    exit_hook: Arc<dyn ExitHook>,
    /// 현재 시각 공급자
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// 새 로거 생성 (프로세스 stdout/stderr 사용)
    ///
    /// 순환하지 않는 파일 출력은 여기서 바로 열어 경로 문제를 에러로 돌려줍니다.
    pub fn new(config: LoggerConfig) -> LogResult<Self> {
        config.validate()?;

        let mut router = WriterRouter::new(LogWriter::stdout(), LogWriter::stderr());
        router.set_file(build_sink(config.file_output.as_deref(), config.rotate_file)?);

        Ok(Self {
            config: RwLock::new(config),
            router: Mutex::new(router),
            exit_hook: Arc::new(ProcessExit),
            clock: Arc::new(SystemClock),
        })
    }

    /// 환경변수 설정으로 로거 생성
    pub fn from_env() -> LogResult<Self> {
        Self::new(LoggerConfig::from_env())
    }

    /// stdout 역할 스트림 교체
    pub fn with_stdout(mut self, writer: LogWriter) -> Self {
        self.router.get_mut().set_stdout(writer);
        self
    }

    /// stderr 역할 스트림 교체
    pub fn with_stderr(mut self, writer: LogWriter) -> Self {
        self.router.get_mut().set_stderr(writer);
        self
    }

    /// 종료 훅 교체
    pub fn with_exit_hook<H: ExitHook + 'static>(mut self, hook: H) -> Self {
        self.exit_hook = Arc::new(hook);
        self
    }

    /// 시계 교체
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ===== 설정 =====

    /// 현재 설정 스냅샷
    pub fn config(&self) -> LoggerConfig {
        self.config.read().clone()
    }

    pub fn set_debug_mode(&self, enabled: bool) {
        self.config.write().debug_mode = enabled;
    }

    pub fn set_print_colors(&self, enabled: bool) {
        self.config.write().print_colors = enabled;
    }

    pub fn set_print_timestamp(&self, enabled: bool) {
        self.config.write().print_timestamp = enabled;
    }

    /// 타임존 변경 (None이면 머신 로컬 시간)
    pub fn set_time_zone(&self, zone: Option<LogTimeZone>) {
        self.config.write().time_zone = zone;
    }

    pub fn set_time_format(&self, format: &str) -> LogResult<()> {
        validate_time_format(format)?;
        self.config.write().time_format = format.to_string();
        Ok(())
    }

    /// 파일 출력으로 전환
    ///
    /// 싱크와 설정의 경로 필드는 라우터 잠금 아래에서 함께 바뀌며,
    /// 다른 설정 필드는 건드리지 않습니다.
    pub fn set_file_output<P: AsRef<Path>>(&self, path: P, rotate: bool) -> LogResult<()> {
        let path = path.as_ref();
        validate_file_output(path)?;
        let sink = build_sink(Some(path), rotate)?;

        let mut router = self.router.lock();
        router.set_file(sink);
        let mut config = self.config.write();
        config.file_output = Some(path.to_path_buf());
        config.rotate_file = rotate;
        Ok(())
    }

    /// 콘솔 출력으로 복귀
    pub fn clear_file_output(&self) {
        let mut router = self.router.lock();
        router.set_file(None);
        let mut config = self.config.write();
        config.file_output = None;
        config.rotate_file = false;
    }

    pub fn set_stdout(&self, writer: LogWriter) {
        self.router.lock().set_stdout(writer);
    }

    pub fn set_stderr(&self, writer: LogWriter) {
        self.router.lock().set_stderr(writer);
    }

    /// 해당 레벨이 출력되는지 여부
    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::Debug || self.config.read().debug_mode
    }

    // ===== 공통 출력 경로 =====

    /// 일반 로그 작성 메서드
    ///
    /// FATAL은 메시지를 쓰고 flush한 뒤 종료 훅을 호출합니다.
    /// 싱크 장애로 이미 종료 훅이 호출됐다면 다시 호출하지 않습니다.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let written = self.emit(level, message);
        if written && level == LogLevel::Fatal {
            self.exit_hook.exit(FATAL_EXIT_CODE);
        }
    }

    fn log_args(&self, level: LogLevel, args: &[&dyn Display]) {
        if self.enabled(level) {
            self.log(level, &format_message(args));
        }
    }

    fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.log(level, &format_arguments(args));
        }
    }

    fn log_dump<T: fmt::Debug + ?Sized>(&self, level: LogLevel, value: &T, prefix: &str) {
        if self.enabled(level) {
            self.log(level, &format_dump(value, prefix));
        }
    }

    fn log_separator(&self, level: LogLevel, title: &str) {
        if self.enabled(level) {
            let width = self.config.read().separator_width;
            self.log(level, &format_separator(title, SEPARATOR_FILL, width));
        }
    }

    /// 포매팅, 색상 적용, 라우팅 후 한 번에 기록
    ///
    /// 출력 대상을 열지 못해 싱크 장애 종료 경로를 탔으면 false.
    fn emit(&self, level: LogLevel, message: &str) -> bool {
        let (line, print_colors) = {
            let config = self.config.read();
            let line = if config.print_timestamp {
                format_timestamped_line(self.clock.now(), config.time_zone, &config.time_format, level, message)
            } else {
                format_line(level, message)
            };
            (line, config.print_colors)
        };
        let today = self.clock.today();

        let mut router = self.router.lock();
        let sink_error = match router.writer_for_level(level, &today) {
            Ok(mut target) => {
                let payload = if print_colors && platform_supports_ansi() && target.supports_ansi() {
                    colorize(level, &line)
                } else {
                    format!("{}\n", line)
                };
                if let Err(e) = target.write_all(payload.as_bytes()).and_then(|_| target.flush()) {
                    warn!(level = level.as_str(), error = %e, "로그 출력 실패");
                }
                None
            }
            Err(e) => Some(e),
        };

        if let Some(err) = sink_error {
            let stderr = router.stderr_mut();
            let _ = writeln!(stderr, "failed to create log file: {}", err);
            let _ = stderr.flush();
            drop(router);
            self.exit_hook.exit(SINK_FAILURE_EXIT_CODE);
            return false;
        }
        true
    }

    // ===== DEBUG =====

    /// DEBUG 레벨 로그 (debug_mode가 꺼져 있으면 아무 것도 하지 않음)
    pub fn debug(&self, args: &[&dyn Display]) {
        self.log_args(LogLevel::Debug, args);
    }

    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Debug, args);
    }

    pub fn debug_dump<T: fmt::Debug + ?Sized>(&self, value: &T, prefix: &str) {
        self.log_dump(LogLevel::Debug, value, prefix);
    }

    pub fn debug_separator(&self, title: &str) {
        self.log_separator(LogLevel::Debug, title);
    }

    // ===== INFO =====

    /// INFO 레벨 로그
    pub fn info(&self, args: &[&dyn Display]) {
        self.log_args(LogLevel::Info, args);
    }

    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    pub fn info_dump<T: fmt::Debug + ?Sized>(&self, value: &T, prefix: &str) {
        self.log_dump(LogLevel::Info, value, prefix);
    }

    pub fn info_separator(&self, title: &str) {
        self.log_separator(LogLevel::Info, title);
    }

    // ===== WARN =====

    /// WARN 레벨 로그
    pub fn warn(&self, args: &[&dyn Display]) {
        self.log_args(LogLevel::Warn, args);
    }

    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warn, args);
    }

    pub fn warn_dump<T: fmt::Debug + ?Sized>(&self, value: &T, prefix: &str) {
        self.log_dump(LogLevel::Warn, value, prefix);
    }

    pub fn warn_separator(&self, title: &str) {
        self.log_separator(LogLevel::Warn, title);
    }

    // ===== ERROR =====

    /// ERROR 레벨 로그 (콘솔 출력 시 stderr)
    pub fn error(&self, args: &[&dyn Display]) {
        self.log_args(LogLevel::Error, args);
    }

    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }

    pub fn error_dump<T: fmt::Debug + ?Sized>(&self, value: &T, prefix: &str) {
        self.log_dump(LogLevel::Error, value, prefix);
    }

    pub fn error_separator(&self, title: &str) {
        self.log_separator(LogLevel::Error, title);
    }

    // ===== FATAL =====

    /// FATAL 레벨 로그 후 종료 훅 호출 (코드 1)
    pub fn fatal(&self, args: &[&dyn Display]) {
        self.log_args(LogLevel::Fatal, args);
    }

    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Fatal, args);
    }

    pub fn fatal_dump<T: fmt::Debug + ?Sized>(&self, value: &T, prefix: &str) {
        self.log_dump(LogLevel::Fatal, value, prefix);
    }

    pub fn fatal_separator(&self, title: &str) {
        self.log_separator(LogLevel::Fatal, title);
    }

    // ===== 에러 헬퍼 =====

    /// 에러를 ERROR 레벨로 기록 (스택이 있으면 프레임을 줄 단위로 덧붙임)
    pub fn stack_trace(&self, err: &(dyn Error + 'static)) {
        self.log(LogLevel::Error, &formatted_stack_trace(err));
    }

    /// `Ok`면 값을 돌려주고, `Err`면 FATAL로 기록한 뒤 종료 훅을 호출
    ///
    /// 종료 훅이 반환하는 경우(테스트)에만 `None`을 볼 수 있습니다.
    pub fn check_error<T, E>(&self, result: Result<T, E>) -> Option<T>
    where
        E: Into<BoxError>,
    {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                let err: BoxError = e.into();
                self.log(LogLevel::Fatal, &formatted_stack_trace(&*err));
                None
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &*self.config.read())
            .finish_non_exhaustive()
    }
}

/// 파일 싱크 생성 (순환하지 않으면 즉시 열기)
fn build_sink(path: Option<&Path>, rotate: bool) -> LogResult<Option<FileSink>> {
    match path {
        Some(path) if rotate => Ok(Some(FileSink::new(path, true))),
        Some(path) => FileSink::open(path).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::clock::ManualClock;
    use crate::logging::stack::TracedError;
    use crate::logging::writer::SharedBuffer;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use std::io;

    struct Harness {
        logger: Logger,
        stdout: SharedBuffer,
        stderr: SharedBuffer,
        exits: Arc<Mutex<Vec<i32>>>,
    }

    fn harness() -> Harness {
        let stdout = SharedBuffer::new();
        let stderr = SharedBuffer::new();
        let exits = Arc::new(Mutex::new(Vec::<i32>::new()));
        let recorded = exits.clone();

        let config = LoggerConfig {
            print_colors: false,
            ..Default::default()
        };
        let logger = Logger::new(config)
            .expect("Test assertion failed")
            .with_stdout(LogWriter::from_writer(stdout.clone()))
            .with_stderr(LogWriter::from_writer(stderr.clone()))
            .with_exit_hook(move |code: i32| recorded.lock().push(code));

        Harness {
            logger,
            stdout,
            stderr,
            exits,
        }
    }

    #[test]
    fn test_info_goes_to_stdout() {
        let h = harness();
        h.logger.info(&[&"hello", &"world"]);

        assert_eq!(h.stdout.contents(), "INFO  | hello world\n");
        assert_eq!(h.stderr.contents(), "");
    }

    #[test]
    fn test_error_goes_to_stderr() {
        let h = harness();
        h.logger.error(&[&"boom"]);

        assert_eq!(h.stdout.contents(), "");
        assert_eq!(h.stderr.contents(), "ERROR | boom\n");
    }

    #[test]
    fn test_debug_disabled_writes_nothing() {
        let h = harness();
        h.logger.debug(&[&"debug"]);
        h.logger.debugf(format_args!("{} {}", "x", 1));
        h.logger.debug_dump(&vec![1, 2], "p");
        h.logger.debug_separator("title");

        assert!(h.stdout.is_empty());
        assert!(h.stderr.is_empty());
    }

    #[test]
    fn test_debug_enabled() {
        let h = harness();
        h.logger.set_debug_mode(true);
        h.logger.debugf(format_args!("hello {}", 2));

        assert_eq!(h.stdout.contents(), "DEBUG | hello 2\n");
    }

    #[test]
    fn test_separator_line() {
        let h = harness();
        h.logger.set_debug_mode(true);
        h.logger.debug_separator("x");

        let out = h.stdout.contents();
        let banner = out
            .strip_prefix("DEBUG | ")
            .and_then(|s| s.strip_suffix('\n'))
            .expect("Test assertion failed");
        assert_eq!(banner.len(), 80);
        assert!(banner.starts_with("====[ x ]==="));
    }

    #[test]
    fn test_dump_with_prefix() {
        let h = harness();
        let mut data = BTreeMap::new();
        data.insert("hello", "world");

        h.logger.warn_dump(&data, "wprefix | ");

        assert_eq!(
            h.stdout.contents(),
            "WARN  | wprefix | {\n    \"hello\": \"world\",\n}\n"
        );
    }

    #[test]
    fn test_fatal_writes_then_exits() {
        let h = harness();
        h.logger.fatalf(format_args!("fatal error {}", 2));

        assert_eq!(h.stderr.contents(), "FATAL | fatal error 2\n");
        assert_eq!(*h.exits.lock(), vec![FATAL_EXIT_CODE]);
    }

    #[test]
    fn test_timestamp_line() {
        let h = harness();
        let at = Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 15).unwrap();
        let logger = h.logger.with_clock(Arc::new(ManualClock::new(at)));
        logger.set_print_timestamp(true);
        logger.set_time_format("%H:%M:%S").expect("Test assertion failed");

        logger.info(&[&"tick"]);
        logger.info(&[&"tick"]);

        assert_eq!(h.stdout.contents(), "08:30:15 [INFO] | tick\n08:30:15 [INFO] | tick\n");
    }

    #[test]
    fn test_stack_trace_plain_error() {
        let h = harness();
        let err = io::Error::new(io::ErrorKind::Other, "my error");
        h.logger.stack_trace(&err);

        assert_eq!(h.stderr.contents(), "ERROR | my error\n");
        assert!(h.exits.lock().is_empty());
    }

    #[test]
    fn test_stack_trace_traced_error() {
        let h = harness();
        let err = TracedError::new("my error");
        h.logger.stack_trace(&err);

        let out = h.stderr.contents();
        assert!(out.starts_with("ERROR | my error\n"));
        assert_eq!(out.lines().count(), 1 + err.frames().len());
    }

    #[test]
    fn test_check_error_ok_is_silent() {
        let h = harness();
        let value = h.logger.check_error(Ok::<_, io::Error>(7));

        assert_eq!(value, Some(7));
        assert!(h.stdout.is_empty());
        assert!(h.stderr.is_empty());
        assert!(h.exits.lock().is_empty());
    }

    #[test]
    fn test_check_error_err_is_fatal() {
        let h = harness();
        let value = h.logger.check_error(Err::<(), _>(io::Error::new(io::ErrorKind::Other, "test")));

        assert_eq!(value, None);
        assert_eq!(h.stderr.contents(), "FATAL | test\n");
        assert_eq!(*h.exits.lock(), vec![FATAL_EXIT_CODE]);
    }

    #[test]
    fn test_check_error_with_converted_anyhow_error() {
        let h = harness();
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("root cause").context("loading"));
        let traced = result.map_err(TracedError::from);
        let frame_count = traced.as_ref().err().map(|e| e.frames().len()).unwrap_or_default();

        assert_eq!(h.logger.check_error(traced), None);

        let out = h.stderr.contents();
        assert!(out.starts_with("FATAL | loading: root cause\n"));
        assert_eq!(out.lines().count(), 1 + frame_count);
        assert_eq!(*h.exits.lock(), vec![FATAL_EXIT_CODE]);
    }

    #[test]
    fn test_colored_output_when_forced_terminal() {
        let h = harness();
        let colored = SharedBuffer::new();
        h.logger.set_stdout(LogWriter::from_writer(colored.clone()).with_ansi(true));
        h.logger.set_print_colors(true);

        h.logger.info(&[&"one\ntwo"]);

        let out = colored.contents();
        if platform_supports_ansi() {
            assert_eq!(out, "\x1b[92mINFO  | one\x1b[0m\n\x1b[92mtwo\x1b[0m\n");
        } else {
            assert_eq!(out, "INFO  | one\ntwo\n");
        }
    }

    #[test]
    fn test_sink_failure_invokes_exit_hook() {
        let temp_dir = tempfile::TempDir::new().expect("Test assertion failed");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").expect("Test assertion failed");

        let h = harness();
        h.logger
            .set_file_output(blocker.join("app.log"), true)
            .expect("rotating sink opens lazily");
        h.logger.info(&[&"lost"]);

        assert!(h.stderr.contents().starts_with("failed to create log file:"));
        assert_eq!(*h.exits.lock(), vec![SINK_FAILURE_EXIT_CODE]);
    }

    #[test]
    fn test_fatal_on_broken_sink_exits_once() {
        let temp_dir = tempfile::TempDir::new().expect("Test assertion failed");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").expect("Test assertion failed");

        let h = harness();
        h.logger
            .set_file_output(blocker.join("app.log"), true)
            .expect("rotating sink opens lazily");
        h.logger.fatal(&[&"bye"]);

        assert!(h.stderr.contents().starts_with("failed to create log file:"));
        assert!(!h.stderr.contents().contains("bye"));
        assert_eq!(*h.exits.lock(), vec![SINK_FAILURE_EXIT_CODE]);
    }

    #[test]
    fn test_set_file_output_keeps_other_settings() {
        let temp_dir = tempfile::TempDir::new().expect("Test assertion failed");
        let h = harness();
        h.logger.set_debug_mode(true);
        h.logger.set_print_timestamp(true);
        h.logger.set_time_format("%H:%M").expect("Test assertion failed");

        h.logger
            .set_file_output(temp_dir.path().join("app.log"), false)
            .expect("Test assertion failed");

        let config = h.logger.config();
        assert!(config.debug_mode);
        assert!(config.print_timestamp);
        assert_eq!(config.time_format, "%H:%M");
        assert!(config.has_file_output());
        assert!(!config.rotate_file);
    }

    #[test]
    fn test_concurrent_setters_survive_file_switches() {
        let temp_dir = tempfile::TempDir::new().expect("Test assertion failed");
        let h = harness();
        let logger = Arc::new(h.logger);

        let switcher = {
            let logger = logger.clone();
            let dir = temp_dir.path().to_path_buf();
            std::thread::spawn(move || {
                for i in 0..50 {
                    logger
                        .set_file_output(dir.join(format!("app{}.log", i % 2)), false)
                        .expect("Test assertion failed");
                }
            })
        };
        for _ in 0..50 {
            logger.set_debug_mode(true);
        }
        switcher.join().expect("Test assertion failed");

        let config = logger.config();
        assert!(config.debug_mode);
        assert_eq!(config.file_output, Some(temp_dir.path().join("app1.log")));

        // 설정에 기록된 경로와 실제 싱크가 일치
        logger.info(&[&"last"]);
        let written = std::fs::read_to_string(temp_dir.path().join("app1.log")).expect("Test assertion failed");
        assert!(written.ends_with("INFO  | last\n"));
    }

    #[test]
    fn test_set_file_output_rejects_bad_path() {
        let temp_dir = tempfile::TempDir::new().expect("Test assertion failed");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").expect("Test assertion failed");

        let h = harness();
        assert!(h.logger.set_file_output(blocker.join("app.log"), false).is_err());
        assert!(h.logger.config().file_output.is_none());
    }
}
