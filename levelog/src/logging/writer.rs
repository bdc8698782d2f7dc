//! 출력 스트림과 레벨별 라우팅
//!
//! 파일 출력이 설정되면 모든 레벨이 파일로, 아니면 ERROR/FATAL은 stderr,
//! 나머지는 stdout 역할의 스트림으로 갑니다.

use parking_lot::Mutex;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use crate::error_handling::LogResult;
use crate::logging::formatter::LogLevel;
use crate::logging::rotation::FileSink;

/// 로그 출력 스트림
pub struct LogWriter {
    inner: Box<dyn Write + Send>,
    /// ANSI 색상을 받을 수 있는 터미널인지 여부
    ansi: bool,
}

impl LogWriter {
    /// 프로세스 stdout
    pub fn stdout() -> Self {
        Self {
            ansi: io::stdout().is_terminal(),
            inner: Box::new(io::stdout()),
        }
    }

    /// 프로세스 stderr
    pub fn stderr() -> Self {
        Self {
            ansi: io::stderr().is_terminal(),
            inner: Box::new(io::stderr()),
        }
    }

    /// 임의의 writer (터미널이 아닌 것으로 간주)
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Box::new(writer),
            ansi: false,
        }
    }

    /// ANSI 지원 여부 강제 지정
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn supports_ansi(&self) -> bool {
        self.ansi
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogWriter").field("ansi", &self.ansi).finish_non_exhaustive()
    }
}

/// 메모리 내 공유 버퍼 (테스트에서 stdout/stderr 대체용)
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지금까지 기록된 내용
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 선택된 출력 대상
pub enum Target<'a> {
    Stream(&'a mut LogWriter),
    File(&'a mut FileSink),
}

impl Target<'_> {
    /// 색상 출력 가능 여부 (파일에는 절대 색상을 쓰지 않음)
    pub fn supports_ansi(&self) -> bool {
        match self {
            Target::Stream(writer) => writer.supports_ansi(),
            Target::File(_) => false,
        }
    }
}

impl Write for Target<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Target::Stream(writer) => writer.write(buf),
            Target::File(sink) => sink.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Target::Stream(writer) => writer.flush(),
            Target::File(sink) => sink.flush(),
        }
    }
}

/// 레벨별 출력 라우터
#[derive(Debug)]
pub struct WriterRouter {
    stdout: LogWriter,
    stderr: LogWriter,
    file: Option<FileSink>,
}

impl WriterRouter {
    pub fn new(stdout: LogWriter, stderr: LogWriter) -> Self {
        Self {
            stdout,
            stderr,
            file: None,
        }
    }

    /// 파일 싱크 교체 (None이면 콘솔 출력으로 복귀)
    pub fn set_file(&mut self, file: Option<FileSink>) {
        if let Some(mut old) = std::mem::replace(&mut self.file, file) {
            let _ = old.flush();
        }
    }

    pub fn file(&self) -> Option<&FileSink> {
        self.file.as_ref()
    }

    pub fn set_stdout(&mut self, writer: LogWriter) {
        self.stdout = writer;
    }

    pub fn set_stderr(&mut self, writer: LogWriter) {
        self.stderr = writer;
    }

    /// stderr 역할의 스트림 (싱크 장애 진단용)
    pub fn stderr_mut(&mut self) -> &mut LogWriter {
        &mut self.stderr
    }

    /// 레벨에 맞는 출력 대상 선택
    ///
    /// 파일 출력 중이면 `today`로 순환 여부를 확인한 뒤 파일을 돌려줍니다.
    pub fn writer_for_level(&mut self, level: LogLevel, today: &str) -> LogResult<Target<'_>> {
        if let Some(sink) = self.file.as_mut() {
            sink.ensure_current(today)?;
            return Ok(Target::File(sink));
        }

        if level.is_error() {
            Ok(Target::Stream(&mut self.stderr))
        } else {
            Ok(Target::Stream(&mut self.stdout))
        }
    }
}
