//! 로그 파일 싱크와 날짜별 순환
//!
//! 순환이 켜져 있으면 로컬 날짜가 바뀐 뒤 첫 쓰기에서 `name_YYYY-MM-DD.ext`
//! 파일을 새로 열고 이전 핸들을 닫습니다. 타이머는 없습니다.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error_handling::{LogError, LogResult};

/// 로그 파일 싱크
#[derive(Debug)]
pub struct FileSink {
    /// 설정된 로그 파일 경로
    base_path: PathBuf,
    /// 날짜별 순환 여부
    rotate: bool,
    /// 마지막으로 파일을 연 날짜
    current_day: String,
    /// 현재 열린 파일 (프로세스당 최대 하나)
    file: Option<File>,
    /// 현재 열린 파일 경로
    active_path: Option<PathBuf>,
}

impl FileSink {
    /// 새 파일 싱크 생성 (파일은 아직 열지 않음)
    pub fn new<P: AsRef<Path>>(base_path: P, rotate: bool) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            rotate,
            current_day: String::new(),
            file: None,
            active_path: None,
        }
    }

    /// 순환 없는 싱크를 즉시 열어 경로 문제를 구성 시점에 드러냄
    pub fn open<P: AsRef<Path>>(base_path: P) -> LogResult<Self> {
        let mut sink = Self::new(base_path, false);
        let path = sink.base_path.clone();
        sink.file = Some(open_log_file(&path)?);
        sink.active_path = Some(path);
        Ok(sink)
    }

    /// 현재 열린 파일 경로
    pub fn active_path(&self) -> Option<&Path> {
        self.active_path.as_deref()
    }

    /// 마지막으로 파일을 연 날짜 (순환하지 않으면 빈 문자열)
    pub fn current_day(&self) -> &str {
        &self.current_day
    }

    /// 오늘 날짜에 맞는 파일이 열려 있도록 보장
    ///
    /// 날짜가 바뀌었으면 새 파일을 열고 이전 핸들을 교체합니다.
    pub fn ensure_current(&mut self, today: &str) -> LogResult<()> {
        if !self.rotate {
            if self.file.is_none() {
                let path = self.base_path.clone();
                self.file = Some(open_log_file(&path)?);
                self.active_path = Some(path);
            }
            return Ok(());
        }

        if self.file.is_some() && self.current_day == today {
            return Ok(());
        }

        let path = rotated_path(&self.base_path, today);
        let file = open_log_file(&path)?;
        if let Some(mut old) = self.file.replace(file) {
            let _ = old.flush();
        }
        self.current_day = today.to_string();

        debug!(
            path = %path.display(),
            day = today,
            "새 로그 파일로 순환됨"
        );
        self.active_path = Some(path);

        Ok(())
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.file.as_mut() {
            Some(file) => file.write(buf),
            None => Err(io::Error::new(io::ErrorKind::NotConnected, "log file is not open")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// 날짜가 포함된 순환 파일 경로
///
/// `name.ext` → `name_D.ext`, 확장자가 없으면 `name_D`.
/// 디렉토리 이름의 점은 무시하고 파일 이름만 나눕니다.
pub fn rotated_path(base: &Path, date: &str) -> PathBuf {
    let file_name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let rotated = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, date, ext),
        _ => format!("{}_{}", file_name, date),
    };

    base.with_file_name(rotated)
}

/// 로그 파일 열기 (append, 없으면 생성, 상위 디렉토리 생성)
fn open_log_file(path: &Path) -> LogResult<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| LogError::SinkOpen {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::SinkOpen {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "로그 파일 열림");
    Ok(file)
}
