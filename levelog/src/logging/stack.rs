//! 스택 추적 에러
//!
//! `TracedError`는 생성 시점의 호출 스택을 기록합니다. 로거는 에러 체인에서
//! 이 타입을 찾았을 때만 프레임을 출력하고, 일반 에러는 메시지만 남깁니다.
//! `anyhow::Error`는 `TracedError::from`으로 변환하면 anyhow가 잡아 둔
//! 백트레이스를 그대로 사용합니다.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// 호출 스택을 기록하는 에러
pub struct TracedError {
    message: String,
    source: Option<BoxError>,
    frames: Vec<String>,
}

impl TracedError {
    /// 메시지로 새 에러 생성
    pub fn new<M: Into<String>>(message: M) -> Self {
        Self {
            message: message.into(),
            source: None,
            frames: capture_frames(),
        }
    }

    /// 기존 에러를 감싸면서 스택 기록
    pub fn wrap<E, M>(source: E, message: M) -> Self
    where
        E: Into<BoxError>,
        M: Into<String>,
    {
        Self {
            message: message.into(),
            source: Some(source.into()),
            frames: capture_frames(),
        }
    }

    /// 기록된 스택 프레임 (캡처를 지원하지 않는 플랫폼에서는 비어 있음)
    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

impl fmt::Display for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {}", self.message, source),
            None => f.write_str(&self.message),
        }
    }
}

impl fmt::Debug for TracedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedError")
            .field("message", &self.message)
            .field("source", &self.source)
            .field("frames", &self.frames.len())
            .finish()
    }
}

impl Error for TracedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

impl From<anyhow::Error> for TracedError {
    /// anyhow 에러 변환 (메시지는 컨텍스트 체인 전체)
    ///
    /// anyhow가 백트레이스를 잡지 않았으면 변환 시점의 스택을 기록합니다.
    fn from(err: anyhow::Error) -> Self {
        let frames = match err.backtrace().status() {
            BacktraceStatus::Captured => backtrace_frames(err.backtrace()),
            _ => capture_frames(),
        };
        Self {
            message: format!("{:#}", err),
            source: None,
            frames,
        }
    }
}

fn capture_frames() -> Vec<String> {
    backtrace_frames(&Backtrace::force_capture())
}

fn backtrace_frames(backtrace: &Backtrace) -> Vec<String> {
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }
    backtrace
        .to_string()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// 에러 체인에서 스택 프레임을 가진 첫 에러의 프레임 조회
pub fn stack_frames<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a [String]> {
    let mut current: Option<&'a (dyn Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(traced) = e.downcast_ref::<TracedError>() {
            return Some(traced.frames());
        }
        current = e.source();
    }
    None
}

/// 에러 메시지와 (있다면) 스택 프레임을 줄 단위로 이어 붙인 문자열
pub fn formatted_stack_trace(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    if let Some(frames) = stack_frames(err) {
        for frame in frames {
            out.push('\n');
            out.push_str(frame);
        }
    }
    out
}

/// `Result`의 에러를 `TracedError`로 감싸는 확장 트레이트
pub trait ResultExt<T> {
    fn traced<M: Into<String>>(self, message: M) -> Result<T, TracedError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn traced<M: Into<String>>(self, message: M) -> Result<T, TracedError> {
        self.map_err(|e| TracedError::wrap(e, message))
    }
}
