//! 프로세스 종료 훅
//!
//! FATAL 경로와 싱크 장애는 이 훅을 통해 종료합니다. 테스트에서는 종료 대신
//! 코드를 기록하는 클로저로 교체할 수 있습니다.

/// FATAL 로그와 `check_error`가 사용하는 종료 코드
pub const FATAL_EXIT_CODE: i32 = 1;

/// 로그 파일을 열 수 없을 때의 종료 코드
pub const SINK_FAILURE_EXIT_CODE: i32 = 255;

/// 종료 전략
pub trait ExitHook: Send + Sync {
    fn exit(&self, code: i32);
}

/// 실제 프로세스 종료
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl ExitHook for ProcessExit {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }
}

impl<F> ExitHook for F
where
    F: Fn(i32) + Send + Sync,
{
    fn exit(&self, code: i32) {
        self(code)
    }
}
