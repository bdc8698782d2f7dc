//! 로거 호출 매크로
//!
//! `log_info!(logger, a, b)`는 인자를 공백으로 이어 붙이고,
//! `log_infof!(logger, "x={}", x)`는 형식 문자열을 사용합니다.

#[macro_export]
macro_rules! log_debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.info(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.error(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.fatal(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}

#[macro_export]
macro_rules! log_debugf {
    ($logger:expr, $($fmt:tt)+) => {
        $logger.debugf(::std::format_args!($($fmt)+))
    };
}

#[macro_export]
macro_rules! log_infof {
    ($logger:expr, $($fmt:tt)+) => {
        $logger.infof(::std::format_args!($($fmt)+))
    };
}

#[macro_export]
macro_rules! log_warnf {
    ($logger:expr, $($fmt:tt)+) => {
        $logger.warnf(::std::format_args!($($fmt)+))
    };
}

#[macro_export]
macro_rules! log_errorf {
    ($logger:expr, $($fmt:tt)+) => {
        $logger.errorf(::std::format_args!($($fmt)+))
    };
}

#[macro_export]
macro_rules! log_fatalf {
    ($logger:expr, $($fmt:tt)+) => {
        $logger.fatalf(::std::format_args!($($fmt)+))
    };
}
