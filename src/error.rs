// Copyright (C) 2020-2026 Andy Kurnia.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Io,
    BadTile,
    WordTooLong,
    BadRecord,
    BadLeave,
    BadConfig,
    UnknownTag,
}

pub struct MyError {
    kind: ErrorKind,
    s: String,
}

impl MyError {
    #[inline(always)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.s)
    }
}

impl std::fmt::Debug for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for MyError {}

pub fn new(kind: ErrorKind, s: String) -> MyError {
    MyError { kind, s }
}

pub type BoxAnyError = Box<dyn std::error::Error + Send + Sync>;
pub type Returns<T> = Result<T, BoxAnyError>;

// None for errors that did not originate here (io, csv, json...).
pub fn kind_of(err: &BoxAnyError) -> Option<ErrorKind> {
    err.downcast_ref::<MyError>().map(MyError::kind)
}

#[macro_export]
macro_rules! return_error {
    ($kind:ident, $error:expr) => {
        return Err($crate::error::new($crate::error::ErrorKind::$kind, $error).into());
    };
}
