use core::fmt;

pub type ConvResult<T> = Result<T, ConvertError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertError {
    pub kind: ConvertErrorKind,
    pub msg: Box<str>,
    pub file: Box<str>,
    pub line: u32,
    pub column: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConvertErrorKind {
    /// an opcode that no block family claims, or a block used in a position its family can't fill
    UnknownOpcode,
    HatBlockHasParent,
    /// a `next` pointer to a missing, hat or non-statement block, or a cyclic chain
    InvalidNextTarget,
    /// an input or parent reference to a block that isn't where it should be
    ChildNotFound,
    UnexpectedTopLevelBlock,
    MalformedFieldShape,
    MalformedMutation,
    /// an unrecognised input payload, only raised with `strict_inputs` on
    MalformedInput,
    UnmatchedProcedureCall,
    ProcedureArityMismatch,
    /// project JSON that couldn't be deserialized at all
    MalformedProject,
    InvalidFlags,
    InternalError,
}

impl ConvertErrorKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::UnknownOpcode => "UnknownOpcode",
            Self::HatBlockHasParent => "HatBlockHasParent",
            Self::InvalidNextTarget => "InvalidNextTarget",
            Self::ChildNotFound => "ChildNotFound",
            Self::UnexpectedTopLevelBlock => "UnexpectedTopLevelBlock",
            Self::MalformedFieldShape => "MalformedFieldShape",
            Self::MalformedMutation => "MalformedMutation",
            Self::MalformedInput => "MalformedInput",
            Self::UnmatchedProcedureCall => "UnmatchedProcedureCall",
            Self::ProcedureArityMismatch => "ProcedureArityMismatch",
            Self::MalformedProject => "MalformedProject",
            Self::InvalidFlags => "InvalidFlags",
            Self::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConvertErrorKind::InternalError => write!(
                f,
                "internal error: {}\nat {}:{}:{}\nthis is probably a bug in the converter itself",
                self.msg, self.file, self.line, self.column
            ),
            kind => write!(
                f,
                "{}: {}\nat {}:{}:{}",
                kind.name(),
                self.msg,
                self.file,
                self.line,
                self.column
            ),
        }
    }
}

impl std::error::Error for ConvertError {}

#[macro_export]
macro_rules! make_conv_err {
    ($kind:ident, $($args:tt)+) => {{
        $crate::ConvertError {
            kind: $crate::ConvertErrorKind::$kind,
            msg: format!("{}", format_args!($($args)*)).into(),
            file: file!().into(),
            line: line!(),
            column: column!(),
        }
    }};
}

#[macro_export]
macro_rules! conv_bail {
    ($kind:ident, $($args:tt)+) => {{
        return Err($crate::make_conv_err!($kind, $($args)+));
    }};
}

#[macro_export]
macro_rules! conv_bug {
    ($($args:tt)+) => {{
        return Err($crate::make_conv_err!(InternalError, $($args)+));
    }};
}

#[macro_export]
macro_rules! conv_assert {
    ($kind:ident, $expr:expr, $($args:tt)+) => {{
        if !$expr {
            $crate::conv_bail!($kind, $($args)+);
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_with_child_not_found() -> ConvResult<()> {
        conv_bail!(ChildNotFound, "block {} doesn't exist", "abc")
    }

    #[test]
    fn bail_records_kind_and_message() {
        let err = fails_with_child_not_found().unwrap_err();
        assert_eq!(err.kind, ConvertErrorKind::ChildNotFound);
        assert_eq!(&*err.msg, "block abc doesn't exist");
        assert!(err.file.ends_with("error.rs"));
    }

    #[test]
    fn display_names_the_kind() {
        let err = make_conv_err!(MalformedMutation, "bad proccode");
        assert!(err.to_string().starts_with("MalformedMutation: bad proccode"));
        let bug = make_conv_err!(InternalError, "oops");
        assert!(bug.to_string().starts_with("internal error: oops"));
    }

    #[test]
    fn assert_only_fails_on_false() {
        fn check(ok: bool) -> ConvResult<()> {
            conv_assert!(InvalidNextTarget, ok, "not ok");
            Ok(())
        }
        assert!(check(true).is_ok());
        assert_eq!(
            check(false).unwrap_err().kind,
            ConvertErrorKind::InvalidNextTarget
        );
    }
}
