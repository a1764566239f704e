//! Error types.

use crate::Tag;
use core::fmt;

/// Result type for this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type: an [`ErrorKind`] annotated with the byte offset at which it
/// was detected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    offset: Option<usize>,
}

impl Error {
    /// Create a new error from a kind, with no offset information attached.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, offset: None }
    }

    /// Annotate an error with the byte offset at which it occurred.
    pub fn at(kind: ErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset: Some(offset),
        }
    }

    /// The kind of error that occurred.
    pub fn kind(&self) -> ErrorKind {
        self.kind.clone()
    }

    /// The byte offset at which the error was detected, if known.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Attach (or overwrite) the offset on this error.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Render a single-line diagnostic suitable for logs or CLI output.
    pub fn to_diagnostic_line(&self) -> std::string::String {
        match self.offset {
            Some(offset) => format!("{} (at byte offset {})", self.kind, offset),
            None => format!("{}", self.kind),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} (at byte offset {})", self.kind, offset),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

/// The reason a tag field failed to parse; see X.690 §8.1.2.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagReason {
    /// The tag field was empty.
    Empty,
    /// A leading byte of `1F` (31) was followed by no subsequent bytes.
    NoSubsequentBytes,
    /// The first subsequent byte was `80`, i.e. redundant zero padding.
    LeadingZeroSubsequentByte,
    /// An intermediate subsequent byte was missing its continuation bit (b8).
    IntermediateByteMissingContinuation,
    /// The last subsequent byte unexpectedly had its continuation bit (b8) set.
    TrailingByteHasContinuation,
    /// A multi-byte tag number was used where a single byte would suffice.
    RedundantMultiByteEncoding,
    /// The leading byte's number field was not `11111` yet subsequent bytes followed.
    SubsequentBytesWithoutEscape,
}

impl fmt::Display for TagReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TagReason::Empty => "tag field is empty",
            TagReason::NoSubsequentBytes => "leading byte signals a multi-byte tag number but no subsequent byte follows",
            TagReason::LeadingZeroSubsequentByte => "first subsequent tag byte is 0x80 (redundant leading zero)",
            TagReason::IntermediateByteMissingContinuation => "intermediate tag byte is missing its continuation bit",
            TagReason::TrailingByteHasContinuation => "last tag byte unexpectedly has its continuation bit set",
            TagReason::RedundantMultiByteEncoding => "tag number fits in one byte but a multi-byte encoding was used",
            TagReason::SubsequentBytesWithoutEscape => "leading byte does not signal a multi-byte tag number but subsequent bytes follow",
        };
        f.write_str(msg)
    }
}

/// The cause of an [`ErrorKind::MalformedEncoding`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EncodingReason {
    /// A primitive-form tag was paired with an indefinite length.
    IndefiniteLengthOnPrimitive,
    /// An indefinite-form constructed value never encountered its End-of-Content marker.
    MissingEndOfContent,
    /// A definite-form constructed value's children did not sum to its declared length.
    DefiniteLengthMismatch,
    /// Trailing bytes remained inside a definite-form constructed value.
    TrailingBytes,
    /// A primitive-form tag was passed to a constructor that requires constructed form.
    PrimitiveTagForConstructed,
    /// A tag byte of `0x00` was encountered mid-stream with a nonzero length byte, i.e.
    /// it is neither a valid End-of-Content marker nor a node this decoder accepts.
    MalformedEndOfContentMarker,
    /// A type requiring at least one value octet (e.g. INTEGER) was given none.
    EmptyValueField,
    /// An OBJECT IDENTIFIER's value field did not encode a well-formed arc sequence.
    InvalidObjectIdentifier,
}

impl fmt::Display for EncodingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            EncodingReason::IndefiniteLengthOnPrimitive => "indefinite length used with a primitive-form tag",
            EncodingReason::MissingEndOfContent => "indefinite-form constructed value has no matching end-of-content marker",
            EncodingReason::DefiniteLengthMismatch => "constructed value's children do not sum to its declared length",
            EncodingReason::TrailingBytes => "trailing bytes inside a definite-length constructed value",
            EncodingReason::PrimitiveTagForConstructed => "primitive-form tag used to build a constructed node",
            EncodingReason::MalformedEndOfContentMarker => "tag byte 0x00 encountered with a nonzero length byte where an end-of-content marker was expected",
            EncodingReason::EmptyValueField => "value field is empty but this type requires at least one octet",
            EncodingReason::InvalidObjectIdentifier => "value field does not encode a well-formed OBJECT IDENTIFIER arc sequence",
        };
        f.write_str(msg)
    }
}

/// The structural error taxonomy (see spec §7).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The source ended before the required number of bytes could be read.
    BufferUnderflow,

    /// A tag field required more than the implementation's 10-byte limit.
    TagTooLong {
        /// Number of bytes consumed before the limit was hit.
        len: usize,
    },

    /// A tag field violated one of the well-formedness rules of X.690 §8.1.2.
    MalformedTag(TagReason),

    /// A decoded length would exceed `2^63 - 1`.
    LengthOverflow,

    /// The reserved long-form length byte `0xFF` (n = 127) was encountered.
    ReservedLengthForm,

    /// A structural encoding rule was violated.
    MalformedEncoding(EncodingReason),

    /// A typed accessor found a child of a different form/type than requested.
    TypeMismatch {
        /// What the caller asked for.
        expected: &'static str,
        /// The tag that was actually found.
        actual: Tag,
    },

    /// A typed accessor's requested element was not present.
    NotFound,

    /// A tag number was invalid for encoding (e.g. negative, conceptually).
    InvalidTagNumber,

    /// Input to a text codec (hex/base64) was empty when a non-empty value was required.
    EmptyInput,

    /// A hexadecimal or Base64 text payload could not be decoded.
    TextCodec(&'static str),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::BufferUnderflow => write!(f, "buffer underflow: source exhausted before required bytes were read"),
            ErrorKind::TagTooLong { len } => write!(f, "tag field exceeds the 10-byte implementation limit (read {len} bytes)"),
            ErrorKind::MalformedTag(reason) => write!(f, "malformed tag: {reason}"),
            ErrorKind::LengthOverflow => write!(f, "length exceeds 2^63 - 1"),
            ErrorKind::ReservedLengthForm => write!(f, "length byte 0xFF (n = 127) is reserved"),
            ErrorKind::MalformedEncoding(reason) => write!(f, "malformed encoding: {reason}"),
            ErrorKind::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {expected}, found {actual}")
            }
            ErrorKind::NotFound => write!(f, "requested element not found"),
            ErrorKind::InvalidTagNumber => write!(f, "invalid tag number"),
            ErrorKind::EmptyInput => write!(f, "unexpected empty input"),
            ErrorKind::TextCodec(reason) => write!(f, "text codec error: {reason}"),
        }
    }
}
