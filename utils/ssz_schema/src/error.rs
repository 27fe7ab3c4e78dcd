use core::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Location of a failing value, rendered as `BeaconBlockBody.attestations[3].aggregation_bits`.
#[derive(PartialEq, Eq, Clone, Default, Debug)]
pub struct FieldPath {
    // Innermost segment first. Errors are built at the leaf and grow as they bubble up.
    reversed: Vec<PathSegment>,
}

impl FieldPath {
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.reversed.iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.reversed.is_empty()
    }

    fn push_outer(&mut self, segment: PathSegment) {
        self.reversed.push(segment);
    }
}

impl Display for FieldPath {
    fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
        for (position, segment) in self.segments().enumerate() {
            match segment {
                PathSegment::Field(name) if position == 0 => write!(formatter, "{}", name)?,
                PathSegment::Field(name) => write!(formatter, ".{}", name)?,
                PathSegment::Index(index) => write!(formatter, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[derive(PartialEq, Eq, Clone, Debug, Error)]
pub enum SchemaError {
    #[error("container {container} has no fields")]
    EmptyContainer { container: String },
    #[error("container {container} declares field {field} more than once")]
    DuplicateField { container: String, field: String },
    #[error("container {container} has no field {field}")]
    UnknownField { container: String, field: String },
    #[error("{container}.{field}: bound {bound} cannot be resolved")]
    UnresolvedBound {
        container: String,
        field: String,
        bound: String,
    },
    #[error("{container}.{field}: container {referenced} is not defined")]
    UnresolvedContainer {
        container: String,
        field: String,
        referenced: String,
    },
    #[error("{container}.{field}: unsupported integer width of {width} bytes")]
    InvalidUintWidth {
        container: String,
        field: String,
        width: usize,
    },
    #[error("{container}.{field}: {shape} must have a non-zero length")]
    ZeroLength {
        container: String,
        field: String,
        shape: String,
    },
    #[error("{container}.{field}: {shape} is too large to be encoded or merkleized")]
    BoundNotRepresentable {
        container: String,
        field: String,
        shape: String,
    },
}

#[derive(PartialEq, Eq, Clone, Debug, Error)]
pub enum EncodeErrorKind {
    #[error("expected a value of type {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },
    #[error("container {container} has {expected} fields but the value has {count}")]
    FieldCountMismatch {
        container: String,
        count: usize,
        expected: usize,
    },
    #[error("{value} does not fit in {width} bytes")]
    UintOutOfRange { value: String, width: usize },
    #[error("expected exactly {expected} elements, found {count}")]
    LengthMismatch { count: usize, expected: usize },
    #[error("{count} elements exceed the maximum of {max}")]
    TooManyElements { count: usize, max: usize },
    #[error("offset {offset} does not fit in 4 bytes")]
    OffsetOverflow { offset: usize },
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct EncodeError {
    pub path: FieldPath,
    pub kind: EncodeErrorKind,
}

#[derive(PartialEq, Eq, Clone, Debug, Error)]
pub enum DecodeErrorKind {
    #[error("expected {expected} bytes, found {len}")]
    InvalidByteLength { len: usize, expected: usize },
    #[error("{len} bytes do not divide into elements of {element_len} bytes")]
    PartialElement { len: usize, element_len: usize },
    #[error("{count} elements exceed the maximum of {max}")]
    TooManyElements { count: usize, max: usize },
    #[error("expected exactly {expected} elements, found {count}")]
    ElementCountMismatch { count: usize, expected: usize },
    #[error("first offset is {offset}, expected {expected}")]
    FirstOffsetMismatch { offset: usize, expected: usize },
    #[error("offset {offset} is not a valid offset table length")]
    InvalidOffsetTable { offset: usize },
    #[error("offset {offset} precedes previous offset {previous}")]
    OffsetsDecreasing { previous: usize, offset: usize },
    #[error("offset {offset} is beyond the end of {len} bytes")]
    OffsetOutOfBounds { offset: usize, len: usize },
    #[error("bitlist is missing its delimiter bit")]
    MissingBitlistDelimiter,
    #[error("bitvector of {len} bits has non-zero padding bits")]
    NonZeroPadding { len: usize },
    #[error("{byte:#04x} is not a valid boolean")]
    InvalidBool { byte: u8 },
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DecodeError {
    pub path: FieldPath,
    pub kind: DecodeErrorKind,
}

/// Failure to read or write the human-readable representation.
#[derive(PartialEq, Eq, Clone, Debug, Error)]
pub enum JsonErrorKind {
    #[error("expected {expected}")]
    UnexpectedType { expected: String },
    #[error("missing field")]
    MissingField,
    #[error("{text:?} is not a decimal integer")]
    InvalidNumber { text: String },
    #[error("{text:?} is not 0x-prefixed hex")]
    InvalidHex { text: String },
    #[error(transparent)]
    Decode(DecodeErrorKind),
    #[error(transparent)]
    Encode(EncodeErrorKind),
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct JsonError {
    pub path: FieldPath,
    pub kind: JsonErrorKind,
}

impl From<DecodeError> for JsonError {
    fn from(error: DecodeError) -> Self {
        Self {
            path: error.path,
            kind: JsonErrorKind::Decode(error.kind),
        }
    }
}

impl From<EncodeError> for JsonError {
    fn from(error: EncodeError) -> Self {
        Self {
            path: error.path,
            kind: JsonErrorKind::Encode(error.kind),
        }
    }
}

macro_rules! impl_path_error {
    ($error: ident, $kind: ident) => {
        impl $error {
            pub(crate) fn within(mut self, segment: PathSegment) -> Self {
                self.path.push_outer(segment);
                self
            }

            pub(crate) fn within_field(self, name: &str) -> Self {
                self.within(PathSegment::Field(name.to_owned()))
            }

            pub(crate) fn within_index(self, index: usize) -> Self {
                self.within(PathSegment::Index(index))
            }
        }

        impl From<$kind> for $error {
            fn from(kind: $kind) -> Self {
                Self {
                    path: FieldPath::default(),
                    kind,
                }
            }
        }

        impl std::error::Error for $error {}

        impl Display for $error {
            fn fmt(&self, formatter: &mut Formatter) -> FmtResult {
                if self.path.is_empty() {
                    write!(formatter, "{}", self.kind)
                } else {
                    write!(formatter, "{}: {}", self.path, self.kind)
                }
            }
        }
    };
}

impl_path_error!(EncodeError, EncodeErrorKind);
impl_path_error!(DecodeError, DecodeErrorKind);
impl_path_error!(JsonError, JsonErrorKind);
