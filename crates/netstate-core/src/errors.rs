use thiserror::Error;

/// Result type alias using NetStateError
pub type Result<T> = std::result::Result<T, NetStateError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and the CLI) can match
/// on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NsErrorKind {
    /// An address or prefix literal could not be canonicalized
    MalformedAddress,
    /// A caller broke an engine contract (e.g. comparing values of different kinds)
    ContractViolation,
    /// Outer-surface input (goal file, category name) is invalid
    InvalidInput,

    // Outer surfaces
    Io,
    Serialization,
}

impl NsErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            NsErrorKind::MalformedAddress => "ERR_MALFORMED_ADDRESS",
            NsErrorKind::ContractViolation => "ERR_CONTRACT_VIOLATION",
            NsErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            NsErrorKind::Io => "ERR_IO",
            NsErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// about where the failure happened.
#[derive(Debug, Clone)]
pub struct NsError {
    kind: NsErrorKind,
    op: Option<String>,
    category: Option<String>,
    input: Option<String>,
    message: String,
    source: Option<Box<NsError>>,
}

impl NsError {
    /// Create a new error with the specified kind
    pub fn new(kind: NsErrorKind) -> Self {
        Self {
            kind,
            op: None,
            category: None,
            input: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add state category context
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add the offending input text
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: NsError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> NsErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&NsError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for NsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(category) = &self.category {
            write!(f, " (category: {})", category)?;
        }
        if let Some(input) = &self.input {
            write!(f, " (input: {:?})", input)?;
        }
        Ok(())
    }
}

impl std::error::Error for NsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for netstate operations
///
/// Domain parsers never produce these: unparseable device text degrades to an
/// empty record sequence instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetStateError {
    /// Input is not a syntactically valid IPv4 or IPv6 literal
    #[error("Malformed address {input:?}: {reason}")]
    MalformedAddress { input: String, reason: String },

    /// Prefix length outside the range allowed for the address family
    #[error("Prefix length {length} out of range for {input:?} (max {max})")]
    PrefixLengthOutOfRange { input: String, length: i64, max: u8 },

    /// The structural comparator was given two values of different kinds
    #[error("Cannot compare {left} with {right}")]
    KindMismatch {
        left: &'static str,
        right: &'static str,
    },

    /// Invalid input handed to an outer surface
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl From<NetStateError> for NsError {
    fn from(err: NetStateError) -> Self {
        match err {
            NetStateError::MalformedAddress { input, reason } => {
                NsError::new(NsErrorKind::MalformedAddress)
                    .with_op("canonicalize")
                    .with_input(input)
                    .with_message(reason)
            }

            NetStateError::PrefixLengthOutOfRange { input, length, max } => {
                NsError::new(NsErrorKind::MalformedAddress)
                    .with_op("canonicalize_prefix")
                    .with_input(input)
                    .with_message(format!("prefix length {} out of range 0..={}", length, max))
            }

            NetStateError::KindMismatch { left, right } => {
                NsError::new(NsErrorKind::ContractViolation)
                    .with_op("compare")
                    .with_message(format!("cannot order {} against {}", left, right))
            }

            NetStateError::InvalidInput { reason } => {
                NsError::new(NsErrorKind::InvalidInput).with_message(reason)
            }
        }
    }
}
