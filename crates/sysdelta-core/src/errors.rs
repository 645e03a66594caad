use thiserror::Error;

/// Result type alias using DeltaError
pub type Result<T> = std::result::Result<T, DeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    /// Snapshot bytes are not valid UTF-8 JSON or do not match the snapshot schema
    InvalidSnapshot,
    /// Two entities share an identity that must be unique within a snapshot
    DuplicateEntity,

    // Reconciliation
    /// An internal reconciliation invariant does not hold; the delta is not produced
    InvariantViolation,

    // Integration
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::DuplicateEntity => "ERR_DUPLICATE_ENTITY",
            ExErrorKind::InvariantViolation => "ERR_INVARIANT_VIOLATION",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context describing where the failure happened.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    issue_key: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            issue_key: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (fully-qualified element name, module name, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add issue key context
    pub fn with_issue_key(mut self, key: impl Into<String>) -> Self {
        self.issue_key = Some(key.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the issue key context, if any
    pub fn issue_key(&self) -> Option<&str> {
        self.issue_key.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity: {})", entity_id)?;
        }
        if let Some(issue_key) = &self.issue_key {
            write!(f, " (issue_key: {})", issue_key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for snapshot loading and delta computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeltaError {
    // ===== Reconciliation invariants =====
    /// A bucket was created without any baseline or current issue
    #[error("Issue bucket for element {fq_name} and key {issue_key} is empty on both sides")]
    EmptyIssueBucket { fq_name: String, issue_key: String },

    /// An identity bucket was created without any baseline or current issue
    #[error("Identity bucket for issue {name} is empty on both sides")]
    EmptyIdentityBucket { name: String },

    /// A cycle participant changed count without being one-sided
    #[error(
        "Cycle membership of {fq_name} for key {issue_key} changed from {baseline} to {current} without being one-sided"
    )]
    MixedCycleMembership {
        fq_name: String,
        issue_key: String,
        baseline: usize,
        current: usize,
    },

    /// Duplicate-code participation was tracked under more than one issue key
    #[error("Expected at most one duplicate code issue key, found: {}", .keys.join(", "))]
    MultipleDuplicateCodeKeys { keys: Vec<String> },

    /// Only one side of a matched pair is a threshold violation
    #[error("Matched issues on {fq_name} for key {issue_key} disagree on being threshold violations")]
    MismatchedThresholdPair { fq_name: String, issue_key: String },

    // ===== Input Errors =====
    /// Snapshot could not be decoded
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// Module name appears twice in one snapshot
    #[error("Duplicate module in snapshot: {name}")]
    DuplicateModule { name: String },

    /// Delta options could not be parsed or are out of range
    #[error("Invalid delta options: {reason}")]
    InvalidOptions { reason: String },

    // ===== Integration Errors =====
    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<DeltaError> for ExError {
    fn from(err: DeltaError) -> Self {
        let message = err.to_string();
        match err {
            DeltaError::EmptyIssueBucket { fq_name, issue_key } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_entity_id(fq_name)
                    .with_issue_key(issue_key)
                    .with_message(message)
            }
            DeltaError::EmptyIdentityBucket { name } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_op("reconcile_identity")
                    .with_entity_id(name)
                    .with_message(message)
            }
            DeltaError::MixedCycleMembership {
                fq_name, issue_key, ..
            } => ExError::new(ExErrorKind::InvariantViolation)
                .with_op("reconcile_cycle_membership")
                .with_entity_id(fq_name)
                .with_issue_key(issue_key)
                .with_message(message),
            DeltaError::MultipleDuplicateCodeKeys { .. } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_op("reconcile_duplicate_code_membership")
                    .with_message(message)
            }
            DeltaError::MismatchedThresholdPair { fq_name, issue_key } => {
                ExError::new(ExErrorKind::InvariantViolation)
                    .with_op("process_matching_issue")
                    .with_entity_id(fq_name)
                    .with_issue_key(issue_key)
                    .with_message(message)
            }
            DeltaError::InvalidSnapshot { .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot).with_message(message)
            }
            DeltaError::DuplicateModule { name } => ExError::new(ExErrorKind::DuplicateEntity)
                .with_entity_id(name)
                .with_message(message),
            DeltaError::InvalidOptions { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            DeltaError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to DeltaError
impl From<serde_json::Error> for DeltaError {
    fn from(err: serde_json::Error) -> Self {
        DeltaError::Serialization {
            message: err.to_string(),
        }
    }
}
