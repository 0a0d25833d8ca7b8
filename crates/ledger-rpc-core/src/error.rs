//! Error types for ledger-rpc.
//!
//! Every error an account operation can report to its caller is one variant
//! of [`LedgerError`]. On the wire they all share [`FAULT_CODE`]; the message
//! tells the causes apart.

/// Fault code carried by every fault the account service raises.
pub const FAULT_CODE: i32 = 1;

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur in account operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Malformed input; the store was not touched.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An account with this name already exists.
    #[error("Duplicate name: '{name}'")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// No account with this name exists.
    #[error("No such name: '{name}'")]
    NoSuchName {
        /// The name that was not found.
        name: String,
    },

    /// A credit write would make the balance negative.
    #[error("Credit value cannot be less than 0.")]
    NegativeCredit {
        /// The rejected value.
        value: i64,
    },

    /// The store failed while executing a statement.
    #[error("store error: {0}")]
    Store(String),
}

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Name is empty or contains non-letter characters.
    #[error("Name must be a non-empty alphabetic string: '{name}'")]
    NameNotAlphabetic {
        /// The rejected name.
        name: String,
    },

    /// Name exceeds the column width.
    #[error("Name cannot be longer than {max} characters.")]
    NameTooLong {
        /// Maximum allowed length in characters.
        max: usize,
    },

    /// Address exceeds the column width.
    #[error("Address cannot be longer than {max} characters.")]
    AddressTooLong {
        /// Maximum allowed length in characters.
        max: usize,
    },

    /// Credit is not an integer.
    #[error("Credit must be a number.")]
    CreditNotNumber {
        /// Rendering of the rejected value.
        value: String,
    },

    /// Credit does not fit the credit column.
    #[error("Credit value cannot be greater than {max}.")]
    CreditTooLarge {
        /// Maximum allowed credit.
        max: u32,
    },
}

/// Coarse classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Malformed name, address, or credit.
    Validation,
    /// Duplicate name on insert.
    Conflict,
    /// Operation referenced a missing account.
    NotFound,
    /// Negative credit.
    DomainRule,
    /// Store failure.
    Store,
}

impl LedgerError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        match self {
            Self::Validation(_) => FaultKind::Validation,
            Self::DuplicateName { .. } => FaultKind::Conflict,
            Self::NoSuchName { .. } => FaultKind::NotFound,
            Self::NegativeCredit { .. } => FaultKind::DomainRule,
            Self::Store(_) => FaultKind::Store,
        }
    }

    /// The wire-level fault code. Stable at [`FAULT_CODE`] for every variant.
    #[must_use]
    pub const fn fault_code(&self) -> i32 {
        FAULT_CODE
    }
}
