use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{SessionError, SessionResult};

/// The two write operations the scholarship contract exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxKind {
    Apply,
    Donate,
}

/// Lifecycle of a single submitted write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxState {
    Idle,
    Submitting,
    PendingConfirmation,
    Confirmed,
    Failed,
}

impl TxState {
    /// A submitted-but-unresolved write. At most one of these may exist.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, TxState::Submitting | TxState::PendingConfirmation)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TxState::Confirmed | TxState::Failed)
    }
}

/// Kind-specific form data, kept as the normalized strings the user
/// entered so the payload survives the whole lifecycle verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxPayload {
    Apply {
        name: String,
        age: String,
        course: String,
    },
    Donate {
        amount: String,
    },
}

impl TxPayload {
    pub fn kind(&self) -> TxKind {
        match self {
            TxPayload::Apply { .. } => TxKind::Apply,
            TxPayload::Donate { .. } => TxKind::Donate,
        }
    }

    /// Validate payload shape, collecting every offending field.
    ///
    /// Apply requires a non-empty name and course and an age that parses
    /// as a positive integer; Donate requires a positive decimal amount.
    pub fn validate(&self) -> SessionResult<()> {
        let mut bad_fields = Vec::new();
        match self {
            TxPayload::Apply { name, age, course } => {
                if name.trim().is_empty() {
                    bad_fields.push("name".to_string());
                }
                if !age.trim().parse::<u32>().map(|a| a > 0).unwrap_or(false) {
                    bad_fields.push("age".to_string());
                }
                if course.trim().is_empty() {
                    bad_fields.push("course".to_string());
                }
            }
            TxPayload::Donate { amount } => {
                let parsed = amount.trim().parse::<f64>();
                if !parsed.map(|a| a.is_finite() && a > 0.0).unwrap_or(false) {
                    bad_fields.push("amount".to_string());
                }
            }
        }
        if bad_fields.is_empty() {
            Ok(())
        } else {
            Err(SessionError::InvalidInput(bad_fields))
        }
    }

    /// Build the contract call description for this payload.
    ///
    /// The donation amount travels as the call's native-currency value,
    /// not as a method argument; the contract's donate method takes none.
    pub fn to_call_spec(&self, contract_address: &str) -> SessionResult<CallSpec> {
        self.validate()?;
        let spec = match self {
            TxPayload::Apply { name, age, course } => {
                let age: u32 = age
                    .trim()
                    .parse()
                    .map_err(|_| SessionError::InvalidInput(vec!["age".to_string()]))?;
                CallSpec {
                    contract: contract_address.to_string(),
                    method: "applyForScholarship".to_string(),
                    args: json!([name, age, course]),
                    value: None,
                }
            }
            TxPayload::Donate { amount } => CallSpec {
                contract: contract_address.to_string(),
                method: "donate".to_string(),
                args: json!([]),
                value: Some(amount.trim().to_string()),
            },
        };
        Ok(spec)
    }
}

/// Description of a contract write handed to the external signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSpec {
    pub contract: String,
    pub method: String,
    pub args: serde_json::Value,
    #[serde(default)]
    pub value: Option<String>,
}

/// Opaque reference to a submitted but not-yet-confirmed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHandle(pub String);

/// Network acknowledgment that a submitted write was finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub handle: TxHandle,
    pub confirmed_at: DateTime<Utc>,
}

/// The single write operation currently tracked for user feedback.
///
/// `Idle` with no kind means nothing is tracked; the record is
/// overwritten when a new action starts and cleared on dismiss.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub kind: Option<TxKind>,
    pub state: TxState,
    pub payload: Option<TxPayload>,
    pub error: Option<SessionError>,
    pub handle: Option<TxHandle>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Default for TransactionRecord {
    fn default() -> Self {
        Self {
            kind: None,
            state: TxState::Idle,
            payload: None,
            error: None,
            handle: None,
            submitted_at: None,
        }
    }
}

impl TransactionRecord {
    /// A fresh record entering `Submitting` for the given payload.
    pub fn started(payload: TxPayload) -> Self {
        Self {
            kind: Some(payload.kind()),
            state: TxState::Submitting,
            payload: Some(payload),
            error: None,
            handle: None,
            submitted_at: Some(Utc::now()),
        }
    }
}
