//! Audit record data structures
//!
//! Defines the typed records the extractor produces, one variant per kind,
//! each carrying its own payload.

use serde::Serialize;
use std::fmt;

/// Outcome of a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginOutcome {
    Success,
    Failed,
}

impl LoginOutcome {
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoginOutcome::Success => "SUCCESS",
            LoginOutcome::Failed => "FAILED",
        }
    }
}

/// Lock state of a user account after a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    pub fn from_locked(locked: bool) -> Self {
        if locked {
            Self::Locked
        } else {
            Self::Unlocked
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LockState::Locked => "LOCKED",
            LockState::Unlocked => "UNLOCKED",
        }
    }
}

/// Kind tag of an audit record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    Login,
    Logout,
    LoginUnlock,
    LoginAttempt,
    NewUser,
    PasswordChange,
    UserLockChange,
    Patient,
    Procedure,
    Video,
    Image,
    ProcedureReview,
    UserSettingsChange,
    Trace,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Login => "LOGIN",
            RecordKind::Logout => "LOGOUT",
            RecordKind::LoginUnlock => "LOGIN_UNLOCK",
            RecordKind::LoginAttempt => "LOGIN_ATTEMPT",
            RecordKind::NewUser => "NEW_USER",
            RecordKind::PasswordChange => "PASSWORD_CHANGE",
            RecordKind::UserLockChange => "USER_LOCK_CHANGE",
            RecordKind::Patient => "PATIENT",
            RecordKind::Procedure => "PROCEDURE",
            RecordKind::Video => "VIDEO",
            RecordKind::Image => "IMAGE",
            RecordKind::ProcedureReview => "PROCEDURE_REVIEW",
            RecordKind::UserSettingsChange => "USER_SETTINGS_CHANGE",
            RecordKind::Trace => "TRACE",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload shared by records describing a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChange {
    pub at: String,
    pub name: String,
    pub doc_id: String,
    pub path: String,
}

/// A single audit record
///
/// Immutable once built; consumed once by a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "kind",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum AuditRecord {
    Login {
        at: String,
        user_id: String,
        user_text: String,
    },
    Logout {
        at: String,
    },
    LoginUnlock {
        at: String,
        user_id: String,
        user_text: String,
    },
    LoginAttempt {
        at: String,
        user_id: String,
        user_text: String,
        outcome: LoginOutcome,
    },
    NewUser(DocumentChange),
    PasswordChange {
        at: String,
        doc_id: String,
        name: String,
    },
    UserLockChange {
        at: String,
        doc_id: String,
        name: String,
        new_state: LockState,
    },
    Patient(DocumentChange),
    Procedure(DocumentChange),
    Video(DocumentChange),
    Image(DocumentChange),
    ProcedureReview {
        at: String,
        user_id: String,
        user_text: String,
    },
    UserSettingsChange(DocumentChange),
    Trace {
        at: String,
        path: String,
        #[serde(rename = "type")]
        event_type: String,
        form_text: String,
    },
}

impl AuditRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AuditRecord::Login { .. } => RecordKind::Login,
            AuditRecord::Logout { .. } => RecordKind::Logout,
            AuditRecord::LoginUnlock { .. } => RecordKind::LoginUnlock,
            AuditRecord::LoginAttempt { .. } => RecordKind::LoginAttempt,
            AuditRecord::NewUser(_) => RecordKind::NewUser,
            AuditRecord::PasswordChange { .. } => RecordKind::PasswordChange,
            AuditRecord::UserLockChange { .. } => RecordKind::UserLockChange,
            AuditRecord::Patient(_) => RecordKind::Patient,
            AuditRecord::Procedure(_) => RecordKind::Procedure,
            AuditRecord::Video(_) => RecordKind::Video,
            AuditRecord::Image(_) => RecordKind::Image,
            AuditRecord::ProcedureReview { .. } => RecordKind::ProcedureReview,
            AuditRecord::UserSettingsChange(_) => RecordKind::UserSettingsChange,
            AuditRecord::Trace { .. } => RecordKind::Trace,
        }
    }

    /// Timestamp of the change the record describes
    pub fn at(&self) -> &str {
        match self {
            AuditRecord::Login { at, .. }
            | AuditRecord::Logout { at }
            | AuditRecord::LoginUnlock { at, .. }
            | AuditRecord::LoginAttempt { at, .. }
            | AuditRecord::PasswordChange { at, .. }
            | AuditRecord::UserLockChange { at, .. }
            | AuditRecord::ProcedureReview { at, .. }
            | AuditRecord::Trace { at, .. } => at,
            AuditRecord::NewUser(change)
            | AuditRecord::Patient(change)
            | AuditRecord::Procedure(change)
            | AuditRecord::Video(change)
            | AuditRecord::Image(change)
            | AuditRecord::UserSettingsChange(change) => &change.at,
        }
    }

    /// Kind-specific fields in output order, excluding the timestamp
    pub fn fields(&self) -> Vec<&str> {
        match self {
            AuditRecord::Login {
                user_id, user_text, ..
            }
            | AuditRecord::LoginUnlock {
                user_id, user_text, ..
            }
            | AuditRecord::ProcedureReview {
                user_id, user_text, ..
            } => vec![user_id.as_str(), user_text.as_str()],
            AuditRecord::Logout { .. } => Vec::new(),
            AuditRecord::LoginAttempt {
                user_id,
                user_text,
                outcome,
                ..
            } => vec![user_id.as_str(), user_text.as_str(), outcome.as_str()],
            AuditRecord::PasswordChange { doc_id, name, .. } => {
                vec![doc_id.as_str(), name.as_str()]
            }
            AuditRecord::UserLockChange {
                doc_id,
                name,
                new_state,
                ..
            } => vec![doc_id.as_str(), name.as_str(), new_state.as_str()],
            AuditRecord::NewUser(change)
            | AuditRecord::Patient(change)
            | AuditRecord::Procedure(change)
            | AuditRecord::Video(change)
            | AuditRecord::Image(change)
            | AuditRecord::UserSettingsChange(change) => {
                vec![change.name.as_str(), change.doc_id.as_str(), change.path.as_str()]
            }
            AuditRecord::Trace {
                path,
                event_type,
                form_text,
                ..
            } => vec![path.as_str(), event_type.as_str(), form_text.as_str()],
        }
    }
}
