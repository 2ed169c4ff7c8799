//! Audit record extraction
//!
//! Turns an important, in-window update event into zero, one or two typed
//! audit records. Each document is routed to exactly one rule: identity
//! rules are checked first, then form rules, then the fallback.

use tracing::debug;

use crate::config::{DocumentIds, FormIds, Settings};
use crate::error::{FieldError, TrailError, TrailResult};
use crate::models::{
    AuditRecord, Document, DocumentChange, LockState, LoginOutcome, RawEvent,
};

/// The extraction rule a document is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Session,
    LoginForm,
    UserForm,
    Patient,
    Review,
    Procedure,
    Video,
    Image,
    UserSettings,
    Fallback,
}

/// Derives audit records from change events
#[derive(Debug, Clone, Default)]
pub struct AuditRecordExtractor {
    documents: DocumentIds,
    forms: FormIds,
}

impl AuditRecordExtractor {
    pub fn new(documents: DocumentIds, forms: FormIds) -> Self {
        Self { documents, forms }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.documents.clone(), settings.forms.clone())
    }

    /// Pick the rule for a document
    pub fn rule_for(&self, doc: &Document) -> Rule {
        let form = doc.form.id.as_str();

        if doc.id == self.documents.instance_login {
            Rule::Session
        } else if form == self.forms.login {
            Rule::LoginForm
        } else if form == self.forms.user {
            Rule::UserForm
        } else if form == self.forms.patient {
            Rule::Patient
        } else if form == self.forms.review {
            Rule::Review
        } else if form == self.forms.procedure {
            Rule::Procedure
        } else if form == self.forms.video {
            Rule::Video
        } else if form == self.forms.image {
            Rule::Image
        } else if doc.id == self.documents.user_settings {
            Rule::UserSettings
        } else {
            Rule::Fallback
        }
    }

    /// Extract the audit records for one event
    ///
    /// Only update events produce records; any other explicit type yields an
    /// empty vector. A field the rule needs that is missing or mistyped
    /// yields [`TrailError::Extraction`] naming the event's path.
    pub fn extract(&self, event: &RawEvent) -> TrailResult<Vec<AuditRecord>> {
        if !event.is_update() {
            return Ok(Vec::new());
        }

        let rule = self.rule_for(event.document());
        debug!(path = %event.path.display(), ?rule, "extracting audit records");

        apply_rule(rule, event).map_err(|source| TrailError::Extraction {
            path: event.path.clone(),
            source,
        })
    }
}

fn apply_rule(rule: Rule, event: &RawEvent) -> Result<Vec<AuditRecord>, FieldError> {
    let doc = event.document();

    match rule {
        Rule::Session => session(doc).map(|record| vec![record]),
        Rule::LoginForm => login_form(doc).map(|record| record.into_iter().collect()),
        Rule::UserForm => user_form(doc, event),
        Rule::Patient => Ok(vec![AuditRecord::Patient(document_change(doc, event))]),
        Rule::Review => {
            let user = doc.reference("user")?;
            Ok(vec![AuditRecord::ProcedureReview {
                at: doc.modified.at.clone(),
                user_id: user.id,
                user_text: user.text,
            }])
        }
        Rule::Procedure => Ok(vec![AuditRecord::Procedure(document_change(doc, event))]),
        Rule::Video => Ok(vec![AuditRecord::Video(document_change(doc, event))]),
        Rule::Image => Ok(vec![AuditRecord::Image(document_change(doc, event))]),
        Rule::UserSettings => Ok(vec![AuditRecord::UserSettingsChange(document_change(
            doc, event,
        ))]),
        Rule::Fallback => Ok(vec![AuditRecord::Trace {
            at: doc.modified.at.clone(),
            path: event.path.display().to_string(),
            event_type: event.event_type().to_string(),
            form_text: doc.form.text.clone(),
        }]),
    }
}

/// Login or logout on the instance session document
///
/// An empty `currentUser.id` (absent or `""`) is a logout.
fn session(doc: &Document) -> Result<AuditRecord, FieldError> {
    let current_user = doc.reference("currentUser")?;
    let at = doc.modified.at.clone();

    if current_user.is_empty() {
        Ok(AuditRecord::Logout { at })
    } else {
        Ok(AuditRecord::Login {
            at,
            user_id: current_user.id,
            user_text: current_user.text,
        })
    }
}

/// Lockout overrides and failed attempts on a login-form document
///
/// Successful attempts without an override produce nothing.
fn login_form(doc: &Document) -> Result<Option<AuditRecord>, FieldError> {
    let user = doc.reference("user")?;
    let success = doc.bool_field("success")?;

    let lockout_override = if doc.is_initial() {
        false
    } else {
        doc.patch()?
            .is_some_and(|patch| patch.contains("lockoutOverride"))
    };

    let at = doc.modified.at.clone();

    if lockout_override {
        Ok(Some(AuditRecord::LoginUnlock {
            at,
            user_id: user.id,
            user_text: user.text,
        }))
    } else if !success {
        Ok(Some(AuditRecord::LoginAttempt {
            at,
            user_id: user.id,
            user_text: user.text,
            outcome: LoginOutcome::from_success(success),
        }))
    } else {
        Ok(None)
    }
}

/// New users, password changes and lock flips on a user-form document
fn user_form(doc: &Document, event: &RawEvent) -> Result<Vec<AuditRecord>, FieldError> {
    let Some(patch) = doc.patch()? else {
        return Ok(vec![AuditRecord::NewUser(document_change(doc, event))]);
    };

    if let Some(summary) = patch.summarize() {
        debug!(doc_id = %doc.id, changes = %summary, "user patch");
    }

    let mut records = Vec::new();
    let name = doc.text("name");

    if patch.contains("password") {
        records.push(AuditRecord::PasswordChange {
            at: doc.modified.at.clone(),
            doc_id: doc.id.clone(),
            name: name.clone(),
        });
    }

    if let Some(locked) = patch.after_bool("locked")? {
        records.push(AuditRecord::UserLockChange {
            at: doc.modified.at.clone(),
            doc_id: doc.id.clone(),
            name,
            new_state: LockState::from_locked(locked),
        });
    }

    Ok(records)
}

fn document_change(doc: &Document, event: &RawEvent) -> DocumentChange {
    DocumentChange {
        at: doc.modified.at.clone(),
        name: doc.text("name"),
        doc_id: doc.id.clone(),
        path: event.path.display().to_string(),
    }
}
