//! Importance gate
//!
//! A document is important when its own identity or its form's identity is
//! on a configured allow-list.

use std::collections::BTreeSet;

use crate::config::Settings;
use crate::models::Document;

/// Decides allow-list membership for documents
#[derive(Debug, Clone, Default)]
pub struct ImportanceClassifier {
    documents: BTreeSet<String>,
    forms: BTreeSet<String>,
}

impl ImportanceClassifier {
    pub fn new<D, F>(documents: D, forms: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            documents: documents.into_iter().map(Into::into).collect(),
            forms: forms.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the classifier from the configured allow-lists
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            documents: settings.important_documents.clone(),
            forms: settings.important_forms.clone(),
        }
    }

    pub fn is_important(&self, doc: &Document) -> bool {
        self.documents.contains(&doc.id) || self.forms.contains(&doc.form.id)
    }
}
