//! Unicode normalization for pre-tokenization.
//!
//! Optional normalization (NFC, NFD, NFKC, NFKD) applied before word
//! splitting. Training and tokenization must use the same form, so the
//! chosen form is part of the persisted model configuration.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Normalization form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationForm {
    /// Canonical composition
    Nfc,
    /// Canonical decomposition
    Nfd,
    /// Compatibility composition
    Nfkc,
    /// Compatibility decomposition
    Nfkd,
    /// No normalization
    #[default]
    None,
}

/// Unicode normalizer.
pub struct Normalizer {
    /// Normalization form to apply
    form: NormalizationForm,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }

    /// Create an NFC normalizer.
    pub fn nfc() -> Self {
        Self::new(NormalizationForm::Nfc)
    }

    /// The configured form.
    pub fn form(&self) -> NormalizationForm {
        self.form
    }

    /// Normalize text.
    pub fn normalize(&self, text: &str) -> String {
        match self.form {
            NormalizationForm::Nfc => text.nfc().collect(),
            NormalizationForm::Nfd => text.nfd().collect(),
            NormalizationForm::Nfkc => text.nfkc().collect(),
            NormalizationForm::Nfkd => text.nfkd().collect(),
            NormalizationForm::None => text.to_string(),
        }
    }

    /// Check if normalization is enabled.
    pub fn is_enabled(&self) -> bool {
        self.form != NormalizationForm::None
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizationForm::default())
    }
}
