//! Language breakdown computed from GitHub's per-language byte counts.

use crate::ModelError;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Share of the codebase per language, in percent of total bytes.
///
/// Percentages sum to 100.0 up to floating-point rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageUsage {
    percentages: BTreeMap<String, f64>,
    total_bytes: u64,
}

impl LanguageUsage {
    /// Build from raw byte counts.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] when the map is empty or every count
    /// is zero: there is no total to divide by, and NaN percentages are never
    /// handed out.
    #[track_caller]
    pub fn from_byte_counts(byte_counts: &BTreeMap<String, u64>) -> Result<Self, ModelError> {
        let total_bytes = byte_counts
            .values()
            .try_fold(0u64, |sum, bytes| sum.checked_add(*bytes))
            .ok_or_else(|| ModelError::validation("Language byte total overflows u64"))?;

        if total_bytes == 0 {
            return Err(ModelError::validation(format!(
                "Language byte total is zero ({} languages), percentages are undefined",
                byte_counts.len()
            )));
        }

        let percentages = byte_counts
            .iter()
            .map(|(language, bytes)| {
                let share = *bytes as f64 / total_bytes as f64 * 100.0;
                (language.clone(), share)
            })
            .collect();

        Ok(Self {
            percentages,
            total_bytes,
        })
    }

    pub fn percentage(&self, language: &str) -> Option<f64> {
        self.percentages.get(language).copied()
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn len(&self) -> usize {
        self.percentages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.percentages.is_empty()
    }

    /// Languages in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.percentages
            .iter()
            .map(|(language, share)| (language.as_str(), *share))
    }

    /// Largest share first; ties broken by name.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
