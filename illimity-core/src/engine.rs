//! Extraction facade: classify, then run the matching extractor.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::classify::{Classifier, NotificationShape};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::extract::{ExtractionResult, ShapeExtractor};
use crate::notification::RawNotification;

#[derive(Debug, Clone)]
pub struct NotificationEngine {
    classifier: Classifier,
    extractors: HashMap<NotificationShape, ShapeExtractor>,
}

impl NotificationEngine {
    /// Compile every pattern. Fails only if a built-in pattern is invalid.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let classifier = Classifier::new()?;
        let extractors = NotificationShape::ALL
            .iter()
            .map(|shape| Ok((*shape, ShapeExtractor::new(*shape, &config.cash_account_payee_id)?)))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self {
            classifier,
            extractors,
        })
    }

    pub fn classify(&self, raw: &RawNotification) -> Result<NotificationShape> {
        self.classifier.classify(raw)
    }

    /// Like [`extract`](Self::extract) but surfaces the failure.
    pub fn try_extract(&self, raw: &RawNotification) -> Result<ExtractionResult> {
        let shape = self.classify(raw)?;
        debug!(%shape, "classified notification");

        let extractor = self
            .extractors
            .get(&shape)
            .ok_or(EngineError::UnrecognizedShape)?;
        extractor.extract(raw)
    }

    /// Best effort: a notification that cannot be read yields an empty result
    /// so the rest of the batch keeps going.
    pub fn extract(&self, raw: &RawNotification) -> ExtractionResult {
        match self.try_extract(raw) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Error processing notification");
                ExtractionResult::default()
            }
        }
    }
}
