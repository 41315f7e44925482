use std::fmt;
use std::sync::Arc;

use super::domain::ReceiptId;
use super::score;
use super::store::{PointsStore, StoreError};
use super::validate::{validate, RawReceipt, ValidationError};
use tracing::{debug, info};

/// Service composing the validator, scorer, and points store.
pub struct ReceiptService<S> {
    store: Arc<S>,
}

#[derive(Debug)]
pub enum ReceiptServiceError {
    /// The submission failed validation; surfaces to clients as a uniform
    /// invalid-input response with no per-field detail.
    InvalidInput(ValidationError),
    /// Lookup on an identifier no submission ever produced.
    NotFound,
}

impl fmt::Display for ReceiptServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptServiceError::InvalidInput(_) => write!(f, "Please verify input."),
            ReceiptServiceError::NotFound => write!(f, "No receipt found for that ID."),
        }
    }
}

impl std::error::Error for ReceiptServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReceiptServiceError::InvalidInput(err) => Some(err),
            ReceiptServiceError::NotFound => None,
        }
    }
}

impl From<StoreError> for ReceiptServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => Self::NotFound,
        }
    }
}

impl<S> ReceiptService<S>
where
    S: PointsStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate, score, and record a submission. Validation failures abort
    /// before anything reaches the store.
    pub fn submit(&self, raw: RawReceipt) -> Result<ReceiptId, ReceiptServiceError> {
        let receipt = validate(raw).map_err(|err| {
            debug!(%err, "rejected receipt submission");
            ReceiptServiceError::InvalidInput(err)
        })?;

        let points = score::score(&receipt);
        let id = self.store.put(points)?;
        info!(%id, points, retailer = %receipt.retailer, "scored receipt");
        Ok(id)
    }

    /// Fetch the points recorded for an earlier submission.
    pub fn lookup(&self, id: &ReceiptId) -> Result<u64, ReceiptServiceError> {
        Ok(self.store.get(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipts::store::InMemoryPointsStore;
    use crate::receipts::validate::RawLineItem;

    fn service() -> ReceiptService<InMemoryPointsStore> {
        ReceiptService::new(Arc::new(InMemoryPointsStore::default()))
    }

    fn target_submission() -> RawReceipt {
        RawReceipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: vec![
                RawLineItem {
                    short_description: "Emils Cheese Pizza".to_string(),
                    price: "12.25".to_string(),
                },
                RawLineItem {
                    short_description: "Klarbrunn 12-PK 12 FL OZ".to_string(),
                    price: "8.10".to_string(),
                },
            ],
            total: "35.35".to_string(),
        }
    }

    #[test]
    fn submit_then_lookup_round_trips_the_score() {
        let service = service();
        let id = service.submit(target_submission()).expect("valid receipt");
        assert_eq!(service.lookup(&id).expect("id known"), 22);
        // Lookup is repeatable.
        assert_eq!(service.lookup(&id).expect("id known"), 22);
    }

    #[test]
    fn invalid_submission_never_reaches_the_store() {
        let service = service();
        let mut raw = target_submission();
        raw.items.clear();
        let err = service.submit(raw).expect_err("empty items rejected");
        assert!(matches!(err, ReceiptServiceError::InvalidInput(_)));
    }

    #[test]
    fn lookup_of_unknown_identifier_is_not_found() {
        let service = service();
        let unknown = ReceiptId("1f7c1e8e-7f7e-4be7-9a3b-0d9f2e1c5ab0".to_string());
        assert!(matches!(
            service.lookup(&unknown),
            Err(ReceiptServiceError::NotFound)
        ));
    }
}
