pub mod domain;
pub mod score;
pub mod service;
pub mod store;
pub mod validate;

pub use domain::{Cents, LineItem, Receipt, ReceiptId};
pub use score::{breakdown, score, Rule, RuleContribution, ScoreBreakdown};
pub use service::{ReceiptService, ReceiptServiceError};
pub use store::{InMemoryPointsStore, PointsStore, StoreError};
pub use validate::{validate, RawLineItem, RawReceipt, ValidationError};
