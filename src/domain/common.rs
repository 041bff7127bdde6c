use super::transaction::{TransactionId, TransactionKind};

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &TransactionId;
}

/// Magnitude and direction of a monetary entry.
pub trait Amounted {
    /// Non-negative magnitude in currency units.
    fn amount(&self) -> f64;

    fn kind(&self) -> TransactionKind;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
