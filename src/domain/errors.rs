use thiserror::Error;

/// Rejected order input. The order is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("quantity {0} is not one of the offered options")]
    UnknownQuantity(u32),
    #[error("flavor `{0}` is not on the menu")]
    UnknownFlavor(String),
    #[error("pickup date `{0}` is not one of the offered dates")]
    UnknownPickupDate(String),
}

pub type OrderResult<T> = Result<T, OrderError>;
