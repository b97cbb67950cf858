pub mod models;
pub mod pickup;
pub mod pricing;
pub mod summary;
pub mod errors;

pub use models::*;
pub use pickup::*;
pub use pricing::*;
pub use summary::*;
pub use errors::*;
