//! Domain layer - Business records and abstractions
//!
//! Records, inputs, validation rules, the error taxonomy and the repository
//! contracts. Repositories are generic over SeaORM's `ConnectionTrait` so a
//! service can route them through a transaction; nothing else here touches
//! the ORM.

pub mod errors;
pub mod money;
pub mod repositories;
pub mod validation;

pub use errors::DomainError;
pub use money::Amount;
pub use repositories::*;
pub use validation::Validate;
