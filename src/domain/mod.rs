//! Domain layer - eligibility model and signal interpretation.
//!
//! Pure types and functions: no I/O, no clocks, no logging. Remote
//! responses arrive here already decoded into the shapes of `wire`,
//! and leave as signals folded into an `EligibilityRecord`.

pub mod balance;
pub mod collection;
pub mod ownership;
pub mod participation;
pub mod record;
pub mod report;
pub mod routes;
pub mod sell_orders;
pub mod wire;

// Re-export core types for convenience
pub use collection::{
    Address, Collection, CollectionName, CollectionsError, ContractAddress, TrackedCollections,
};
pub use participation::{Participation, ParticipationRules};
pub use record::{EligibilityRecord, Registrant, Signal};
pub use report::{Report, ReportFormat};
pub use routes::ChainRoutes;
pub use sell_orders::{SellOrder, SellOrderIndex};
