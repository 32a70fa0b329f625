//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the scanner's workflows. Each resolver is a self-contained
//! lookup; the scanner composes them per address.
//!
//! Use cases:
//! - `EligibilityScanner`: Main per-address aggregation loop
//! - `SellOrderIndexBuilder`: One bulk marketplace read per run
//! - `OwnershipResolver`: Live NFT holdings (contracts or catalog)
//! - `BalanceResolver`: Native token balance
//! - `ParticipationResolver`: Exchange and vault activity
//! - `BatchPacer`: Fixed pauses between address batches

pub mod balance;
pub mod ownership;
pub mod pacer;
pub mod participation;
pub mod scanner;
pub mod sell_order_index;

#[cfg(test)]
pub(crate) mod test_support;

pub use scanner::{EligibilityScanner, OwnershipSource, ScanOutcome, ScanSettings, ScanSummary};
pub use sell_order_index::ScanError;
