//! Persistence Adapters - JSON File Input and Output
//!
//! Reads the registrant sheet export and writes the eligibility report
//! as an atomic JSON artifact. No database dependency.

pub mod report;
pub mod sheet;

pub use report::ReportStore;
pub use sheet::{SheetData, load_registrants};
