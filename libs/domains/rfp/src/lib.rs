//! RFP Domain
//!
//! Requests for proposal with an embedded equipment list.
//!
//! The equipment payload lives inside the RFP row as JSON, together
//! with a snapshot of the last computed totals. Totals arithmetic is
//! pure Decimal reduction in [`totals`], recomputed server-side on
//! every equipment replacement so the snapshot can never drift from
//! the line items.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod totals;

// Re-export commonly used types
pub use error::{RfpError, RfpResult};
pub use models::{
    CreateRfp, EquipmentLineItem, EquipmentTotals, LineItemKind, Rfp, RfpFilter, RfpStatus,
    SetEquipment, UpdateRfp,
};
pub use postgres::PgRfpRepository;
pub use repository::RfpRepository;
pub use service::RfpService;
