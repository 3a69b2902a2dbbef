//! Domain Layer
//!
//! Records as the REST API sends and receives them.
//! No HTTP here, only serde shapes and small accessors.

mod budget;
mod client;
mod dashboard;
mod entity;
mod material;
mod resource;

pub use budget::{Budget, BudgetPayload, FlatPart, OperationUsageWire, PartWire, ToolWire};
pub use client::{Client, ClientPayload};
pub use dashboard::{month_param, CategoryCounts, OperationHours};
pub use entity::{Entity, RecordId};
pub use material::{Material, MaterialPayload};
pub use resource::{Resource, ResourcePayload};
