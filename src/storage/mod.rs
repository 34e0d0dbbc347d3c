//! Local data model and storage
//!
//! - `context` - Tenant context sent with classification and chat requests
//! - `property` - Property records, the add-property input and inline patches
//! - `message` - Server-confirmed history records and classification verdicts
//! - `portfolio` - JSON persistence of the property list
//! - `seed` - Demo properties used when nothing is saved

pub mod context;
pub mod message;
pub mod portfolio;
pub mod property;
pub mod seed;

pub use context::Context;
pub use message::{
    recent_requests, Action, Category, ClassifyResult, HistoryMessage, Priority, Role, ThreadKey,
};
pub use portfolio::PortfolioFile;
pub use property::{NewProperty, Property, PropertyPatch};
pub use seed::demo_properties;
