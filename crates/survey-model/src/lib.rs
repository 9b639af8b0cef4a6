//! Survey schema model.
//!
//! Defines the validated shape of survey data: [`Column`] bounds and
//! nullability, the [`Schema`] that groups them with the organizational
//! column, and the [`OrgNode`] hierarchy path parsed from that column.

pub mod column;
pub mod error;
pub mod org_node;
pub mod schema;
pub mod util;

pub use column::{Column, ColumnType};
pub use error::{ModelError, Result};
pub use org_node::OrgNode;
pub use schema::{Schema, validate_schema};
pub use util::{duplicates, slice_unique};
