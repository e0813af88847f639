//! Name-and-type property mapping between plain data structs.
//!
//! A [`Mapper`] copies every property of a source value into the property of a
//! destination value that has the same name and the same declared type. Rules
//! adjust that default:
//!
//! - **Exclusions** skip a source property entirely.
//! - **Renames** send a source property to a differently named destination
//!   property.
//! - **Existing destinations** are populated in place instead of constructing a
//!   fresh `D::default()`.
//!
//! Properties that have no counterpart, or whose types differ, are skipped
//! silently. The only reported failures are malformed accessors at
//! configuration time.
//!
//! # Example
//!
//! ```
//! use propmap::{Mapper, Properties};
//!
//! #[derive(Default, Properties)]
//! struct Customer {
//!     name: String,
//!     balance: i64,
//!     secret: String,
//! }
//!
//! #[derive(Default, Properties)]
//! struct CustomerView {
//!     name: String,
//!     total: i64,
//!     secret: String,
//! }
//!
//! let customer = Customer {
//!     name: "Ada".into(),
//!     balance: 42,
//!     secret: "hunter2".into(),
//! };
//!
//! let mut mapper = Mapper::<Customer, CustomerView>::new()
//!     .exclude(Customer::SECRET)?
//!     .for_property(CustomerView::TOTAL)?
//!     .assign(Customer::BALANCE)?;
//!
//! let view = mapper.map(Some(&customer));
//! assert_eq!(view.name, "Ada");
//! assert_eq!(view.total, 42);
//! assert!(view.secret.is_empty());
//! # Ok::<(), propmap::MapError>(())
//! ```
//!
//! Accessors may also be written as strings, validated when the rule is
//! declared:
//!
//! ```
//! # use propmap::{Mapper, Properties};
//! # #[derive(Default, Properties)]
//! # struct Customer { balance: i64 }
//! # #[derive(Default, Properties)]
//! # struct CustomerView { total: i64 }
//! let mapper = Mapper::<Customer, CustomerView>::new()
//!     .for_property("|v| v.total")?
//!     .assign("c => c.balance")?;
//! assert_eq!(mapper.rename_target("balance"), Some("total"));
//!
//! let err = Mapper::<Customer, CustomerView>::new().exclude("|c| c.balance + 1");
//! assert!(err.is_err());
//! # Ok::<(), propmap::MapError>(())
//! ```

extern crate self as propmap;

/// Typed field handles and accessor expressions.
mod accessor;
/// Error types for mapper configuration.
mod error;
/// Rule accumulation and mapping execution.
mod mapper;
/// Declarative mapping rules loaded from TOML.
mod profile;
/// Per-type property tables.
mod property;

pub use accessor::{Accessor, Field};
pub use error::{MapError, Result};
pub use mapper::{Destination, MapReport, Mapper};
pub use profile::MappingProfile;
pub use property::{Properties, Property, PropertyValue};
pub use propmap_macros::Properties;
