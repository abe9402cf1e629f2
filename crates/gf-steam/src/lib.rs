//! Steam property tables and Rankine cycle analysis.
//!
//! Saturated and superheated water tables are embedded in the crate and
//! interpolated linearly; states are resolved from pressure plus one
//! other property, and [`RankineCycle`] chains four state lookups into a
//! cycle efficiency.
//!
//! ```
//! use gf_steam::{PropertySpec, RankineCycle, SteamTables};
//!
//! let tables = SteamTables::embedded();
//! let vapor = tables.resolve(8000.0, PropertySpec::Quality(1.0)).unwrap();
//! assert!(vapor.h > 2700.0);
//!
//! let cycle = RankineCycle::with_superheat(8.0, 8000.0, 500.0);
//! let summary = cycle.evaluate(&tables).unwrap();
//! assert!(summary.efficiency_pct > 35.0);
//! ```

pub mod error;
pub mod rankine;
pub mod state;
pub mod tables;

pub use error::{SteamError, SteamResult};
pub use rankine::{CycleSummary, RankineCycle};
pub use state::{PropertySpec, Region, SteamState};
pub use tables::{SatPoint, SaturationTable, SteamTables, SuperheatTable};
