//! Computation core behind the listing-price dashboard: outlier filtering,
//! per-neighbourhood aggregation and the descriptive statistics the charts
//! are drawn from. Everything in here is synchronous and pure: one user
//! selection maps to one [`report::build_city_report`] call.

pub mod aggregate;
pub mod math;
pub mod outlier;
pub mod report;

pub use aggregate::aggregate;
pub use outlier::{filter_listings, outlier_mask, DEFAULT_NEIGHBOURS};
pub use report::build_city_report;
