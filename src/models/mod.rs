//! Rostering domain models.
//!
//! Provides the data types that describe a rostering problem and its
//! solution. Independent of the search algorithm: the GA in [`crate::ga`]
//! consumes and produces these types.
//!
//! # Domain Mappings
//!
//! | u-roster | Factory | Hospital | Retail |
//! |----------|---------|----------|--------|
//! | Shift | Pagi/Siang/Malam | Early/Late/Night | Open/Close |
//! | Employee | Operator | Nurse | Clerk |
//! | Closed day | Plant shutdown | Ward closure | Store holiday |
//! | Roster | Production shift plan | Duty roster | Staff rota |

mod calendar;
mod demand;
mod roster;
mod rules;

pub use calendar::{ClosureCalendar, DAYS_PER_WEEK};
pub use demand::DemandProfile;
pub use roster::{EmployeeId, Roster};
pub use rules::{RosterMode, RuleConfig, DEFAULT_MORNING_SHIFT, DEFAULT_NIGHT_SHIFT};
