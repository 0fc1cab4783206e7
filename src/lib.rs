//! Shift rostering for the U-Engine ecosystem.
//!
//! Assigns employees to recurring shift slots over a multi-day horizon.
//! Plant closures are hard constraints; demand coverage, fairness,
//! anti-fatigue rules and an optional weekly rotation are soft penalties
//! minimised by a genetic algorithm.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Roster`, `ClosureCalendar`,
//!   `DemandProfile`, `RuleConfig`
//! - **`ga`**: Problem resolution, generation, evaluation, genetic
//!   operators and the generational runner
//! - **`scheduler`**: The `optimize` entry point, day-code projection, KPIs
//! - **`request`**: Lenient JSON request decoding and response bodies
//! - **`validation`**: Structural input checks
//!
//! # Quick Start
//!
//! ```
//! use u_roster::ga::GaConfig;
//! use u_roster::models::{DemandProfile, RuleConfig};
//! use u_roster::scheduler::{optimize, OptimizeInput};
//!
//! let input = OptimizeInput::new(14, ["Pagi", "Siang", "Malam"], ["A", "B", "C", "D", "E", "F"])
//!     .with_demand(DemandProfile::new().with("Pagi", 2).with("Siang", 2).with("Malam", 1))
//!     .with_rules(RuleConfig::new().with_closed_weekdays([6]))
//!     .with_ga(GaConfig::default().with_population_size(20).with_generations(10).with_seed(42));
//!
//! let result = optimize(&input).unwrap();
//! assert!(result.best_grid[6].iter().all(|cell| cell.is_empty()));
//! ```
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod error;
pub mod ga;
pub mod models;
pub mod request;
pub mod scheduler;
pub mod validation;

pub use error::RosterError;
