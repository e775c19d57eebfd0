//! Questlog - points, rewards, and ranks for everyday activities
//!
//! Users earn points by completing activities and spend them on rewards.
//! All-time points and the number of completed activities move a user up a
//! ladder of achievement ranks.
//!
//! State lives in four CSV files inside one data directory (see [`store`]).
//! Front-ends (the console menu in this crate, or anything else) drive a
//! [`Tracker`], which owns the [`Store`] and the active user.
//!
//! ```ignore
//! let mut tracker = Tracker::open("data", None)?;
//! let id = tracker.resolve_selection(CatalogKind::Activities, "Morning run").unwrap();
//! let completion = tracker.complete_activity(id)?;
//! if let Some(rank_up) = completion.rank_up() {
//!     println!("Now {}", rank_up.new_rank);
//! }
//! tracker.save_active_user()?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod session;
pub mod store;

pub use catalog::{Catalog, CatalogKind, Category};
pub use config::Config;
pub use error::{Result, TrackerError};
pub use models::{Activity, RecordId, Reward, Tier, User};
pub use session::{RecordFields, Tracker};
pub use store::Store;
