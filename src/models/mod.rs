//! Record types for the four tracked collections

mod activity;
mod flag;
mod id;
mod input;
mod reward;
mod tier;
mod user;

pub use activity::Activity;
pub use flag::parse_flag;
pub use id::RecordId;
pub use input::{parse_positive, require_name};
pub use reward::Reward;
pub use tier::Tier;
pub use user::User;

pub(crate) use flag::bool_text;
