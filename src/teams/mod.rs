//! Team rosters.
//!
//! A team always has between [`MIN_MEMBERS`] and [`MAX_MEMBERS`] students,
//! and every name and student field has content. [`TeamRoster`] is the only
//! way to change teams and refuses any change that would break either rule.
//!
//! [`MIN_MEMBERS`]: crate::validators::MIN_MEMBERS
//! [`MAX_MEMBERS`]: crate::validators::MAX_MEMBERS

mod roster;

pub use roster::TeamRoster;
