//! The harvested population: users, the repositories they own, and their CSV form.
//!
//! Both the harvester and the table loader produce the same normalized records, so the
//! analytic questions never need to know where a [`Dataset`] came from.

mod normalize;
mod repository;
mod store;
mod tables;
mod tri_state;
mod user;

pub use normalize::{clean_company, format_timestamp, license_name, parse_count, parse_timestamp};
pub use repository::Repository;
pub use store::{Dataset, DatasetBuilder};
pub use tables::{
    REPOSITORIES_CSV, REPOSITORY_COLUMNS, USER_COLUMNS, USERS_CSV, read_repositories, read_users, write_repositories, write_users,
};
pub use tri_state::TriState;
pub use user::User;
