pub mod profile;

pub use profile::{profile_completed, UserService};
