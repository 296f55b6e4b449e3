pub mod inbox;

pub use inbox::{is_valid_email, ContactService};
