pub mod doctor;

pub use doctor::{slugify, DoctorService};
