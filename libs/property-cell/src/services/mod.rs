pub mod listing;

pub use listing::PropertyService;
