pub mod sanity;

pub use sanity::SanityClient;
