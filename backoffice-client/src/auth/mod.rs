//! Authentication

mod token;

pub use token::BearerToken;
pub use token::StaticTokenProvider;
pub use token::TokenProvider;
