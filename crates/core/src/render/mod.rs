pub mod environment;
pub mod traits;
