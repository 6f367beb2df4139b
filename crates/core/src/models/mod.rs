pub mod chart;
pub mod form;
pub mod settings;
pub mod summary;
pub mod transaction;
