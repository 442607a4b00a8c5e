//! CLI command implementations

pub mod convert;
pub mod inspect;
pub mod json_output;
pub mod params;
pub mod validate;

mod reporting;

pub use convert::WavExport;
pub use params::ParamArgs;
