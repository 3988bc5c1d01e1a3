//! Data structures shared across the db and route layers.
//!
//! - `category`: category entity and payloads
//! - `habit`: habit entity, frequency, create/patch payloads, list filters
//! - `completion`: completion entity, payloads, date-range filters

pub mod category;
pub mod completion;
pub mod habit;

pub use category::*;
pub use completion::*;
pub use habit::*;
