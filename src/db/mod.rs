//! Data access layer.
//!
//! Plain query functions over a `SqlitePool`, called from the route
//! handlers. Cascades run here as explicit statements inside transactions,
//! not as implicit FK side effects:
//!
//! - `categories`: category CRUD; deletion nulls dependent habit references
//! - `habits`: habit CRUD with filtered listing; deletion removes the
//!   habit's completions
//! - `completions`: completion log CRUD and date listing for the engine

pub mod categories;
pub mod completions;
pub mod habits;

pub use categories::*;
pub use completions::*;
pub use habits::*;
