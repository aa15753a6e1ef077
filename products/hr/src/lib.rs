//! HR vertical slice: the employee roster and the queries answered over it.

mod employee;
pub mod roster;
mod store;

pub use employee::Employee;
pub use roster::{RosterError, demo_roster};
pub use store::EmployeeStore;
