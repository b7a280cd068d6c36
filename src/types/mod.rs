//! Data types shared by the navigators, the grid controller and its hosts.

mod column;
mod key;
mod position;

pub use column::*;
pub use key::*;
pub use position::*;
