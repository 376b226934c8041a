//! Domain model shared by the grid builder, constraint scheduler,
//! repository layer, and API surface.

mod assignment;
mod constants;
mod hour_slot;
mod prediction;
mod preference;
mod staff;

pub use assignment::*;
pub use constants::*;
pub use hour_slot::HourSlot;
pub use prediction::*;
pub use preference::*;
pub use staff::*;
