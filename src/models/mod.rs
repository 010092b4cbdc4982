mod activity;
mod filter;
mod lead;
mod segment;
mod view;

pub use activity::*;
pub use filter::*;
pub use lead::*;
pub use segment::*;
pub use view::*;
