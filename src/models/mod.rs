pub mod body;
pub mod observer;
pub mod position;
pub mod report;

pub use body::*;
pub use observer::*;
pub use position::*;
pub use report::*;
