pub mod estimate;
pub mod gps;
pub mod metadata;
pub mod run;

pub use estimate::*;
pub use gps::*;
pub use metadata::*;
pub use run::*;
