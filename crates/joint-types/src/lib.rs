pub mod appearance;
pub mod limits;
pub mod params;

pub use appearance::*;
pub use limits::*;
pub use params::*;
