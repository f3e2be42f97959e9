pub mod forecast;
pub mod location;
pub mod recommendation;

pub use forecast::*;
pub use location::*;
pub use recommendation::*;
