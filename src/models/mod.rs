pub mod advice;
pub mod forecast;
pub mod session;
pub mod weather;

pub use advice::*;
pub use forecast::*;
pub use session::*;
pub use weather::*;
