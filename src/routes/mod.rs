mod health_check;
mod home;

pub use health_check::*;
pub use home::*;
