pub use ports::*;
pub use run::*;

mod ports;
mod run;
