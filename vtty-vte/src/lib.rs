mod actor;
mod enums;
mod parser;
mod transitions;
mod utf8;

pub use actor::Actor;
pub use parser::{MAX_PARAMETERS, PARAMETER_MAX, Parser};
