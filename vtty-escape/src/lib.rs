mod actor;
mod charset;
mod color;
mod control;
mod csi;
mod esc;
mod mode;
mod osc;
mod parser;
mod sgr;
mod utf8;
mod vt52;

pub use actor::{Action, Actor};
pub use charset::{Charset, CharsetIndex, ShiftSlot};
pub use color::{Color, Rgb};
pub use mode::{
    ClearMode, LineClearMode, LineDimensions, Mode, NamedMode,
    NamedPrivateMode, PrivateMode, TabClearMode,
};
pub use parser::Parser;
pub use sgr::CharacterAttribute;
pub use vtty_vte as vte;
