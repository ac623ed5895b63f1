mod check;
mod inspect;

pub use check::cmd_check;
pub use inspect::cmd_inspect;
