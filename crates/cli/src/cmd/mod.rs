mod convert;
mod list;
mod validate;

pub use convert::{cmd_convert, cmd_convert_all};
pub use list::cmd_list;
pub use validate::cmd_validate;
