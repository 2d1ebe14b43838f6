//! Command implementations for the idoarc CLI.

pub mod add;
pub mod delete;
pub mod extract;
pub mod list;

pub use add::{AddOptions, cmd_add};
pub use delete::cmd_delete;
pub use extract::{ExtractOptions, cmd_extract};
pub use list::{ListOptions, cmd_list};
pub use test::cmd_test;
