mod browse;
mod chat_cmds;
mod core;

pub use browse::cmd_browse;
pub use chat_cmds::cmd_chat;
pub use core::{cmd_collections, cmd_config, cmd_list, cmd_nav, NavRequest};
