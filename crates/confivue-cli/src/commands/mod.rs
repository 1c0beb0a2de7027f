pub mod init;
pub mod list_items;
pub mod serve;
pub mod simulate;
pub mod validate;
