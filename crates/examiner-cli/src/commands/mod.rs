pub mod init;
pub mod list;
pub mod show;
pub mod simulate;
pub mod take;
pub mod validate;
