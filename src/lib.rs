pub mod age;
pub mod describe;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod logs;
pub mod printers;
pub mod registry;
pub mod scanner;
pub mod show;
pub mod source;
