pub mod check;
pub mod config;
pub mod exercise;
pub mod history;
pub mod knowledge;
pub mod recovery;
pub mod reflect;
pub mod salah;
pub mod sound;
pub mod status;
pub mod study;
pub mod task;
pub mod theme;
pub mod watch;
