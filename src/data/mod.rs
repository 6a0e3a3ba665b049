pub mod catalog;
pub mod whisper;
