//! 업스트림 데이터 제공자.

pub mod fred;

pub use fred::FredClient;
