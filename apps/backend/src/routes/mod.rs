pub mod auth;
pub mod cards;
pub mod packs;
pub mod pinyin;
pub mod practice;
pub mod progress;
pub mod users;
pub mod words;
