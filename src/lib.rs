pub mod board;
pub mod error;
pub mod game;
pub mod judge;
pub mod lobby;
pub mod messages;
pub mod moves;
pub mod player;
pub mod reporting;
pub mod rules;
