pub mod cache;
pub mod calculator;
pub mod leaderboard;
pub mod sweep;
