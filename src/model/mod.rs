pub mod daily;
pub mod employee;
pub mod period;
pub mod punch;
pub mod timebank;
