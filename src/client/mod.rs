pub mod behavior;
pub mod dig_order;
pub mod patrol;
pub mod runner;
pub mod sim;
pub mod state;
