#[allow(non_snake_case)]
pub mod Balancing;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Game;
#[allow(non_snake_case)]
pub mod Utils;
