#[allow(non_snake_case)]
pub mod Balancing;
#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Game;
#[allow(non_snake_case)]
pub mod Utils;

use Examples::balance_examples::balance_examples;
use Utils::logger::init_logger;

pub fn main() {
    //
    if let Err(e) = init_logger("info", None) {
        eprintln!("{}", e);
    }
    for task in 0..4 {
        if let Err(e) = balance_examples(task) {
            log::error!("example {} failed: {}", task, e);
        }
    }
}
