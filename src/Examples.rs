/// demo tasks run by the binary: parsing, validation, solver, store
pub mod balance_examples;
