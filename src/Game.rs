/// read-only catalog of equations with hints and explanations
pub mod equations;
/// player statistics, currencies, preferences
pub mod player;
/// injected state container for progress and preferences with a JSON file behind it
pub mod progress_store;
