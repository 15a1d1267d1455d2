pub mod collusion;
pub(crate) mod health;
pub mod investor;
pub mod narrative;
pub mod vision;

pub use collusion::check_collusion;
pub use health::health_check;
pub use investor::signal_investor;
pub use narrative::narrate_health;
pub use vision::score_vision;
