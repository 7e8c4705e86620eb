//! Core engines for the prospect simulator

pub mod tier_table;
pub mod disc;
pub mod emotion;
pub mod gate;
pub mod persona;
pub mod directive;
pub mod orchestrator;
pub mod snapshot;
pub mod turn_parser;
pub mod api;

pub use tier_table::{TierTable, TIER_TABLE};
pub use disc::DiscGenerator;
pub use emotion::EmotionEngine;
pub use gate::ObjectionGate;
pub use persona::build_profile;
pub use directive::{recommend_pace, recommend_tone};
pub use orchestrator::{CallSession, new_session_id};
pub use snapshot::{save_snapshot, load_snapshot, load_and_validate_snapshot, seal_snapshot, validate_envelope};
pub use turn_parser::TurnParser;
pub use api::{create_router, run_server};
