pub mod mob;
pub mod settings;

pub use mob::{CycleRecord, MobEntry, MobStatus, SpawnState};
pub use settings::Settings;
