pub mod mobs;
pub mod settings;

pub use mobs::MobStorage;
pub use settings::SettingsStorage;

use std::path::PathBuf;

pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .expect("Could not find data directory")
        .join("camptimer")
}

pub fn init_data_dir() -> crate::Result<PathBuf> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}
