use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use glanz_config::Config;
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "DeutschGlanz";

/// Load the default config shipped in the repo, or built-in defaults without one
fn load_repo_default_config() -> anyhow::Result<Config> {
    let path = Path::new("config.json");
    if !path.exists() {
        tracing::info!("No repo config.json, using built-in defaults");
        return Ok(Config::default());
    }

    tracing::info!("Loading repo default config...");
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

fn glanz_root() -> anyhow::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| anyhow::anyhow!("No user config directory on this platform"))
}

fn profiles_dir() -> anyhow::Result<PathBuf> {
    Ok(glanz_root()?.join("profiles"))
}

/// Where the word library lives unless the profile or CLI says otherwise
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| anyhow::anyhow!("No user data directory on this platform"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

fn write_profile(path: &Path, name: &str, config: Config) -> anyhow::Result<()> {
    let profile = Profile {
        name: name.into(),
        value: config,
    };
    fs::write(path, serde_json::to_string_pretty(&profile)?)?;
    Ok(())
}

/// Create the profiles folder and seed the main profile if missing
pub fn init_user_config() -> anyhow::Result<()> {
    init_in(&profiles_dir()?)
}

fn init_in(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    let main_profile = dir.join("main.json");
    if !main_profile.exists() {
        write_profile(&main_profile, "main", load_repo_default_config()?)?;
        tracing::info!("Created main profile in {}", dir.display());
    }

    Ok(())
}

/// Load a user profile by name, falling back to main, then to the repo default
pub fn load_user_profile(name: &str) -> anyhow::Result<Config> {
    load_from(&profiles_dir()?, name)
}

fn load_from(dir: &Path, name: &str) -> anyhow::Result<Config> {
    let profile_file = dir.join(format!("{name}.json"));
    if profile_file.exists() {
        return read_profile(&profile_file);
    }

    tracing::warn!("Profile {name} not found, falling back to main profile or repo default");
    let main_file = dir.join("main.json");
    if main_file.exists() {
        read_profile(&main_file)
    } else {
        load_repo_default_config()
    }
}
