use crate::models::error::WError;
use camino::Utf8Path;

pub struct Toml;

impl Toml {
    pub fn write<T: serde::Serialize>(path: &Utf8Path, data: &T) -> Result<(), WError> {
        let text = toml::to_string(data)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn read<T: serde::de::DeserializeOwned>(path: &Utf8Path) -> Result<T, WError> {
        let s = std::fs::read_to_string(path)?;
        Ok(toml::from_str::<T>(&s)?)
    }
}
