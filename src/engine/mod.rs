// Engine modules: asset loading, settings

pub mod assets;
pub mod settings;
