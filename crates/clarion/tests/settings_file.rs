//! Settings file round trips through the filesystem.

use clarion::{Config, ModelType, Parameter, Settings, SettingsError};
use tempfile::TempDir;

#[test]
fn save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("clarion.toml");

    let mut settings = Settings::new(ModelType::QuailSttS16);
    settings.license_key = Some("valid-key".to_string());
    settings.format = Some(Config::new(16_000, 1, 320));
    settings
        .parameters
        .insert("enhancement_level".to_string(), 0.25);
    settings.save(&path).unwrap();

    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);

    let model = loaded.create_model().unwrap();
    assert_eq!(model.model_type(), ModelType::QuailSttS16);
    assert_eq!(model.config().unwrap().num_frames, 320);
    assert_eq!(model.get_parameter(Parameter::EnhancementLevel), Ok(0.25));
}

#[test]
fn load_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Settings::load(&path).unwrap_err();
    assert!(matches!(err, SettingsError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn load_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "model = [").unwrap();
    assert!(matches!(
        Settings::load(&path),
        Err(SettingsError::TomlParse(_))
    ));
}

#[test]
fn unsupported_format_is_reported() {
    let mut settings = Settings::new(ModelType::QuailL8);
    settings.license_key = Some("valid-key".to_string());
    settings.format = Some(Config::new(4_000, 1, 80));
    let err = settings.create_model().unwrap_err();
    assert!(matches!(err, SettingsError::Model(e) if e.code() == clarion::ErrorCode::UnsupportedFormat));
}
