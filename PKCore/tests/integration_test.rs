use std::fs;
use std::path::Path;

use pkcore::texindex::cache::StartupOutcome;
use pkcore::texindex::gate::RebuildReason;
use pkcore::{AssetKind, GameContext, PluginConfig, TextureReplacer};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn write(root: &Path, relative: &str, bytes: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn config_for(root: &Path) -> PluginConfig {
    let mut config = PluginConfig::default();
    config.paths.textures_dir = Some(root.join("Textures"));
    config.paths.cache_dir = Some(root.join("Cache"));
    config
}

#[test]
fn test_restart_reuses_manifest() {
    let temp = tempdir().unwrap();
    write(temp.path(), "Textures/ui/t_title.png", b"title");
    write(temp.path(), "Textures/battle/fx_fire.png", b"fire");

    let mut first = TextureReplacer::new(config_for(temp.path())).unwrap();
    assert!(first.on_startup().is_rebuilt());

    let mut second = TextureReplacer::new(config_for(temp.path())).unwrap();
    assert_eq!(second.on_startup(), StartupOutcome::Valid);

    let replacement = second.replacement_for(AssetKind::UiSprite, "t_title (Instance)").unwrap();
    assert_eq!(replacement.bytes, b"title".to_vec());
}

#[test]
fn test_config_file_toggle_invalidates_manifest() {
    let temp = tempdir().unwrap();
    write(temp.path(), "Textures/battle/fx_fire.png", b"fire");
    let config_path = temp.path().join("config.toml");

    let config = config_for(temp.path());
    config.save(&config_path).unwrap();
    TextureReplacer::new(PluginConfig::load(&config_path).unwrap())
        .unwrap()
        .on_startup();

    let mut edited = PluginConfig::load(&config_path).unwrap();
    edited.textures.load_battle_textures = false;
    edited.save(&config_path).unwrap();

    let mut replacer = TextureReplacer::new(PluginConfig::load(&config_path).unwrap()).unwrap();
    assert_eq!(replacer.on_startup(), StartupOutcome::Rebuilt(RebuildReason::ConfigChanged));
    assert_eq!(replacer.replacement_for(AssetKind::Texture, "fx_fire"), None);
}

#[test]
fn test_game_switch_picks_up_new_files() {
    let temp = tempdir().unwrap();
    let mut replacer = TextureReplacer::new(config_for(temp.path())).unwrap();
    replacer.on_startup();

    write(temp.path(), "Textures/gsd2/t_map.png", b"map");
    assert_eq!(replacer.on_scene_loaded("GSD2_WorldMap"), Some(GameContext::Gsd2));
    assert!(replacer.replacement_for(AssetKind::Sprite, "t_map").is_some());
}
