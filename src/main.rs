use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;

use can_bully::config::{self, GameConfig};
use can_bully::constants::CONFIG_PATH;
use can_bully::game::GamePlugin;
use can_bully::graphics::GraphicsPlugin;
use can_bully::scene::SceneLibrary;

fn main() {
    let config: GameConfig = config::load_game_config(CONFIG_PATH);

    // Every scene and required node must be present before anything is shown.
    let library = match SceneLibrary::load(&config) {
        Ok(library) => {
            println!("✓ Loaded scene library from {}", config.asset_dir);
            library
        }
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Can Bully".into(),
                        resolution: WindowResolution::new(
                            config.window_width,
                            config.window_height,
                        ),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
                .set(AssetPlugin {
                    file_path: config.asset_dir.clone(),
                    ..Default::default()
                }),
        )
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(config)
        .insert_resource(library)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(GamePlugin)
        .add_plugins(GraphicsPlugin)
        .run();
}
