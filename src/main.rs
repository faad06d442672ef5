use bevy::prelude::*;

fn main() -> AppExit {
    App::new().add_plugins(game::AppPlugin).run()
}
