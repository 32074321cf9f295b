use bevy::prelude::AppExit;

fn main() -> AppExit {
    recoil_gunner::game::run()
}
