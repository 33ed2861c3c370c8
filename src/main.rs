//! Demo entry point: a ticking watch you can orbit around.

use glam::Vec3;
use log::warn;

use horloge::assets;
use horloge::controls::Orbit;
use horloge::{Background, Clock, Object, Scene, Window};

const FALLBACK_BACKGROUND: horloge::Color = 0xCCCCCC;

fn main() -> horloge::Result<()> {
    env_logger::init();

    let mut scene = Scene::new();
    scene.background = Background::Color(FALLBACK_BACKGROUND);

    // The clock captures the local UTC offset, so build it before the
    // texture loader threads start.
    let clock = Clock::new(&mut scene)?;

    let camera = scene.perspective_camera(75.0, 0.1..1000.0);
    camera.set_position(Vec3::new(0.0, 0.0, 5.0));
    scene.add(&camera);

    let mut controls = Orbit::builder(&camera)
        .position(Vec3::new(0.0, 0.0, 5.0))
        .target(Vec3::ZERO)
        .build();

    let mut background_slot = Some(assets::load_texture("textures/background.png"));
    let mut back_slot = Some(assets::load_texture("textures/watch_back.png"));

    let window = Window::builder("horloge").dimensions(1024, 768).build();
    window.run(scene, camera, move |scene, input| {
        assets::poll_slot(&mut background_slot, |result| match result {
            Ok(texture) => scene.background = Background::Texture(texture),
            Err(err) => {
                warn!("background texture unavailable ({}), keeping flat color", err);
                scene.background = Background::Color(FALLBACK_BACKGROUND);
            }
        });
        assets::poll_slot(&mut back_slot, |result| match result {
            Ok(texture) => clock.set_back_texture(texture),
            Err(err) => {
                warn!("case back texture unavailable ({}), keeping plain case", err);
                clock.apply_back_fallback();
            }
        });

        clock.tick();
        controls.update(input);
    })
}
