mod demo;

use surface_rain_engine::engine::core::app_setup::create_app;

fn main() {
    println!("Surface rain demo: keys 1-5 switch colour presets, [ and ] change glyph density");

    let mut app = create_app();
    app.add_plugins(demo::DemoPlugin);
    app.run();
}
