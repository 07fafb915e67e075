use std::sync::{Arc, Mutex};

use vs_window::{ConfigChange, ElementBox, Measurement, ViewportState, WindowOptions};
use vs_window_adapter::ScrollWindowController;

fn main() {
    // Example: autosized list switching to a tile grid.
    //
    // The measure callback stands in for reading the first rendered item and the container;
    // it reports nothing until the host has laid them out.
    let laid_out = Arc::new(Mutex::new(false));
    let probe = Arc::clone(&laid_out);
    let options = WindowOptions::autosized(move || {
        if !*probe.lock().unwrap() {
            return Measurement::default();
        }
        Measurement {
            sample: Some(ElementBox::new(180.0, 60.0)),
            container: ElementBox::new(800.0, 600.0),
        }
    });

    let mut c = ScrollWindowController::new(options).expect("valid options");
    let effect = c.start(ViewportState::new(0.0, 600.0), (0..500u32).collect::<Vec<_>>());
    println!("before measuring: {:?}", effect.range);

    let mut now_ms = 0;
    for _ in 0..3 {
        assert!(c.tick(now_ms).is_none());
        now_ms += 100;
    }
    *laid_out.lock().unwrap() = true;
    if let Some(effect) = c.tick(now_ms) {
        println!("measured: {:?} extent={}", effect.range, effect.extent);
    }

    let exit = c
        .on_config_changed(ConfigChange::Tile(true))
        .expect("valid change")
        .expect("tile switch re-renders");
    println!("exiting: {:?} scroll_to={:?}", exit.animation, exit.scroll_to);

    while c.is_transitioning() {
        now_ms += 16;
        if let Some(effect) = c.tick(now_ms) {
            println!(
                "t={now_ms} {:?} {:?} columns={} extent={}",
                effect.reason,
                effect.animation,
                c.layout().items_per_row,
                effect.extent
            );
        }
    }
}
