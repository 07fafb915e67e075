use vs_window::{ViewportState, WindowOptions};
use vs_window_adapter::ScrollWindowController;

fn main() {
    // Example: a host forwarding every native scroll event, rendering once per frame.
    //
    // An adapter would:
    // - call queue_scroll from the scroll listener
    // - call tick(now_ms) from its frame callback
    // - patch the DOM/widget tree only when tick returns an effect
    let rows: Vec<String> = (0..10_000).map(|i| format!("row {i}")).collect();
    let mut c = ScrollWindowController::new(WindowOptions::fixed(32.0).with_excess(Some(6)))
        .expect("valid options");

    let first = c.start(ViewportState::new(0.0, 480.0), rows);
    println!("initial: {:?} extent={}", first.range, first.extent);

    let mut now_ms = 0u64;
    let mut position = 0.0;
    for frame in 0..20 {
        // Several scroll events land between two frames.
        for _ in 0..8 {
            position += 12.5;
            c.queue_scroll(position);
        }
        now_ms += 16;
        if let Some(effect) = c.tick(now_ms) {
            let entering: Vec<_> = effect.entering().collect();
            println!(
                "frame={frame} range={:?} first={:?} entering={entering:?}",
                effect.range,
                effect.items().first()
            );
        }
    }
    println!("coalesced scroll events: {}", c.coalesced_scrolls());
}
