//! Fuzz target: display line composition
//!
//! Builds a room from arbitrary bytes (name, temperature, humidity,
//! flags) and verifies:
//! - No panics for any float, including NaN and infinities
//! - Every composed line fits `DISPLAY_COLS` bytes
//!
//! cargo fuzz run fuzz_compose

#![no_main]

use libfuzzer_sys::fuzz_target;
use roomwatch::presentation::{compose, DISPLAY_COLS};
use roomwatch::rooms::Room;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }
    let temperature = f32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let humidity = f32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let flags = data[8];
    let name = String::from_utf8_lossy(&data[9..]);

    let mut room = Room::new(&name);
    room.temperature = temperature;
    room.humidity = humidity;
    room.cam_on = flags & 1 != 0;

    let frame = compose(&room, flags & 2 != 0);
    for line in frame.lines.iter() {
        assert!(line.len() <= DISPLAY_COLS);
    }
});
