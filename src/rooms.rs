//! Room registry.
//!
//! A fixed set of rooms created once at start-up.  The registry owns the
//! per-room readings and the main cycle's view of which room is selected.
//! The selection itself is driven by [`Navigation`](crate::shared::Navigation)
//! (written from interrupt context); the main cycle copies it in with
//! [`RoomRegistry::select`] at the top of every cycle.

use heapless::String;

use crate::sensors::Reading;

/// Number of monitored rooms.
pub const ROOM_COUNT: usize = 4;

/// Capacity of a room name in bytes.
pub const ROOM_NAME_CAP: usize = 16;

pub type RoomName = String<ROOM_NAME_CAP>;

pub const DEFAULT_ROOM_NAMES: [&str; ROOM_COUNT] = ["Living Room", "Kitchen", "Bedroom", "Garage"];

/// Build a room name, truncating on a character boundary if `s` does not fit.
pub fn room_name(s: &str) -> RoomName {
    let mut name = RoomName::new();
    for c in s.chars() {
        if name.push(c).is_err() {
            break;
        }
    }
    name
}

/// One monitored location.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub name: RoomName,
    pub temperature: f32,
    pub humidity: f32,
    /// Derived by the alarm policy every cycle.
    pub cam_on: bool,
}

impl Room {
    pub fn new(name: &str) -> Self {
        Self {
            name: room_name(name),
            temperature: 0.0,
            humidity: 0.0,
            cam_on: false,
        }
    }

    /// Store a fresh scaled reading.
    pub fn apply(&mut self, reading: Reading) {
        self.temperature = reading.temperature;
        self.humidity = reading.humidity_pct;
    }
}

pub struct RoomRegistry {
    rooms: [Room; ROOM_COUNT],
    selected: usize,
}

impl RoomRegistry {
    pub fn new(names: &[RoomName; ROOM_COUNT]) -> Self {
        Self {
            rooms: core::array::from_fn(|i| Room::new(names[i].as_str())),
            selected: 0,
        }
    }

    pub fn with_default_names() -> Self {
        Self::new(&DEFAULT_ROOM_NAMES.map(room_name))
    }

    /// Number of rooms (fixed).
    pub const fn len(&self) -> usize {
        ROOM_COUNT
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Select a room, clamping `index` to the last room.  Returns the
    /// index actually stored.
    pub fn select(&mut self, index: usize) -> usize {
        self.selected = index.min(ROOM_COUNT - 1);
        self.selected
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> &Room {
        &self.rooms[self.selected]
    }

    pub fn current_mut(&mut self) -> &mut Room {
        &mut self.rooms[self.selected]
    }

    pub fn get(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }
}
