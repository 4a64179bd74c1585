/// Raw per-face classification codes emitted by the scan source.
pub const LABEL_NONE: u8 = 0;
pub const LABEL_WALL: u8 = 1;
pub const LABEL_FLOOR: u8 = 2;
pub const LABEL_CEILING: u8 = 3;
pub const LABEL_TABLE: u8 = 4;
pub const LABEL_SEAT: u8 = 5;
pub const LABEL_WINDOW: u8 = 6;
pub const LABEL_DOOR: u8 = 7;

/// Number of known label codes. Anything at or above this reads as `LABEL_NONE`.
pub const LABEL_COUNT: usize = 8;

pub struct ClassInfo {
    pub id: u8,
    pub name: &'static str,
}

pub const CLASS_MAP: &[ClassInfo] = &[
    ClassInfo {
        id: LABEL_NONE,
        name: "none",
    },
    ClassInfo {
        id: LABEL_WALL,
        name: "wall",
    },
    ClassInfo {
        id: LABEL_FLOOR,
        name: "floor",
    },
    ClassInfo {
        id: LABEL_CEILING,
        name: "ceiling",
    },
    ClassInfo {
        id: LABEL_TABLE,
        name: "table",
    },
    ClassInfo {
        id: LABEL_SEAT,
        name: "seat",
    },
    ClassInfo {
        id: LABEL_WINDOW,
        name: "window",
    },
    ClassInfo {
        id: LABEL_DOOR,
        name: "door",
    },
];

pub fn get_label_name(id: u8) -> String {
    CLASS_MAP
        .iter()
        .find(|c| c.id == id)
        .map_or("unknown", |c| c.name)
        .to_string()
}
