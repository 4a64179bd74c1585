use std::fmt;

use serde::Serialize;

/// Render bucket of a mesh region. The discriminants are the codes the surface shaders read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u8)]
pub enum SurfaceType {
    Wall = 0,
    Floor = 1,
    Ceiling = 2,
    Unknown = 3,
}

impl SurfaceType {
    pub const ALL: [SurfaceType; 4] = [
        SurfaceType::Wall,
        SurfaceType::Floor,
        SurfaceType::Ceiling,
        SurfaceType::Unknown,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SurfaceType::Wall => "wall",
            SurfaceType::Floor => "floor",
            SurfaceType::Ceiling => "ceiling",
            SurfaceType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
