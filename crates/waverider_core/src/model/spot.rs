//! Static surf spot catalog shown on the spots view.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurfSpot {
    pub name: &'static str,
    pub description: &'static str,
}

const SPOT_CATALOG: &[SurfSpot] = &[
    SurfSpot {
        name: "Pipeline",
        description: "Legendary reef break in Hawaii",
    },
    SurfSpot {
        name: "Wedge",
        description: "Powerful shore break in Newport Beach",
    },
    SurfSpot {
        name: "Shark Island",
        description: "Heavy reef slab in Australia",
    },
];

pub fn spot_catalog() -> &'static [SurfSpot] {
    SPOT_CATALOG
}
