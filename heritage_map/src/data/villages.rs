//! Static village registry for the Royal Bafokeng Nation.

use bevy::math::Vec3;

use crate::data::Village;

/// The 31 villages of the dataset, grouped by region in display order.
/// Loaded once at scene build time and never mutated.
pub const VILLAGES: &[Village] = &[
    // Capital region
    Village {
        id: "phokeng",
        name: "Phokeng",
        region: "CAPITAL",
        coordinates: Vec3::new(-5.0, 1.0, 15.0),
        history: "The administrative and cultural capital of the Royal Bafokeng Nation.",
        leadership: &["Kgosi Leruo Molotlegi"],
    },
    Village {
        id: "bobuomjwa",
        name: "Bobuomjwa",
        region: "CAPITAL",
        coordinates: Vec3::new(-2.0, 1.0, 18.0),
        history: "A key residential area near the capital.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "lefaragatlhe",
        name: "Lefaragatlhe",
        region: "CAPITAL",
        coordinates: Vec3::new(-8.0, 1.0, 20.0),
        history: "Historically significant village in the southern capital zone.",
        leadership: &["Headman Lefaragatlhe"],
    },
    // North region
    Village {
        id: "chaneng",
        name: "Chaneng",
        region: "NORTH",
        coordinates: Vec3::new(-22.0, 0.5, -15.0),
        history: "A major village in the northern mining belt.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "robega",
        name: "Robega",
        region: "NORTH",
        coordinates: Vec3::new(-20.0, 0.5, -12.0),
        history: "Vibrant community with strong ties to platinum mining.",
        leadership: &["Headman Robega"],
    },
    Village {
        id: "mafenya",
        name: "Mafenya",
        region: "NORTH",
        coordinates: Vec3::new(-28.0, 0.5, -10.0),
        history: "Border village near the Pilanesberg National Park.",
        leadership: &["Headman Mafenya"],
    },
    Village {
        id: "rasimone",
        name: "Rasimone",
        region: "NORTH",
        coordinates: Vec3::new(-24.0, 0.5, -5.0),
        history: "Home to some of the world's largest platinum reserves.",
        leadership: &["Rasimone Traditional Council"],
    },
    Village {
        id: "mogono",
        name: "Mogono",
        region: "NORTH",
        coordinates: Vec3::new(-10.0, 0.5, -2.0),
        history: "Central-northern hub for community services.",
        leadership: &["Headman Mogono"],
    },
    Village {
        id: "luka",
        name: "Luka",
        region: "NORTH",
        coordinates: Vec3::new(-8.0, 0.5, 5.0),
        history: "One of the largest and most industrial villages.",
        leadership: &["Headman Luka"],
    },
    Village {
        id: "roodekraalspruit",
        name: "Roodekraalspruit",
        region: "NORTH",
        coordinates: Vec3::new(-12.0, 0.5, -18.0),
        history: "Agricultural and mining transition zone.",
        leadership: &["Traditional Council"],
    },
    // North East region
    Village {
        id: "tantanana",
        name: "Tantanana",
        region: "NORTH EAST",
        coordinates: Vec3::new(15.0, 0.5, -25.0),
        history: "Key village in the North East region.",
        leadership: &["Headman Tantanana"],
    },
    Village {
        id: "maile_kopman",
        name: "Maile-Kopman",
        region: "NORTH EAST",
        coordinates: Vec3::new(10.0, 0.5, -20.0),
        history: "Gateway to the eastern Bafokeng lands.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "motsitle",
        name: "Motsitle",
        region: "NORTH EAST",
        coordinates: Vec3::new(18.0, 0.5, -18.0),
        history: "Residential hub for eastern region workers.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "diepkuil",
        name: "Diepkuil",
        region: "NORTH EAST",
        coordinates: Vec3::new(12.0, 0.5, -12.0),
        history: "Known for its unique topographical features.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "maile_ext",
        name: "Maile Ext",
        region: "NORTH EAST",
        coordinates: Vec3::new(20.0, 0.5, -10.0),
        history: "Expanding residential development.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "tsitsing",
        name: "Tsitsing",
        region: "NORTH EAST",
        coordinates: Vec3::new(14.0, 0.5, -5.0),
        history: "Growing economic center in the NE.",
        leadership: &["Headman Tsitsing"],
    },
    Village {
        id: "tlaseng",
        name: "Tlaseng",
        region: "NORTH EAST",
        coordinates: Vec3::new(22.0, 0.5, -5.0),
        history: "Strategic location for regional logistics.",
        leadership: &["Headman Tlaseng"],
    },
    Village {
        id: "mogojane",
        name: "Mogojane",
        region: "NORTH EAST",
        coordinates: Vec3::new(28.0, 0.5, 2.0),
        history: "Border community with vibrant local trade.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "lesung",
        name: "Lesung",
        region: "NORTH EAST",
        coordinates: Vec3::new(24.0, 0.5, 6.0),
        history: "Quiet residential area with rich cultural roots.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "serutube",
        name: "Serutube",
        region: "NORTH EAST",
        coordinates: Vec3::new(15.0, 0.5, 10.0),
        history: "Central hub connecting the East and West.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "mafika",
        name: "Mafika",
        region: "NORTH EAST",
        coordinates: Vec3::new(20.0, 0.5, 12.0),
        history: "Named after the stones that define its terrain.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "kanana",
        name: "Kanana",
        region: "NORTH EAST",
        coordinates: Vec3::new(12.0, 0.5, 18.0),
        history: "Vibrant youth and community programs.",
        leadership: &["Headman Kanana"],
    },
    // South East region
    Village {
        id: "marakana",
        name: "Marakana",
        region: "SOUTH EAST",
        coordinates: Vec3::new(32.0, 0.5, 15.0),
        history: "Vital community on the eastern edge.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "mabitse",
        name: "Mabitse",
        region: "SOUTH EAST",
        coordinates: Vec3::new(35.0, 0.5, 18.0),
        history: "Rich in traditional heritage.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "tlapa_east",
        name: "Tlapa East",
        region: "SOUTH EAST",
        coordinates: Vec3::new(40.0, 0.5, 22.0),
        history: "Transition zone to neighboring municipalities.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "tlapa",
        name: "Tlapa",
        region: "SOUTH EAST",
        coordinates: Vec3::new(38.0, 0.5, 25.0),
        history: "Stone-rich terrain with historical significance.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "leloreng",
        name: "Leloreng",
        region: "SOUTH EAST",
        coordinates: Vec3::new(35.0, 0.5, 28.0),
        history: "Known for its community spirit.",
        leadership: &["Traditional Council"],
    },
    Village {
        id: "thekwane",
        name: "Thekwane",
        region: "SOUTH EAST",
        coordinates: Vec3::new(30.0, 0.5, 32.0),
        history: "Southern boundary marker of Bafokeng land.",
        leadership: &["Headman Thekwane"],
    },
    Village {
        id: "mfidikwe",
        name: "Mfidikwe",
        region: "SOUTH EAST",
        coordinates: Vec3::new(22.0, 0.5, 30.0),
        history: "Expanding residential and service area.",
        leadership: &["Headman Mfidikwe"],
    },
    Village {
        id: "photsaneng",
        name: "Photsaneng",
        region: "SOUTH EAST",
        coordinates: Vec3::new(28.0, 0.5, 38.0),
        history: "Vibrant local economy and trade.",
        leadership: &["Headman Photsaneng"],
    },
    Village {
        id: "nkaneng",
        name: "Nkaneng",
        region: "SOUTH EAST",
        coordinates: Vec3::new(35.0, 0.5, 35.0),
        history: "Significant informal community integration area.",
        leadership: &["Traditional Council"],
    },
];

/// Looks up a village by its unique id.
pub fn village_by_id(id: &str) -> Option<&'static Village> {
    VILLAGES.iter().find(|v| v.id == id)
}

/// Region names in first-appearance order, for grouped display.
pub fn regions() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for v in VILLAGES {
        if !seen.contains(&v.region) {
            seen.push(v.region);
        }
    }
    seen
}
