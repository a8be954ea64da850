//! Static Content Tables

use crate::models::{Project, Track, Venue};

pub const VENUES: &[Venue] = &[
    Venue {
        id: 1,
        name: "Cooksoo",
        image: "https://i3.photo.2gis.com/images/branch/0/30258560050575435_fc96.jpg",
        date_text: "APRIL 4-6",
        rating: 5,
        rating_text: "Рамен.",
        icons: ("🍜", "🥢"),
        coords: Some((43.2383, 76.9456)),
    },
    Venue {
        id: 2,
        name: "Kentucky Fried Chicken",
        image: "https://i2.photo.2gis.com/images/branch/0/30258560173723753_65ee.jpg",
        date_text: "APRIL 4-6",
        rating: 4,
        rating_text: "Excellent view and food!",
        icons: ("🍗", "🍟"),
        coords: Some((43.2565, 76.9284)),
    },
    Venue {
        id: 3,
        name: "Бублик",
        image: "https://i6.photo.2gis.com/photo-gallery/13966df8-9536-4929-b361-018e85081478.jpg",
        date_text: "APRIL 4-6",
        rating: 3,
        rating_text: "Comfy seats, good popcorn.",
        icons: ("🥐", "🍪"),
        coords: Some((43.2410, 76.9570)),
    },
    Venue {
        id: 4,
        name: "Papa Johns",
        image: "https://i8.photo.2gis.com/images/branch/112/15762598728857306_c4f2.jpg",
        date_text: "April 4-6",
        rating: 4,
        rating_text: "Nice trails, relaxing.",
        icons: ("🍕", "🍦"),
        coords: None,
    },
];

pub const TRACKS: &[Track] = &[
    Track { name: "Neon Lights (Synthwave)", src: "assets/music/track1.mp3" },
    Track { name: "Deep Focus (Lo-Fi)", src: "assets/music/track2.mp3" },
    Track { name: "Code Flow (Ambient)", src: "assets/music/track3.mp3" },
    Track { name: "Kybernetica (Electronic)", src: "assets/music/track4.mp3" },
    Track { name: "Digital Nomad (Beat)", src: "assets/music/track5.mp3" },
];

pub const PROJECTS: &[Project] = &[
    Project {
        id: "venue-finder",
        title: "Venue Finder",
        tags: &["Rust", "WebAssembly", "Leaflet"],
        description: "Swipeable venue cards with a synced map.\n\n\
            - Drag or swipe between venues\n\
            - Map marker follows the active card",
        link: Some("https://example.com/venue-finder"),
    },
    Project {
        id: "event-countdown",
        title: "Event Countdown",
        tags: &["Rust", "chrono"],
        description: "Counts down to a chosen date and **remembers it** between visits.",
        link: Some("https://example.com/countdown"),
    },
    Project {
        id: "legacy-chronicle",
        title: "Legacy Chronicle",
        tags: &["Scroll", "Video"],
        description: "A pinned section that cross-fades three scenes as you scroll, \
            closing in with vignette bars for the finale.",
        link: None,
    },
];

/// Project by id
pub fn find_project(projects: &'static [Project], id: &str) -> Option<&'static Project> {
    projects.iter().find(|p| p.id == id)
}
