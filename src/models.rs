//! Page Models
//!
//! Static content shown by the widgets.

/// A venue card in the swiper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Venue {
    pub id: u32,
    pub name: &'static str,
    pub image: &'static str,
    pub date_text: &'static str,
    /// Filled stars out of five
    pub rating: u8,
    pub rating_text: &'static str,
    pub icons: (&'static str, &'static str),
    /// (latitude, longitude) when the venue can be placed on the map
    pub coords: Option<(f64, f64)>,
}

/// A playlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub name: &'static str,
    pub src: &'static str,
}

/// A portfolio project shown in the details modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub tags: &'static [&'static str],
    /// Markdown
    pub description: &'static str,
    pub link: Option<&'static str>,
}

/// Number of stars in a rating row
pub const RATING_SCALE: u8 = 5;

/// Star glyphs for a rating, filled first: (glyph, filled)
pub fn rating_stars(rating: u8) -> Vec<(&'static str, bool)> {
    (1..=RATING_SCALE)
        .map(|i| if i <= rating { ("★", true) } else { ("☆", false) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_stars() {
        let stars = rating_stars(3);
        assert_eq!(stars.len(), 5);
        assert_eq!(stars.iter().filter(|(_, filled)| *filled).count(), 3);
        assert_eq!(stars[2], ("★", true));
        assert_eq!(stars[3], ("☆", false));
    }

    #[test]
    fn test_rating_is_capped_at_scale() {
        assert!(rating_stars(9).iter().all(|(_, filled)| *filled));
        assert!(rating_stars(0).iter().all(|(_, filled)| !*filled));
    }
}
