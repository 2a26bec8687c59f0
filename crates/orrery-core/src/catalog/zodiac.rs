use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZodiacSign {
    pub name: &'static str,
    pub symbol: &'static str,
    pub element: Element,
}

const fn sign(name: &'static str, symbol: &'static str, element: Element) -> ZodiacSign {
    ZodiacSign { name, symbol, element }
}

/// The twelve tropical signs, Aries first. Sign `i` spans longitudes `30i..30(i+1)`.
pub const SIGNS: [ZodiacSign; 12] = [
    sign("Aries", "♈", Element::Fire),
    sign("Taurus", "♉", Element::Earth),
    sign("Gemini", "♊", Element::Air),
    sign("Cancer", "♋", Element::Water),
    sign("Leo", "♌", Element::Fire),
    sign("Virgo", "♍", Element::Earth),
    sign("Libra", "♎", Element::Air),
    sign("Scorpio", "♏", Element::Water),
    sign("Sagittarius", "♐", Element::Fire),
    sign("Capricorn", "♑", Element::Earth),
    sign("Aquarius", "♒", Element::Air),
    sign("Pisces", "♓", Element::Water),
];

/// Longitude at the middle of sign `index`.
pub fn mid_sign_longitude(index: usize) -> f64 {
    (index % 12) as f64 * 30.0 + 15.0
}

/// The sign containing an ecliptic longitude.
pub fn sign_of(longitude_deg: f64) -> &'static ZodiacSign {
    let lon = longitude_deg.rem_euclid(360.0);
    &SIGNS[((lon / 30.0) as usize).min(11)]
}
