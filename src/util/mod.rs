mod stats;

pub use stats::Stats;

pub type Colour = rgb::RGB<f32>;

pub const WHITE: Colour = Colour {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

/// Component-wise product of the two colours, models light passing through a colour filter.
pub fn tint(colour: Colour, filter: Colour) -> Colour {
    Colour::new(colour.r * filter.r, colour.g * filter.g, colour.b * filter.b)
}

/// Checks that every channel of the colour is within [0, 1].
pub fn is_unit_colour(colour: Colour) -> bool {
    [colour.r, colour.g, colour.b]
        .iter()
        .all(|c| (0.0..=1.0).contains(c))
}
