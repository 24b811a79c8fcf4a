/// An RGB color in the chart palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Lowercase `rrggbb` form used in the report table.
    pub fn hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const PLOT_COLORS: [Rgb; 9] = [
    Rgb(0, 255, 0),
    Rgb(0, 0, 255),
    Rgb(255, 0, 0),
    Rgb(255, 200, 0),
    Rgb(0, 255, 255),
    Rgb(255, 0, 255),
    Rgb(255, 0, 137),
    Rgb(163, 143, 255),
    Rgb(76, 255, 153),
];

/// Picks series colors by their position within a chart, cycling through the palette.
#[derive(Debug, Clone, Copy)]
pub struct ColorAssigner<'a> {
    palette: &'a [Rgb],
}

impl<'a> ColorAssigner<'a> {
    pub fn new(palette: &'a [Rgb]) -> Self {
        Self { palette }
    }

    pub fn color(&self, position: usize) -> Rgb {
        self.palette[position % self.palette.len()]
    }
}

impl Default for ColorAssigner<'static> {
    fn default() -> Self {
        Self::new(&PLOT_COLORS)
    }
}
