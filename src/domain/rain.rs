//! Falling-glyph background field.
//!
//! The field is a grid of fading cells plus one cursor per column. Every
//! frame the whole grid fades a little, each column stamps a fresh glyph at
//! its cursor row and the cursor moves one row down. Columns that run off
//! the bottom restart at the top with a small probability so they drift out
//! of sync with each other.

use rand::Rng;

/// Glyphs the rain is drawn from.
pub const RAIN_GLYPHS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '1', '2', '3', '4', '5', '6', '7', '8', '9', '@',
    '#', '$', '%', '^', '&', '*', '(', ')',
];

/// Intensity below which a cell is treated as dark.
const VISIBILITY_FLOOR: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainSettings {
    /// Terminal cells per rain column.
    pub cell_width: u16,
    /// Fraction of intensity lost per frame.
    pub fade: f32,
    /// Chance per frame that an off-screen column restarts at the top.
    pub reset_chance: f64,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            cell_width: 2,
            fade: 0.04,
            reset_chance: 0.025,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RainCell {
    pub glyph: char,
    pub intensity: f32,
}

impl RainCell {
    pub fn is_lit(&self) -> bool {
        self.intensity > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RainField {
    width: u16,
    height: u16,
    settings: RainSettings,
    cursors: Vec<u16>,
    cells: Vec<RainCell>,
}

impl RainField {
    pub fn new<R: Rng + ?Sized>(
        width: u16,
        height: u16,
        settings: RainSettings,
        rng: &mut R,
    ) -> Self {
        let mut field = Self {
            width: 0,
            height: 0,
            settings,
            cursors: Vec::new(),
            cells: Vec::new(),
        };
        field.resize(width, height, rng);
        field
    }

    /// Rebuilds the field for a new surface size. Nothing from the previous
    /// size survives.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.width = width;
        self.height = height;

        let columns = column_count(width, self.settings.cell_width);
        self.cursors = (0..columns)
            .map(|_| if height == 0 { 0 } else { rng.gen_range(0..height) })
            .collect();
        self.cells = vec![RainCell::default(); usize::from(width) * usize::from(height)];
    }

    /// Advances the animation by one frame.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let retention = 1.0 - self.settings.fade;
        for cell in self.cells.iter_mut().filter(|cell| cell.is_lit()) {
            cell.intensity *= retention;
            if cell.intensity < VISIBILITY_FLOOR {
                *cell = RainCell::default();
            }
        }

        let cell_width = usize::from(self.settings.cell_width.max(1));
        for column in 0..self.cursors.len() {
            let glyph = RAIN_GLYPHS[rng.gen_range(0..RAIN_GLYPHS.len())];
            let row = self.cursors[column];

            if row < self.height {
                let x = column * cell_width;
                let index = usize::from(row) * usize::from(self.width) + x;
                if let Some(cell) = self.cells.get_mut(index) {
                    *cell = RainCell {
                        glyph,
                        intensity: 1.0,
                    };
                }
            }

            let cursor = &mut self.cursors[column];
            if *cursor >= self.height && rng.gen::<f64>() < self.settings.reset_chance {
                *cursor = 0;
            }
            *cursor = cursor.saturating_add(1);
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cursors(&self) -> &[u16] {
        &self.cursors
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&RainCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
    }
}

/// Number of rain columns that fit in `width` terminal cells.
pub fn column_count(width: u16, cell_width: u16) -> usize {
    usize::from(width / cell_width.max(1))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn column_count_is_floor_of_width_over_cell_width() {
        assert_eq!(column_count(80, 2), 40);
        assert_eq!(column_count(81, 2), 40);
        assert_eq!(column_count(1, 2), 0);
        assert_eq!(column_count(10, 0), 10);
    }

    #[test]
    fn new_field_seeds_cursors_within_height() {
        let field = RainField::new(40, 12, RainSettings::default(), &mut rng());

        assert_eq!(field.cursors().len(), 20);
        assert!(field.cursors().iter().all(|&row| row < 12));
    }

    #[test]
    fn resize_rebuilds_cursors_from_scratch() {
        let mut rng = rng();
        let mut field = RainField::new(40, 10, RainSettings::default(), &mut rng);
        for _ in 0..50 {
            field.step(&mut rng);
        }

        field.resize(17, 3, &mut rng);

        assert_eq!(field.cursors().len(), 8);
        assert!(field.cursors().iter().all(|&row| row < 3));
        assert!((0..17).all(|x| (0..3).all(|y| !field.cell(x, y).unwrap().is_lit())));
    }

    #[test]
    fn resize_to_many_sizes_tracks_column_count() {
        let mut rng = rng();
        let mut field = RainField::new(10, 10, RainSettings::default(), &mut rng);

        for (width, height) in [(0, 0), (1, 5), (99, 1), (200, 60), (3, 3)] {
            field.resize(width, height, &mut rng);
            assert_eq!(field.cursors().len(), usize::from(width / 2));
        }
    }

    #[test]
    fn step_stamps_glyph_at_cursor_and_advances() {
        let mut rng = rng();
        let mut field = RainField::new(4, 10, RainSettings::default(), &mut rng);
        let before = field.cursors().to_vec();

        field.step(&mut rng);

        for (column, &row) in before.iter().enumerate() {
            let cell = field.cell(column as u16 * 2, row).expect("cell on screen");
            assert_eq!(cell.intensity, 1.0);
            assert!(RAIN_GLYPHS.contains(&cell.glyph));
            assert_eq!(field.cursors()[column], row + 1);
        }
    }

    #[test]
    fn lit_cells_fade_and_eventually_go_dark() {
        let settings = RainSettings {
            cell_width: 1,
            fade: 0.5,
            reset_chance: 0.0,
        };
        let mut rng = rng();
        let mut field = RainField::new(1, 100, settings, &mut rng);
        let start = field.cursors()[0];

        field.step(&mut rng);
        field.step(&mut rng);
        assert_eq!(field.cell(0, start).unwrap().intensity, 0.5);

        for _ in 0..5 {
            field.step(&mut rng);
        }
        assert!(!field.cell(0, start).unwrap().is_lit());
    }

    #[test]
    fn off_screen_column_never_resets_without_chance() {
        let settings = RainSettings {
            cell_width: 1,
            fade: 0.04,
            reset_chance: 0.0,
        };
        let mut rng = rng();
        let mut field = RainField::new(1, 2, settings, &mut rng);

        for _ in 0..10 {
            field.step(&mut rng);
        }

        assert!(field.cursors()[0] > 2);
    }

    #[test]
    fn off_screen_column_resets_to_top_when_chance_is_certain() {
        let settings = RainSettings {
            cell_width: 1,
            fade: 0.04,
            reset_chance: 1.0,
        };
        let mut rng = rng();
        let mut field = RainField::new(1, 2, settings, &mut rng);

        for _ in 0..4 {
            field.step(&mut rng);
        }

        assert!(field.cursors()[0] <= 2);
    }

    #[test]
    fn cell_lookup_outside_surface_is_none() {
        let field = RainField::new(4, 4, RainSettings::default(), &mut rng());

        assert!(field.cell(4, 0).is_none());
        assert!(field.cell(0, 4).is_none());
    }
}
