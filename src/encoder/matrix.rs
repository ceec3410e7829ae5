use qrcode::{Color, QrCode};

// Module matrix
//------------------------------------------------------------------------------

/// Square grid of modules as produced by the symbol encoder, row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    w: usize,
    modules: Box<[bool]>,
}

impl BitMatrix {
    pub fn from_code(code: &QrCode) -> Self {
        let w = code.width();
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();
        Self { w, modules }
    }

    /// Builds a matrix from rows of `#` (dark) and `.` (light).
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let w = rows.len();
        let modules = rows
            .iter()
            .flat_map(|r| {
                debug_assert_eq!(r.len(), w, "Matrix rows must be square");
                r.chars().map(|c| c == '#')
            })
            .collect();
        Self { w, modules }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    /// Whether the module at column `x`, row `y` is dark.
    pub fn get(&self, x: usize, y: usize) -> bool {
        debug_assert!(x < self.w && y < self.w, "Module ({x}, {y}) out of bounds");
        self.modules[y * self.w + x]
    }

    #[cfg(test)]
    fn count_dark_modules(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }

    pub fn iter_dark(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.modules.iter().enumerate().filter(|&(_, &m)| m).map(|(i, _)| (i % self.w, i / self.w))
    }

    pub fn to_str(&self, quiet_zone: usize) -> String {
        let total_sz = self.w + 2 * quiet_zone;

        let mut canvas = String::with_capacity(total_sz * (total_sz + 1));
        for y in 0..total_sz {
            for x in 0..total_sz {
                let inside = (quiet_zone..quiet_zone + self.w).contains(&x)
                    && (quiet_zone..quiet_zone + self.w).contains(&y);
                let dark = inside && self.get(x - quiet_zone, y - quiet_zone);
                canvas.push(if dark { ' ' } else { '█' });
            }
            canvas.push('\n');
        }
        canvas
    }
}
