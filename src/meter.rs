use {
    crate::usage::Usage,
    std::io::{self, Write},
};

/// a bargraph with one block per cpu core.
pub struct Meter<'a> {
    pub usage: &'a [Usage],
}

/// === impl Meter ===

impl Meter<'_> {
    /// block heights, from idle to fully busy.
    const BARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    /// drawn in place of a core whose usage is unknown or nonsensical.
    const ERROR: char = 'E';

    /// draws the meter, without a trailing newline.
    pub fn draw(&self, writer: &mut impl Write) -> io::Result<()> {
        let Self { usage } = self;

        let meter = usage.iter().copied().map(Self::glyph).collect::<String>();
        writer.write_all(meter.as_bytes())?;
        writer.flush()
    }

    /// returns the block for a single core.
    pub fn glyph(usage: Usage) -> char {
        match usage {
            Usage::Fraction(f) if (0.0..=1.0).contains(&f) => {
                let max = (Self::BARS.len() - 1) as f64;
                // round half up.
                let tile = (max * f + 0.5).floor() as usize;
                Self::BARS[tile]
            }
            Usage::Fraction(_) | Usage::Unknown => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(usage: &[Usage]) -> String {
        let mut out = Vec::new();
        Meter { usage }.draw(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_and_full() {
        assert_eq!(Meter::glyph(Usage::Fraction(0.0)), ' ');
        assert_eq!(Meter::glyph(Usage::Fraction(1.0)), '█');
    }

    #[test]
    fn errors() {
        assert_eq!(Meter::glyph(Usage::Unknown), 'E');
        assert_eq!(Meter::glyph(Usage::Fraction(-0.01)), 'E');
        assert_eq!(Meter::glyph(Usage::Fraction(1.01)), 'E');
        assert_eq!(Meter::glyph(Usage::Fraction(f64::NAN)), 'E');
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(Meter::glyph(Usage::Fraction(0.0625)), '▁');
        assert_eq!(Meter::glyph(Usage::Fraction(0.06)), ' ');
        assert_eq!(Meter::glyph(Usage::Fraction(0.5)), '▄');
        assert_eq!(Meter::glyph(Usage::Fraction(0.9375)), '█');
    }

    #[test]
    fn monotonic() {
        let index = |f: f64| {
            let glyph = Meter::glyph(Usage::Fraction(f));
            Meter::BARS.iter().position(|&bar| bar == glyph).unwrap()
        };
        let steps = (0..=1000).map(|i| f64::from(i) / 1000.0).collect::<Vec<_>>();
        for pair in steps.windows(2) {
            assert!(index(pair[0]) <= index(pair[1]), "{pair:?}");
        }
    }

    #[test]
    fn one_glyph_per_core() {
        let usage = [
            Usage::Fraction(1.0),
            Usage::Unknown,
            Usage::Fraction(0.0),
            Usage::Fraction(0.25),
        ];
        assert_eq!(draw(&usage), "█E ▂");
    }

    #[test]
    fn nothing_to_draw() {
        assert_eq!(draw(&[]), "");
    }
}
