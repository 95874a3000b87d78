//! Evolution of the patrimoine as an SVG line chart

use std::io;

use svg::{
    node::element::{path::Data, Line, Path},
    Document,
};

use crate::lib::date::Date;

pub struct Plotter<'d> {
    data: &'d [(Date, f64)],
}

pub trait Scalar {
    fn to_scalar(&self) -> f64;
}

impl Scalar for f64 {
    fn to_scalar(&self) -> f64 {
        *self
    }
}

impl Scalar for Date {
    fn to_scalar(&self) -> f64 {
        self.index() as f64
    }
}

/// Smallest and largest scalars of an iterator, never an empty range
fn bounds<I>(values: I) -> (f64, f64)
where I: Iterator<Item = f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| (min.min(v), max.max(v)));
    if min > max {
        (0.0, 1.0)
    } else if min == max {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 700.0;
const STROKE_WIDTH: f64 = 2.0;
const MARGIN: f64 = 20.0;

impl<'d> Plotter<'d> {
    pub fn from(data: &'d [(Date, f64)]) -> Self {
        Self { data }
    }

    pub fn render(&self, file: &std::path::Path) -> io::Result<()> {
        svg::save(file, &self.document())
    }

    /// Values joined by a line, with the horizontal axis at zero when visible
    pub fn document(&self) -> Document {
        let (xmin, xmax) = bounds(self.data.iter().map(|(x, _)| x.to_scalar()));
        // zero is always part of the picture
        let (ymin, ymax) = bounds(self.data.iter().map(|(_, y)| y.to_scalar()).chain(std::iter::once(0.0)));
        let resize_x = |x: f64| (x - xmin) / (xmax - xmin) * WIDTH;
        let resize_y = |y: f64| (ymax - y) / (ymax - ymin) * HEIGHT;

        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", HEIGHT)
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", WIDTH)
            .set("y1", resize_y(0.0))
            .set("y2", resize_y(0.0))
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        let document = Document::new()
            .add(yaxis)
            .add(xaxis)
            .set("viewBox", (-MARGIN, -MARGIN, WIDTH + 2.0 * MARGIN, HEIGHT + 2.0 * MARGIN));

        let mut points = self.data.iter().map(|(x, y)| (resize_x(x.to_scalar()), resize_y(y.to_scalar())));
        let data = match points.next() {
            Some(first) => points.fold(Data::new().move_to(first), |data, pt| data.line_to(pt)),
            None => return document,
        };
        let curve = Path::new()
            .set("fill", "none")
            .set("stroke", "blue")
            .set("stroke-width", STROKE_WIDTH)
            .set("d", data);
        document.add(curve)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::date::Month::*;

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            Date::from($y, $m, $d).unwrap()
        }
    }

    #[test]
    fn scale() {
        assert_eq!(bounds(vec![3.0, -1.0, 2.0].into_iter()), (-1.0, 3.0));
        assert_eq!(bounds(vec![5.0].into_iter()), (4.0, 6.0));
        assert_eq!(bounds(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn curve() {
        let data = vec![
            (dt!(2024-Mar-3), 0.0),
            (dt!(2024-Apr-3), 600_000.0),
            (dt!(2024-May-3), 1_200_000.0),
        ];
        let svg = Plotter::from(&data).document().to_string();
        assert!(svg.contains("<path"));
        assert_eq!(svg.matches("<line").count(), 2);
    }

    #[test]
    fn nothing_to_draw() {
        let svg = Plotter::from(&[]).document().to_string();
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn saved() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("patrimoine.svg");
        let data = vec![(dt!(2024-Mar-3), 1.0), (dt!(2025-Mar-3), -1.0)];
        Plotter::from(&data).render(&file).unwrap();
        assert!(std::fs::read_to_string(&file).unwrap().contains("<svg"));
    }
}
