use std::fmt;

/// A point in plot units, y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Line {
        from: Point,
        to: Point,
        stroke: &'static str,
        width: f64,
        dashed: bool,
    },
    QuadBezier {
        start: Point,
        control: Point,
        end: Point,
        stroke: &'static str,
    },
    Circle {
        center: Point,
        radius: f64,
        stroke: &'static str,
    },
    Marker {
        at: Point,
        fill: &'static str,
    },
}

/// Fixed-size plot with a y-up coordinate system, rendered as an SVG document.
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub elements: Vec<Element>,
    pub legend: Vec<(String, &'static str)>,
}

impl Canvas {
    pub fn new(width: f64, height: f64, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            width,
            height,
            x_range,
            y_range,
            elements: Vec::new(),
            legend: Vec::new(),
        }
    }

    /// Maps plot units to SVG pixel space.
    pub fn to_px(&self, p: Point) -> (f64, f64) {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        (
            (p.x - x0) / (x1 - x0) * self.width,
            (y1 - p.y) / (y1 - y0) * self.height,
        )
    }

    fn scale(&self) -> f64 {
        self.width / (self.x_range.1 - self.x_range.0)
    }

    /// Gridlines on every multiple of `step`, plus solid axes through the origin.
    pub fn grid(&mut self, step: f64) {
        debug_assert!(step > 0.0, "grid step must be positive");
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;

        let mut x = (x0 / step).ceil() * step;
        while x <= x1 {
            self.elements.push(Element::Line {
                from: Point::new(x, y0),
                to: Point::new(x, y1),
                stroke: "#dddddd",
                width: 1.0,
                dashed: false,
            });
            x += step;
        }
        let mut y = (y0 / step).ceil() * step;
        while y <= y1 {
            self.elements.push(Element::Line {
                from: Point::new(x0, y),
                to: Point::new(x1, y),
                stroke: "#dddddd",
                width: 1.0,
                dashed: false,
            });
            y += step;
        }

        self.line(Point::new(x0, 0.0), Point::new(x1, 0.0), "#888888", false);
        self.line(Point::new(0.0, y0), Point::new(0.0, y1), "#888888", false);
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: &'static str, dashed: bool) {
        self.elements.push(Element::Line {
            from,
            to,
            stroke,
            width: 1.5,
            dashed,
        });
    }

    pub fn quad_bezier(&mut self, start: Point, control: Point, end: Point, stroke: &'static str) {
        self.elements.push(Element::QuadBezier {
            start,
            control,
            end,
            stroke,
        });
    }

    pub fn circle(&mut self, center: Point, radius: f64, stroke: &'static str) {
        self.elements.push(Element::Circle {
            center,
            radius,
            stroke,
        });
    }

    pub fn marker(&mut self, at: Point, fill: &'static str) {
        self.elements.push(Element::Marker { at, fill });
    }

    pub fn legend_entry(&mut self, label: &str, colour: &'static str) {
        self.legend.push((label.to_string(), colour));
    }

    fn write_element(&self, f: &mut fmt::Formatter<'_>, element: &Element) -> fmt::Result {
        match *element {
            Element::Line {
                from,
                to,
                stroke,
                width,
                dashed,
            } => {
                let (x1, y1) = self.to_px(from);
                let (x2, y2) = self.to_px(to);
                let dash = if dashed { r#" stroke-dasharray="6 4""# } else { "" };
                writeln!(
                    f,
                    r#"  <line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{stroke}" stroke-width="{width}"{dash}/>"#
                )
            }
            Element::QuadBezier {
                start,
                control,
                end,
                stroke,
            } => {
                let (sx, sy) = self.to_px(start);
                let (cx, cy) = self.to_px(control);
                let (ex, ey) = self.to_px(end);
                writeln!(
                    f,
                    r#"  <path d="M {sx:.2} {sy:.2} Q {cx:.2} {cy:.2} {ex:.2} {ey:.2}" fill="none" stroke="{stroke}" stroke-width="2.5"/>"#
                )
            }
            Element::Circle {
                center,
                radius,
                stroke,
            } => {
                let (cx, cy) = self.to_px(center);
                let r = radius * self.scale();
                writeln!(
                    f,
                    r#"  <circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="none" stroke="{stroke}" stroke-width="1.5"/>"#
                )
            }
            Element::Marker { at, fill } => {
                let (cx, cy) = self.to_px(at);
                writeln!(
                    f,
                    r#"  <circle cx="{cx:.2}" cy="{cy:.2}" r="4" fill="{fill}"/>"#
                )
            }
        }
    }

    fn write_legend(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.legend.is_empty() {
            return Ok(());
        }

        let x = self.width - 150.0;
        let height = 20.0 * self.legend.len() as f64 + 10.0;
        writeln!(f, r#"  <g class="legend">"#)?;
        writeln!(
            f,
            r##"    <rect x="{x}" y="10" width="140" height="{height}" fill="white" stroke="#444444"/>"##
        )?;
        for (i, (label, colour)) in self.legend.iter().enumerate() {
            let y = 25.0 + 20.0 * i as f64;
            writeln!(
                f,
                r#"    <line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{colour}" stroke-width="2.5"/>"#,
                x + 8.0,
                x + 28.0
            )?;
            writeln!(
                f,
                r#"    <text x="{}" y="{}" font-family="sans-serif" font-size="12">{}</text>"#,
                x + 36.0,
                y + 4.0,
                escape(label)
            )?;
        }
        writeln!(f, "  </g>")
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(
            f,
            r#"  <rect width="{}" height="{}" fill="white"/>"#,
            self.width, self.height
        )?;
        for element in self.elements.iter() {
            self.write_element(f, element)?;
        }
        self.write_legend(f)?;
        writeln!(f, "</svg>")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
