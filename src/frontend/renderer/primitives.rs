use std::f64::consts::{FRAC_PI_2, PI, TAU};

use plotters::element::{DynElement, IntoDynElement};
use plotters::prelude::*;
use plotters::style::RGBColor;
use rand::Rng;

use crate::backend::client::{Client, SliceIndex};
use crate::backend::station::Coverage;

use super::{Pixel, PlottersUnit};


/// Matplotlib's `'0.8'` gray, used for clients without a base station.
pub const UNCONNECTED_COLOR: RGBColor = RGBColor(204, 204, 204);

pub const MARKERS: [MarkerShape; 16] = [
    MarkerShape::Circle,
    MarkerShape::Square,
    MarkerShape::Pentagon,
    MarkerShape::PlusFilled,
    MarkerShape::Star,
    MarkerShape::Hexagon,
    MarkerShape::XFilled,
    MarkerShape::Diamond,
    MarkerShape::TriangleDown,
    MarkerShape::TriangleUp,
    MarkerShape::TriangleLeft,
    MarkerShape::TriangleRight,
    MarkerShape::TriDown,
    MarkerShape::TriUp,
    MarkerShape::TriLeft,
    MarkerShape::TriRight,
];

const COVERAGE_SEGMENTS: usize = 90;
const COVERAGE_STROKE_WIDTH: u32 = 2;
const COVERAGE_ALPHA: f64 = 0.9;

const CIRCLE_VERTICES: usize = 16;
const STAR_INNER_RADIUS: PlottersUnit = 0.4;
const PLUS_ARM_HALF_WIDTH: PlottersUnit = 1.0 / 3.0;
const TRI_STROKE_WIDTH: u32 = 1;

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;


pub type PixelOffset = (i32, i32);

type Vertex = (PlottersUnit, PlottersUnit);


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerShape {
    Circle,
    Square,
    Pentagon,
    PlusFilled,
    Star,
    Hexagon,
    XFilled,
    Diamond,
    TriangleDown,
    TriangleUp,
    TriangleLeft,
    TriangleRight,
    TriDown,
    TriUp,
    TriLeft,
    TriRight,
}

impl MarkerShape {
    #[must_use]
    pub fn for_slice(subscribed_slice_index: SliceIndex) -> Self {
        MARKERS[subscribed_slice_index % MARKERS.len()]
    }

    /// Matplotlib symbol of the shape.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Circle        => 'o',
            Self::Square        => 's',
            Self::Pentagon      => 'p',
            Self::PlusFilled    => 'P',
            Self::Star          => '*',
            Self::Hexagon       => 'H',
            Self::XFilled       => 'X',
            Self::Diamond       => 'D',
            Self::TriangleDown  => 'v',
            Self::TriangleUp    => '^',
            Self::TriangleLeft  => '<',
            Self::TriangleRight => '>',
            Self::TriDown       => '1',
            Self::TriUp         => '2',
            Self::TriLeft       => '3',
            Self::TriRight      => '4',
        }
    }

    /// Tri markers are three strokes from the center, everything else is a
    /// filled polygon.
    #[must_use]
    pub fn is_filled(self) -> bool {
        !matches!(
            self,
            Self::TriDown | Self::TriUp | Self::TriLeft | Self::TriRight
        )
    }

    /// Pixel offsets from the marker center. For filled shapes this is the
    /// polygon outline, for tri markers the stroke path.
    #[must_use]
    pub fn outline(self, radius: Pixel) -> Vec<PixelOffset> {
        let radius = PlottersUnit::from(radius);

        let vertices = match self {
            Self::Circle        => regular_polygon(CIRCLE_VERTICES, radius, 0.0),
            Self::Square        => regular_polygon(4, radius, PI / 4.0),
            Self::Pentagon      => regular_polygon(5, radius, FRAC_PI_2),
            Self::PlusFilled    => plus(radius, 0.0),
            Self::Star          => star(radius),
            Self::Hexagon       => regular_polygon(6, radius, 0.0),
            Self::XFilled       => plus(radius, PI / 4.0),
            Self::Diamond       => regular_polygon(4, radius, FRAC_PI_2),
            Self::TriangleDown  => regular_polygon(3, radius, -FRAC_PI_2),
            Self::TriangleUp    => regular_polygon(3, radius, FRAC_PI_2),
            Self::TriangleLeft  => regular_polygon(3, radius, PI),
            Self::TriangleRight => regular_polygon(3, radius, 0.0),
            Self::TriDown       => tri(radius, -FRAC_PI_2),
            Self::TriUp         => tri(radius, FRAC_PI_2),
            Self::TriLeft       => tri(radius, PI),
            Self::TriRight      => tri(radius, 0.0),
        };

        vertices.into_iter().map(to_pixel_offset).collect()
    }
}

fn regular_polygon(
    vertex_count: usize,
    radius: PlottersUnit,
    rotation: PlottersUnit
) -> Vec<Vertex> {
    (0..vertex_count)
        .map(|i| polar(radius, rotation + TAU * i as PlottersUnit
            / vertex_count as PlottersUnit))
        .collect()
}

fn star(radius: PlottersUnit) -> Vec<Vertex> {
    (0..10)
        .map(|i| {
            let vertex_radius = if i % 2 == 0 {
                radius
            } else {
                radius * STAR_INNER_RADIUS
            };

            polar(vertex_radius, FRAC_PI_2 + PI * PlottersUnit::from(i) / 5.0)
        })
        .collect()
}

fn plus(radius: PlottersUnit, rotation: PlottersUnit) -> Vec<Vertex> {
    let w = radius * PLUS_ARM_HALF_WIDTH;
    let r = radius;

    [
        (w, r), (-w, r), (-w, w), (-r, w), (-r, -w), (-w, -w),
        (-w, -r), (w, -r), (w, -w), (r, -w), (r, w), (w, w),
    ]
        .into_iter()
        .map(|(x, y)| rotate((x, y), rotation))
        .collect()
}

fn tri(radius: PlottersUnit, rotation: PlottersUnit) -> Vec<Vertex> {
    let center = (0.0, 0.0);
    let tips: Vec<Vertex> = regular_polygon(3, radius, rotation);

    vec![tips[0], center, tips[1], center, tips[2]]
}

fn polar(radius: PlottersUnit, angle: PlottersUnit) -> Vertex {
    (radius * angle.cos(), radius * angle.sin())
}

fn rotate(vertex: Vertex, angle: PlottersUnit) -> Vertex {
    let (sin, cos) = angle.sin_cos();

    (vertex.0 * cos - vertex.1 * sin, vertex.0 * sin + vertex.1 * cos)
}

// Backend y grows downwards.
#[allow(clippy::cast_possible_truncation)]
fn to_pixel_offset(vertex: Vertex) -> PixelOffset {
    (vertex.0.round() as i32, (-vertex.1).round() as i32)
}


#[must_use]
pub fn marker_element<'a, DB, Coord>(
    coord: Coord,
    shape: MarkerShape,
    radius: Pixel,
    color: RGBColor,
) -> DynElement<'a, DB, Coord>
where
    DB: DrawingBackend + 'a,
    Coord: Clone + 'a,
{
    let outline = shape.outline(radius);

    if shape.is_filled() {
        (EmptyElement::at(coord) + Polygon::new(outline, color.filled()))
            .into_dyn()
    } else {
        let style = color.stroke_width(TRI_STROKE_WIDTH);

        (EmptyElement::at(coord) + PathElement::new(outline, style))
            .into_dyn()
    }
}

/// Closed outline of the coverage circle in map coordinates.
#[must_use]
pub fn coverage_outline(
    coverage: &Coverage,
    segments: usize
) -> Vec<(PlottersUnit, PlottersUnit)> {
    let (center_x, center_y): (PlottersUnit, PlottersUnit) = coverage
        .center()
        .into();
    let radius = PlottersUnit::from(coverage.radius());

    let mut outline: Vec<(PlottersUnit, PlottersUnit)> = (0..segments)
        .map(|i| {
            let angle = TAU * i as PlottersUnit / segments as PlottersUnit;
            let (x, y) = polar(radius, angle);

            (center_x + x, center_y + y)
        })
        .collect();

    if let Some(first) = outline.first().copied() {
        outline.push(first);
    }

    outline
}

#[must_use]
pub fn coverage_primitive(
    coverage: &Coverage,
    color: RGBColor
) -> PathElement<(PlottersUnit, PlottersUnit)> {
    let style = color
        .mix(COVERAGE_ALPHA)
        .stroke_width(COVERAGE_STROKE_WIDTH);

    PathElement::new(coverage_outline(coverage, COVERAGE_SEGMENTS), style)
}

/// Bright, varied colors: random start hue advanced by the golden ratio,
/// high saturation and mid lightness. Distinctness is likely but not
/// guaranteed.
pub fn bright_colors<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<RGBColor> {
    let mut hue: f64 = rng.random();

    (0..count)
        .map(|_| {
            hue = (hue + GOLDEN_RATIO_CONJUGATE) % 1.0;

            let saturation = rng.random_range(0.65..0.95);
            let lightness  = rng.random_range(0.45..0.55);
            let (r, g, b)  = HSLColor(hue, saturation, lightness)
                .to_backend_color()
                .rgb;

            RGBColor(r, g, b)
        })
        .collect()
}


#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    slice_index: SliceIndex,
    label: String,
    marker: MarkerShape,
}

impl LegendEntry {
    #[must_use]
    pub fn slice_index(&self) -> SliceIndex {
        self.slice_index
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn marker(&self) -> MarkerShape {
        self.marker
    }
}

/// One entry per slice index with at least one connected client, in the
/// order the clients are listed.
#[must_use]
pub fn legend_entries(clients: &[Client]) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = Vec::new();

    for client in clients.iter().filter(|client| client.is_connected()) {
        let slice_index = client.subscribed_slice_index();

        if entries.iter().any(|entry| entry.slice_index == slice_index) {
            continue;
        }

        let label = client.slice().map_or_else(
            || format!("slice {slice_index}"),
            |slice| slice.name().to_string()
        );

        entries.push(LegendEntry {
            slice_index,
            label,
            marker: MarkerShape::for_slice(slice_index),
        });
    }

    entries
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::backend::client::{ClientBuilder, Slice};
    use crate::backend::mathphysics::Point2D;

    use super::*;


    fn client(pk: usize, slice_index: SliceIndex, name: &str) -> ClientBuilder {
        ClientBuilder::new(pk).set_slice(slice_index, Slice::new(name))
    }

    #[test]
    fn markers_are_distinct() {
        let symbols: HashSet<char> = MARKERS
            .iter()
            .map(|marker| marker.symbol())
            .collect();

        assert_eq!(16, symbols.len());
    }

    #[test]
    fn marker_wraps_around_palette() {
        assert_eq!(MarkerShape::for_slice(0), MarkerShape::for_slice(16));
        assert_eq!(MarkerShape::for_slice(3), MarkerShape::for_slice(35));
        assert_eq!(MarkerShape::TriRight, MarkerShape::for_slice(15));
        assert_ne!(MarkerShape::for_slice(15), MarkerShape::for_slice(16));
    }

    #[test]
    fn marker_outlines() {
        assert_eq!(
            vec![(3, -3), (-3, -3), (-3, 3), (3, 3)],
            MarkerShape::Square.outline(4)
        );
        assert_eq!(12, MarkerShape::PlusFilled.outline(6).len());
        assert_eq!(10, MarkerShape::Star.outline(6).len());
        assert_eq!((0, 6), MarkerShape::TriangleDown.outline(6)[0]);
        assert_eq!((0, -6), MarkerShape::TriangleUp.outline(6)[0]);
    }

    #[test]
    fn tri_markers_are_strokes_through_center() {
        let path = MarkerShape::TriUp.outline(5);

        assert!(!MarkerShape::TriUp.is_filled());
        assert!(MarkerShape::Circle.is_filled());
        assert_eq!(5, path.len());
        assert_eq!((0, 0), path[1]);
        assert_eq!((0, 0), path[3]);
    }

    #[test]
    fn coverage_outline_is_closed_circle() {
        let coverage = Coverage::build(Point2D::new(10.0, -5.0), 2.0).unwrap();
        let outline  = coverage_outline(&coverage, 8);

        assert_eq!(9, outline.len());
        assert_eq!(outline[0], outline[8]);

        for (x, y) in outline {
            let distance = ((x - 10.0).powi(2) + (y + 5.0).powi(2)).sqrt();
            assert!((distance - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn colors_are_bright() {
        let mut rng = StdRng::seed_from_u64(7);
        let colors  = bright_colors(12, &mut rng);

        assert_eq!(12, colors.len());

        for RGBColor(r, g, b) in colors {
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);

            assert!(max >= 180, "{r} {g} {b}");
            assert!(max - min >= 120, "{r} {g} {b}");
        }
    }

    #[test]
    fn seeded_colors_repeat() {
        let first  = bright_colors(3, &mut StdRng::seed_from_u64(1));
        let second = bright_colors(3, &mut StdRng::seed_from_u64(1));

        assert_eq!(first, second);
    }

    #[test]
    fn legend_has_one_entry_per_connected_slice() {
        let clients = vec![
            client(1, 0, "iot").build(),
            client(2, 1, "data").set_base_station(1).build(),
            client(3, 0, "iot").set_base_station(2).build(),
            client(4, 1, "data").set_base_station(2).build(),
            client(5, 2, "video").build(),
        ];

        let entries = legend_entries(&clients);
        let labels: Vec<&str> = entries.iter().map(LegendEntry::label).collect();

        assert_eq!(vec!["data", "iot"], labels);
        assert_eq!(1, entries[0].slice_index());
        assert_eq!(MarkerShape::Square, entries[0].marker());
    }

    #[test]
    fn legend_label_falls_back_to_slice_index() {
        let clients = vec![
            ClientBuilder::new(1)
                .set_subscribed_slice_index(17)
                .set_base_station(0)
                .build()
        ];

        let entries = legend_entries(&clients);

        assert_eq!("slice 17", entries[0].label());
        assert_eq!(MarkerShape::Square, entries[0].marker());
    }
}
