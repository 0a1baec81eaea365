use serde::{Deserialize, Serialize};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Path, Rectangle, Text, Title};
use topos::geometry::primitives::{Point, SPolygon};
use topos::placement::{Arrangement, Borders};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    #[serde(default)]
    pub theme: SvgLayoutThemes,
    /// Draws the bounding box of the arrangement
    #[serde(default = "default_true")]
    pub borders: bool,
    /// Draws the strip, from the left border up to the container width
    #[serde(default = "default_true")]
    pub strip: bool,
    /// Labels every item with its index in the instance
    #[serde(default)]
    pub item_labels: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutThemes::default(),
            borders: true,
            strip: true,
            item_labels: false,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize, Default)]
pub enum SvgLayoutThemes {
    #[default]
    EarthTones,
    Gray,
}

impl SvgLayoutThemes {
    pub fn theme(&self) -> SvgLayoutTheme {
        match self {
            SvgLayoutThemes::EarthTones => EARTH_TONES_THEME,
            SvgLayoutThemes::Gray => GRAY_THEME,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub strip_fill: &'static str,
    pub item_fill: &'static str,
    pub border_stroke: &'static str,
}

pub static EARTH_TONES_THEME: SvgLayoutTheme = SvgLayoutTheme {
    stroke_width_multiplier: 2.0,
    strip_fill: "#CC824A",
    item_fill: "#FFC879",
    border_stroke: "#2D2D2D",
};

pub static GRAY_THEME: SvgLayoutTheme = SvgLayoutTheme {
    stroke_width_multiplier: 2.5,
    strip_fill: "#D3D3D3",
    item_fill: "#7A7A7A",
    border_stroke: "#000000",
};

/// Draws the arrangement with the y-axis pointing up.
pub fn arrangement_to_svg(
    arrangement: &Arrangement,
    container_width: f64,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let theme = options.theme.theme();
    let borders = arrangement.borders;
    let flip = |p: Point| (p.0, borders.top + borders.bottom - p.1);

    let x_max = f64::max(borders.right, borders.left + container_width);
    let margin = 0.025 * f64::max(x_max - borders.left, borders.height());
    let vbox = (
        borders.left - margin,
        borders.bottom - margin,
        x_max - borders.left + 2.0 * margin,
        borders.height() + 2.0 * margin,
    );
    let stroke_width = f64::min(vbox.2, vbox.3) * 0.001 * theme.stroke_width_multiplier;

    let strip_group = match options.strip {
        false => None,
        true => Some(
            Group::new().set("id", "strip").add(
                Rectangle::new()
                    .set("x", borders.left)
                    .set("y", borders.bottom)
                    .set("width", container_width)
                    .set("height", borders.height())
                    .set("fill", theme.strip_fill)
                    .set("fill-opacity", "0.5")
                    .add(Title::new(format!("strip, width: {container_width:.3}"))),
            ),
        ),
    };

    let items_group = arrangement
        .placed
        .iter()
        .fold(Group::new().set("id", "items"), |group, pp| {
            let mut item = Group::new().set("id", format!("item_{}", pp.index)).add(
                data_to_path(
                    simple_polygon_data(&pp.shape, flip),
                    &[
                        ("fill", theme.item_fill),
                        ("stroke-width", &*format!("{stroke_width}")),
                        ("fill-rule", "nonzero"),
                        ("stroke", "black"),
                        ("opacity", "0.9"),
                    ],
                )
                .add(Title::new(format!(
                    "item, index: {}, translation: ({:.3}, {:.3})",
                    pp.index, pp.translation.0, pp.translation.1
                ))),
            );
            if options.item_labels {
                let (x, y) = flip(pp.shape.bbox.centroid());
                item = item.add(
                    Text::new(format!("{}", pp.index))
                        .set("x", x)
                        .set("y", y)
                        .set("font-size", 0.5 * f64::min(pp.shape.bbox.width(), pp.shape.bbox.height()))
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle"),
                );
            }
            group.add(item)
        });

    let borders_group = match options.borders {
        false => None,
        true => Some(borders_rect(&borders, theme, stroke_width)),
    };

    let document = Document::new()
        .set("viewBox", vbox)
        .set("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .add(Title::new(title));

    [strip_group, Some(items_group), borders_group]
        .into_iter()
        .flatten()
        .fold(document, |doc, g| doc.add(g))
}

fn borders_rect(borders: &Borders, theme: SvgLayoutTheme, stroke_width: f64) -> Group {
    Group::new().set("id", "borders").add(
        Rectangle::new()
            .set("x", borders.left)
            .set("y", borders.bottom)
            .set("width", borders.width())
            .set("height", borders.height())
            .set("fill", "none")
            .set("stroke", theme.border_stroke)
            .set("stroke-width", 2.0 * stroke_width)
            .set("stroke-dasharray", 5.0 * stroke_width)
            .add(Title::new(format!(
                "borders, [left: {:.3}, right: {:.3}, bottom: {:.3}, top: {:.3}]",
                borders.left, borders.right, borders.bottom, borders.top
            ))),
    )
}

pub fn simple_polygon_data(s_poly: &SPolygon, map: impl Fn(Point) -> (f64, f64)) -> Data {
    let mut data = Data::new().move_to(map(s_poly.vertex(0)));
    for i in 1..s_poly.n_vertices() {
        data = data.line_to(map(s_poly.vertex(i)));
    }
    data.close()
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}
