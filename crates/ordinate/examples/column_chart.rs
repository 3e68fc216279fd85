//! Column chart with a hovered point, printed as SVG.
//!
//! Run with `RUST_LOG=debug` to see the draw passes.

use std::rc::Rc;
use std::time::Duration;

use ordinate::chart::{LayerId, VectorPath};
use ordinate::logging;
use ordinate::prelude::*;

struct SvgSurface {
    out: String,
}

impl VectorSurface for SvgSurface {
    fn draw_path(&mut self, _layer: LayerId, shape: &VectorPath) {
        let fill = shape.fill.color().map_or("none".to_string(), |c| c.to_hex_string());
        let stroke = shape
            .stroke
            .map_or("none".to_string(), |s| format!("{}\" stroke-width=\"{}", s.color.to_hex_string(), s.width));
        self.out.push_str(&format!(
            "  <path d=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\"/>\n",
            shape.path.to_svg_data()
        ));
    }
}

fn main() {
    logging::init();

    let mut chart = Chart::new(Rect::new(0.0, 0.0, 640.0, 480.0));
    let x = Rc::new(OrdinalScale::new(["Q1", "Q2", "Q3", "Q4"]));
    let y = Rc::new(LinearScale::new(0.0, 100.0));
    let data = DataSet::from_values(&[Some(42.0), Some(67.0), None, Some(88.0)]);

    let mut series = Series::new(DrawerType::Column, data, x, y).with_name("revenue");
    if let Err(err) = series.set_animation(AnimationSettings::enabled(0.5)) {
        tracing::error!("{err}");
        return;
    }
    let id = chart.add_series(series);

    let mut clock = AnimationClock::new();
    while clock.drive(&mut chart) {
        clock.advance(Duration::from_millis(16));
    }
    chart.point(id, 1).hover(true);

    let mut surface = SvgSurface { out: String::new() };
    chart.render(&mut surface);
    println!("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"640\" height=\"480\">");
    print!("{}", surface.out);
    println!("</svg>");
}
