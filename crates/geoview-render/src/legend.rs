//! Legend markup for the classification ids visible in a frame.

use std::fmt::Write;

use geoview_core::Palette;

use crate::compositor::{ViewMode, Visibility};

/// Builds the HTML legend table for one composited frame: a colored chip per
/// visible palette entry, in ascending palette order, three chips per row.
#[must_use]
pub fn build_legend(visibility: &Visibility, palette: &Palette, mode: ViewMode) -> String {
    let mut text = String::from("<table>\n <tr>");
    let mut included = 0usize;

    for id in visibility.visible_ids() {
        let Some(rgb) = palette.color(id) else {
            continue;
        };
        if included % 3 == 0 && included > 0 {
            text.push_str(" </tr>\n<tr>");
        }
        let _ = writeln!(
            text,
            "<th style=\"color:rgb({},{},{})\"> {} {} </th>",
            rgb[0],
            rgb[1],
            rgb[2],
            mode.label(),
            id
        );
        included += 1;
    }

    text.push_str(" </tr>\n</table>");
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::recolor;
    use geoview_core::FrameBuffers;

    #[test]
    fn test_single_chip() {
        let mut buffers = FrameBuffers::new();
        buffers.resize(2, 2);
        let mut palette = Palette::default();
        palette.set_color(5, [10, 20, 30]);
        buffers.material[..4].fill(5);

        let visibility = recolor(&mut buffers, &palette, ViewMode::Material, false, None);
        let legend = build_legend(&visibility, &palette, ViewMode::Material);

        assert!(legend.contains("Material 5"));
        assert!(legend.contains("color:rgb(10,20,30)"));
        assert_eq!(legend.matches("<th").count(), 1);
    }

    #[test]
    fn test_rows_of_three() {
        let mut buffers = FrameBuffers::new();
        buffers.resize(4, 1);
        let palette = Palette::default();
        buffers.body[..4].copy_from_slice(&[0, 1, 2, 3]);

        let visibility = recolor(&mut buffers, &palette, ViewMode::Body, false, None);
        let legend = build_legend(&visibility, &palette, ViewMode::Body);

        assert_eq!(legend.matches("<th").count(), 4);
        // Four chips wrap onto a second row after the third
        assert_eq!(legend.matches("<tr>").count(), 2);
        assert!(legend.contains("Body 0"));
        assert!(legend.contains("Body 3"));
    }

    #[test]
    fn test_empty_frame() {
        let visibility = Visibility::default();
        let legend = build_legend(&visibility, &Palette::default(), ViewMode::Material);
        assert_eq!(legend, "<table>\n <tr> </tr>\n</table>");
    }
}
