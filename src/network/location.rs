use crate::writer::fmt2;
use xml::writer::{EventWriter, XmlEvent};

/// The coordinate-offset preamble emitted when the source carried a geodetic
/// reference: the translation that anchored the network at (0,0), the
/// boundaries before and after, and the PROJ string.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub net_offset: (f64, f64),
    /// Boundary after the offset: `(x_min, y_min, x_max, y_max)` = `(0, 0, w, h)`
    pub conv_boundary: (f64, f64, f64, f64),
    /// Boundary in the source frame
    pub orig_boundary: (f64, f64, f64, f64),
    pub proj_parameter: String,
}

impl Location {
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut EventWriter<W>,
    ) -> xml::writer::Result<()> {
        let net_offset = format!(
            "{},{}",
            fmt2(self.net_offset.0),
            fmt2(self.net_offset.1)
        );
        let conv_boundary = fmt_boundary(self.conv_boundary);
        let orig_boundary = fmt_boundary(self.orig_boundary);

        writer.write(
            XmlEvent::start_element("location")
                .attr("netOffset", &net_offset)
                .attr("convBoundary", &conv_boundary)
                .attr("origBoundary", &orig_boundary)
                .attr("projParameter", &self.proj_parameter),
        )?;
        writer.write(XmlEvent::end_element())
    }
}

fn fmt_boundary((a, b, c, d): (f64, f64, f64, f64)) -> String {
    format!("{},{},{},{}", fmt2(a), fmt2(b), fmt2(c), fmt2(d))
}
