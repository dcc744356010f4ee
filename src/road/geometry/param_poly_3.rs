use crate::road::geometry::param_poly_3_p_range::ParamPoly3pRange;

/// A parametric cubic segment: two cubics in a shared parameter `p` give the
/// local `(u, v)` coordinates relative to the segment frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamPoly3 {
    /// Polynom parameter a for u
    pub a_u: f64,
    /// Polynom parameter a for v
    pub a_v: f64,
    /// Polynom parameter b for u
    pub b_u: f64,
    /// Polynom parameter b for v
    pub b_v: f64,
    /// Polynom parameter c for u
    pub c_u: f64,
    /// Polynom parameter c for v
    pub c_v: f64,
    /// Polynom parameter d for u
    pub d_u: f64,
    /// Polynom parameter d for v
    pub d_v: f64,
    /// Range of parameter p.
    ///   * Case arcLength: p in [0, @length of `<geometry>`]
    ///   * Case normalized: p in [0, 1]
    pub p_range: ParamPoly3pRange,
}

impl<'a, I> TryFrom<crate::parser::ElementReader<'a, I>> for ParamPoly3
where
    I: Iterator<Item = xml::reader::Result<xml::reader::XmlEvent>>,
{
    type Error = crate::parser::Error;

    fn try_from(read: crate::parser::ElementReader<'a, I>) -> Result<Self, Self::Error> {
        Ok(Self {
            a_u: read.attribute("aU")?,
            a_v: read.attribute("aV")?,
            b_u: read.attribute("bU")?,
            b_v: read.attribute("bV")?,
            c_u: read.attribute("cU")?,
            c_v: read.attribute("cV")?,
            d_u: read.attribute("dU")?,
            d_v: read.attribute("dV")?,
            p_range: read
                .attribute_opt("pRange")?
                .unwrap_or(ParamPoly3pRange::Normalized),
        })
    }
}
