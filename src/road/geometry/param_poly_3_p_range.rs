#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamPoly3pRange {
    ArcLength,
    Normalized,
}

string_enum!(ParamPoly3pRange {
    ArcLength => "arcLength",
    Normalized => "normalized",
});
