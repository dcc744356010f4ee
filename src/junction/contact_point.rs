/// Which end of a connecting road meets the incoming road. `End` means the
/// connecting road is traversed against its reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPoint {
    Start,
    End,
}

string_enum!(ContactPoint {
    Start => "start",
    End => "end",
});
